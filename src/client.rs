#![cfg(feature = "client")]

//! Off-chain plumbing for the deployment binary: cluster configuration read
//! from the environment and explorer link formatting.

use std::{env, error::Error, path::PathBuf};

pub const CLUSTER_ENV: &str = "NFT_MARKET_CLUSTER";
pub const RPC_URL_ENV: &str = "NFT_MARKET_RPC_URL";
pub const KEYPAIR_ENV: &str = "NFT_MARKET_KEYPAIR";

pub const DEFAULT_CLUSTER: &str = "devnet";
pub const DEFAULT_KEYPAIR_PATH: &str = "wallet.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cluster moniker, used for explorer links
    pub cluster: String,
    /// RPC endpoint the client talks to
    pub rpc_url: String,
    /// Path to the payer keypair JSON file
    pub keypair_path: PathBuf,
}

impl ClientConfig {
    /// Reads the configuration from the environment. An explicit RPC URL
    /// overrides the cluster moniker; an unknown moniker without an
    /// override is a configuration error.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let cluster = env::var(CLUSTER_ENV).unwrap_or_else(|_| DEFAULT_CLUSTER.to_string());

        let rpc_url = match env::var(RPC_URL_ENV) {
            Ok(url) => url,
            Err(_) => cluster_rpc_url(&cluster)
                .ok_or_else(|| format!("unknown cluster '{cluster}', set {RPC_URL_ENV}"))?
                .to_string(),
        };

        let keypair_path = env::var(KEYPAIR_ENV)
            .unwrap_or_else(|_| DEFAULT_KEYPAIR_PATH.to_string())
            .into();

        Ok(Self {
            cluster,
            rpc_url,
            keypair_path,
        })
    }
}

pub fn cluster_rpc_url(cluster: &str) -> Option<&'static str> {
    match cluster {
        "mainnet-beta" => Some("https://api.mainnet-beta.solana.com"),
        "devnet" => Some("https://api.devnet.solana.com"),
        "testnet" => Some("https://api.testnet.solana.com"),
        "localnet" => Some("http://127.0.0.1:8899"),
        _ => None,
    }
}

pub fn explorer_tx_url(signature: &str, cluster: &str) -> String {
    match cluster {
        "mainnet-beta" => format!("https://explorer.solana.com/tx/{signature}"),
        "localnet" => format!("https://explorer.solana.com/tx/{signature}?cluster=custom"),
        _ => format!("https://explorer.solana.com/tx/{signature}?cluster={cluster}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn known_clusters_resolve() {
        assert_eq!(
            cluster_rpc_url("devnet"),
            Some("https://api.devnet.solana.com")
        );
        assert_eq!(
            cluster_rpc_url("mainnet-beta"),
            Some("https://api.mainnet-beta.solana.com")
        );
        assert_eq!(cluster_rpc_url("mumbai"), None);
    }

    #[test]
    fn explorer_links_carry_the_cluster() {
        assert_eq!(
            explorer_tx_url("5igsig", "devnet"),
            "https://explorer.solana.com/tx/5igsig?cluster=devnet"
        );
        assert_eq!(
            explorer_tx_url("5igsig", "mainnet-beta"),
            "https://explorer.solana.com/tx/5igsig"
        );
    }
}
