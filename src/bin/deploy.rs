//! One-shot deployment script: initializes the market account on the
//! configured cluster and prints the addresses clients need.

use std::{error::Error, process};

use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    bpf_loader_upgradeable, commitment_config::CommitmentConfig,
    signature::read_keypair_file, signer::Signer, transaction::Transaction,
};

use nftmarket::client::{explorer_tx_url, ClientConfig};

fn run() -> Result<(), Box<dyn Error>> {
    let config = ClientConfig::from_env()?;

    let payer = read_keypair_file(&config.keypair_path)
        .map_err(|e| format!("cannot read keypair {}: {e}", config.keypair_path.display()))?;

    let client =
        RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    let blockhash = client.get_latest_blockhash()?;
    let transaction = Transaction::new_signed_with_payer(
        &[nftmarket::instruction::initialize(&payer.pubkey())],
        Some(&payer.pubkey()),
        &[&payer],
        blockhash,
    );
    let signature = client.send_and_confirm_transaction(&transaction)?;

    let (market_addr, _) = nftmarket::find_market_address();
    let program_data_addr = bpf_loader_upgradeable::get_program_data_address(&nftmarket::id());

    println!("Market address: {market_addr}");
    println!("Current implementation address: {program_data_addr}");
    println!("Admin: {}", payer.pubkey());
    println!(
        "Deploy transaction: {}",
        explorer_tx_url(&signature.to_string(), &config.cluster)
    );

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}
