use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Singleton marketplace account. Its address never changes across program
/// upgrades, so it is the address clients hold on to.
#[derive(Debug, BorshDeserialize, BorshSerialize)]
pub struct Market {
    /// Account allowed to grant seller roles
    pub authority: Pubkey,
    /// Number of items ever listed; the next item gets id `items + 1`
    pub items: u64,
}

/// Seller role grant. The account existing at the role PDA is the grant
/// itself; `member` is kept for cross-checking against the seeds.
#[derive(Debug, BorshDeserialize, BorshSerialize)]
pub struct Role {
    pub member: Pubkey,
}

/// A live listing, created by List and destroyed by Buy.
#[derive(Debug, BorshDeserialize, BorshSerialize)]
pub struct MarketItem {
    /// Sequential listing id, starting at 1
    pub item_id: u64,
    /// Mint of the token on sale
    pub mint: Pubkey,
    /// Seller address, also the payment destination
    pub seller: Pubkey,
    /// Asking price in lamports
    pub price: u64,
}
