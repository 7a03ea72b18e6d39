use solana_program::pubkey::Pubkey;

pub mod client;
pub mod entrypoint;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

solana_program::declare_id!("4mgMZmcKv2dmFzVhAy9tBLQU3AJACYixWrSwGP1mFY5m");

pub const MARKET_SEED: &[u8] = b"market";
pub const ROLE_SEED: &[u8] = b"role";
pub const ITEM_SEED: &[u8] = b"item";

pub fn find_market_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MARKET_SEED], &id())
}

pub fn find_role_address(member: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROLE_SEED, &member.to_bytes()], &id())
}

pub fn find_item_address(item_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ITEM_SEED, &item_id.to_le_bytes()], &id())
}
