use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::get_associated_token_address;

#[derive(Debug, PartialEq)]
pub enum MarketInstruction {
    Initialize,
    GrantRole,
    List,
    Buy,
}

impl MarketInstruction {
    pub fn unpack(instruction_data: &[u8]) -> Result<(Self, Args), ProgramError> {
        let payload = Payload::try_from_slice(instruction_data)?;

        let instruction = match payload.instruction {
            0 => Self::Initialize,
            1 => Self::GrantRole,
            2 => Self::List,
            3 => Self::Buy,
            _ => return Err(ProgramError::InvalidInstructionData),
        };

        Ok((instruction, payload.args))
    }
}

#[derive(BorshDeserialize, BorshSerialize, Debug)]
pub struct Payload {
    pub instruction: u8,
    pub args: Args,
}

#[derive(BorshSerialize, BorshDeserialize, PartialEq, Clone, Copy, Debug)]
pub struct Args {
    // Asking price in lamports
    pub price: Option<u64>,
    // Bump of the PDA the instruction creates
    pub bump: Option<u8>,
}

pub fn initialize(authority: &Pubkey) -> Instruction {
    let (market_addr, market_bump) = crate::find_market_address();

    Instruction::new_with_borsh(
        crate::id(),
        &Payload {
            instruction: 0, // Initialize
            args: Args {
                price: None,
                bump: Some(market_bump),
            },
        },
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(market_addr, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

pub fn grant_role(authority: &Pubkey, member: &Pubkey) -> Instruction {
    let (market_addr, _) = crate::find_market_address();
    let (role_addr, role_bump) = crate::find_role_address(member);

    Instruction::new_with_borsh(
        crate::id(),
        &Payload {
            instruction: 1, // GrantRole
            args: Args {
                price: None,
                bump: Some(role_bump),
            },
        },
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(market_addr, false),
            AccountMeta::new_readonly(*member, false),
            AccountMeta::new(role_addr, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// `item_id` must be the id the market will assign, i.e. its current item
/// count plus one. The vault token account for the item PDA has to exist
/// before this instruction runs.
pub fn list(seller: &Pubkey, mint: &Pubkey, item_id: u64, price: u64) -> Instruction {
    let (market_addr, _) = crate::find_market_address();
    let (role_addr, _) = crate::find_role_address(seller);
    let (item_addr, item_bump) = crate::find_item_address(item_id);

    let seller_item_wallet = get_associated_token_address(seller, mint);
    let vault_item_wallet = get_associated_token_address(&item_addr, mint);

    Instruction::new_with_borsh(
        crate::id(),
        &Payload {
            instruction: 2, // List
            args: Args {
                price: Some(price),
                bump: Some(item_bump),
            },
        },
        vec![
            AccountMeta::new(*seller, true),
            AccountMeta::new_readonly(role_addr, false),
            AccountMeta::new(market_addr, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(seller_item_wallet, false),
            AccountMeta::new(vault_item_wallet, false),
            AccountMeta::new(item_addr, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

pub fn buy(buyer: &Pubkey, seller: &Pubkey, mint: &Pubkey, item_id: u64) -> Instruction {
    let (item_addr, _) = crate::find_item_address(item_id);

    let vault_item_wallet = get_associated_token_address(&item_addr, mint);
    let buyer_item_wallet = get_associated_token_address(buyer, mint);

    Instruction::new_with_borsh(
        crate::id(),
        &Payload {
            instruction: 3, // Buy
            args: Args {
                price: None,
                bump: None,
            },
        },
        vec![
            AccountMeta::new(*buyer, true),
            AccountMeta::new(*seller, false),
            AccountMeta::new(item_addr, false),
            AccountMeta::new(vault_item_wallet, false),
            AccountMeta::new(buyer_item_wallet, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}
