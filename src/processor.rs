use borsh::{to_vec, BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_option::COption,
    program_pack::*,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction::{create_account, transfer as pay},
    sysvar::Sysvar,
};
use spl_token::{
    check_program_account,
    instruction::transfer,
    state::{Account, Mint},
};

use crate::{
    error::MarketError,
    instruction::{Args, MarketInstruction},
    state::{Market, MarketItem, Role},
};

pub fn instruction_processor(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let (instruction, args) = MarketInstruction::unpack(instruction_data)?;

    Ok(match instruction {
        MarketInstruction::Initialize => initialize(program_id, accounts, args)?,
        MarketInstruction::GrantRole => grant_role(program_id, accounts, args)?,
        MarketInstruction::List => list(program_id, accounts, args)?,
        MarketInstruction::Buy => buy(program_id, accounts)?,
    })
}

fn initialize(program_id: &Pubkey, accounts: &[AccountInfo], args: Args) -> ProgramResult {
    // Create an iterator to safely reference accounts in the slice
    let accounts_info_iter = &mut accounts.iter();

    let authority = next_account_info(accounts_info_iter)?; // 1.
    let market = next_account_info(accounts_info_iter)?; // 2.
    let _sys_program = next_account_info(accounts_info_iter)?; // 3.

    if !authority.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (market_addr, _) = crate::find_market_address();
    if *market.key != market_addr {
        return Err(MarketError::InvalidDerivedAccount.into());
    }

    let market_bump = args.bump.ok_or(ProgramError::InvalidInstructionData)?;

    let market_data = Market {
        authority: *authority.key,
        items: 0,
    };

    let space = to_vec(&market_data).unwrap().len();
    let rent_lamports = Rent::get()?.minimum_balance(space);

    invoke_signed(
        &create_account(
            authority.key,
            market.key,
            rent_lamports,
            space.try_into().unwrap(),
            program_id,
        ),
        &[authority.clone(), market.clone()],
        &[&[crate::MARKET_SEED, &[market_bump]]],
    )?;

    market_data.serialize(&mut *market.data.borrow_mut())?;

    msg!(
        "Market initialized at {} with authority {}",
        market.key,
        authority.key
    );

    Ok(())
}

fn grant_role(program_id: &Pubkey, accounts: &[AccountInfo], args: Args) -> ProgramResult {
    // Create an iterator to safely reference accounts in the slice
    let accounts_info_iter = &mut accounts.iter();

    let authority = next_account_info(accounts_info_iter)?; // 1.
    let market = next_account_info(accounts_info_iter)?; // 2.
    let member = next_account_info(accounts_info_iter)?; // 3.
    let role = next_account_info(accounts_info_iter)?; // 4.
    let _sys_program = next_account_info(accounts_info_iter)?; // 5.

    if !authority.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    if market.owner != program_id {
        return Err(ProgramError::IllegalOwner);
    }

    let market_data = Market::try_from_slice(*market.data.borrow())?;
    if market_data.authority != *authority.key {
        return Err(MarketError::Unauthorized.into());
    }

    let (role_addr, _) = crate::find_role_address(member.key);
    if *role.key != role_addr {
        return Err(MarketError::InvalidDerivedAccount.into());
    }

    let role_bump = args.bump.ok_or(ProgramError::InvalidInstructionData)?;

    let role_data = Role {
        member: *member.key,
    };

    let space = to_vec(&role_data).unwrap().len();
    let rent_lamports = Rent::get()?.minimum_balance(space);

    invoke_signed(
        &create_account(
            authority.key,
            role.key,
            rent_lamports,
            space.try_into().unwrap(),
            program_id,
        ),
        &[authority.clone(), role.clone()],
        &[&[
            crate::ROLE_SEED,
            &member.key.to_bytes(),
            &[role_bump],
        ]],
    )?;

    role_data.serialize(&mut *role.data.borrow_mut())?;

    msg!("Seller role granted to {}", member.key);

    Ok(())
}

fn list(program_id: &Pubkey, accounts: &[AccountInfo], args: Args) -> ProgramResult {
    // Create an iterator to safely reference accounts in the slice
    let accounts_info_iter = &mut accounts.iter();

    let seller = next_account_info(accounts_info_iter)?; // 1.
    let role = next_account_info(accounts_info_iter)?; // 2.
    let market = next_account_info(accounts_info_iter)?; // 3.
    let mint = next_account_info(accounts_info_iter)?; // 4.
    let seller_item_wallet = next_account_info(accounts_info_iter)?; // 5.
    let vault_item_wallet = next_account_info(accounts_info_iter)?; // 6.
    let item = next_account_info(accounts_info_iter)?; // 7.
    let spl_token = next_account_info(accounts_info_iter)?; // 8.
    let _sys_program = next_account_info(accounts_info_iter)?; // 9.

    if !seller.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    check_program_account(mint.owner)?;
    check_program_account(seller_item_wallet.owner)?;
    check_program_account(vault_item_wallet.owner)?;

    // Listing is gated on the seller role
    if {
        let (role_addr, _) = crate::find_role_address(seller.key);
        role.owner != program_id || *role.key != role_addr
    } {
        return Err(MarketError::MissingRole.into());
    }
    if Role::try_from_slice(*role.data.borrow())?.member != *seller.key {
        return Err(MarketError::MissingRole.into());
    }

    if market.owner != program_id {
        return Err(ProgramError::IllegalOwner);
    }

    let price = args.price.unwrap_or(0);
    if price == 0 {
        return Err(MarketError::InvalidPrice.into());
    }

    // Validate non-fungible-token
    if {
        let data = Mint::unpack(*mint.data.borrow())?;
        data.mint_authority != COption::None
            || data.supply != 1
            || !data.is_initialized
            || data.decimals != 0
    } {
        return Err(ProgramError::InvalidAccountData);
    }

    let (market_addr, market_bump) = crate::find_market_address();

    // The seller must have approved the market over the token beforehand
    {
        let data = Account::unpack(*seller_item_wallet.data.borrow())?;
        if data.owner != *seller.key || data.mint != *mint.key || data.amount != 1 {
            return Err(ProgramError::InvalidAccountData);
        }
        if data.delegate != COption::Some(market_addr) || data.delegated_amount < 1 {
            return Err(MarketError::DelegateNotApproved.into());
        }
    }

    let mut market_data = Market::try_from_slice(*market.data.borrow())?;
    let item_id = market_data
        .items
        .checked_add(1)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    let (item_addr, _) = crate::find_item_address(item_id);
    if *item.key != item_addr {
        return Err(MarketError::InvalidDerivedAccount.into());
    }

    // Verify the vault the token lands in
    if {
        let data = Account::unpack(*vault_item_wallet.data.borrow())?;
        data.owner != item_addr || data.mint != *mint.key || !data.is_initialized()
    } {
        return Err(ProgramError::InvalidAccountData);
    }

    msg!("Listing mint {} for {} lamports...", mint.key, price);

    // Pull the token into the vault, acting as the approved delegate
    invoke_signed(
        &transfer(
            spl_token.key,
            seller_item_wallet.key,
            vault_item_wallet.key,
            &market_addr,
            &[],
            1,
        )?,
        &[
            seller_item_wallet.clone(),
            vault_item_wallet.clone(),
            market.clone(),
        ],
        &[&[crate::MARKET_SEED, &[market_bump]]],
    )?;

    let item_bump = args.bump.ok_or(ProgramError::InvalidInstructionData)?;

    let item_data = MarketItem {
        item_id,
        mint: *mint.key,
        seller: *seller.key,
        price,
    };

    let space = to_vec(&item_data).unwrap().len();
    let rent_lamports = Rent::get()?.minimum_balance(space);

    invoke_signed(
        &create_account(
            seller.key,
            item.key,
            rent_lamports,
            space.try_into().unwrap(),
            program_id,
        ),
        &[seller.clone(), item.clone()],
        &[&[
            crate::ITEM_SEED,
            &item_id.to_le_bytes(),
            &[item_bump],
        ]],
    )?;

    item_data.serialize(&mut *item.data.borrow_mut())?;

    market_data.items = item_id;
    market_data.serialize(&mut *market.data.borrow_mut())?;

    msg!("Market item {} created at {}", item_id, item.key);

    Ok(())
}

fn buy(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    // Create an iterator to safely reference accounts in the slice
    let accounts_info_iter = &mut accounts.iter();

    let buyer = next_account_info(accounts_info_iter)?; // 1.
    let seller = next_account_info(accounts_info_iter)?; // 2.
    let item = next_account_info(accounts_info_iter)?; // 3.
    let vault_item_wallet = next_account_info(accounts_info_iter)?; // 4.
    let buyer_item_wallet = next_account_info(accounts_info_iter)?; // 5.
    let spl_token = next_account_info(accounts_info_iter)?; // 6.
    let _sys_program = next_account_info(accounts_info_iter)?; // 7.

    if !buyer.is_signer {
        return Err(ProgramError::MissingRequiredSignature);
    }

    if item.owner != program_id {
        return Err(ProgramError::IllegalOwner);
    }

    let item_data = MarketItem::try_from_slice(*item.data.borrow())?;

    if *seller.key != item_data.seller {
        return Err(ProgramError::InvalidAccountData);
    }

    let (item_addr, item_bump) = crate::find_item_address(item_data.item_id);

    // The vault must be the item's own wallet holding the listed mint
    if {
        let data = Account::unpack(*vault_item_wallet.data.borrow())?;
        data.owner != item_addr || data.mint != item_data.mint
    } {
        return Err(ProgramError::InvalidAccountData);
    }

    // Pay the seller
    invoke(
        &pay(buyer.key, seller.key, item_data.price),
        &[buyer.clone(), seller.clone()],
    )?;

    // Release the token from the vault to the buyer
    invoke_signed(
        &transfer(
            spl_token.key,
            vault_item_wallet.key,
            buyer_item_wallet.key,
            &item_addr,
            &[],
            1,
        )?,
        &[
            vault_item_wallet.clone(),
            buyer_item_wallet.clone(),
            item.clone(),
        ],
        &[&[
            crate::ITEM_SEED,
            &item_data.item_id.to_le_bytes(),
            &[item_bump],
        ]],
    )?;

    // Destroy the listing, refunding rent to the buyer
    let item_lamports = item.lamports();

    **buyer.lamports.borrow_mut() = buyer.lamports().checked_add(item_lamports).unwrap();
    **item.lamports.borrow_mut() = 0;

    item.data.borrow_mut().fill(0);

    msg!("Item {} sold to {}", item_data.item_id, buyer.key);

    Ok(())
}
