use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// The signer is not the market authority
    #[error("Caller is not the market authority")]
    Unauthorized,
    /// The seller has no role grant
    #[error("Seller was not granted the seller role")]
    MissingRole,
    /// Listings must carry a nonzero price
    #[error("Listing price must be greater than zero")]
    InvalidPrice,
    /// The market was not approved as delegate over the seller's token
    #[error("Market is not the delegate of the seller token account")]
    DelegateNotApproved,
    /// An account does not match the expected program-derived address
    #[error("Account does not match the derived address")]
    InvalidDerivedAccount,
}

impl From<MarketError> for ProgramError {
    fn from(e: MarketError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
