use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Deposits are halted while the pool is paused")]
    DepositsHalted,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Operation not allowed in the current pool mode")]
    InvalidState,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid pool configuration")]
    InvalidConfig,

    #[msg("Invalid stablecoin index")]
    InvalidTokenIndex,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid oracle price")]
    InvalidPrice,

    #[msg("Output below the requested minimum")]
    SlippageExceeded,

    #[msg("Junior/senior utilisation limit exceeded")]
    UtilisationLimitExceeded,

    #[msg("Whitelist is full")]
    WhitelistFull,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Ledger invariant violation - critical accounting error")]
    InvariantViolation,
}

pub type PoolResult<T> = std::result::Result<T, PoolError>;
