use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Operation is not valid for the current pool state")]
    BadState,

    #[msg("Deposit amount is below the pool's minimum investment")]
    BelowMinimum,

    #[msg("Deposit would exceed the pool size")]
    CapExceeded,

    #[msg("Funds are locked until the cooldown period has elapsed")]
    FundsLocked,

    #[msg("Insufficient undrawn liquidity in the pool")]
    InsufficientLiquidity,

    #[msg("Address must not be the zero address")]
    ZeroAddress,

    #[msg("Unauthorized: signer lacks the required capability")]
    NotAuthorized,

    #[msg("Signer is not an approved pool delegate")]
    NotAllowListed,

    #[msg("Protocol is paused")]
    ProtocolPaused,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Withdrawal exceeds the investor's shares")]
    InsufficientShares,

    #[msg("Claim exceeds the investor's withdrawable interest")]
    InsufficientInterest,

    #[msg("No interest available to withdraw")]
    NoInterestAvailable,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Pool factory is paused")]
    FactoryPaused,

    #[msg("Pool factory is not approved by the registry")]
    InvalidFactory,

    #[msg("Sub-factory is not approved for this factory")]
    InvalidSubFactory,

    #[msg("Liquidity asset is not approved")]
    AssetNotApproved,

    #[msg("Pool id must be between 1 and 32 bytes")]
    InvalidPoolId,

    #[msg("Invalid pool terms")]
    InvalidPoolTerms,

    #[msg("Allow-list is full")]
    AllowListFull,

    #[msg("Token mint does not match pool's asset")]
    MintMismatch,

    #[msg("Vault account does not match the pool's locker")]
    InvalidVault,

    #[msg("Registry account does not match the pool's factory")]
    InvalidGlobals,
}
