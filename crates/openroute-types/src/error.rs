//! Error types for the OpenRoute settlement engine.
//!
//! All errors use the `OR_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Venue / registry errors
//! - 2xx: Ledger / balance errors
//! - 3xx: Settlement amount errors
//! - 4xx: Permit errors
//! - 6xx: Fee collection errors
//! - 9xx: General / internal errors
//!
//! Every error aborts the entire settlement call; none are caught and
//! retried internally.

use thiserror::Error;

use crate::Address;

/// Central error enum for all OpenRoute operations.
#[derive(Debug, Error)]
pub enum OpenrouteError {
    // =================================================================
    // Venue / Registry Errors (1xx)
    // =================================================================
    /// The target venue is not registered, or an unregister targeted a
    /// non-member.
    #[error("OR_ERR_100: Venue not registered: {0}")]
    VenueInvalid(Address),

    /// The nested call into the venue did not succeed.
    #[error("OR_ERR_101: Venue call failed: {0}")]
    VenueCallFailed(Address),

    /// The venue did not spend the full allowance it was granted.
    /// A dangling approval would be exploitable in a later, unrelated call.
    #[error("OR_ERR_102: Allowance not consumed by venue {venue}: {remaining} remaining")]
    AllowanceNotConsumed { venue: Address, remaining: u128 },

    // =================================================================
    // Ledger / Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the transfer.
    #[error("OR_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// Not enough allowance for a delegated transfer.
    #[error("OR_ERR_201: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    /// A credit would overflow the balance representation.
    #[error("OR_ERR_202: Balance overflow")]
    BalanceOverflow,

    // =================================================================
    // Settlement Amount Errors (3xx)
    // =================================================================
    /// No input asset was supplied where one was required.
    #[error("OR_ERR_300: No input asset supplied")]
    AmountInInvalid,

    /// Measured output is zero or below the caller's minimum.
    #[error("OR_ERR_301: Output amount invalid: measured {measured}, minimum {minimum}")]
    AmountOutInvalid { measured: u128, minimum: u128 },

    /// Input and output asset must differ, otherwise the output
    /// measurement is confounded by the input custody.
    #[error("OR_ERR_302: Input and output asset must differ")]
    AssetPairInvalid,

    // =================================================================
    // Permit Errors (4xx)
    // =================================================================
    /// The permit deadline has passed.
    #[error("OR_ERR_400: Permit expired")]
    PermitExpired,

    /// The ed25519 signature didn't verify, or the key doesn't belong
    /// to the claimed owner.
    #[error("OR_ERR_401: Permit signature verification failed")]
    PermitSignatureInvalid,

    /// Nonce was already used (replay attack prevention).
    #[error("OR_ERR_402: Permit nonce already used: {nonce}")]
    PermitNonceReused { nonce: u64 },

    /// The permit is structurally invalid or the owner exceeded its
    /// nonce quota.
    #[error("OR_ERR_403: Invalid permit: {reason}")]
    PermitInvalid { reason: String },

    // =================================================================
    // Fee Collection Errors (6xx)
    // =================================================================
    /// The collection recipient is the null address.
    #[error("OR_ERR_600: Collection recipient is the null address")]
    RecipientInvalid,

    /// The underlying fee transfer did not succeed.
    #[error("OR_ERR_601: Fee collection failed: {reason}")]
    CollectionFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OR_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenrouteError>;
