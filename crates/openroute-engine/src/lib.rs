//! # openroute-engine
//!
//! The settlement engine: routes asset swaps through registered venues,
//! collects a protocol fee, and protects the caller's funds against
//! malicious, buggy, or imprecise venue behavior.
//!
//! ## Algorithm
//!
//! Every directional flow runs one skeleton, **measure — call — measure —
//! verify — forward**, as a single atomic unit of work:
//!
//! 1. Registry gate: unregistered venues are rejected before any asset moves
//! 2. Pull the input into engine custody (fee placement per direction)
//! 3. Invoke the venue with the opaque payload
//! 4. Re-measure: granted allowance must be fully consumed, output is the
//!    custody balance delta — never a value the venue reported
//! 5. Forward the net output (and any native refund) to the caller
//!
//! Any error rolls the ledger back to the pre-call checkpoint — including
//! a permit's allowance grant, whose nonce is released — so a failed
//! settlement is indistinguishable from one never attempted.

pub mod settlement;
pub mod vault;
pub mod venue;

pub use settlement::SettlementEngine;
pub use vault::FeeVault;
pub use venue::{CallOutcome, VenueCall};
