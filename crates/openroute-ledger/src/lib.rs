//! # openroute-ledger
//!
//! The asset ledger boundary and the permit authorization adapter.
//!
//! - [`Ledger`] — the transfer/approve/balance contract the settlement
//!   engine relies on for every asset movement.
//! - [`Transactional`] — checkpoint/commit/rollback, the all-or-nothing
//!   unit of work around one settlement call.
//! - [`MemoryLedger`] — in-memory implementation of both.
//! - [`Authorizer`] / [`PermitAuthorizer`] — consume a caller-signed
//!   permit to grant the engine a spending right non-interactively.

pub mod ledger;
pub mod memory;
pub mod permit;

pub use ledger::{Ledger, Transactional};
pub use memory::MemoryLedger;
pub use permit::{Authorizer, PermitAuthorizer};
