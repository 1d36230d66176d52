//! # openroute-types
//!
//! Shared types, errors, and configuration for the **OpenRoute** swap
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`SwapId`]
//! - **Asset model**: [`AssetKind`]
//! - **Swap model**: [`SwapIntent`], [`FlowKind`]
//! - **Permit model**: [`Permit`]
//! - **Fee model**: [`FeeConfig`]
//! - **Events**: [`EventKind`], [`SwapReceipt`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`OpenrouteError`] with `OR_ERR_` prefix codes
//! - **Constants**: system-wide scales and limits

pub mod asset;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fee;
pub mod ids;
pub mod intent;
pub mod permit;

// Re-export all primary types at crate root for ergonomic imports:
//   use openroute_types::{Address, AssetKind, SwapIntent, Permit, ...};

pub use asset::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fee::*;
pub use ids::*;
pub use intent::*;
pub use permit::*;

// Constants are accessed via `openroute_types::constants::FOO`
// (not re-exported to avoid name collisions).
