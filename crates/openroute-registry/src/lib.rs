//! # openroute-registry
//!
//! The owner-curated set of venues authorized to receive forwarded calls.
//!
//! Every settlement entry point checks [`VenueRegistry::is_registered`]
//! before any asset moves. Mutation requires the unforgeable [`AdminCap`]
//! minted once at construction — an injected capability rather than an
//! ambient owner identity.

pub mod registry;

pub use registry::{AdminCap, VenueRegistry};
