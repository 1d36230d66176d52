//! System-wide constants for the OpenRoute settlement engine.

/// Fixed-point fee scale: `10^18` represents 100%.
///
/// A `rate` of `1_000_000_000_000_000` (0.001 × scale) is a 0.1% fee.
pub const FEE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Maximum permit nonces retained per owner before new permits are rejected.
pub const MAX_PERMIT_NONCES_PER_OWNER: usize = 100_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenRoute";
