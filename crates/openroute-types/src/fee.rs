//! Fee accounting: fixed-point, always rounds toward zero.
//!
//! The same pure computation is reused by every directional flow; only the
//! *side* the fee is subtracted from differs (input for token→token and
//! native→token, measured output for token→native).

use serde::{Deserialize, Serialize};

use crate::constants::FEE_SCALE;

/// Protocol fee configuration.
///
/// `rate` is a fixed-point fraction against [`FEE_SCALE`] (`10^18` = 100%).
/// Keeping `rate < FEE_SCALE` is a deployer responsibility; the accountant
/// performs no bound check — it only computes
/// `floor(amount * rate / FEE_SCALE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Fee rate scaled by [`FEE_SCALE`].
    pub rate: u128,
}

impl FeeConfig {
    #[must_use]
    pub fn new(rate: u128) -> Self {
        Self { rate }
    }

    /// A zero-fee configuration.
    #[must_use]
    pub fn zero() -> Self {
        Self { rate: 0 }
    }

    /// `floor(amount * rate / FEE_SCALE)`.
    ///
    /// Computed as `(amount / S) * rate + ((amount % S) * rate) / S`, which
    /// is exact and overflow-free for any `amount` when `rate <= FEE_SCALE`:
    /// the first term is bounded by `amount`, the second product by `S^2`.
    /// Rounding is always toward zero — the caller never receives the
    /// rounding remainder.
    #[must_use]
    pub fn fee_of(&self, amount: u128) -> u128 {
        let q = amount / FEE_SCALE;
        let r = amount % FEE_SCALE;
        q * self.rate + (r * self.rate) / FEE_SCALE
    }

    /// The amount remaining after the fee is retained.
    #[must_use]
    pub fn net_of(&self, amount: u128) -> u128 {
        amount.saturating_sub(self.fee_of(amount))
    }
}
