//! Fee custody bookkeeping.
//!
//! The vault tracks which part of the engine's ledger balance is retained
//! fee (as opposed to assets in flight during a settlement call). It is
//! mutated only by the settlement flows and the collection operations.

use std::collections::HashMap;

use openroute_types::{Address, AssetKind};

/// Custodied fee balances, per asset.
#[derive(Debug, Default)]
pub struct FeeVault {
    native: u128,
    tokens: HashMap<Address, u128>,
}

impl FeeVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` of `asset` as retained fee. Zero amounts are ignored.
    pub fn accrue(&mut self, asset: AssetKind, amount: u128) {
        if amount == 0 {
            return;
        }
        match asset {
            AssetKind::Native => self.native = self.native.saturating_add(amount),
            AssetKind::Token(token) => {
                let entry = self.tokens.entry(token).or_insert(0);
                *entry = entry.saturating_add(amount);
            }
        }
    }

    /// Custodied native fees.
    #[must_use]
    pub fn native(&self) -> u128 {
        self.native
    }

    /// Custodied fees in `token`.
    #[must_use]
    pub fn token(&self, token: Address) -> u128 {
        self.tokens.get(&token).copied().unwrap_or(0)
    }

    /// Zero the native fee balance, returning what was custodied.
    pub fn clear_native(&mut self) -> u128 {
        std::mem::take(&mut self.native)
    }

    /// Zero the fee balance for `token`, returning what was custodied.
    pub fn clear_token(&mut self, token: Address) -> u128 {
        self.tokens.remove(&token).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAI: Address = Address([0x30; 20]);

    #[test]
    fn accrue_and_read() {
        let mut vault = FeeVault::new();
        vault.accrue(AssetKind::Native, 100);
        vault.accrue(AssetKind::Native, 50);
        vault.accrue(AssetKind::Token(DAI), 7);
        assert_eq!(vault.native(), 150);
        assert_eq!(vault.token(DAI), 7);
        assert_eq!(vault.token(Address([0x31; 20])), 0);
    }

    #[test]
    fn zero_accrual_is_ignored() {
        let mut vault = FeeVault::new();
        vault.accrue(AssetKind::Native, 0);
        vault.accrue(AssetKind::Token(DAI), 0);
        assert_eq!(vault.native(), 0);
        assert_eq!(vault.token(DAI), 0);
    }

    #[test]
    fn clear_returns_and_zeroes() {
        let mut vault = FeeVault::new();
        vault.accrue(AssetKind::Native, 42);
        vault.accrue(AssetKind::Token(DAI), 11);

        assert_eq!(vault.clear_native(), 42);
        assert_eq!(vault.native(), 0);
        assert_eq!(vault.clear_token(DAI), 11);
        assert_eq!(vault.token(DAI), 0);
        // Clearing again yields nothing.
        assert_eq!(vault.clear_native(), 0);
        assert_eq!(vault.clear_token(DAI), 0);
    }
}
