//! In-memory ledger with checkpoint/rollback.

use std::collections::HashMap;

use openroute_types::{Address, AssetKind, OpenrouteError, Result};

use crate::ledger::{Ledger, Transactional};

type Balances = HashMap<(AssetKind, Address), u128>;
/// `(token, owner, spender) → amount`.
type Allowances = HashMap<(Address, Address, Address), u128>;

/// In-memory implementation of [`Ledger`] and [`Transactional`].
///
/// Checkpoints capture a full snapshot of both maps; `rollback` restores
/// the most recent snapshot, `commit` discards it. Nested checkpoints
/// behave as a stack.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    balances: Balances,
    allowances: Allowances,
    checkpoints: Vec<(Balances, Allowances)>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` to `account` out of thin air.
    /// Deposit/test surface — the settlement engine never mints.
    pub fn mint(&mut self, asset: AssetKind, account: Address, amount: u128) -> Result<()> {
        let entry = self.balances.entry((asset, account)).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(OpenrouteError::BalanceOverflow)?;
        Ok(())
    }

    /// Number of checkpoints currently open.
    #[must_use]
    pub fn open_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }
}

impl Ledger for MemoryLedger {
    fn balance_of(&self, asset: AssetKind, account: Address) -> u128 {
        self.balances.get(&(asset, account)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: AssetKind,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<()> {
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(OpenrouteError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        // Self-transfer is a no-op once solvency is checked.
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(asset, to);
        let credited = to_balance
            .checked_add(amount)
            .ok_or(OpenrouteError::BalanceOverflow)?;
        self.balances.insert((asset, from), from_balance - amount);
        self.balances.insert((asset, to), credited);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        to: Address,
        amount: u128,
    ) -> Result<()> {
        let granted = self.allowance(token, owner, spender);
        if granted < amount {
            return Err(OpenrouteError::InsufficientAllowance {
                needed: amount,
                available: granted,
            });
        }
        self.transfer(AssetKind::Token(token), owner, to, amount)?;
        self.allowances
            .insert((token, owner, spender), granted - amount);
        Ok(())
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> Result<()> {
        self.allowances.insert((token, owner, spender), amount);
        Ok(())
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> u128 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0)
    }
}

impl Transactional for MemoryLedger {
    fn checkpoint(&mut self) {
        self.checkpoints
            .push((self.balances.clone(), self.allowances.clone()));
    }

    fn commit(&mut self) {
        self.checkpoints.pop();
    }

    fn rollback(&mut self) {
        if let Some((balances, allowances)) = self.checkpoints.pop() {
            self.balances = balances;
            self.allowances = allowances;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: Address = Address([0x10; 20]);

    fn addr(n: u8) -> Address {
        Address([n; 20])
    }

    #[test]
    fn mint_and_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), 500).unwrap();
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(1)), 500);
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(2)), 0);
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), u128::MAX).unwrap();
        let err = ledger.mint(AssetKind::Native, addr(1), 1).unwrap_err();
        assert!(matches!(err, OpenrouteError::BalanceOverflow));
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Token(USDC), addr(1), 100).unwrap();
        ledger
            .transfer(AssetKind::Token(USDC), addr(1), addr(2), 60)
            .unwrap();
        assert_eq!(ledger.balance_of(AssetKind::Token(USDC), addr(1)), 40);
        assert_eq!(ledger.balance_of(AssetKind::Token(USDC), addr(2)), 60);
    }

    #[test]
    fn transfer_insufficient_fails_cleanly() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), 10).unwrap();
        let err = ledger
            .transfer(AssetKind::Native, addr(1), addr(2), 11)
            .unwrap_err();
        assert!(matches!(
            err,
            OpenrouteError::InsufficientBalance {
                needed: 11,
                available: 10
            }
        ));
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(1)), 10);
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(2)), 0);
    }

    #[test]
    fn self_transfer_preserves_balance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), 100).unwrap();
        ledger
            .transfer(AssetKind::Native, addr(1), addr(1), 100)
            .unwrap();
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(1)), 100);
    }

    #[test]
    fn approve_then_transfer_from() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Token(USDC), addr(1), 100).unwrap();
        ledger.approve(USDC, addr(1), addr(2), 80).unwrap();
        assert_eq!(ledger.allowance(USDC, addr(1), addr(2)), 80);

        ledger
            .transfer_from(USDC, addr(1), addr(2), addr(3), 50)
            .unwrap();
        assert_eq!(ledger.balance_of(AssetKind::Token(USDC), addr(3)), 50);
        assert_eq!(ledger.allowance(USDC, addr(1), addr(2)), 30);
    }

    #[test]
    fn transfer_from_over_allowance_fails() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Token(USDC), addr(1), 100).unwrap();
        ledger.approve(USDC, addr(1), addr(2), 20).unwrap();
        let err = ledger
            .transfer_from(USDC, addr(1), addr(2), addr(3), 21)
            .unwrap_err();
        assert!(matches!(err, OpenrouteError::InsufficientAllowance { .. }));
        assert_eq!(ledger.allowance(USDC, addr(1), addr(2)), 20);
    }

    #[test]
    fn transfer_from_failed_balance_keeps_allowance() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Token(USDC), addr(1), 10).unwrap();
        ledger.approve(USDC, addr(1), addr(2), 50).unwrap();
        let err = ledger
            .transfer_from(USDC, addr(1), addr(2), addr(3), 30)
            .unwrap_err();
        assert!(matches!(err, OpenrouteError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(USDC, addr(1), addr(2)), 50);
    }

    #[test]
    fn rollback_restores_balances_and_allowances() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Token(USDC), addr(1), 100).unwrap();
        ledger.approve(USDC, addr(1), addr(2), 40).unwrap();

        ledger.checkpoint();
        ledger
            .transfer(AssetKind::Token(USDC), addr(1), addr(2), 99)
            .unwrap();
        ledger.approve(USDC, addr(1), addr(2), 0).unwrap();
        ledger.rollback();

        assert_eq!(ledger.balance_of(AssetKind::Token(USDC), addr(1)), 100);
        assert_eq!(ledger.balance_of(AssetKind::Token(USDC), addr(2)), 0);
        assert_eq!(ledger.allowance(USDC, addr(1), addr(2)), 40);
        assert_eq!(ledger.open_checkpoints(), 0);
    }

    #[test]
    fn commit_keeps_changes() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), 100).unwrap();

        ledger.checkpoint();
        ledger
            .transfer(AssetKind::Native, addr(1), addr(2), 25)
            .unwrap();
        ledger.commit();

        assert_eq!(ledger.balance_of(AssetKind::Native, addr(2)), 25);
        assert_eq!(ledger.open_checkpoints(), 0);
    }

    #[test]
    fn nested_checkpoints_unwind_in_order() {
        let mut ledger = MemoryLedger::new();
        ledger.mint(AssetKind::Native, addr(1), 100).unwrap();

        ledger.checkpoint();
        ledger
            .transfer(AssetKind::Native, addr(1), addr(2), 10)
            .unwrap();
        ledger.checkpoint();
        ledger
            .transfer(AssetKind::Native, addr(1), addr(2), 20)
            .unwrap();

        ledger.rollback(); // undo the inner 20
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(2)), 10);
        ledger.commit(); // keep the outer 10
        assert_eq!(ledger.balance_of(AssetKind::Native, addr(2)), 10);
    }
}
