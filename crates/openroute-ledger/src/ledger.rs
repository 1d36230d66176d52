//! The asset ledger boundary.
//!
//! [`Ledger`] abstracts over both the native settlement asset and fungible
//! tokens. Every operation either fully succeeds or returns an error — a
//! partially applied transfer is never observable. The engine additionally
//! defends against implementations that silently under-transfer by
//! verifying allowance consumption after each venue call.

use openroute_types::{Address, AssetKind, Result};

/// Transfer, approval, and balance surface used by the settlement engine.
///
/// Implementations are trusted custodians: `transfer` authenticates
/// nothing about `from`, so any holder of a `Ledger` handle can move any
/// account's balance. Caller authentication is the implementation's (or
/// its host system's) responsibility — the engine's own checks bound what
/// a settlement call pays out, not what a handle can touch.
pub trait Ledger {
    /// Balance of `account` in `asset`, in base units.
    fn balance_of(&self, asset: AssetKind, account: Address) -> u128;

    /// Move `amount` of `asset` from `from` to `to`.
    fn transfer(&mut self, asset: AssetKind, from: Address, to: Address, amount: u128)
    -> Result<()>;

    /// Move `amount` of `token` from `owner` to `to`, debiting the
    /// allowance `owner → spender`.
    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        to: Address,
        amount: u128,
    ) -> Result<()>;

    /// Set the allowance `owner → spender` on `token` to exactly `amount`.
    fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: u128)
    -> Result<()>;

    /// Current allowance `owner → spender` on `token`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> u128;
}

/// All-or-nothing unit of work over a ledger.
///
/// The engine opens a checkpoint before each settlement call and either
/// commits or rolls the whole call back, so a failed call is
/// indistinguishable from one never attempted. Venues never see this
/// surface: they are handed `&mut dyn Ledger` only.
pub trait Transactional {
    /// Open a new checkpoint. Checkpoints nest.
    fn checkpoint(&mut self);

    /// Discard the most recent checkpoint, keeping all changes since it.
    fn commit(&mut self);

    /// Restore the state captured by the most recent checkpoint.
    fn rollback(&mut self);
}
