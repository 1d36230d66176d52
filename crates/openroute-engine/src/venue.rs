//! The foreign-call boundary to execution venues.
//!
//! A venue is arbitrary, untrusted, turing-complete logic. The engine makes
//! no assumption about a payload's semantics beyond "causes a measurable
//! balance change, possibly none, possibly a refund" — and it never trusts
//! anything a venue returns. Every fact used after the call (allowance
//! consumption, output amount, refunds) is re-measured from the ledger.

use openroute_ledger::Ledger;
use openroute_types::Address;

/// Outcome of a venue invocation.
///
/// Deliberately carries no payload: a "successful" venue has nothing
/// trustworthy to say, and a failed one aborts the settlement outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The venue ran to completion.
    Success,
    /// The venue aborted; the engine fails the whole settlement.
    Reverted,
}

impl CallOutcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// An execution venue reachable at a ledger address.
///
/// The venue is handed `&mut dyn Ledger`, which authenticates nothing: a
/// hostile venue can move any account's balance, not just its own or its
/// allowance grants. The engine's checks bound what settlement pays out
/// (delta measurement, allowance verification) and rollback discards a
/// failed call's effects wholesale, but containing a venue that succeeds
/// while moving unrelated balances is the ledger implementation's caller
/// authentication to provide. The venue cannot reach the engine's
/// transaction boundary or its fee custody bookkeeping.
pub trait VenueCall {
    /// The address this venue settles through: the target of allowance
    /// grants and attached native value.
    fn address(&self) -> Address;

    /// Execute the opaque payload. `attached` native units have already
    /// been transferred to [`Self::address`] by the engine; refunds are
    /// native transfers back to the engine's account.
    fn execute(&mut self, ledger: &mut dyn Ledger, payload: &[u8], attached: u128) -> CallOutcome;
}
