//! Shared harness and mock venues for the engine integration suites.
//!
//! The mocks stand in for external aggregator contracts: deterministic,
//! under-spending, reverting, refunding, and draining variants — enough to
//! exercise every verification the engine performs after the foreign call.

#![allow(dead_code)]

use openroute_engine::{CallOutcome, SettlementEngine, VenueCall};
use openroute_ledger::{Ledger, MemoryLedger};
use openroute_registry::{AdminCap, VenueRegistry};
use openroute_types::{Address, AssetKind, EngineConfig, constants::FEE_SCALE};

pub const ENGINE: Address = Address([0xe0; 20]);
pub const CALLER: Address = Address([0xc0; 20]);
pub const VENUE: Address = Address([0xaa; 20]);
pub const TOKEN_IN: Address = Address([0x10; 20]);
pub const TOKEN_OUT: Address = Address([0x11; 20]);

/// 0.1% — the rate used by the representative settlement runs.
pub const TENTH_PERCENT: u128 = FEE_SCALE / 1000;

pub struct Harness {
    pub engine: SettlementEngine<MemoryLedger>,
    pub cap: AdminCap,
}

/// Engine with `VENUE` registered and the given fee rate.
pub fn harness(fee_rate: u128) -> Harness {
    let (registry, cap) = VenueRegistry::new();
    let mut engine = SettlementEngine::new(
        EngineConfig::new(ENGINE, fee_rate),
        MemoryLedger::new(),
        registry,
    );
    engine.register_venue(&cap, VENUE);
    Harness { engine, cap }
}

/// Fund `account` and pre-approve the engine to pull `amount` of `token`.
pub fn fund_and_approve(
    engine: &mut SettlementEngine<MemoryLedger>,
    account: Address,
    token: Address,
    amount: u128,
) {
    let ledger = engine.ledger_mut();
    ledger.mint(AssetKind::Token(token), account, amount).unwrap();
    ledger.approve(token, account, ENGINE, amount).unwrap();
}

// ---------------------------------------------------------------------------
// Mock venues
// ---------------------------------------------------------------------------

/// Deterministic venue: consumes its full granted allowance (or keeps any
/// attached native), pays a fixed quote from its own inventory.
pub struct QuoteVenue {
    /// Token to pull via the engine's allowance grant, if any.
    pub take_token: Option<Address>,
    /// Asset and amount paid to the engine.
    pub give: AssetKind,
    pub quote: u128,
}

impl VenueCall for QuoteVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], _attached: u128) -> CallOutcome {
        if let Some(token) = self.take_token {
            let granted = ledger.allowance(token, ENGINE, VENUE);
            if ledger
                .transfer_from(token, ENGINE, VENUE, VENUE, granted)
                .is_err()
            {
                return CallOutcome::Reverted;
            }
        }
        if ledger.transfer(self.give, VENUE, ENGINE, self.quote).is_err() {
            return CallOutcome::Reverted;
        }
        CallOutcome::Success
    }
}

/// Malicious venue: spends only half its granted allowance, leaving a
/// dangling approval, but still pays the quote.
pub struct UnderSpendingVenue {
    pub take_token: Address,
    pub give: AssetKind,
    pub quote: u128,
}

impl VenueCall for UnderSpendingVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], _attached: u128) -> CallOutcome {
        let granted = ledger.allowance(self.take_token, ENGINE, VENUE);
        if ledger
            .transfer_from(self.take_token, ENGINE, VENUE, VENUE, granted / 2)
            .is_err()
        {
            return CallOutcome::Reverted;
        }
        if ledger.transfer(self.give, VENUE, ENGINE, self.quote).is_err() {
            return CallOutcome::Reverted;
        }
        CallOutcome::Success
    }
}

/// Venue that consumes its allowance and pays nothing back.
pub struct GreedyVenue {
    pub take_token: Address,
}

impl VenueCall for GreedyVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], _attached: u128) -> CallOutcome {
        let granted = ledger.allowance(self.take_token, ENGINE, VENUE);
        if ledger
            .transfer_from(self.take_token, ENGINE, VENUE, VENUE, granted)
            .is_err()
        {
            return CallOutcome::Reverted;
        }
        CallOutcome::Success
    }
}

/// Venue that moves balances like a successful swap, then reverts anyway.
/// Everything it did must be rolled back.
pub struct RevertingVenue {
    pub take_token: Option<Address>,
    pub give: AssetKind,
    pub quote: u128,
}

impl VenueCall for RevertingVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], _attached: u128) -> CallOutcome {
        if let Some(token) = self.take_token {
            let granted = ledger.allowance(token, ENGINE, VENUE);
            let _ = ledger.transfer_from(token, ENGINE, VENUE, VENUE, granted);
        }
        let _ = ledger.transfer(self.give, VENUE, ENGINE, self.quote);
        CallOutcome::Reverted
    }
}

/// Native-input venue: consumes only part of the attached native, refunds
/// the remainder to the engine, and pays the token quote.
pub struct RefundingVenue {
    pub consume: u128,
    pub give_token: Address,
    pub quote: u128,
}

impl VenueCall for RefundingVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], attached: u128) -> CallOutcome {
        let refund = attached.saturating_sub(self.consume);
        if refund > 0
            && ledger
                .transfer(AssetKind::Native, VENUE, ENGINE, refund)
                .is_err()
        {
            return CallOutcome::Reverted;
        }
        if ledger
            .transfer(AssetKind::Token(self.give_token), VENUE, ENGINE, self.quote)
            .is_err()
        {
            return CallOutcome::Reverted;
        }
        CallOutcome::Success
    }
}

/// Hostile venue: consumes its allowance, pays nothing, and drains native
/// out of the engine's custody. The balance-delta check must catch this and
/// the rollback must restore the drained funds.
pub struct DrainingVenue {
    pub take_token: Address,
}

impl VenueCall for DrainingVenue {
    fn address(&self) -> Address {
        VENUE
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, _payload: &[u8], _attached: u128) -> CallOutcome {
        let granted = ledger.allowance(self.take_token, ENGINE, VENUE);
        let _ = ledger.transfer_from(self.take_token, ENGINE, VENUE, VENUE, granted);
        let custody = ledger.balance_of(AssetKind::Native, ENGINE);
        let _ = ledger.transfer(AssetKind::Native, ENGINE, VENUE, custody);
        CallOutcome::Success
    }
}
