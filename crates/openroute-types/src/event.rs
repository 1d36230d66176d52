//! Observability types: event kinds and swap receipts.
//!
//! Events carry no behavioral contract — they exist so operators and
//! downstream consumers can reconcile what the engine did.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, AssetKind, SwapId};

/// The kind of observable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A venue was added to the registry (also emitted on re-registration).
    VenueRegistered,
    /// A venue was removed from the registry.
    VenueUnregistered,
    /// A swap settled successfully.
    SwapExecuted,
    /// Custodied fees were collected to a recipient.
    FeeCollected,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VenueRegistered => write!(f, "VENUE_REGISTERED"),
            Self::VenueUnregistered => write!(f, "VENUE_UNREGISTERED"),
            Self::SwapExecuted => write!(f, "SWAP_EXECUTED"),
            Self::FeeCollected => write!(f, "FEE_COLLECTED"),
        }
    }
}

/// Record of one settled swap, returned to the caller.
///
/// `amount_out` is the *measured* output (balance delta on the engine's
/// custody account), before the output-side fee where one applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Unique identifier for this execution.
    pub id: SwapId,
    /// Who the swap settled for (and who received the output).
    pub caller: Address,
    /// The asset the caller supplied.
    pub asset_in: AssetKind,
    /// The asset the caller received.
    pub asset_out: AssetKind,
    /// Input amount pulled into custody.
    pub amount_in: u128,
    /// Measured output (custody balance delta).
    pub amount_out: u128,
    /// Fee retained by the engine.
    pub fee: u128,
    /// The asset the fee was retained in (differs from `asset_out` for
    /// input-side fee placement).
    pub fee_asset: AssetKind,
    /// When settlement completed.
    pub executed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_display() {
        assert_eq!(format!("{}", EventKind::SwapExecuted), "SWAP_EXECUTED");
        assert_eq!(format!("{}", EventKind::FeeCollected), "FEE_COLLECTED");
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = SwapReceipt {
            id: SwapId::new(),
            caller: Address([1u8; 20]),
            asset_in: AssetKind::Token(Address([2u8; 20])),
            asset_out: AssetKind::Native,
            amount_in: 100_000_000,
            amount_out: 94_986_585,
            fee: 94_986,
            fee_asset: AssetKind::Native,
            executed_at: Utc::now(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let back: SwapReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt.id, back.id);
        assert_eq!(receipt.amount_out, back.amount_out);
        assert_eq!(receipt.fee_asset, back.fee_asset);
    }
}
