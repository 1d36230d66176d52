//! The transient swap intent consumed by one settlement call.

use serde::{Deserialize, Serialize};

use crate::{Address, AssetKind, OpenrouteError, Result};

/// The direction of a settlement flow, derived from the intent's asset pair.
///
/// All three directions share one settlement skeleton; this tag selects the
/// input custody, fee placement, and output measurement for that skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    /// Token input, native output. Fee is taken from the measured native
    /// output after the venue call.
    TokenToNative,
    /// Native input, token output. Fee is retained from the input before
    /// any native is forwarded to the venue.
    NativeToToken,
    /// Token input, token output. Fee is retained on the input token; the
    /// venue is granted only the net amount.
    TokenToToken,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenToNative => write!(f, "TOKEN_TO_NATIVE"),
            Self::NativeToToken => write!(f, "NATIVE_TO_TOKEN"),
            Self::TokenToToken => write!(f, "TOKEN_TO_TOKEN"),
        }
    }
}

/// One swap to settle through a registered venue.
///
/// Exists only for the duration of a single settlement call; never stored.
/// The payload is opaque — it is interpreted entirely by the venue and the
/// engine makes no assumption about it beyond "causes a measurable balance
/// change, possibly none, possibly a refund."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapIntent {
    /// The asset the caller supplies.
    pub asset_in: AssetKind,
    /// The asset the caller expects to receive.
    pub asset_out: AssetKind,
    /// The venue to forward the payload to. Must be registered.
    pub venue: Address,
    /// Opaque call payload, interpreted only by the venue.
    pub payload: Vec<u8>,
    /// Exact input amount, in base units.
    pub amount_in: u128,
    /// Minimum acceptable measured output, in base units.
    pub min_amount_out: u128,
}

impl SwapIntent {
    /// Derive the flow direction from the asset pair.
    ///
    /// # Errors
    /// Returns [`OpenrouteError::AssetPairInvalid`] for native→native and
    /// same-token pairs: with input and output on the same asset the
    /// balance delta is not attributable to the venue.
    pub fn flow(&self) -> Result<FlowKind> {
        match (self.asset_in, self.asset_out) {
            (AssetKind::Token(_), AssetKind::Native) => Ok(FlowKind::TokenToNative),
            (AssetKind::Native, AssetKind::Token(_)) => Ok(FlowKind::NativeToToken),
            (AssetKind::Token(a), AssetKind::Token(b)) if a != b => Ok(FlowKind::TokenToToken),
            _ => Err(OpenrouteError::AssetPairInvalid),
        }
    }
}
