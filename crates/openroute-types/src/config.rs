//! Configuration for a settlement engine deployment.

use serde::{Deserialize, Serialize};

use crate::{Address, FeeConfig};

/// Configuration for one settlement engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The engine's own custody address. All pre/post-call balance
    /// snapshots are taken on this account.
    pub engine_address: Address,
    /// Protocol fee configuration. Bounding the rate below the scale is a
    /// deployer responsibility.
    pub fee: FeeConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn new(engine_address: Address, fee_rate: u128) -> Self {
        Self {
            engine_address,
            fee: FeeConfig::new(fee_rate),
        }
    }

    /// Convenience constructor for fee-free deployments.
    #[must_use]
    pub fn fee_free(engine_address: Address) -> Self {
        Self {
            engine_address,
            fee: FeeConfig::zero(),
        }
    }
}
