//! Asset model: the native settlement asset vs fungible tokens.
//!
//! The native asset arrives attached to a call rather than via explicit
//! transfer instructions; fungible tokens move through the ledger's
//! transfer/approve surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Address;

/// Either the native settlement asset or a fungible token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// The base transferable unit of the settlement system.
    Native,
    /// A fungible token identified by its contract address.
    Token(Address),
}

impl AssetKind {
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token address, if this is a token.
    #[must_use]
    pub fn token(&self) -> Option<Address> {
        match self {
            Self::Token(addr) => Some(*addr),
            Self::Native => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(addr) => write!(f, "token:{addr}"),
        }
    }
}
