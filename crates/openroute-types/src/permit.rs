//! # Permit — the caller-signed spending authorization
//!
//! A `Permit` grants the settlement engine a spending right over the
//! caller's tokens without a separate approval step. It is verified by the
//! Authorization Adapter (`openroute-ledger`), never inside the engine.
//!
//! ## Security Properties
//!
//! - **Owner-bound**: the owner address must match the presented ed25519 key
//! - **Signature-bound**: signed over the canonical payload below
//! - **Time-bound**: carries its own deadline, enforced before any
//!   settlement state is touched
//! - **Single-use**: each permit carries a nonce; the adapter rejects reuse

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Address;

/// Domain separator for the permit signing payload.
pub const PERMIT_SIGNING_DOMAIN: &[u8] = b"openroute:permit:v1:";

/// A caller-signed, off-band grant of spending rights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permit {
    /// The account granting the spending right.
    pub owner: Address,
    /// The owner's ed25519 verifying key (must derive to `owner`).
    pub owner_pubkey: [u8; 32],
    /// The account receiving the spending right (the settlement engine).
    pub spender: Address,
    /// The token the right covers. [`Address::ZERO`] for native-input
    /// flows, where no allowance is written but the permit is still
    /// verified and its nonce consumed.
    pub token: Address,
    /// Amount of the spending right, in base units.
    pub amount: u128,
    /// Unique per-owner nonce to prevent replay.
    pub nonce: u64,
    /// When the permit stops being valid.
    pub deadline: DateTime<Utc>,
    /// Ed25519 signature over [`Permit::signing_payload`].
    pub signature: Vec<u8>,
}

impl Permit {
    /// Canonical signing payload for ed25519 verification.
    ///
    /// Format: `"openroute:permit:v1:" || owner || spender || token ||
    /// amount || nonce || deadline_millis`
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(128);
        payload.extend_from_slice(PERMIT_SIGNING_DOMAIN);
        payload.extend_from_slice(self.owner.as_bytes());
        payload.extend_from_slice(self.spender.as_bytes());
        payload.extend_from_slice(self.token.as_bytes());
        payload.extend_from_slice(&self.amount.to_le_bytes());
        payload.extend_from_slice(&self.nonce.to_le_bytes());
        payload.extend_from_slice(&self.deadline.timestamp_millis().to_le_bytes());
        payload
    }

    /// Returns `true` if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.deadline
    }
}

/// Helpers for constructing properly signed permits in tests.
/// **Never use in production** — real permits are signed off-band.
#[cfg(any(test, feature = "test-helpers"))]
impl Permit {
    /// Build and sign a permit with the given key. The owner address is
    /// derived from the key, so the result always verifies.
    pub fn signed(
        signing_key: &ed25519_dalek::SigningKey,
        spender: Address,
        token: Address,
        amount: u128,
        nonce: u64,
        deadline: DateTime<Utc>,
    ) -> Self {
        use ed25519_dalek::Signer;
        let verifying_key = signing_key.verifying_key();
        let mut permit = Self {
            owner: Address::from_verifying_key(&verifying_key),
            owner_pubkey: verifying_key.to_bytes(),
            spender,
            token,
            amount,
            nonce,
            deadline,
            signature: Vec::new(),
        };
        let sig = signing_key.sign(&permit.signing_payload());
        permit.signature = sig.to_bytes().to_vec();
        permit
    }
}
