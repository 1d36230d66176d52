//! Permit verification — the Authorization Adapter.
//!
//! Consumes a caller-signed [`Permit`] to grant the settlement engine a
//! spending right without a separate approval step. Verification happens
//! entirely here; the engine treats authorization as an opaque primitive.
//!
//! A permit whose `token` is the null address carries no allowance (the
//! native-input flows need none) but is still fully verified and its nonce
//! consumed.

use std::collections::{HashMap, HashSet};

use ed25519_dalek::{Signature, VerifyingKey};
use openroute_types::{Address, OpenrouteError, Permit, Result, constants};

use crate::ledger::Ledger;

/// Consumes signed authorizations and writes the resulting spending right
/// into the ledger.
pub trait Authorizer {
    /// Verify `permit` and grant `allowance(owner → spender)` on its token.
    ///
    /// Fails before any settlement state is touched:
    /// - [`OpenrouteError::PermitExpired`] past the deadline
    /// - [`OpenrouteError::PermitSignatureInvalid`] on bad key/signature
    /// - [`OpenrouteError::PermitNonceReused`] on replay
    fn authorize(&mut self, ledger: &mut dyn Ledger, permit: &Permit) -> Result<()>;
}

/// Tracks used nonces per owner to prevent permit replays.
///
/// Each owner's nonce set is bounded; when the quota is reached, further
/// permits from that owner are rejected rather than silently evicting old
/// nonces (eviction would reopen the replay window).
pub struct PermitAuthorizer {
    /// `owner → Set<nonce>` — consumed nonces per owner.
    used_nonces: HashMap<Address, HashSet<u64>>,
    /// Maximum nonces retained per owner.
    max_per_owner: usize,
}

impl PermitAuthorizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_quota(constants::MAX_PERMIT_NONCES_PER_OWNER)
    }

    #[must_use]
    pub fn with_quota(max_per_owner: usize) -> Self {
        Self {
            used_nonces: HashMap::new(),
            max_per_owner,
        }
    }

    /// Whether `owner` has already consumed `nonce`.
    #[must_use]
    pub fn is_nonce_used(&self, owner: Address, nonce: u64) -> bool {
        self.used_nonces
            .get(&owner)
            .is_some_and(|nonces| nonces.contains(&nonce))
    }

    /// Forget a consumed nonce, making its permit presentable again.
    ///
    /// Called by the settlement engine when the call a permit authorized
    /// is rolled back: a failed settlement must be indistinguishable from
    /// one never attempted, and that includes the permit's consumption.
    pub fn release_nonce(&mut self, owner: Address, nonce: u64) {
        if let Some(nonces) = self.used_nonces.get_mut(&owner) {
            nonces.remove(&nonce);
        }
    }

    fn verify_signature(permit: &Permit) -> Result<()> {
        let key = VerifyingKey::from_bytes(&permit.owner_pubkey)
            .map_err(|_| OpenrouteError::PermitSignatureInvalid)?;
        // The presented key must actually be the owner's.
        if Address::from_verifying_key(&key) != permit.owner {
            return Err(OpenrouteError::PermitSignatureInvalid);
        }
        let signature = Signature::from_slice(&permit.signature)
            .map_err(|_| OpenrouteError::PermitSignatureInvalid)?;
        key.verify_strict(&permit.signing_payload(), &signature)
            .map_err(|_| OpenrouteError::PermitSignatureInvalid)
    }
}

impl Default for PermitAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Authorizer for PermitAuthorizer {
    fn authorize(&mut self, ledger: &mut dyn Ledger, permit: &Permit) -> Result<()> {
        if permit.is_expired() {
            return Err(OpenrouteError::PermitExpired);
        }
        Self::verify_signature(permit)?;

        let nonces = self.used_nonces.entry(permit.owner).or_default();
        if nonces.contains(&permit.nonce) {
            return Err(OpenrouteError::PermitNonceReused {
                nonce: permit.nonce,
            });
        }
        if nonces.len() >= self.max_per_owner {
            return Err(OpenrouteError::PermitInvalid {
                reason: format!(
                    "Owner {} exceeded nonce quota ({})",
                    permit.owner, self.max_per_owner
                ),
            });
        }
        // Grant first, record the nonce last: an errored grant must not
        // burn the nonce.
        if !permit.token.is_zero() {
            ledger.approve(permit.token, permit.owner, permit.spender, permit.amount)?;
        }
        nonces.insert(permit.nonce);
        tracing::debug!(
            owner = %permit.owner,
            spender = %permit.spender,
            token = %permit.token,
            amount = permit.amount,
            nonce = permit.nonce,
            "permit consumed"
        );
        Ok(())
    }
}
