//! The venue whitelist and its admin capability.

use std::collections::HashSet;

use openroute_types::{Address, EventKind, OpenrouteError, Result};

/// Unforgeable capability gating registry mutation.
///
/// Minted exactly once by [`VenueRegistry::new`]. It cannot be cloned or
/// constructed elsewhere, so holding a `&AdminCap` *is* the authorization —
/// there is no ambient owner identity to spoof.
#[derive(Debug)]
pub struct AdminCap {
    _priv: (),
}

/// Owner-curated set of addresses authorized to receive forwarded calls.
///
/// An address not explicitly registered is always untrusted; the default
/// state is unregistered. Entries are created by [`register`] and removed
/// by [`unregister`] — there is no other mutation path.
///
/// [`register`]: VenueRegistry::register
/// [`unregister`]: VenueRegistry::unregister
#[derive(Debug, Default)]
pub struct VenueRegistry {
    registered: HashSet<Address>,
}

impl VenueRegistry {
    /// Create an empty registry and mint its admin capability.
    #[must_use]
    pub fn new() -> (Self, AdminCap) {
        (
            Self {
                registered: HashSet::new(),
            },
            AdminCap { _priv: () },
        )
    }

    /// Add `venue` to the registered set. Privileged.
    ///
    /// Idempotent on state — registering twice is a no-op, but an event is
    /// emitted either way.
    pub fn register(&mut self, _cap: &AdminCap, venue: Address) {
        let newly = self.registered.insert(venue);
        tracing::info!(
            %venue,
            newly,
            event = %EventKind::VenueRegistered,
            "venue registered"
        );
    }

    /// Remove `venue` from the registered set. Privileged.
    ///
    /// # Errors
    /// Unregistering a non-member is an error, not a no-op:
    /// [`OpenrouteError::VenueInvalid`].
    pub fn unregister(&mut self, _cap: &AdminCap, venue: Address) -> Result<()> {
        if !self.registered.remove(&venue) {
            return Err(OpenrouteError::VenueInvalid(venue));
        }
        tracing::info!(
            %venue,
            event = %EventKind::VenueUnregistered,
            "venue unregistered"
        );
        Ok(())
    }

    /// Pure lookup, side-effect free.
    #[must_use]
    pub fn is_registered(&self, venue: Address) -> bool {
        self.registered.contains(&venue)
    }

    /// Guard used by settlement entry points: [`OpenrouteError::VenueInvalid`]
    /// before any asset movement occurs.
    pub fn require_registered(&self, venue: Address) -> Result<()> {
        if self.is_registered(venue) {
            Ok(())
        } else {
            Err(OpenrouteError::VenueInvalid(venue))
        }
    }

    /// Number of registered venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
