//! The settlement flows: measure — call — measure — verify — forward.
//!
//! One generic skeleton serves all three directions; [`FlowKind`] selects
//! the input custody, fee placement, and output measurement. The one
//! genuine hazard is the nested venue call: it is a foreign-function
//! boundary into untrusted logic, so nothing computed before the call is
//! trusted after it — allowance consumption, output, and refunds are all
//! re-measured from the ledger.

use chrono::Utc;
use openroute_ledger::{Authorizer, Ledger, PermitAuthorizer, Transactional};
use openroute_registry::{AdminCap, VenueRegistry};
use openroute_types::{
    Address, AssetKind, EngineConfig, EventKind, FeeConfig, FlowKind, OpenrouteError, Permit,
    Result, SwapId, SwapIntent, SwapReceipt,
};

use crate::vault::FeeVault;
use crate::venue::VenueCall;

/// Executes swap intents against registered venues over a transactional
/// ledger.
///
/// Assets pulled from the caller live on the engine's custody account for
/// the duration of one call; retained fees stay there until collected.
pub struct SettlementEngine<L: Ledger + Transactional> {
    /// The engine's custody account.
    address: Address,
    fee: FeeConfig,
    ledger: L,
    registry: VenueRegistry,
    authorizer: PermitAuthorizer,
    vault: FeeVault,
}

impl<L: Ledger + Transactional> SettlementEngine<L> {
    #[must_use]
    pub fn new(config: EngineConfig, ledger: L, registry: VenueRegistry) -> Self {
        Self {
            address: config.engine_address,
            fee: config.fee,
            ledger,
            registry,
            authorizer: PermitAuthorizer::new(),
            vault: FeeVault::new(),
        }
    }

    /// The engine's custody address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn fee_config(&self) -> FeeConfig {
        self.fee
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access for deposits and test setup. Settlement
    /// itself only ever goes through [`settle`](Self::settle).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    #[must_use]
    pub fn registry(&self) -> &VenueRegistry {
        &self.registry
    }

    /// Custodied fee balances.
    #[must_use]
    pub fn vault(&self) -> &FeeVault {
        &self.vault
    }

    // =====================================================================
    // Administrative surface (privileged via AdminCap)
    // =====================================================================

    /// Add a venue to the whitelist.
    pub fn register_venue(&mut self, cap: &AdminCap, venue: Address) {
        self.registry.register(cap, venue);
    }

    /// Remove a venue from the whitelist.
    pub fn unregister_venue(&mut self, cap: &AdminCap, venue: Address) -> Result<()> {
        self.registry.unregister(cap, venue)
    }

    /// Withdraw custodied native fees to `recipient`.
    pub fn collect_native(&mut self, _cap: &AdminCap, recipient: Address) -> Result<u128> {
        if recipient.is_zero() {
            return Err(OpenrouteError::RecipientInvalid);
        }
        let amount = self.vault.native();
        self.ledger
            .transfer(AssetKind::Native, self.address, recipient, amount)
            .map_err(|err| OpenrouteError::CollectionFailed {
                reason: err.to_string(),
            })?;
        let collected = self.vault.clear_native();
        tracing::info!(
            %recipient,
            amount = collected,
            asset = %AssetKind::Native,
            event = %EventKind::FeeCollected,
            "fees collected"
        );
        Ok(collected)
    }

    /// Withdraw custodied fees in `token` to `recipient`.
    pub fn collect_token(
        &mut self,
        _cap: &AdminCap,
        token: Address,
        recipient: Address,
    ) -> Result<u128> {
        if recipient.is_zero() {
            return Err(OpenrouteError::RecipientInvalid);
        }
        let amount = self.vault.token(token);
        self.ledger
            .transfer(AssetKind::Token(token), self.address, recipient, amount)
            .map_err(|err| OpenrouteError::CollectionFailed {
                reason: err.to_string(),
            })?;
        let collected = self.vault.clear_token(token);
        tracing::info!(
            %recipient,
            amount = collected,
            asset = %AssetKind::Token(token),
            event = %EventKind::FeeCollected,
            "fees collected"
        );
        Ok(collected)
    }

    // =====================================================================
    // Settlement entry points
    // =====================================================================

    /// Settle one swap intent through `venue`.
    ///
    /// All-or-nothing: on any error the ledger is rolled back to its state
    /// immediately before the call, including the input pull.
    pub fn settle(
        &mut self,
        caller: Address,
        intent: &SwapIntent,
        venue: &mut dyn VenueCall,
    ) -> Result<SwapReceipt> {
        self.settle_inner(caller, None, intent, venue)
    }

    /// Settle with a caller-signed authorization presented first.
    ///
    /// The permit is verified and consumed inside the same atomic unit as
    /// the flow: if settlement fails for any reason, the allowance grant
    /// is rolled back and the nonce released, so the identical permit can
    /// be presented again.
    pub fn settle_with_permit(
        &mut self,
        caller: Address,
        permit: &Permit,
        intent: &SwapIntent,
        venue: &mut dyn VenueCall,
    ) -> Result<SwapReceipt> {
        self.settle_inner(caller, Some(permit), intent, venue)
    }

    fn settle_inner(
        &mut self,
        caller: Address,
        permit: Option<&Permit>,
        intent: &SwapIntent,
        venue: &mut dyn VenueCall,
    ) -> Result<SwapReceipt> {
        // Pre-flight gates — no asset movement, no nonce consumption
        // before these pass.
        self.registry.require_registered(intent.venue)?;
        if venue.address() != intent.venue {
            return Err(OpenrouteError::VenueInvalid(venue.address()));
        }
        let flow = intent.flow()?;
        if intent.amount_in == 0 {
            return Err(OpenrouteError::AmountInInvalid);
        }
        if let Some(permit) = permit {
            self.check_permit_shape(permit, intent)?;
        }

        self.ledger.checkpoint();
        if let Some(permit) = permit {
            if let Err(err) = self.authorizer.authorize(&mut self.ledger, permit) {
                self.ledger.rollback();
                return Err(err);
            }
        }
        match self.execute_flow(caller, intent, flow, venue) {
            Ok(receipt) => {
                self.ledger.commit();
                tracing::info!(
                    id = %receipt.id,
                    %caller,
                    venue = %intent.venue,
                    %flow,
                    asset_in = %receipt.asset_in,
                    asset_out = %receipt.asset_out,
                    amount_in = receipt.amount_in,
                    amount_out = receipt.amount_out,
                    fee = receipt.fee,
                    event = %EventKind::SwapExecuted,
                    "swap settled"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.ledger.rollback();
                if let Some(permit) = permit {
                    self.authorizer.release_nonce(permit.owner, permit.nonce);
                }
                tracing::warn!(
                    %caller,
                    venue = %intent.venue,
                    %flow,
                    error = %err,
                    "settlement aborted, ledger rolled back"
                );
                Err(err)
            }
        }
    }

    /// Structural permit/intent agreement, checked before the nonce is
    /// consumed so a mismatched permit stays presentable once corrected.
    fn check_permit_shape(&self, permit: &Permit, intent: &SwapIntent) -> Result<()> {
        if permit.spender != self.address {
            return Err(OpenrouteError::PermitInvalid {
                reason: format!(
                    "Permit spender {} is not the engine {}",
                    permit.spender, self.address
                ),
            });
        }
        match intent.asset_in {
            AssetKind::Token(token_in) if permit.token != token_in => {
                Err(OpenrouteError::PermitInvalid {
                    reason: format!(
                        "Permit covers token {}, intent spends {token_in}",
                        permit.token
                    ),
                })
            }
            AssetKind::Native if !permit.token.is_zero() => Err(OpenrouteError::PermitInvalid {
                reason: "Native-input intent requires a null permit token".into(),
            }),
            _ => Ok(()),
        }
    }

    // =====================================================================
    // The shared skeleton
    // =====================================================================

    fn execute_flow(
        &mut self,
        caller: Address,
        intent: &SwapIntent,
        flow: FlowKind,
        venue: &mut dyn VenueCall,
    ) -> Result<SwapReceipt> {
        let engine = self.address;
        let venue_addr = intent.venue;

        // --- Input custody, fee placement, pre-call snapshots ------------
        let out_before = self.ledger.balance_of(intent.asset_out, engine);
        let (granted_token, attached, input_fee) = match flow {
            FlowKind::TokenToNative => {
                let AssetKind::Token(token_in) = intent.asset_in else {
                    return Err(OpenrouteError::Internal("flow/asset mismatch".into()));
                };
                self.ledger
                    .transfer_from(token_in, caller, engine, engine, intent.amount_in)?;
                // Full grant: the fee comes out of the measured native
                // output after the call.
                self.ledger
                    .approve(token_in, engine, venue_addr, intent.amount_in)?;
                (Some(token_in), 0u128, 0u128)
            }
            FlowKind::NativeToToken => {
                // Explicit attach-then-measure: the caller's native input
                // enters custody before any snapshot that involves it.
                self.ledger
                    .transfer(AssetKind::Native, caller, engine, intent.amount_in)?;
                let fee = self.fee.fee_of(intent.amount_in).min(intent.amount_in);
                (None, intent.amount_in - fee, fee)
            }
            FlowKind::TokenToToken => {
                let AssetKind::Token(token_in) = intent.asset_in else {
                    return Err(OpenrouteError::Internal("flow/asset mismatch".into()));
                };
                self.ledger
                    .transfer_from(token_in, caller, engine, engine, intent.amount_in)?;
                // Fee retained on the input token; the venue only ever
                // sees the net amount.
                let fee = self.fee.fee_of(intent.amount_in).min(intent.amount_in);
                self.ledger
                    .approve(token_in, engine, venue_addr, intent.amount_in - fee)?;
                (Some(token_in), 0u128, fee)
            }
        };

        // Native custody after the input attach but before the venue sees
        // anything: the refund baseline for native-input flows.
        let native_before = self.ledger.balance_of(AssetKind::Native, engine);
        if attached > 0 {
            self.ledger
                .transfer(AssetKind::Native, engine, venue_addr, attached)?;
        }

        // --- The foreign call --------------------------------------------
        let outcome = venue.execute(&mut self.ledger, &intent.payload, attached);
        if !outcome.is_success() {
            return Err(OpenrouteError::VenueCallFailed(venue_addr));
        }

        // --- Re-measure everything ----------------------------------------
        if let Some(token_in) = granted_token {
            let remaining = self.ledger.allowance(token_in, engine, venue_addr);
            if remaining != 0 {
                return Err(OpenrouteError::AllowanceNotConsumed {
                    venue: venue_addr,
                    remaining,
                });
            }
        }

        let out_after = self.ledger.balance_of(intent.asset_out, engine);
        let amount_out = out_after.saturating_sub(out_before);
        if amount_out == 0 || amount_out < intent.min_amount_out {
            return Err(OpenrouteError::AmountOutInvalid {
                measured: amount_out,
                minimum: intent.min_amount_out,
            });
        }

        // --- Fee + forward -------------------------------------------------
        let (fee, fee_asset, forward) = match flow {
            FlowKind::TokenToNative => {
                let fee = self.fee.fee_of(amount_out).min(amount_out);
                (fee, AssetKind::Native, amount_out - fee)
            }
            FlowKind::NativeToToken => (input_fee, AssetKind::Native, amount_out),
            FlowKind::TokenToToken => (input_fee, intent.asset_in, amount_out),
        };
        self.ledger
            .transfer(intent.asset_out, engine, caller, forward)?;

        // Native-input flows: anything the venue did not consume (or sent
        // back) is refunded to the caller, net of the fee already retained.
        if flow == FlowKind::NativeToToken {
            let native_after = self.ledger.balance_of(AssetKind::Native, engine);
            let refund = native_after.saturating_sub(native_before - attached);
            if refund > 0 {
                self.ledger
                    .transfer(AssetKind::Native, engine, caller, refund)?;
            }
        }

        self.vault.accrue(fee_asset, fee);

        Ok(SwapReceipt {
            id: SwapId::new(),
            caller,
            asset_in: intent.asset_in,
            asset_out: intent.asset_out,
            amount_in: intent.amount_in,
            amount_out,
            fee,
            fee_asset,
            executed_at: Utc::now(),
        })
    }
}
