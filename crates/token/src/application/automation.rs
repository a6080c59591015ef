//! Liquidity automation trigger
//!
//! Converts a fee bucket's reserve through the venue. The guard is held
//! for the whole conversion, so the venue's own token movements are
//! neither taxed nor able to start another conversion.

use lgen_core::{Address, Amount, FeeBucketKind, TaxCategory, TokenEvent};
use lgen_ports::AmmRouter;
use log::{debug, info};

use super::state::TransferOutcome;
use super::token::LiquidityGenerator;
use crate::error::Result;

impl<R: AmmRouter + Clone> LiquidityGenerator<R> {
    /// Fire the trigger for each bucket this transfer credited that has
    /// reached the threshold
    pub(super) fn after_transfer(&mut self, outcome: &TransferOutcome) -> Result<()> {
        if outcome.category != TaxCategory::Transfer || !self.state.settings.swap_enabled {
            return Ok(());
        }
        for kind in outcome.credited() {
            let reserve = self.state.tax.reserve(kind);
            if reserve >= self.state.settings.swap_threshold {
                debug!(
                    "Trigger: bucket={}, reserve={}, threshold={}",
                    kind.as_str(),
                    reserve,
                    self.state.settings.swap_threshold
                );
                self.run_swap(kind)?;
            }
        }
        Ok(())
    }

    /// Convert one bucket under the guard; no-op if a conversion is running
    pub(super) fn run_swap(&mut self, kind: FeeBucketKind) -> Result<()> {
        if !self.state.guard.enter() {
            return Ok(());
        }
        let result = match kind {
            FeeBucketKind::AutoLiquidity => self.liquify(),
            FeeBucketKind::Marketing => self.sell_marketing(),
        };
        self.state.guard.exit();
        result
    }

    /// Sell half the reserve, pair the other half with the proceeds
    fn liquify(&mut self) -> Result<()> {
        let reserve = self.state.tax.reserve(FeeBucketKind::AutoLiquidity);
        if reserve < Amount::from(2u64) {
            return Ok(());
        }
        let half = reserve / 2;
        let other_half = reserve - half;
        let contract = self.state.meta.address;
        let recipient = self.state.tax.bucket(FeeBucketKind::AutoLiquidity).recipient;
        if self.router.quote_tokens_for_native(contract, half)?.is_zero() {
            debug!("Swap and liquify skipped: {half} tokens quote to zero native");
            return Ok(());
        }

        let Self { state, router } = self;
        let native_received =
            router.swap_tokens_for_native(state, contract, half, Amount::zero(), contract)?;
        let provision = router.add_liquidity_native(
            state,
            contract,
            other_half,
            Amount::zero(),
            Amount::zero(),
            native_received,
            recipient,
        )?;

        self.state.tax.drain(FeeBucketKind::AutoLiquidity);
        self.state.emit(TokenEvent::SwapAndLiquify {
            tokens_swapped: half,
            native_received,
            tokens_into_liquidity: provision.token_amount,
            native_into_liquidity: provision.native_amount,
            liquidity: provision.liquidity,
        });
        info!(
            "Swap and liquify: swapped={}, native={}, liquidity={}, recipient={:?}",
            half, native_received, provision.liquidity, recipient
        );
        Ok(())
    }

    /// Sell the whole reserve, proceeds straight to the recipient
    fn sell_marketing(&mut self) -> Result<()> {
        let reserve = self.state.tax.reserve(FeeBucketKind::Marketing);
        if reserve.is_zero() {
            return Ok(());
        }
        let contract: Address = self.state.meta.address;
        let recipient = self.state.tax.bucket(FeeBucketKind::Marketing).recipient;
        if self.router.quote_tokens_for_native(contract, reserve)?.is_zero() {
            debug!("Marketing swap skipped: {reserve} tokens quote to zero native");
            return Ok(());
        }

        let Self { state, router } = self;
        let native_sent =
            router.swap_tokens_for_native(state, contract, reserve, Amount::zero(), recipient)?;

        self.state.tax.drain(FeeBucketKind::Marketing);
        self.state.emit(TokenEvent::MarketingSwap {
            tokens_swapped: reserve,
            native_sent,
            recipient,
        });
        info!(
            "Marketing swap: swapped={}, native={}, recipient={:?}",
            reserve, native_sent, recipient
        );
        Ok(())
    }
}
