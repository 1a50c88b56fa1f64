use dexsight_core::{
    Address, Capability, DexError, FetchPolicy, HourlyRates, hourly_timestamps, rate_candles,
};

use crate::Dexsight;
use crate::router::macros::provider_call;

impl Dexsight {
    /// Hourly open/close candles of both token prices of `pair` since `start`.
    ///
    /// Samples are taken every rate interval from `start` up to one interval
    /// before now. When `latest_block` is given, blocks above it are dropped,
    /// which keeps the series within what the exchange subgraph has indexed.
    ///
    /// Returns empty candles when `start` is too recent or no blocks resolve.
    ///
    /// # Errors
    /// Returns an error if a block or price lookup fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "dexsight::router",
            skip(self, pair),
            fields(pair = %pair),
            err
        )
    )]
    pub async fn hourly_rate_data(
        &self,
        pair: &Address,
        start: i64,
        latest_block: Option<u64>,
    ) -> Result<HourlyRates, DexError> {
        let step = i64::try_from(self.cfg.rate_interval.as_secs()).unwrap_or(i64::MAX);
        let timestamps = hourly_timestamps(start, self.now().timestamp(), step);
        if timestamps.is_empty() {
            return Ok(HourlyRates::default());
        }

        let mut blocks = Vec::with_capacity(timestamps.len());
        for chunk in timestamps.chunks(self.cfg.block_batch_size.max(1)) {
            let found = provider_call!(self, Capability::Blocks, as_block_provider, |p| p
                .blocks_for_timestamps(chunk, FetchPolicy::CacheFirst))?;
            blocks.extend(found);
        }
        if let Some(latest) = latest_block {
            blocks.retain(|b| b.number <= latest);
        }
        if blocks.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(pair = %pair, start, "no blocks resolved for hourly rates");
            return Ok(HourlyRates::default());
        }

        let mut samples = provider_call!(
            self,
            Capability::HourlyRates,
            as_hourly_rates_provider,
            |p| p.rates_at_blocks(pair, &blocks, FetchPolicy::CacheFirst)
        )?;
        samples.sort_by_key(|s| s.timestamp);
        Ok(rate_candles(&samples))
    }
}
