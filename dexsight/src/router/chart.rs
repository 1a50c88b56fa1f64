use dexsight_core::{Address, Capability, DexError, FetchPolicy, PairDayData, fill_daily_gaps};

use crate::Dexsight;
use crate::router::macros::provider_call;

impl Dexsight {
    /// Daily chart series of a pair from its first snapshot up to today, one entry per day.
    ///
    /// Pages through the pair's daily snapshots until a page comes back short,
    /// then pads missing days (zero volume, carried reserve) and sorts by date.
    ///
    /// # Errors
    /// Returns an error if any page fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self, pair), fields(pair = %pair), err)
    )]
    pub async fn pair_chart_data(&self, pair: &Address) -> Result<Vec<PairDayData>, DexError> {
        let page = self.cfg.chart_page_size;
        let mut data = Vec::new();
        let mut skip = 0;
        loop {
            let rows = provider_call!(self, Capability::PairChart, as_pair_chart_provider, |p| p
                .pair_day_datas(pair, skip, page, FetchPolicy::CacheFirst))?;
            let short = rows.len() < page;
            data.extend(rows);
            if short {
                break;
            }
            skip += page;
        }

        Ok(fill_daily_gaps(data, self.now().timestamp()))
    }
}
