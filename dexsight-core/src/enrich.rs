//! Derivation of the pairs-table metrics from current and historical pair state.

use dexsight_types::{Decimal, EnrichedPair, Pair, PairSnapshot, Token, TokenLabel};

use crate::timeseries::change::{or_zero, percent_change, two_day_change};

/// Historical snapshots of one pair at the three lookback blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct History<'a> {
    pub one_day: Option<&'a PairSnapshot>,
    pub two_day: Option<&'a PairSnapshot>,
    pub one_week: Option<&'a PairSnapshot>,
}

/// Merge a pair with its history and compute derived volume and liquidity fields.
///
/// A pair without a one-day snapshot reports its lifetime volume as the daily
/// volume; without a one-week snapshot, as the weekly volume. When `label` is
/// given, whichever token matches its id is renamed. A derived value that
/// overflows `Decimal` is reported as zero.
#[must_use]
pub fn enrich_pair(
    mut pair: Pair,
    history: History<'_>,
    eth_price: Decimal,
    label: Option<&TokenLabel>,
) -> EnrichedPair {
    let vol = |s: Option<&PairSnapshot>| s.map_or(Decimal::ZERO, |s| s.volume_usd);
    let untracked = |s: Option<&PairSnapshot>| s.map_or(Decimal::ZERO, |s| s.untracked_volume_usd);

    let tracked = two_day_change(
        pair.volume_usd,
        vol(history.one_day),
        vol(history.two_day),
    );
    let untracked_change = two_day_change(
        pair.untracked_volume_usd,
        untracked(history.one_day),
        untracked(history.two_day),
    );

    let one_day_volume_usd = if history.one_day.is_some() {
        tracked.current
    } else {
        pair.volume_usd
    };
    // overflow reads as zero, logged by `or_zero`
    let one_week_volume_usd = history.one_week.map_or(pair.volume_usd, |w| {
        or_zero(pair.volume_usd.checked_sub(w.volume_usd), "one week volume")
    });
    let tracked_reserve_usd = or_zero(
        pair.tracked_reserve_eth.checked_mul(eth_price),
        "tracked reserve usd",
    );
    let liquidity_change_usd =
        percent_change(pair.reserve_usd, history.one_day.map(|s| s.reserve_usd));

    if let Some(label) = label {
        relabel(&mut pair.token0, label);
        relabel(&mut pair.token1, label);
    }

    EnrichedPair {
        pair,
        one_day_volume_usd,
        one_week_volume_usd,
        volume_change_usd: tracked.percent,
        one_day_volume_untracked: untracked_change.current,
        volume_change_untracked: untracked_change.percent,
        tracked_reserve_usd,
        liquidity_change_usd,
    }
}

fn relabel(token: &mut Token, label: &TokenLabel) {
    if token.id == label.id {
        token.name.clone_from(&label.name);
        token.symbol.clone_from(&label.symbol);
    }
}
