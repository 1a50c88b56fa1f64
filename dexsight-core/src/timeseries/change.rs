use dexsight_types::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Amount attributable to the latest day and its change versus the day before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoDayChange {
    /// `now - one_day_ago`.
    pub current: Decimal,
    /// Percent change of `current` against the previous day's amount.
    pub percent: Decimal,
}

/// Split a cumulative total into the last day's amount and its day-over-day change.
///
/// The previous day's amount is `one_day_ago - two_days_ago`, or `one_day_ago`
/// itself when `two_days_ago` is zero (no data two days back). Missing history
/// should be passed as zero. `percent` is zero when the previous amount is zero.
#[must_use]
pub fn two_day_change(now: Decimal, one_day_ago: Decimal, two_days_ago: Decimal) -> TwoDayChange {
    let current = sub_or_zero(now, one_day_ago);
    let previous = if two_days_ago.is_zero() {
        one_day_ago
    } else {
        sub_or_zero(one_day_ago, two_days_ago)
    };
    TwoDayChange {
        current,
        percent: ratio_percent(sub_or_zero(current, previous), previous),
    }
}

/// `(now - before) / before * 100`; zero when `before` is absent or zero.
///
/// A percentage that leaves `Decimal` range (a near-zero `before`) also reads
/// as zero.
#[must_use]
pub fn percent_change(now: Decimal, before: Option<Decimal>) -> Decimal {
    match before {
        Some(b) => ratio_percent(sub_or_zero(now, b), b),
        None => Decimal::ZERO,
    }
}

fn ratio_percent(delta: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    or_zero(
        delta.checked_div(base).and_then(|r| r.checked_mul(HUNDRED)),
        "percent change",
    )
}

fn sub_or_zero(a: Decimal, b: Decimal) -> Decimal {
    or_zero(a.checked_sub(b), "difference")
}

/// Result of checked arithmetic, or zero when it left `Decimal` range.
///
/// Metrics are reported as zero rather than failing the whole pairs table.
/// With the `tracing` feature every such clamp is logged.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn or_zero(result: Option<Decimal>, what: &'static str) -> Decimal {
    result.unwrap_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "dexsight::metrics", what, "decimal overflow, reported as zero");
        Decimal::ZERO
    })
}
