use dexsight_types::{HourlyRates, RateCandle, RateSample};

/// Pair consecutive samples into open/close candles for both price ratios.
///
/// Each candle is stamped with the earlier sample's timestamp. Fewer than two
/// samples yield no candles. Samples are expected in ascending time order.
#[must_use]
pub fn rate_candles(samples: &[RateSample]) -> HourlyRates {
    let mut out = HourlyRates {
        token0: Vec::with_capacity(samples.len().saturating_sub(1)),
        token1: Vec::with_capacity(samples.len().saturating_sub(1)),
    };
    for w in samples.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        out.token0.push(RateCandle {
            timestamp: a.timestamp,
            open: a.token0_price,
            close: b.token0_price,
        });
        out.token1.push(RateCandle {
            timestamp: a.timestamp,
            open: a.token1_price,
            close: b.token1_price,
        });
    }
    out
}
