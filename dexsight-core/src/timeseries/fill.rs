use dexsight_types::{DAY_SECONDS, Decimal, PairDayData};

/// Pad daily snapshots into one entry per calendar day, ascending by date.
///
/// The series runs without holes from the day of the first real snapshot
/// through the last day that starts before `end`, or through the last real
/// snapshot if that is later. A missing day gets a synthesized entry with zero
/// volume and the reserve of the most recent real day before it. When several
/// snapshots share a day the earliest one wins.
#[must_use]
pub fn fill_daily_gaps(mut snapshots: Vec<PairDayData>, end: i64) -> Vec<PairDayData> {
    snapshots.sort_by_key(|d| d.date);
    snapshots.dedup_by_key(|d| d.day_index());

    let Some(first_day) = snapshots.first().map(PairDayData::day_index) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(snapshots.len());
    let mut real = snapshots.into_iter().peekable();
    let mut carry = Decimal::ZERO;
    let mut day = first_day;

    loop {
        let day_start = day * DAY_SECONDS;
        match real.peek() {
            Some(next) if next.day_index() == day => {
                carry = next.reserve_usd;
                out.extend(real.next());
            }
            None if day_start >= end => break,
            _ => out.push(PairDayData::filler(day_start, carry)),
        }
        day += 1;
    }
    out
}
