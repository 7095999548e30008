use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, LocalResult, NaiveDate, Offset, TimeZone};
use itertools::Itertools;

use crate::domain::{CatalogEntry, RankedEntry, RecurrenceTime, UrgencyTier};

pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, time: RecurrenceTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let candidate = localize(&tz, today, time);
    if candidate < *now {
        let tomorrow = today.succ_opt().unwrap_or(today);
        return localize(&tz, tomorrow, time);
    }
    candidate
}

pub fn seconds_until<Tz: TimeZone>(now: &DateTime<Tz>, time: RecurrenceTime) -> i64 {
    let candidate = next_occurrence(now, time);
    candidate
        .signed_duration_since(now.clone())
        .num_milliseconds()
        .div_euclid(1000)
}

pub fn remaining_seconds<Tz: TimeZone>(now: &DateTime<Tz>, entry: &CatalogEntry) -> i64 {
    entry
        .recurrence_times()
        .iter()
        .map(|&time| seconds_until(now, time))
        .fold(i64::MAX, i64::min)
}

pub fn evaluate<Tz: TimeZone>(now: &DateTime<Tz>, entry: &Arc<CatalogEntry>) -> RankedEntry {
    let remaining_seconds = remaining_seconds(now, entry);
    RankedEntry {
        entry: Arc::clone(entry),
        remaining_seconds,
        tier: UrgencyTier::classify(remaining_seconds),
    }
}

pub fn rank<Tz: TimeZone>(now: &DateTime<Tz>, entries: &[Arc<CatalogEntry>]) -> Vec<RankedEntry> {
    entries
        .iter()
        .map(|entry| evaluate(now, entry))
        .sorted_by_key(|ranked| ranked.remaining_seconds)
        .collect()
}

pub fn upcoming<Tz: TimeZone>(
    now: &DateTime<Tz>,
    entry: &CatalogEntry,
) -> Vec<(RecurrenceTime, DateTime<Tz>)> {
    entry
        .recurrence_times()
        .iter()
        .map(|&time| (time, next_occurrence(now, time)))
        .collect()
}

fn localize<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: RecurrenceTime) -> DateTime<Tz> {
    let naive = date.and_time(time.window_end());

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Read the skipped wall time with the offset in force before the
            // jump, which moves it forward by the length of the gap.
            let before = tz
                .offset_from_utc_datetime(&(naive - ChronoDuration::days(1)))
                .fix();
            let utc = naive - ChronoDuration::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDateTime, Utc};
    use chrono_tz::America::New_York;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::EntryId;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
    }

    fn time(h: u32, m: u32) -> RecurrenceTime {
        RecurrenceTime::new(h, m).unwrap()
    }

    fn entry(id: &str, times: &[(u32, u32)]) -> Arc<CatalogEntry> {
        Arc::new(
            CatalogEntry::new(
                EntryId::new(id),
                id,
                times.iter().map(|&(h, m)| time(h, m)).collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_seconds_until_later_today() {
        // 10:00:00 -> 11:11:59.999
        assert_eq!(seconds_until(&at(10, 0, 0), time(11, 11)), 4319);
    }

    #[test]
    fn test_seconds_until_rolls_over_midnight() {
        // 23:50:00 -> tomorrow 00:10:59.999
        assert_eq!(seconds_until(&at(23, 50, 0), time(0, 10)), 1259);
    }

    #[test]
    fn test_seconds_until_inside_active_minute() {
        assert_eq!(seconds_until(&at(11, 11, 0), time(11, 11)), 59);
        assert_eq!(seconds_until(&at(11, 11, 30), time(11, 11)), 29);
        assert_eq!(seconds_until(&at(11, 11, 59), time(11, 11)), 0);
    }

    #[test]
    fn test_seconds_until_just_after_window() {
        // 11:12:00 has passed the window, so the next one is tomorrow.
        assert_eq!(seconds_until(&at(11, 12, 0), time(11, 11)), 86_399);
    }

    #[test]
    fn test_seconds_until_respects_offset() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 14, 22, 0, 0).unwrap();
        assert_eq!(seconds_until(&now, time(22, 22)), 22 * 60 + 59);
    }

    #[test]
    fn test_next_occurrence_is_tomorrow_after_window() {
        let now = at(23, 12, 0);
        let next = next_occurrence(&now, time(23, 11));
        assert_eq!(
            next.naive_utc(),
            NaiveDateTime::parse_from_str("2026-03-15 23:11:59.999", "%Y-%m-%d %H:%M:%S%.3f")
                .unwrap()
        );
    }

    #[test]
    fn test_skipped_local_time_moves_forward_by_gap() {
        // New York springs forward at 02:00 on 2026-03-08, so 02:30 never happens.
        let now = New_York.with_ymd_and_hms(2026, 3, 8, 1, 0, 0).unwrap();
        let next = next_occurrence(&now, time(2, 30));

        assert_eq!(
            next.naive_local(),
            NaiveDateTime::parse_from_str("2026-03-08 03:30:59.999", "%Y-%m-%d %H:%M:%S%.3f")
                .unwrap()
        );
        assert_eq!(next.offset().fix().local_minus_utc(), -4 * 3600);
        assert_eq!(seconds_until(&now, time(2, 30)), 5459);
    }

    #[test]
    fn test_repeated_local_time_uses_earlier_instant() {
        // 01:30 happens twice on 2026-11-01; the EDT one comes first.
        let now = New_York.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let next = next_occurrence(&now, time(1, 30));

        assert_eq!(next.offset().fix().local_minus_utc(), -4 * 3600);
        assert_eq!(seconds_until(&now, time(1, 30)), 5459);
    }

    #[test]
    fn test_remaining_seconds_takes_minimum() {
        // 49979, 179 and 82859 seconds away from 10:00:00.
        let now = at(10, 0, 0);
        let fish = entry("fish", &[(23, 52), (10, 2), (9, 0)]);

        let ranked = evaluate(&now, &fish);
        assert_eq!(seconds_until(&now, time(23, 52)), 49_979);
        assert_eq!(ranked.remaining_seconds, 179);
        assert_eq!(ranked.tier, UrgencyTier::Soon);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let now = at(14, 54, 12);
        let byte = entry("byte", &[(2, 55), (14, 55)]);
        assert_eq!(evaluate(&now, &byte), evaluate(&now, &byte));
    }

    #[test]
    fn test_evaluate_tier_boundary() {
        // 14:40:59.999 + 900s = 14:55:59.999
        let byte = entry("byte", &[(14, 55)]);
        let exactly_900 = Utc
            .with_ymd_and_hms(2026, 3, 14, 14, 40, 59)
            .unwrap()
            + ChronoDuration::milliseconds(999);
        let ranked = evaluate(&exactly_900, &byte);
        assert_eq!(ranked.remaining_seconds, 900);
        assert_eq!(ranked.tier, UrgencyTier::Later);

        let ranked = evaluate(&(exactly_900 + ChronoDuration::seconds(1)), &byte);
        assert_eq!(ranked.remaining_seconds, 899);
        assert_eq!(ranked.tier, UrgencyTier::Soon);
    }

    #[test]
    fn test_rank_orders_soonest_first_with_stable_ties() {
        let now = at(11, 0, 0);
        let entries = vec![
            entry("dish", &[(22, 22)]),
            entry("fish", &[(11, 11), (23, 11)]),
            entry("fish-3d", &[(11, 11), (23, 11)]),
            entry("byte", &[(2, 55), (14, 55)]),
        ];

        let ranking = rank(&now, &entries);
        let ids: Vec<&str> = ranking.iter().map(|r| r.entry.id().as_str()).collect();
        assert_eq!(ids, vec!["fish", "fish-3d", "byte", "dish"]);

        assert_eq!(ranking, rank(&now, &entries));
        assert_eq!(ranking[0].remaining_seconds, ranking[1].remaining_seconds);
    }

    #[test]
    fn test_upcoming_lists_each_time() {
        let now = at(12, 0, 0);
        let fish = entry("fish", &[(11, 11), (23, 11)]);
        let next = upcoming(&now, &fish);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].1.date_naive().to_string(), "2026-03-15");
        assert_eq!(next[1].1.date_naive().to_string(), "2026-03-14");
    }

    proptest! {
        #[test]
        fn prop_seconds_until_within_one_day(
            h in 0u32..24,
            m in 0u32..60,
            now_h in 0u32..24,
            now_m in 0u32..60,
            now_s in 0u32..60,
        ) {
            let now = at(now_h, now_m, now_s);
            let remaining = seconds_until(&now, time(h, m));
            prop_assert!(remaining >= 0);
            prop_assert!(remaining < 86_400);
        }

        #[test]
        fn prop_remaining_is_minimum_of_times(
            times in proptest::collection::vec((0u32..24, 0u32..60), 1..6),
            now_h in 0u32..24,
            now_m in 0u32..60,
        ) {
            let now = at(now_h, now_m, 0);
            let candidate = entry("prop", &times);
            let expected = times
                .iter()
                .map(|&(h, m)| seconds_until(&now, time(h, m)))
                .min()
                .unwrap();
            prop_assert_eq!(remaining_seconds(&now, &candidate), expected);
        }
    }
}
