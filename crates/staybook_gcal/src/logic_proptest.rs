#[cfg(test)]
mod tests {
    use crate::logic::aggregate_occupancy;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;
    use proptest::prelude::*;
    use staybook_common::services::{CalendarEvent, EventBoundary};
    use std::collections::BTreeSet;

    fn all_day_event(day_offset: i64) -> CalendarEvent {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        CalendarEvent {
            start: EventBoundary::all_day(base + Duration::days(day_offset)),
            ..Default::default()
        }
    }

    proptest! {
        // N events on one date count N on that date and nowhere else
        #[test]
        fn same_start_date_counts_every_event(day in 0..730i64, n in 1..50usize) {
            let events: Vec<CalendarEvent> = (0..n).map(|_| all_day_event(day)).collect();
            let map = aggregate_occupancy(&events, &Tz::Europe__Zurich);

            prop_assert_eq!(map.len(), 1);
            prop_assert_eq!(map.values().copied().sum::<u32>(), n as u32);
        }

        // Map size equals the number of distinct start dates; counts add up to the input size
        #[test]
        fn one_entry_per_distinct_date(days in proptest::collection::vec(0..365i64, 0..80)) {
            let events: Vec<CalendarEvent> = days.iter().map(|d| all_day_event(*d)).collect();
            let map = aggregate_occupancy(&events, &Tz::Europe__Zurich);

            let distinct: BTreeSet<i64> = days.iter().copied().collect();
            prop_assert_eq!(map.len(), distinct.len());
            prop_assert_eq!(map.values().copied().sum::<u32>() as usize, days.len());
        }

        // Input order never changes the result
        #[test]
        fn order_independent(hours in proptest::collection::vec(0..(24 * 400i64), 0..60)) {
            let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
            let to_events = |hours: &[i64]| -> Vec<CalendarEvent> {
                hours
                    .iter()
                    .map(|h| CalendarEvent {
                        start: EventBoundary::timed(base + Duration::hours(*h)),
                        ..Default::default()
                    })
                    .collect()
            };

            let forward = aggregate_occupancy(&to_events(&hours), &Tz::Europe__Zurich);
            let mut reversed = hours.clone();
            reversed.reverse();
            let backward = aggregate_occupancy(&to_events(&reversed), &Tz::Europe__Zurich);
            prop_assert_eq!(forward, backward);
        }
    }
}
