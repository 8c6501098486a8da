//! Daily event timeline

use crate::SeismicRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Count events per UTC day
///
/// Days between the first and last event with no events are present with a
/// count of zero. Records without a timestamp are ignored.
pub fn daily_counts<'a>(
    records: impl IntoIterator<Item = &'a SeismicRecord>,
) -> BTreeMap<NaiveDate, usize> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for time in records.into_iter().filter_map(|r| r.time) {
        *counts.entry(time.date_naive()).or_default() += 1;
    }

    let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return counts,
    };

    for day in first.iter_days().take_while(|d| *d <= last) {
        counts.entry(day).or_insert(0);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> SeismicRecord {
        let mut r = SeismicRecord::new(0.0, 0.0, 4.5, 10.0);
        r.time = Some(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap());
        r
    }

    #[test]
    fn test_daily_counts_fill_gaps() {
        let records = vec![at(2024, 3, 1, 2), at(2024, 3, 1, 23), at(2024, 3, 4, 12)];

        let counts = daily_counts(&records);
        let days: Vec<(String, usize)> = counts
            .iter()
            .map(|(d, c)| (d.to_string(), *c))
            .collect();

        assert_eq!(
            days,
            vec![
                ("2024-03-01".to_string(), 2),
                ("2024-03-02".to_string(), 0),
                ("2024-03-03".to_string(), 0),
                ("2024-03-04".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_untimed_records_ignored() {
        let records = vec![SeismicRecord::new(0.0, 0.0, 5.0, 10.0)];
        assert!(daily_counts(&records).is_empty());
    }
}
