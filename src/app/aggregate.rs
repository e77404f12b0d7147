//! Ranking and grouping over the collected records. Every function accepts
//! empty input and then returns an empty (or zero) result.

use crate::app::model::{CategoryAggregate, TestRecord};
use std::cmp::Ordering;
use std::collections::HashSet;

pub fn total_time(records: &[TestRecord]) -> f64 {
    records.iter().map(|record| record.duration_seconds).sum()
}

/// One aggregate per category, in the order categories first appear.
pub fn category_aggregates(records: &[TestRecord]) -> Vec<CategoryAggregate> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.category.as_str())
        .filter(|category| seen.insert(*category))
        .filter_map(|category| CategoryAggregate::from_records(category, records))
        .collect()
}

/// Tests slower than `min_duration`, slowest first. Ties keep input order.
pub fn top_slowest_tests(records: &[TestRecord], min_duration: f64, count: usize) -> Vec<&TestRecord> {
    let mut slow: Vec<&TestRecord> = records
        .iter()
        .filter(|record| record.duration_seconds > min_duration)
        .collect();
    slow.sort_by(|a, b| descending(a.duration_seconds, b.duration_seconds));
    slow.truncate(count);
    slow
}

pub fn top_categories_by_average(aggregates: &[CategoryAggregate], count: usize) -> Vec<&CategoryAggregate> {
    top_by(aggregates, count, |aggregate| aggregate.average_seconds)
}

pub fn top_categories_by_total(aggregates: &[CategoryAggregate], count: usize) -> Vec<&CategoryAggregate> {
    top_by(aggregates, count, |aggregate| aggregate.total_seconds)
}

fn top_by<F>(aggregates: &[CategoryAggregate], count: usize, key: F) -> Vec<&CategoryAggregate>
where
    F: Fn(&CategoryAggregate) -> f64,
{
    let mut ranked: Vec<&CategoryAggregate> = aggregates.iter().collect();
    ranked.sort_by(|a, b| descending(key(a), key(b)));
    ranked.truncate(count);
    ranked
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario() -> Vec<TestRecord> {
        vec![
            TestRecord::new("Billing", "Shop.BillingTests", "ChargesCard", 0.05),
            TestRecord::new("Billing", "Shop.BillingTests", "IssuesRefund", 2.30),
            TestRecord::new("Auth", "Shop.AuthTests", "LogsIn", 1.00),
        ]
    }

    #[test]
    fn test_scenario_totals_and_aggregates() {
        let records = scenario();

        assert!((total_time(&records) - 3.35).abs() < 1e-9);
        let aggregates = category_aggregates(&records);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].category, "Billing");
        assert_eq!(aggregates[0].count, 2);
        assert!((aggregates[0].average_seconds - 1.175).abs() < 1e-9);
        assert!((aggregates[0].total_seconds - 2.35).abs() < 1e-9);
        assert_eq!(aggregates[1].category, "Auth");
    }

    #[test]
    fn test_scenario_slowest_tests_above_threshold() {
        let records = scenario();

        let slowest = top_slowest_tests(&records, 0.1, 50);
        let names: Vec<&str> = slowest.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["IssuesRefund", "LogsIn"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let records = vec![TestRecord::new("Auth", "A", "Edge", 0.1)];

        assert!(top_slowest_tests(&records, 0.1, 50).is_empty());
    }

    #[test]
    fn test_ties_keep_original_order() {
        let records = vec![
            TestRecord::new("Auth", "A", "First", 1.0),
            TestRecord::new("Auth", "A", "Second", 1.0),
            TestRecord::new("Auth", "A", "Third", 2.0),
        ];

        let names: Vec<&str> = top_slowest_tests(&records, 0.0, 10)
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_category_rankings() {
        let records = vec![
            TestRecord::new("Auth", "A", "a", 3.0),
            TestRecord::new("Billing", "B", "b1", 1.0),
            TestRecord::new("Billing", "B", "b2", 1.0),
            TestRecord::new("Billing", "B", "b3", 2.0),
            TestRecord::new("Search", "S", "s", 0.5),
        ];
        let aggregates = category_aggregates(&records);

        let by_average: Vec<&str> = top_categories_by_average(&aggregates, 2)
            .iter()
            .map(|a| a.category.as_str())
            .collect();
        let by_total: Vec<&str> = top_categories_by_total(&aggregates, 5)
            .iter()
            .map(|a| a.category.as_str())
            .collect();

        assert_eq!(by_average, vec!["Auth", "Billing"]);
        assert_eq!(by_total, vec!["Billing", "Auth", "Search"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(total_time(&[]), 0.0);
        assert!(category_aggregates(&[]).is_empty());
        assert!(top_slowest_tests(&[], 0.1, 50).is_empty());
        assert!(top_categories_by_average(&[], 5).is_empty());
        assert!(top_categories_by_total(&[], 5).is_empty());
    }

    fn arb_records() -> impl Strategy<Value = Vec<TestRecord>> {
        prop::collection::vec(
            ("(Auth|Billing|Search|billing)", "[A-Z][a-z]{0,6}", 0.0f64..500.0),
            0..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (category, class, duration))| {
                    TestRecord::new(category, class, format!("Case{}", i), duration)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_aggregates_partition_total(records in arb_records()) {
            let sum: f64 = category_aggregates(&records).iter().map(|a| a.total_seconds).sum();
            let total = total_time(&records);
            prop_assert!((sum - total).abs() <= 1e-6 * total.max(1.0));
        }

        #[test]
        fn prop_average_times_count_is_total(records in arb_records()) {
            for aggregate in category_aggregates(&records) {
                let count = records.iter().filter(|r| r.category == aggregate.category).count();
                prop_assert_eq!(count, aggregate.count);
                let rebuilt = aggregate.average_seconds * count as f64;
                prop_assert!((rebuilt - aggregate.total_seconds).abs() <= 1e-6 * aggregate.total_seconds.max(1.0));
            }
        }

        #[test]
        fn prop_slowest_tests_filtered_and_sorted(
            records in arb_records(),
            min_duration in 0.0f64..300.0,
            count in 0usize..80,
        ) {
            let slowest = top_slowest_tests(&records, min_duration, count);
            prop_assert!(slowest.len() <= count);
            prop_assert!(slowest.iter().all(|r| r.duration_seconds > min_duration));
            prop_assert!(slowest.windows(2).all(|w| w[0].duration_seconds >= w[1].duration_seconds));
        }

        #[test]
        fn prop_category_rankings_sorted(records in arb_records(), count in 0usize..6) {
            let aggregates = category_aggregates(&records);
            let by_average = top_categories_by_average(&aggregates, count);
            let by_total = top_categories_by_total(&aggregates, count);
            prop_assert!(by_average.len() <= count && by_total.len() <= count);
            prop_assert!(by_average.windows(2).all(|w| w[0].average_seconds >= w[1].average_seconds));
            prop_assert!(by_total.windows(2).all(|w| w[0].total_seconds >= w[1].total_seconds));
        }
    }
}
