use super::entities::{FilteredSet, Record};
use super::value_objects::Selection;
use crate::domain::logging::LogComponent;
use crate::log_trace;

/// Domain service that picks the records shown for a selection
pub struct RecordFilterService;

impl RecordFilterService {
    /// Records whose company equals `selection.company` and whose date falls
    /// in `selection.month`, keeping their original order.
    pub fn filter(records: &[Record], selection: &Selection) -> FilteredSet {
        let matching: Vec<Record> = records
            .iter()
            .filter(|record| {
                record.company == selection.company
                    && record.month().name() == selection.month.name()
            })
            .cloned()
            .collect();

        log_trace!(
            LogComponent::Domain("RecordFilter"),
            "{} of {} records match {}",
            matching.len(),
            records.len(),
            selection
        );

        FilteredSet::from_records(matching)
    }
}

/// Shorthand for [`RecordFilterService::filter`]
pub fn filter(records: &[Record], selection: &Selection) -> FilteredSet {
    RecordFilterService::filter(records, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::Month;
    use chrono::NaiveDate;

    fn record(company: &str, y: i32, m: u32, d: u32, open: f64, close: f64) -> Record {
        Record::new(company, NaiveDate::from_ymd_opt(y, m, d).unwrap(), open, close)
    }

    #[test]
    fn keeps_only_matching_company_and_month_in_order() {
        let records = vec![
            record("Apple", 2023, 11, 3, 1.0, 2.0),
            record("Microsoft", 2023, 11, 1, 3.0, 4.0),
            record("Apple", 2023, 10, 31, 5.0, 6.0),
            record("Apple", 2023, 11, 1, 7.0, 8.0),
        ];

        let filtered = filter(&records, &Selection::new("Apple", Month::November));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0], records[0]);
        assert_eq!(filtered.records()[1], records[3]);
    }

    #[test]
    fn company_match_is_exact() {
        let records = vec![record("apple", 2023, 11, 1, 1.0, 2.0)];
        assert!(filter(&records, &Selection::new("Apple", Month::November)).is_empty());
    }

    #[test]
    fn months_of_different_years_both_match() {
        let records = vec![
            record("Meta", 2022, 11, 5, 1.0, 2.0),
            record("Meta", 2023, 11, 5, 1.0, 2.0),
        ];
        assert_eq!(filter(&records, &Selection::new("Meta", Month::November)).len(), 2);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter(&[], &Selection::default()).is_empty());
    }
}
