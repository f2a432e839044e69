pub use super::value_objects::{Company, Month, Price};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::rc::Rc;

/// Domain entity - one trading day for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub company: Company,
    pub date: NaiveDate,
    pub open: Price,
    pub close: Price,
}

impl Record {
    pub fn new(company: impl Into<Company>, date: NaiveDate, open: f64, close: f64) -> Self {
        Self { company: company.into(), date, open: Price::from(open), close: Price::from(close) }
    }

    pub fn month(&self) -> Month {
        Month::of(&self.date)
    }

    /// `close - open` rounded to cents
    pub fn difference(&self) -> f64 {
        round_to_cents(self.close.value() - self.open.value())
    }

    /// Smallest and largest of the two prices
    pub fn value_span(&self) -> (f64, f64) {
        let (open, close) = (self.open.value(), self.close.value());
        (open.min(close), open.max(close))
    }
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shared, immutable record set handed over by the ingestion side.
///
/// Cloning shares the same allocation; two datasets are "the same" only when
/// they point at the same allocation, regardless of their contents.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Rc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: Rc::from(records) }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn same_as(&self, other: &Dataset) -> bool {
        Rc::ptr_eq(&self.records, &other.records)
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Records matching one selection, in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSet {
    records: Vec<Record>,
}

impl FilteredSet {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Earliest and latest date, `None` when empty
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(min, max), record| {
            (min.min(record.date), max.max(record.date))
        }))
    }

    /// Min and max over opens and closes together, `None` when empty
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?.value_span();
        Some(self.records.iter().map(Record::value_span).fold(first, |(min, max), (lo, hi)| {
            (min.min(lo), max.max(hi))
        }))
    }
}

impl<'a> IntoIterator for &'a FilteredSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
