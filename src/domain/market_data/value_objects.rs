use chrono::{Datelike, NaiveDate};
use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr};

/// Value Object - price in the dataset's currency
#[derive(
    Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - company identifier, compared by exact string match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company(String);

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Company {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Company {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Companies offered by the picker.
pub const DEFAULT_COMPANIES: [&str; 5] = ["Apple", "Microsoft", "Amazon", "Google", "Meta"];

/// Value Object - calendar month, displayed with its long English name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    AsRefStr,
    FromRepr,
    IntoStaticStr,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Month a date falls in
    pub fn of(date: &NaiveDate) -> Self {
        // chrono guarantees 1..=12
        Self::from_repr(date.month() as u8).unwrap_or(Month::January)
    }

    /// Canonical long-form name, e.g. "November"
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn all() -> Vec<Month> {
        Month::iter().collect()
    }
}

/// Value Object - the active (company, month) filter pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub company: Company,
    pub month: Month,
}

impl Selection {
    pub fn new(company: impl Into<Company>, month: Month) -> Self {
        Self { company: company.into(), month }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new("Apple", Month::November)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.company, self.month)
    }
}

/// Which of the two compared value streams a point belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display, Serialize, Deserialize,
)]
pub enum SeriesKind {
    #[display(fmt = "Open")]
    #[strum(serialize = "open")]
    Open,
    #[display(fmt = "Close")]
    #[strum(serialize = "close")]
    Close,
}
