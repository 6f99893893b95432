//! Evidence attached to alerts
//!
//! Each rule records the facts it relied on so an auditor or an outreach
//! message can be built without re-running detection. Values are a small
//! closed set of kinds; consumers only display them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use core_kernel::Money;

/// A single evidence value
///
/// Encoded with its kind alongside the value, so a payer code such as
/// `"22"` decodes back as text and a date-shaped note stays a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DataPoint {
    Flag(bool),
    Number(Decimal),
    Date(NaiveDate),
    Text(String),
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPoint::Flag(b) => write!(f, "{}", b),
            DataPoint::Number(n) => write!(f, "{}", n.normalize()),
            DataPoint::Date(d) => write!(f, "{}", d),
            DataPoint::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for DataPoint {
    fn from(value: bool) -> Self {
        DataPoint::Flag(value)
    }
}

impl From<Decimal> for DataPoint {
    fn from(value: Decimal) -> Self {
        DataPoint::Number(value)
    }
}

impl From<u32> for DataPoint {
    fn from(value: u32) -> Self {
        DataPoint::Number(Decimal::from(value))
    }
}

impl From<i64> for DataPoint {
    fn from(value: i64) -> Self {
        DataPoint::Number(Decimal::from(value))
    }
}

impl From<usize> for DataPoint {
    fn from(value: usize) -> Self {
        DataPoint::Number(Decimal::from(value as u64))
    }
}

impl From<Money> for DataPoint {
    fn from(value: Money) -> Self {
        DataPoint::Number(value.round_to_currency().amount())
    }
}

impl From<NaiveDate> for DataPoint {
    fn from(value: NaiveDate) -> Self {
        DataPoint::Date(value)
    }
}

impl From<String> for DataPoint {
    fn from(value: String) -> Self {
        DataPoint::Text(value)
    }
}

impl From<&str> for DataPoint {
    fn from(value: &str) -> Self {
        DataPoint::Text(value.to_string())
    }
}

/// Ordered key/value evidence map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evidence(BTreeMap<String, DataPoint>);

impl Evidence {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a value, replacing any previous value under the same key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DataPoint>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds a value only when present
    pub fn with_opt<V: Into<DataPoint>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataPoint> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DataPoint)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
