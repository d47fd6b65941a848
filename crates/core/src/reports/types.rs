//! Report data types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ReportError;

/// Known report kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Daily cash summary.
    Daily,
    /// Tax summary for a period.
    Tax,
    /// Monthly performance.
    Monthly,
    /// Tax compliance status.
    Compliance,
}

impl ReportType {
    /// Every report type, in display order.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Tax, Self::Monthly, Self::Compliance];

    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Tax => "tax",
            Self::Monthly => "monthly",
            Self::Compliance => "compliance",
        }
    }

    /// Returns the display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily Cash Summary Report",
            Self::Tax => "Tax Summary Report",
            Self::Monthly => "Monthly Performance Report",
            Self::Compliance => "Tax Compliance Report",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReportError::UnsupportedReportType(s.to_string()))
    }
}

/// A single value in report data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValue {
    /// A numeric figure.
    Number(Decimal),
    /// Text, passed through as-is.
    Text(String),
}

impl From<Decimal> for ReportValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for ReportValue {
    fn from(value: u32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<usize> for ReportValue {
    fn from(value: usize) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl Serialize for ReportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => Serialize::serialize(n, serializer),
            Self::Text(t) => serializer.serialize_str(t),
        }
    }
}

impl<'de> Deserialize<'de> for ReportValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = ReportValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ReportValue::Number(Decimal::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ReportValue::Number(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Decimal::try_from(v)
                    .map(|d| ReportValue::Number(d.normalize()))
                    .map_err(|_| E::custom(format!("number {v} is out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ReportValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ReportValue::Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ReportValue::Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Ordered key/value data for a report.
///
/// Insertion order is kept. Inserting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportData {
    entries: Vec<(String, ReportValue)>,
}

impl ReportData {
    /// Creates empty report data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ReportValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`ReportData::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ReportValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReportValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReportData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ReportData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DataVisitor;

        impl<'de> Visitor<'de> for DataVisitor {
            type Value = ReportData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of report fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut data = ReportData::new();
                while let Some((key, value)) = access.next_entry::<String, ReportValue>()? {
                    data.insert(key, value);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(DataVisitor)
    }
}

/// One `(key, label, value)` line of a flat report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Source key.
    pub key: String,
    /// Human-readable label derived from the key.
    pub label: String,
    /// Display value.
    pub value: String,
}

/// A report flattened for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatReportRecord {
    /// Report kind.
    pub report_type: ReportType,
    /// Display title.
    pub title: String,
    /// Currency code used for money values.
    pub currency: String,
    /// One entry per input key, input order.
    pub entries: Vec<ReportEntry>,
}

impl FlatReportRecord {
    /// `(key, value)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }
}
