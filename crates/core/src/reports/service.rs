//! Report assembly service.

use cashdesk_shared::types::{Currency, Money};

use super::error::ReportError;
use super::types::{FlatReportRecord, ReportData, ReportEntry, ReportType, ReportValue};

/// Key words whose numbers are shown as plain figures, not money.
const PLAIN_NUMBER_WORDS: &[&str] = &[
    "growth",
    "rate",
    "percent",
    "percentage",
    "count",
    "filings",
    "transactions",
];

/// Assembles flat report records in one currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler {
    currency: Currency,
}

impl ReportAssembler {
    /// Creates an assembler formatting money in `currency`.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Currency used for money values.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Assembles a report from its wire identifier.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedReportType` if `report_type` is not a known kind.
    pub fn assemble(
        &self,
        report_type: &str,
        data: &ReportData,
    ) -> Result<FlatReportRecord, ReportError> {
        let report_type = report_type.parse::<ReportType>()?;
        Ok(self.assemble_typed(report_type, data))
    }

    /// Assembles a report of a known kind. Every key yields one entry.
    #[must_use]
    pub fn assemble_typed(&self, report_type: ReportType, data: &ReportData) -> FlatReportRecord {
        let entries = data
            .iter()
            .map(|(key, value)| ReportEntry {
                key: key.to_string(),
                label: humanize(key),
                value: self.format_value(key, value),
            })
            .collect();

        FlatReportRecord {
            report_type,
            title: report_type.title().to_string(),
            currency: self.currency.to_string(),
            entries,
        }
    }

    fn format_value(&self, key: &str, value: &ReportValue) -> String {
        match value {
            ReportValue::Number(n) if is_plain_number_key(key) => n.normalize().to_string(),
            ReportValue::Number(n) => Money::new(*n, self.currency).to_string(),
            ReportValue::Text(t) => t.clone(),
        }
    }
}

/// Splits a camelCase, snake_case or kebab-case key into lowercase words.
fn key_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_plain_number_key(key: &str) -> bool {
    key_words(key)
        .iter()
        .any(|w| PLAIN_NUMBER_WORDS.contains(&w.as_str()))
}

/// `"openingCash"` → `"Opening Cash"`.
fn humanize(key: &str) -> String {
    key_words(key)
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
