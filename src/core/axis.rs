use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::num::CalcNum;

/// One cell of user-supplied trace data.
///
/// Inputs that cannot be represented (non-finite numbers, out-of-range
/// decimals) degrade to [`RawValue::Null`] instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Null,
}

impl RawValue {
    /// Numeric coercion used by linear materialization and color values.
    ///
    /// Numeric text is accepted the way hand-entered spreadsheet exports
    /// tend to carry it; anything else is missing.
    #[must_use]
    pub fn as_number(&self) -> CalcNum {
        match self {
            Self::Number(v) => CalcNum::new(*v),
            Self::Text(s) => s.trim().parse::<f64>().map_or(CalcNum::Missing, CalcNum::new),
            Self::Null => CalcNum::Missing,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else {
            Self::Null
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map_or(Self::Null, Self::from)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Number(datetime_to_unix_seconds(value))
    }
}

impl<T> From<Option<T>> for RawValue
where
    T: Into<RawValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Materialization behavior of a coordinate dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Values coerce to numbers; numeric text is accepted.
    #[default]
    Linear,
    /// Values become indices into the axis' interned category list.
    Category,
    /// Values are unix seconds; RFC 3339 and plain-date text parse.
    Date,
}

/// A coordinate dimension that can materialize a trace field as an aligned
/// numeric sequence with missing-value substitution.
///
/// Category axes intern labels in first-seen order and keep that state
/// across traces, so every trace on the axis agrees on category indices.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    kind: AxisKind,
    categories: IndexMap<String, usize>,
}

impl Axis {
    #[must_use]
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            categories: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Interned category labels in index order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Materializes `values` as calc numbers aligned to point index.
    pub fn make_calcdata(&mut self, values: &[RawValue]) -> Vec<CalcNum> {
        values.iter().map(|value| self.coerce(value)).collect()
    }

    /// Interns `label` on a category axis and returns its index.
    ///
    /// Returns `None` on non-category axes.
    pub fn intern_category(&mut self, label: &str) -> Option<usize> {
        if self.kind != AxisKind::Category {
            return None;
        }
        let next = self.categories.len();
        Some(*self.categories.entry(label.to_owned()).or_insert(next))
    }

    fn coerce(&mut self, value: &RawValue) -> CalcNum {
        match self.kind {
            AxisKind::Linear => value.as_number(),
            AxisKind::Category => match category_label(value) {
                Some(label) => {
                    let index = self
                        .intern_category(&label)
                        .unwrap_or(self.categories.len());
                    CalcNum::new(index as f64)
                }
                None => CalcNum::Missing,
            },
            AxisKind::Date => match value {
                RawValue::Number(v) => CalcNum::new(*v),
                RawValue::Text(s) => CalcNum::from(parse_date_seconds(s)),
                RawValue::Null => CalcNum::Missing,
            },
        }
    }
}

fn category_label(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Number(v) => Some(format!("{v}")),
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        RawValue::Null => None,
    }
}

fn parse_date_seconds(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime_to_unix_seconds(time.with_timezone(&Utc)));
    }
    // calendar dates without a time component land on midnight UTC
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    Some(datetime_to_unix_seconds(midnight))
}
