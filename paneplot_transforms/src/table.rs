// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

/// A single field value in an input [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A string value.
    Str(String),
    /// A numeric value.
    Num(f64),
    /// An explicitly absent value.
    Absent,
}

impl Value {
    /// Returns the header string for this value, or `None` when absent.
    ///
    /// Numbers use shortest round-trip formatting, so `2023.0` becomes `"2023"`.
    pub fn to_header(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Num(v) if v.is_finite() => Some(format!("{v}")),
            Self::Num(_) | Self::Absent => None,
        }
    }

    /// Returns the numeric content of this value.
    ///
    /// Strings that parse as finite numbers are accepted; anything else is absent.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Num(v) if v.is_finite() => Some(*v),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Num(_) | Self::Absent => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Num(f64::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// One input row: a mapping from property names to values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field and returns the record.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds (or replaces) a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterates over the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integral_numbers_format_without_fraction() {
        assert_eq!(Value::Num(2023.0).to_header().as_deref(), Some("2023"));
        assert_eq!(Value::Num(1.5).to_header().as_deref(), Some("1.5"));
        assert_eq!(Value::Absent.to_header(), None);
    }

    #[test]
    fn numeric_strings_are_values() {
        assert_eq!(Value::from(" 12.5 ").to_number(), Some(12.5));
        assert_eq!(Value::from("n/a").to_number(), None);
        assert_eq!(Value::Num(f64::NAN).to_number(), None);
    }
}
