// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick and data labels.
//!
//! Two formatters are provided:
//! - [`format_tick_with_step`] picks just enough decimals to tell ticks apart.
//! - [`NumberPattern`] understands spreadsheet-style patterns such as
//!   `#,##0.00`, `0%` or `$#,##0`.

use alloc::format;
use alloc::string::String;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MAX_DECIMALS: usize = 10;

/// Returns the number of decimals needed to represent multiples of `step`.
pub fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let mut scaled = step;
    for d in 0..MAX_DECIMALS {
        if (scaled - scaled.round()).abs() <= 1e-6 * scaled.max(1.0) {
            return d;
        }
        scaled *= 10.0;
    }
    MAX_DECIMALS
}

/// Formats a tick value with the decimals implied by the tick `step`.
///
/// Negative zero prints as `0`.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    let decimals = decimals_for_step(step);
    let s = format!("{value:.decimals$}");
    strip_negative_zero(s)
}

fn strip_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => String::from(rest),
        _ => s,
    }
}

/// A compiled number pattern.
///
/// Supported syntax:
/// - `0` is a required digit, `#` an optional one;
/// - `,` in the integer part turns on thousands grouping;
/// - `.` separates the fraction, whose `0`s are always printed and whose
///   `#`s are printed only when non-zero;
/// - `%` multiplies the value by 100;
/// - anything else before or after the digits is copied literally.
///
/// A pattern without any digit placeholder is treated as a prefix for a plain
/// integer rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPattern {
    prefix: String,
    suffix: String,
    grouping: bool,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    percent: bool,
}

impl NumberPattern {
    /// Compiles `pattern`.
    pub fn parse(pattern: &str) -> Self {
        let is_digit_char = |c: char| matches!(c, '0' | '#' | ',' | '.');
        let Some(start) = pattern.find(|c: char| c == '0' || c == '#') else {
            return Self {
                prefix: String::from(pattern),
                suffix: String::new(),
                grouping: false,
                min_integer: 1,
                min_fraction: 0,
                max_fraction: 0,
                percent: pattern.contains('%'),
            };
        };
        // A leading `,` or `.` belongs to the numeric body, not the prefix.
        let start = pattern[..start]
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_digit_char(*c))
            .last()
            .map_or(start, |(i, _)| i);
        let end = pattern[start..]
            .char_indices()
            .find(|(_, c)| !is_digit_char(*c))
            .map_or(pattern.len(), |(i, _)| start + i);

        let body = &pattern[start..end];
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        let min_fraction = frac_part.chars().filter(|c| *c == '0').count();
        let max_fraction = frac_part
            .chars()
            .filter(|c| *c == '0' || *c == '#')
            .count();
        Self {
            prefix: String::from(&pattern[..start]),
            suffix: String::from(&pattern[end..]),
            grouping: int_part.contains(','),
            min_integer: int_part.chars().filter(|c| *c == '0').count(),
            min_fraction,
            max_fraction: max_fraction.min(MAX_DECIMALS),
            percent: pattern.contains('%'),
        }
    }

    /// Formats `value` with this pattern.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{}{value}{}", self.prefix, self.suffix);
        }
        let value = if self.percent { value * 100.0 } else { value };
        let decimals = self.max_fraction;
        let rendered = format!("{:.decimals$}", value.abs());
        let (int_digits, frac_digits) = match rendered.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rendered.as_str(), ""),
        };

        let mut frac = String::from(frac_digits);
        while frac.len() > self.min_fraction && frac.ends_with('0') {
            frac.pop();
        }

        let int_digits = int_digits.trim_start_matches('0');
        let mut int = String::new();
        for _ in int_digits.len()..self.min_integer {
            int.push('0');
        }
        int.push_str(int_digits);

        let negative = value < 0.0 && (int.chars().chain(frac.chars()).any(|c| c != '0'));
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.prefix);
        if self.grouping {
            push_grouped(&mut out, &int);
        } else {
            out.push_str(&int);
        }
        if !frac.is_empty() {
            out.push('.');
            out.push_str(&frac);
        }
        out.push_str(&self.suffix);
        out
    }
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
}

/// Compiled patterns, keyed by their source text.
///
/// One cache lives for a single generation pass.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, NumberPattern>,
}

impl PatternCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats `value` with `pattern`, compiling the pattern on first use.
    pub fn format(&mut self, pattern: &str, value: f64) -> String {
        if let Some(p) = self.compiled.get(pattern) {
            return p.format(value);
        }
        let compiled = NumberPattern::parse(pattern);
        let out = compiled.format(value);
        self.compiled.insert(String::from(pattern), compiled);
        out
    }

    /// Number of compiled patterns held.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Returns `true` if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn tick_decimals_follow_step() {
        assert_eq!(format_tick_with_step(20.0, 5.0), "20");
        assert_eq!(format_tick_with_step(0.5, 0.5), "0.5");
        assert_eq!(format_tick_with_step(0.1 + 0.2, 0.05), "0.30");
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
        assert_eq!(format_tick_with_step(-0.0001, 0.1), "0.0");
    }

    #[test]
    fn grouping_and_fixed_decimals() {
        let p = NumberPattern::parse("#,##0.00");
        assert_eq!(p.format(1234567.891), "1,234,567.89");
        assert_eq!(p.format(0.5), "0.50");
        assert_eq!(p.format(-1234.0), "-1,234.00");
    }

    #[test]
    fn percent_and_currency() {
        assert_eq!(NumberPattern::parse("0%").format(0.256), "26%");
        assert_eq!(NumberPattern::parse("$#,##0").format(12345.4), "$12,345");
        assert_eq!(NumberPattern::parse("0.##").format(2.5), "2.5");
        assert_eq!(NumberPattern::parse("0.##").format(2.0), "2");
    }

    #[test]
    fn cache_compiles_once() {
        let mut cache = PatternCache::new();
        assert_eq!(cache.format("0.0", 1.26), "1.3");
        assert_eq!(cache.format("0.0", 2.0), "2.0");
        assert_eq!(cache.len(), 1);
    }
}
