// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation and linear value scales.
//!
//! Tick generation rounds the raw increment `range / (n - 1)` up to the next
//! member of the 1/2/5 × 10^k family, then lays ticks out either from the
//! range minimum ([`TickMode::Fixed`]) or on increment multiples that enclose
//! the range ([`TickMode::Expanding`]). When two tick labels would read the
//! same, the tick count is reduced and generation retried.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashSet;
use paneplot_transforms::ValueRange;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Upper bound on ticks produced for a single axis.
const MAX_TICKS: usize = 10_000;

/// How tick values are laid out relative to the data range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickMode {
    /// Start at the range minimum and step until the range maximum is covered.
    Fixed,
    /// Snap both ends outward to increment multiples and fill every step.
    #[default]
    Expanding,
}

/// A generated set of ticks with their labels.
#[derive(Clone, Debug, PartialEq)]
pub struct TickSet {
    /// Tick values in ascending order.
    pub values: Vec<f64>,
    /// Formatted labels, one per value.
    pub labels: Vec<String>,
    /// Distance between consecutive ticks.
    pub step: f64,
}

impl TickSet {
    /// Smallest tick value.
    pub fn min(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }

    /// Largest tick value.
    pub fn max(&self) -> f64 {
        self.values.last().copied().unwrap_or(1.0)
    }

    /// Number of ticks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no ticks.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the linear scale spanning the ticks, mapped onto `[r0, r1]`.
    pub fn scale(&self, r0: f64, r1: f64) -> LinearScale {
        LinearScale::new((self.min(), self.max()), (r0, r1))
    }
}

/// Rounds `raw` up to the next value of the form `{1, 2, 5} × 10^k`.
///
/// Returns `0.0` for non-positive or non-finite input.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite positive f64 is well inside i32"
    )]
    let exponent = raw.log10().floor() as i32;
    let magnitude = 10_f64.powi(exponent);
    let normalized = raw / magnitude;
    for candidate in [1.0, 2.0, 5.0, 10.0] {
        if candidate >= normalized * (1.0 - 1e-9) {
            return candidate * magnitude;
        }
    }
    10.0 * magnitude
}

/// Replaces a degenerate or non-finite range by `[0, 1]`.
pub fn sanitize_range(range: ValueRange) -> ValueRange {
    if !range.min.is_finite() || !range.max.is_finite() || range.span() <= 0.0 {
        tracing::warn!(
            min = range.min,
            max = range.max,
            "degenerate value range, using [0, 1]"
        );
        return ValueRange::new(0.0, 1.0);
    }
    range
}

fn clean_zero(v: f64, step: f64) -> f64 {
    if v.abs() < step * 1e-9 { 0.0 } else { v }
}

fn tick_values(range: ValueRange, step: f64, mode: TickMode) -> Vec<f64> {
    match mode {
        TickMode::Fixed => {
            let limit = range.max + step * (1.0 - 1e-9);
            let mut out = Vec::new();
            let mut i = 0_u32;
            loop {
                let v = range.min + step * f64::from(i);
                if v >= limit || out.len() >= MAX_TICKS {
                    break;
                }
                out.push(clean_zero(v, step));
                i += 1;
            }
            out
        }
        TickMode::Expanding => {
            let lo = (range.min / step).floor();
            let hi = (range.max / step).ceil();
            let n = (hi - lo).round().clamp(1.0, (MAX_TICKS - 1) as f64);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "clamped to [1, MAX_TICKS)"
            )]
            let n = n as usize;
            (0..=n)
                .map(|i| clean_zero((lo + i as f64) * step, step))
                .collect()
        }
    }
}

/// Generates ticks covering `range`.
///
/// `count` is the desired number of ticks; it is clamped to at least 2.
/// `format` receives `(value, step)` and produces a label. The returned set has
/// at least two ticks. With more than two ticks the labels are pairwise
/// distinct; when even the coarsest step collides, only the two outer ticks
/// are kept.
pub fn generate_ticks(
    range: ValueRange,
    count: usize,
    mode: TickMode,
    format: &dyn Fn(f64, f64) -> String,
) -> TickSet {
    let range = sanitize_range(range);
    let mut n = count.max(2);
    loop {
        let raw = range.span() / (n - 1) as f64;
        let step = nice_step(raw);
        let mut values = tick_values(range, step, mode);
        if values.len() < 2 {
            values.push(values.last().copied().unwrap_or(range.min) + step);
        }
        let labels: Vec<String> = values.iter().map(|v| format(*v, step)).collect();
        let distinct = {
            let mut seen = HashSet::with_capacity(labels.len());
            labels.iter().all(|l| seen.insert(l.as_str()))
        };
        if distinct || n == 2 {
            if !distinct && values.len() > 2 {
                return outer_ticks(&values, format);
            }
            tracing::trace!(count = values.len(), step, "generated ticks");
            return TickSet {
                values,
                labels,
                step,
            };
        }
        n -= 1;
    }
}

/// Keeps only the first and last of `values`, which still cover the range.
fn outer_ticks(values: &[f64], format: &dyn Fn(f64, f64) -> String) -> TickSet {
    let (first, last) = (values[0], values[values.len() - 1]);
    let step = last - first;
    tracing::trace!(first, last, "labels collide at the two-tick floor, keeping the ends");
    TickSet {
        values: vec![first, last],
        labels: vec![format(first, step), format(last, step)],
        step,
    }
}

/// A linear mapping from a value domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a domain value into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        r0 + (x - d0) / denom * (r1 - r0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::format::format_tick_with_step;

    fn ticks(min: f64, max: f64, n: usize, mode: TickMode) -> TickSet {
        generate_ticks(ValueRange::new(min, max), n, mode, &format_tick_with_step)
    }

    #[test]
    fn nice_step_rounds_up() {
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.2), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert!((nice_step(0.03) - 0.05).abs() < 1e-12);
        assert_eq!(nice_step(0.0), 0.0);
    }

    #[test]
    fn expanding_ticks_enclose_range() {
        let t = ticks(3.0, 97.0, 5, TickMode::Expanding);
        assert_eq!(t.step, 50.0);
        assert_eq!(t.values, [0.0, 50.0, 100.0]);
        assert_eq!(t.labels, ["0", "50", "100"]);
    }

    #[test]
    fn fixed_ticks_start_at_min() {
        let t = ticks(7.0, 15.0, 5, TickMode::Fixed);
        assert_eq!(t.step, 2.0);
        assert_eq!(t.values, [7.0, 9.0, 11.0, 13.0, 15.0]);
    }

    #[test]
    fn degenerate_range_becomes_unit() {
        let t = ticks(5.0, 5.0, 3, TickMode::Expanding);
        assert_eq!(t.min(), 0.0);
        assert_eq!(t.max(), 1.0);
        let t = ticks(f64::NAN, 1.0, 3, TickMode::Fixed);
        assert_eq!(t.min(), 0.0);
    }

    #[test]
    fn duplicate_labels_reduce_count() {
        // A formatter that only shows integers collapses 0.5 steps.
        let t = generate_ticks(
            ValueRange::new(0.0, 2.0),
            5,
            TickMode::Expanding,
            &|v, _| alloc::format!("{v:.0}"),
        );
        assert!(t.len() >= 2);
        let mut labels = t.labels.clone();
        labels.dedup();
        assert_eq!(labels.len(), t.labels.len());
    }

    #[test]
    fn colliding_labels_at_the_floor_keep_the_outer_ticks() {
        // Expanding [0.05, 0.15] by 0.1 gives 0, 0.1 and 0.2, all shown as "0".
        let t = generate_ticks(
            ValueRange::new(0.05, 0.15),
            2,
            TickMode::Expanding,
            &|v, _| alloc::format!("{v:.0}"),
        );
        assert_eq!(t.values, [0.0, 0.2]);
        assert!((t.step - 0.2).abs() < 1e-12);
        assert!(t.min() <= 0.05 && t.max() >= 0.15);
    }

    #[test]
    fn linear_scale_flips_for_screen_y() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(2.5), 75.0);
    }
}
