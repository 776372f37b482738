// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-period axes.
//!
//! Dimension headers such as `2023-01` (month), `2023-Q1` / `2023Q1`
//! (quarter) or `2023` (year) are laid out as equal bands. Label density is
//! chosen by trying successively more compact schemes until the labels fit
//! the band width:
//!
//! 1. full names (`January`, `Q1`, `2023`) under every band,
//! 2. abbreviations (`Jan`, `1`, `'23`),
//! 3. no per-band labels, only the year row (months and quarters),
//! 4. side-docked year labels on every Nth year (months and quarters), or
//!    every Nth full year label centered under its band (years).
//!
//! Month and quarter axes also get large ticks at year boundaries and a year
//! row below the band labels.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use paneplot_text::{TextMeasurer, TextStyle};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{ChartError, ChartResult};
use crate::geometry::Bands;
use crate::style::XAxisStyle;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar granularity of a period axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeriodGranularity {
    /// `YYYY-MM`.
    Month,
    /// `YYYY-Qn` or `YYYYQn`.
    Quarter,
    /// `YYYY`.
    Year,
}

impl PeriodGranularity {
    /// Number of periods in one calendar year.
    pub fn periods_per_year(self) -> usize {
        match self {
            Self::Month => 12,
            Self::Quarter => 4,
            Self::Year => 1,
        }
    }
}

/// One parsed period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Month (1–12) or quarter (1–4); `0` for whole years.
    pub part: u8,
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses a period header.
pub fn parse_period(header: &str) -> Option<(PeriodGranularity, Period)> {
    let s = header.trim();
    if let Some(year) = parse_year(s) {
        return Some((PeriodGranularity::Year, Period { year, part: 0 }));
    }
    if s.len() < 6 || !s.is_char_boundary(4) {
        return None;
    }
    let year = parse_year(&s[..4])?;
    let rest = s[4..].strip_prefix('-').unwrap_or(&s[4..]);
    if let Some(q) = rest.strip_prefix(['Q', 'q']) {
        let part: u8 = q.parse().ok()?;
        return (1..=4)
            .contains(&part)
            .then_some((PeriodGranularity::Quarter, Period { year, part }));
    }
    if rest.len() != s.len() - 4 && !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
        let part: u8 = rest.parse().ok()?;
        return (1..=12)
            .contains(&part)
            .then_some((PeriodGranularity::Month, Period { year, part }));
    }
    None
}

/// Parses every header, requiring a single common granularity.
pub fn classify(headers: &[String]) -> Option<(PeriodGranularity, Vec<Period>)> {
    let mut granularity = None;
    let mut periods = Vec::with_capacity(headers.len());
    for h in headers {
        let (g, p) = parse_period(h)?;
        match granularity {
            None => granularity = Some(g),
            Some(prev) if prev != g => return None,
            Some(_) => {}
        }
        periods.push(p);
    }
    granularity.map(|g| (g, periods))
}

/// Per-band label verbosity for inline schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InlineLabels {
    /// `January`, `Q1`, `2023`.
    Full,
    /// `Jan`, `1`, `'23`.
    Abbreviated,
    /// No per-band labels.
    None,
}

/// The chosen label scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeriodScheme {
    /// Labels under every band, plus a year row for months and quarters.
    Inline(InlineLabels),
    /// Only year labels, left-docked at every `every`-th year boundary.
    SideDockedYears {
        /// Year stride.
        every: usize,
    },
    /// Full year labels centered under every `every`-th band.
    YearCentered {
        /// Band stride.
        every: usize,
    },
}

/// Formats the label for `period` at the given verbosity.
pub fn period_label(
    granularity: PeriodGranularity,
    period: Period,
    labels: InlineLabels,
) -> Option<String> {
    let idx = usize::from(period.part.max(1) - 1);
    match (granularity, labels) {
        (_, InlineLabels::None) => None,
        (PeriodGranularity::Month, InlineLabels::Full) => MONTHS.get(idx).map(|m| String::from(*m)),
        (PeriodGranularity::Month, InlineLabels::Abbreviated) => {
            MONTHS.get(idx).map(|m| String::from(&m[..3]))
        }
        (PeriodGranularity::Quarter, InlineLabels::Full) => Some(format!("Q{}", period.part)),
        (PeriodGranularity::Quarter, InlineLabels::Abbreviated) => Some(format!("{}", period.part)),
        (PeriodGranularity::Year, InlineLabels::Full) => Some(format!("{}", period.year)),
        (PeriodGranularity::Year, InlineLabels::Abbreviated) => {
            Some(format!("'{:02}", period.year.rem_euclid(100)))
        }
    }
}

/// A maximal run of consecutive bands in the same year.
#[derive(Clone, Debug, PartialEq)]
pub struct YearRun {
    /// Calendar year.
    pub year: i32,
    /// First band index.
    pub first: usize,
    /// Last band index (inclusive).
    pub last: usize,
    /// Label to draw, if any.
    pub label: Option<String>,
}

/// Result of measuring a period axis against a lane width.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodAxisMeasure {
    /// Calendar granularity.
    pub granularity: PeriodGranularity,
    /// Parsed periods, one per band.
    pub periods: Vec<Period>,
    /// Chosen label scheme.
    pub scheme: PeriodScheme,
    /// Band geometry, relative to the lane's left edge.
    pub bands: Bands,
    /// Label per band.
    pub band_labels: Vec<Option<String>>,
    /// Year runs (months and quarters only).
    pub years: Vec<YearRun>,
    /// Offset from the axis top to the band-label row.
    pub label_offset: f64,
    /// Offset from the axis top to the year row, when drawn.
    pub year_offset: Option<f64>,
    /// Total axis height.
    pub height: f64,
}

impl PeriodAxisMeasure {
    /// Band indices where a new year starts (the first band excluded).
    pub fn year_boundaries(&self) -> impl Iterator<Item = usize> + '_ {
        self.years.iter().skip(1).map(|r| r.first)
    }
}

fn year_runs(periods: &[Period]) -> Vec<YearRun> {
    let mut runs: Vec<YearRun> = Vec::new();
    for (i, p) in periods.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.year == p.year => run.last = i,
            _ => runs.push(YearRun {
                year: p.year,
                first: i,
                last: i,
                label: None,
            }),
        }
    }
    runs
}

fn stride(needed: f64, available: f64) -> usize {
    if available <= 0.0 {
        return usize::MAX;
    }
    let n = (needed / available).ceil().max(1.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "ratio of finite pixel widths, clamped below"
    )]
    let n = n.min(1e6) as usize;
    n
}

/// Chooses a scheme for `periods` given the band `increment`.
pub fn choose_scheme(
    granularity: PeriodGranularity,
    periods: &[Period],
    increment: f64,
    style: &XAxisStyle,
    measurer: &dyn TextMeasurer,
) -> PeriodScheme {
    let pad = style.label_padding;
    let label_style = TextStyle::new(style.font_size);
    let year_style = TextStyle::new(style.year_font_size);
    let widest = |labels: InlineLabels| {
        periods
            .iter()
            .filter_map(|p| period_label(granularity, *p, labels))
            .map(|l| measurer.measure(&l, &label_style).advance_width)
            .fold(0.0_f64, f64::max)
    };
    let year_width = periods
        .iter()
        .map(|p| measurer.measure(&format!("{}", p.year), &year_style).advance_width)
        .fold(0.0_f64, f64::max)
        + 2.0 * pad;

    for labels in [InlineLabels::Full, InlineLabels::Abbreviated] {
        if widest(labels) + 2.0 * pad <= increment {
            return PeriodScheme::Inline(labels);
        }
    }
    match granularity {
        PeriodGranularity::Month | PeriodGranularity::Quarter => {
            let year_span = granularity.periods_per_year() as f64 * increment;
            if year_width <= year_span {
                PeriodScheme::Inline(InlineLabels::None)
            } else {
                PeriodScheme::SideDockedYears {
                    every: stride(year_width, year_span),
                }
            }
        }
        PeriodGranularity::Year => {
            let full = widest(InlineLabels::Full) + 2.0 * pad;
            PeriodScheme::YearCentered {
                every: stride(full, increment),
            }
        }
    }
}

/// Measures a period axis for `headers` spread across `bands`.
pub fn measure_period_axis(
    headers: &[String],
    bands: Bands,
    style: &XAxisStyle,
    measurer: &dyn TextMeasurer,
) -> ChartResult<PeriodAxisMeasure> {
    let (granularity, periods) = classify(headers).ok_or_else(|| {
        ChartError::InputShape(String::from(
            "period axis requires month, quarter or year headers of one granularity",
        ))
    })?;
    let scheme = choose_scheme(granularity, &periods, bands.increment, style, measurer);
    tracing::debug!(?granularity, ?scheme, increment = bands.increment, "period label scheme");

    let label_style = TextStyle::new(style.font_size);
    let year_style = TextStyle::new(style.year_font_size);
    let pad = style.label_padding;

    let band_labels: Vec<Option<String>> = match scheme {
        PeriodScheme::Inline(labels) => periods
            .iter()
            .map(|p| period_label(granularity, *p, labels))
            .collect(),
        PeriodScheme::SideDockedYears { .. } => periods.iter().map(|_| None).collect(),
        PeriodScheme::YearCentered { every } => periods
            .iter()
            .enumerate()
            .map(|(i, p)| {
                (i % every == 0)
                    .then(|| period_label(granularity, *p, InlineLabels::Full))
                    .flatten()
            })
            .collect(),
    };

    let mut years = if granularity == PeriodGranularity::Year {
        Vec::new()
    } else {
        year_runs(&periods)
    };
    for (i, run) in years.iter_mut().enumerate() {
        let text = format!("{}", run.year);
        let width = measurer.measure(&text, &year_style).advance_width + 2.0 * pad;
        run.label = match scheme {
            PeriodScheme::Inline(_) => {
                let span = (run.last - run.first + 1) as f64 * bands.increment;
                (width <= span).then_some(text)
            }
            PeriodScheme::SideDockedYears { every } => (i % every == 0).then_some(text),
            PeriodScheme::YearCentered { .. } => None,
        };
    }

    let has_band_labels = band_labels.iter().any(Option::is_some);
    let label_h = measurer.measure("Mg", &label_style).line_height();
    let year_h = measurer.measure("0", &year_style).line_height();
    let label_offset = style.tick_size + pad;
    let mut height = label_offset;
    if has_band_labels {
        height += label_h;
    }
    let year_offset = (!years.is_empty()).then(|| {
        let y = if has_band_labels { height + pad } else { height };
        height = y + year_h;
        y
    });
    if !years.is_empty() {
        height = height.max(style.large_tick_size);
    }

    Ok(PeriodAxisMeasure {
        granularity,
        periods,
        scheme,
        bands,
        band_labels,
        years,
        label_offset,
        year_offset,
        height: height + pad,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use paneplot_text::HeuristicTextMeasurer;

    use super::*;
    use crate::geometry::TickPlacement;

    fn months(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("{}-{:02}", 2020 + i / 12, i % 12 + 1))
            .collect()
    }

    fn measure(headers: &[String], width: f64) -> PeriodAxisMeasure {
        let bands = Bands::new(0.0, width, headers.len(), TickPlacement::Centered, 0.0);
        measure_period_axis(
            headers,
            bands,
            &XAxisStyle::default(),
            &HeuristicTextMeasurer,
        )
        .unwrap()
    }

    #[test]
    fn parses_period_formats() {
        assert_eq!(
            parse_period("2023-01"),
            Some((PeriodGranularity::Month, Period { year: 2023, part: 1 }))
        );
        assert_eq!(
            parse_period("2023-Q3"),
            Some((PeriodGranularity::Quarter, Period { year: 2023, part: 3 }))
        );
        assert_eq!(
            parse_period("2023Q4"),
            Some((PeriodGranularity::Quarter, Period { year: 2023, part: 4 }))
        );
        assert_eq!(
            parse_period("2023"),
            Some((PeriodGranularity::Year, Period { year: 2023, part: 0 }))
        );
        assert_eq!(parse_period("2023-13"), None);
        assert_eq!(parse_period("2023-Q5"), None);
        assert_eq!(parse_period("North"), None);
    }

    #[test]
    fn mixed_granularity_is_not_a_period_axis() {
        let headers = vec![String::from("2023"), String::from("2023-01")];
        assert!(classify(&headers).is_none());
    }

    #[test]
    fn wide_bands_get_full_names() {
        let m = measure(&months(3), 600.0);
        assert_eq!(m.scheme, PeriodScheme::Inline(InlineLabels::Full));
        assert_eq!(m.band_labels[0].as_deref(), Some("January"));
        assert!(m.year_offset.is_some());
    }

    #[test]
    fn schemes_degrade_as_width_shrinks() {
        let headers = months(24);
        // 11px glyphs at 0.6em: "Sep" is ~20px, "September" ~59px.
        assert_eq!(
            measure(&headers, 24.0 * 30.0).scheme,
            PeriodScheme::Inline(InlineLabels::Abbreviated)
        );
        assert_eq!(
            measure(&headers, 24.0 * 10.0).scheme,
            PeriodScheme::Inline(InlineLabels::None)
        );
        let docked = measure(&headers, 24.0 * 1.0).scheme;
        assert!(matches!(docked, PeriodScheme::SideDockedYears { every } if every >= 2));
    }

    #[test]
    fn narrow_years_show_every_nth() {
        let headers: Vec<String> = (2000..2040).map(|y| format!("{y}")).collect();
        let m = measure(&headers, 200.0);
        let PeriodScheme::YearCentered { every } = m.scheme else {
            panic!("expected year-centered scheme, got {:?}", m.scheme);
        };
        assert!(every > 1);
        assert!(m.band_labels[0].is_some());
        assert!(m.band_labels[1].is_none());
        assert!(m.years.is_empty());
    }

    #[test]
    fn year_boundaries_follow_runs() {
        let m = measure(&months(30), 3000.0);
        let b: Vec<usize> = m.year_boundaries().collect();
        assert_eq!(b, [12, 24]);
    }
}
