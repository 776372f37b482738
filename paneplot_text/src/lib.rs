// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart layout.
//!
//! Paneplot measures text twice per render pass: once while sizing axes,
//! headers, legends and captions, and once more (optionally) when a drawing
//! surface centers annotation text. Both passes go through the tiny
//! [`TextMeasurer`] interface defined here so that layout stays independent of
//! any particular shaping engine.
//!
//! This crate is intentionally:
//! - small and dependency-free,
//! - `no_std`-friendly (it uses `alloc` for owned strings), and
//! - renderer-agnostic: a bitmap canvas, a vector surface or a print target can
//!   all implement the same trait.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A minimal text measurement interface used by the layout pass.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; use [`TextMeasurer::measure_block`]
    /// for text that may wrap.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Measure `text` as a block wrapped to `max_width`.
    ///
    /// Explicit `\n` always starts a new line. Words are greedily packed onto
    /// lines; a single word wider than `max_width` occupies a line of its own
    /// and is not broken. A non-finite `max_width` disables wrapping.
    fn measure_block(&self, text: &str, style: &TextStyle, max_width: f64) -> TextBlock {
        let line_height = self.measure("Mg", style).line_height();
        let mut lines: Vec<String> = Vec::new();

        for paragraph in text.split('\n') {
            if !max_width.is_finite() {
                lines.push(String::from(paragraph));
                continue;
            }
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let mut candidate = current.clone();
                candidate.push(' ');
                candidate.push_str(word);
                if self.measure(&candidate, style).advance_width <= max_width {
                    current = candidate;
                } else {
                    lines.push(core::mem::replace(&mut current, String::from(word)));
                }
            }
            lines.push(current);
        }

        let width = lines
            .iter()
            .map(|l| self.measure(l, style).advance_width)
            .fold(0.0_f64, f64::max);
        TextBlock {
            width,
            height: line_height * lines.len() as f64,
            line_height,
            lines,
        }
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }

    fn measure_block(&self, text: &str, style: &TextStyle, max_width: f64) -> TextBlock {
        (**self).measure_block(text, style, max_width)
    }
}

/// Text styling inputs relevant to measurement.
///
/// Just enough to keep chart layout consistent; richer typography belongs to
/// the drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns a bold copy of this style.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::BOLD;
        self
    }

    /// Returns an italic copy of this style.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.font_style = FontStyle::Italic;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A wrapped block of text, as returned by [`TextMeasurer::measure_block`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Width of the widest line.
    pub width: f64,
    /// Total height (`lines.len() * line_height`).
    pub height: f64,
    /// Height of one line.
    pub line_height: f64,
    /// The wrapped lines in order.
    pub lines: Vec<String>,
}

/// A tiny heuristic text measurer suitable for tests, demos and early layout.
///
/// It assumes an average glyph width of ~0.6em (~0.66em for bold) and a
/// baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = if style.font_weight >= FontWeight::BOLD {
            0.66
        } else {
            0.6
        };
        let advance_width = em * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
