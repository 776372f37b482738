// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order conventions for generated primitives.
//!
//! These values are coarse. Equal z-indexes keep generation order, which
//! iterates dimension values then series in ascending order.

/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled areas.
pub const SERIES_AREAS: i32 = -10;
/// Bars.
pub const SERIES_BARS: i32 = 0;
/// Error bars drawn over their bar.
pub const SERIES_ERROR_BARS: i32 = 5;
/// Line series.
pub const SERIES_LINES: i32 = 10;
/// Data points drawn above lines.
pub const SERIES_POINTS: i32 = 20;

/// Axes (rules, ticks and labels).
pub const AXES: i32 = 30;
/// Pane, lane and tier header labels.
pub const HEADERS: i32 = 40;

/// Legend.
pub const LEGEND: i32 = 60;
/// Caption, subcaption and footnote.
pub const CAPTIONS: i32 = 80;
/// Free-form annotations.
pub const ANNOTATIONS: i32 = 90;
