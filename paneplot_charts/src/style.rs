// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style configuration.
//!
//! [`ChartStyle`] aggregates one struct per component. Every struct has a
//! `Default` and `with_*` builders. Per-datum decisions (is this bar drawn?
//! does this point get a label?) are [`Visibility`] values, resolved once per
//! cell and generation pass.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use paneplot_transforms::CellIndex;
use peniko::Color;
use peniko::color::palette::css;

use crate::annotation::Annotation;
use crate::axis::{XAxisKind, YAxisKind};
use crate::geometry::TickPlacement;
use crate::scale::TickMode;
use crate::symbol::Symbol;

/// What a visibility or label callback sees about one value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueInfo<'a> {
    /// Tensor indices of the cell.
    pub cell: CellIndex,
    /// Pane header.
    pub pane: &'a str,
    /// Tier header.
    pub tier: &'a str,
    /// Lane header.
    pub lane: &'a str,
    /// Series header.
    pub series: &'a str,
    /// Dimension header.
    pub dimension: &'a str,
    /// The raw value.
    pub value: f64,
}

/// Per-datum predicate.
pub type ValuePredicate = Arc<dyn Fn(&ValueInfo<'_>) -> bool + Send + Sync>;

/// Data-label formatter.
pub type ValueFormatter = Arc<dyn Fn(&ValueInfo<'_>) -> String + Send + Sync>;

/// Whether a content kind is drawn for a given value.
#[derive(Clone, Default)]
pub enum Visibility {
    /// Drawn for every value.
    Always,
    /// Never drawn.
    #[default]
    Never,
    /// Drawn when the callback returns `true`.
    When(ValuePredicate),
}

impl Visibility {
    /// Creates a callback-driven visibility.
    pub fn when(f: impl Fn(&ValueInfo<'_>) -> bool + Send + Sync + 'static) -> Self {
        Self::When(Arc::new(f))
    }

    /// Evaluates this visibility for one value.
    pub fn resolve(&self, info: &ValueInfo<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::When(f) => f(info),
        }
    }

    /// Returns `true` for [`Visibility::Never`].
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::When(_) => f.write_str("When(<fn>)"),
        }
    }
}

/// Bar layout within a band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BarMode {
    /// Visible bars stack on top of each other.
    #[default]
    Stacked,
    /// Bars sit side by side, one slot per series.
    Grouped,
    /// Bars overlap at full width.
    Imposed,
    /// Series 0 is a bar; series 1 and 2 bound an error bar.
    Uncertainty,
}

/// Bar styling.
#[derive(Clone, Debug)]
pub struct BarStyle {
    /// Which values get a bar.
    pub visibility: Visibility,
    /// Layout within a band.
    pub mode: BarMode,
    /// Fraction of the band width used by bars.
    pub width_ratio: f64,
    /// Error-bar cap width as a fraction of the bar width.
    pub cap_ratio: f64,
    /// Error-bar stroke width.
    pub error_stroke_width: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Always,
            mode: BarMode::Stacked,
            width_ratio: 0.7,
            cap_ratio: 0.4,
            error_stroke_width: 1.5,
        }
    }
}

impl BarStyle {
    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the layout mode.
    pub fn with_mode(mut self, mode: BarMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the width ratio.
    pub fn with_width_ratio(mut self, ratio: f64) -> Self {
        self.width_ratio = ratio;
        self
    }
}

/// Line styling.
#[derive(Clone, Debug)]
pub struct LineStyle {
    /// Which values contribute a vertex.
    pub visibility: Visibility,
    /// Stroke width.
    pub width: f64,
    /// Whether absent values are bridged instead of breaking the line.
    pub join_gaps: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Never,
            width: 2.0,
            join_gaps: false,
        }
    }
}

impl LineStyle {
    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the stroke width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets gap joining.
    pub fn with_join_gaps(mut self, join: bool) -> Self {
        self.join_gaps = join;
        self
    }
}

/// What the lower edge of an area follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AreaAnchor {
    /// The zero line (or the plot bottom when zero is out of range).
    #[default]
    Zero,
    /// The previous series.
    PreviousSeries,
}

/// Area styling.
#[derive(Clone, Debug)]
pub struct AreaStyle {
    /// Which values contribute to an area.
    pub visibility: Visibility,
    /// Lower-edge anchor for ordinary areas.
    pub anchor: AreaAnchor,
    /// Whether areas stack cumulatively.
    pub stacked: bool,
    /// Draw a diff area between exactly two series instead.
    pub diff: bool,
    /// Fill for diff regions where the first series leads.
    pub over_color: Color,
    /// Fill for diff regions where the second series leads.
    pub under_color: Color,
    /// Fill opacity.
    pub opacity: f32,
    /// Whether absent values are bridged.
    pub join_gaps: bool,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Never,
            anchor: AreaAnchor::Zero,
            stacked: false,
            diff: false,
            over_color: css::SEA_GREEN,
            under_color: css::INDIAN_RED,
            opacity: 0.5,
            join_gaps: false,
        }
    }
}

impl AreaStyle {
    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the anchor.
    pub fn with_anchor(mut self, anchor: AreaAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Enables cumulative stacking.
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    /// Enables diff mode.
    pub fn with_diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    /// Sets the diff colors.
    pub fn with_diff_colors(mut self, over: Color, under: Color) -> Self {
        self.over_color = over;
        self.under_color = under;
        self
    }

    /// Sets the fill opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets gap joining.
    pub fn with_join_gaps(mut self, join: bool) -> Self {
        self.join_gaps = join;
        self
    }
}

/// Point styling.
#[derive(Clone, Debug)]
pub struct PointStyle {
    /// Which values get a point.
    pub visibility: Visibility,
    /// Marker shape.
    pub symbol: Symbol,
    /// Marker radius.
    pub radius: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Never,
            symbol: Symbol::Circle,
            radius: 3.5,
        }
    }
}

impl PointStyle {
    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the symbol.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = symbol;
        self
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

/// Data-label styling.
#[derive(Clone)]
pub struct LabelStyle {
    /// Which values get a label.
    pub visibility: Visibility,
    /// Number pattern (see [`crate::NumberPattern`]).
    pub pattern: String,
    /// Formatter; takes precedence over `pattern`.
    pub formatter: Option<ValueFormatter>,
    /// Font size.
    pub font_size: f64,
    /// Gap between the labelled shape and the label.
    pub offset: f64,
    /// Label color.
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            visibility: Visibility::Never,
            pattern: String::from("#,##0.##"),
            formatter: None,
            font_size: 10.0,
            offset: 3.0,
            color: css::DIM_GRAY,
        }
    }
}

impl fmt::Debug for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelStyle")
            .field("visibility", &self.visibility)
            .field("pattern", &self.pattern)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .field("font_size", &self.font_size)
            .field("offset", &self.offset)
            .field("color", &self.color)
            .finish()
    }
}

impl LabelStyle {
    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the number pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets a formatter callback.
    pub fn with_formatter(
        mut self,
        f: impl Fn(&ValueInfo<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }
}

/// X axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct XAxisStyle {
    /// Measurement strategy.
    pub kind: XAxisKind,
    /// Tick placement relative to bands.
    pub placement: TickPlacement,
    /// Tick label font size.
    pub font_size: f64,
    /// Year-row font size (period axes).
    pub year_font_size: f64,
    /// Tick length.
    pub tick_size: f64,
    /// Year-boundary tick length (period axes).
    pub large_tick_size: f64,
    /// Gap between ticks and labels, and between label rows.
    pub label_padding: f64,
    /// Draw vertical separators between bands.
    pub grid: bool,
}

impl Default for XAxisStyle {
    fn default() -> Self {
        Self {
            kind: XAxisKind::Text,
            placement: TickPlacement::Centered,
            font_size: 11.0,
            year_font_size: 11.0,
            tick_size: 4.0,
            large_tick_size: 10.0,
            label_padding: 3.0,
            grid: false,
        }
    }
}

impl XAxisStyle {
    /// Sets the axis kind.
    pub fn with_kind(mut self, kind: XAxisKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets tick placement.
    pub fn with_placement(mut self, placement: TickPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Enables band separators.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the tick label font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }
}

/// Whether tiers of a pane share one value scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TierScale {
    /// Every tier uses the pane-wide range.
    #[default]
    Shared,
    /// Every tier uses its own range.
    Independent,
}

/// Y axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxisStyle {
    /// Measurement strategy.
    pub kind: YAxisKind,
    /// Desired number of ticks.
    pub tick_count: usize,
    /// Tick layout.
    pub tick_mode: TickMode,
    /// Shared or independent tier scales.
    pub scale: TierScale,
    /// Widen ranges to include zero.
    pub include_zero: bool,
    /// Rotated axis title.
    pub title: Option<String>,
    /// Tick label pattern; the step-based default is used when `None`.
    pub pattern: Option<String>,
    /// Tick label font size.
    pub font_size: f64,
    /// Title and tier-header font size.
    pub title_font_size: f64,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between ticks and labels.
    pub label_padding: f64,
    /// Draw horizontal grid lines at ticks.
    pub grid: bool,
}

impl Default for YAxisStyle {
    fn default() -> Self {
        Self {
            kind: YAxisKind::Scale,
            tick_count: 5,
            tick_mode: TickMode::Expanding,
            scale: TierScale::Shared,
            include_zero: true,
            title: None,
            pattern: None,
            font_size: 11.0,
            title_font_size: 12.0,
            tick_size: 4.0,
            label_padding: 3.0,
            grid: true,
        }
    }
}

impl YAxisStyle {
    /// Sets the axis kind.
    pub fn with_kind(mut self, kind: YAxisKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the desired tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Sets the tick mode.
    pub fn with_tick_mode(mut self, mode: TickMode) -> Self {
        self.tick_mode = mode;
        self
    }

    /// Sets tier scaling.
    pub fn with_scale(mut self, scale: TierScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets whether zero is always in range.
    pub fn with_include_zero(mut self, include: bool) -> Self {
        self.include_zero = include;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the tick label pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Pane, tier and lane geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutStyle {
    /// Pane grid columns; `ceil(sqrt(panes))` when `None`.
    pub pane_columns: Option<usize>,
    /// Gap between panes.
    pub pane_gap: f64,
    /// Gap between tiers.
    pub tier_gap: f64,
    /// Padding above and below each tier's plot area.
    pub tier_padding: f64,
    /// Gap between lanes.
    pub lane_gap: f64,
    /// Pane and lane header font size.
    pub header_font_size: f64,
    /// Padding around header text.
    pub header_padding: f64,
    /// Grid stroke width; also the boundary reserve for edge ticks.
    pub grid_stroke_width: f64,
    /// Margin around the whole figure.
    pub margin: f64,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            pane_columns: None,
            pane_gap: 24.0,
            tier_gap: 12.0,
            tier_padding: 6.0,
            lane_gap: 12.0,
            header_font_size: 13.0,
            header_padding: 4.0,
            grid_stroke_width: 1.0,
            margin: 12.0,
        }
    }
}

impl LayoutStyle {
    /// Sets the pane column count.
    pub fn with_pane_columns(mut self, columns: usize) -> Self {
        self.pane_columns = Some(columns);
        self
    }

    /// Sets the figure margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Legend position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LegendPosition {
    /// Above the panes, items flowing into rows.
    Top,
    /// Below the panes, items flowing into rows.
    #[default]
    Bottom,
    /// Right of the panes, items stacked vertically.
    Right,
    /// No legend.
    Hidden,
}

/// Caption, subcaption, footnote and legend.
#[derive(Clone, Debug, PartialEq)]
pub struct SurroundsStyle {
    /// Caption above everything.
    pub caption: Option<String>,
    /// Subcaption below the caption.
    pub subcaption: Option<String>,
    /// Footnote at the bottom.
    pub footnote: Option<String>,
    /// Legend placement.
    pub legend: LegendPosition,
    /// Caption font size (bold).
    pub caption_font_size: f64,
    /// Subcaption font size.
    pub subcaption_font_size: f64,
    /// Footnote font size.
    pub footnote_font_size: f64,
    /// Legend label font size.
    pub legend_font_size: f64,
    /// Gap after each block.
    pub gap: f64,
}

impl Default for SurroundsStyle {
    fn default() -> Self {
        Self {
            caption: None,
            subcaption: None,
            footnote: None,
            legend: LegendPosition::Bottom,
            caption_font_size: 16.0,
            subcaption_font_size: 12.0,
            footnote_font_size: 10.0,
            legend_font_size: 11.0,
            gap: 8.0,
        }
    }
}

impl SurroundsStyle {
    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the subcaption.
    pub fn with_subcaption(mut self, subcaption: impl Into<String>) -> Self {
        self.subcaption = Some(subcaption.into());
        self
    }

    /// Sets the footnote.
    pub fn with_footnote(mut self, footnote: impl Into<String>) -> Self {
        self.footnote = Some(footnote.into());
        self
    }

    /// Sets the legend position.
    pub fn with_legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }
}

/// Complete chart styling.
#[derive(Clone, Debug)]
pub struct ChartStyle {
    /// Bars.
    pub bars: BarStyle,
    /// Lines.
    pub lines: LineStyle,
    /// Areas.
    pub areas: AreaStyle,
    /// Points.
    pub points: PointStyle,
    /// Data labels.
    pub labels: LabelStyle,
    /// X axis.
    pub x_axis: XAxisStyle,
    /// Y axis.
    pub y_axis: YAxisStyle,
    /// Pane geometry.
    pub layout: LayoutStyle,
    /// Surrounding blocks.
    pub surrounds: SurroundsStyle,
    /// Series colors, cycled.
    pub palette: Vec<Color>,
    /// Free-form annotations in figure coordinates.
    pub annotations: Vec<Annotation>,
    /// Color for axes and header text.
    pub text_color: Color,
    /// Color for grid lines.
    pub grid_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bars: BarStyle::default(),
            lines: LineStyle::default(),
            areas: AreaStyle::default(),
            points: PointStyle::default(),
            labels: LabelStyle::default(),
            x_axis: XAxisStyle::default(),
            y_axis: YAxisStyle::default(),
            layout: LayoutStyle::default(),
            surrounds: SurroundsStyle::default(),
            palette: vec![
                css::STEEL_BLUE,
                css::DARK_ORANGE,
                css::SEA_GREEN,
                css::CRIMSON,
                css::MEDIUM_PURPLE,
                css::SIENNA,
                css::HOT_PINK,
                css::GRAY,
            ],
            annotations: Vec::new(),
            text_color: css::BLACK,
            grid_color: css::BLACK.with_alpha(40.0 / 255.0),
        }
    }
}

impl ChartStyle {
    /// Sets the bar style.
    pub fn with_bars(mut self, bars: BarStyle) -> Self {
        self.bars = bars;
        self
    }

    /// Sets the line style.
    pub fn with_lines(mut self, lines: LineStyle) -> Self {
        self.lines = lines;
        self
    }

    /// Sets the area style.
    pub fn with_areas(mut self, areas: AreaStyle) -> Self {
        self.areas = areas;
        self
    }

    /// Sets the point style.
    pub fn with_points(mut self, points: PointStyle) -> Self {
        self.points = points;
        self
    }

    /// Sets the data-label style.
    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the X axis style.
    pub fn with_x_axis(mut self, x_axis: XAxisStyle) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Sets the Y axis style.
    pub fn with_y_axis(mut self, y_axis: YAxisStyle) -> Self {
        self.y_axis = y_axis;
        self
    }

    /// Sets the layout style.
    pub fn with_layout(mut self, layout: LayoutStyle) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the surrounds style.
    pub fn with_surrounds(mut self, surrounds: SurroundsStyle) -> Self {
        self.surrounds = surrounds;
        self
    }

    /// Sets the palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Adds an annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Returns the color for series `index`.
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return css::GRAY;
        }
        self.palette[index % self.palette.len()]
    }

    /// Whether value ranges are computed on stacked sums.
    pub fn is_stacked(&self) -> bool {
        (self.bars.mode == BarMode::Stacked && !self.bars.visibility.is_never())
            || (self.areas.stacked && !self.areas.diff && !self.areas.visibility.is_never())
    }
}
