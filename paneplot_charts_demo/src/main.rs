// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `paneplot_charts`.
//!
//! Each demo builds one figure and writes it as an SVG file into the output
//! directory (first argument, `paneplot_demo` by default). Set `RUST_LOG` to
//! see the pipeline's debug output.

mod svg;

use std::error::Error;
use std::path::{Path, PathBuf};

use kurbo::{Rect, Size};
use paneplot_charts::{
    Annotation, AreaAnchor, AreaStyle, BarMode, BarStyle, ChartSpec, ChartStyle, LabelStyle,
    LayoutStyle, LegendPosition, LineStyle, PointStyle, SurroundsStyle, Symbol, TierScale,
    Visibility, XAxisKind, XAxisStyle, YAxisStyle,
};
use paneplot_text::HeuristicTextMeasurer;
use paneplot_transforms::{Discriminator, HeaderOrder, Record, TransformSpec};
use tracing_subscriber::EnvFilter;

type Demo = (&'static str, ChartSpec, Vec<Record>);

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("paneplot_demo"), PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    let demos = [
        stacked_bar_demo(),
        grouped_lines_demo(),
        period_axis_demo(),
        diff_area_demo(),
        multi_pane_demo(),
        uncertainty_demo(),
    ];
    for (name, spec, records) in demos {
        write_figure(&out_dir, name, &spec, &records)?;
    }
    Ok(())
}

fn write_figure(
    dir: &Path,
    name: &str,
    spec: &ChartSpec,
    records: &[Record],
) -> Result<(), Box<dyn Error>> {
    let figure = spec.build(records, &HeuristicTextMeasurer)?;
    let mut surface = svg::SvgSurface::new(figure.size);
    figure.render(&mut surface);
    let path = dir.join(format!("{name}.svg"));
    std::fs::write(&path, surface.finish())?;
    tracing::info!(
        path = %path.display(),
        primitives = figure.primitives.len(),
        "wrote figure"
    );
    Ok(())
}

const MONTHS: [&str; 6] = ["2023-01", "2023-02", "2023-03", "2023-04", "2023-05", "2023-06"];

fn regional_sales() -> Vec<Record> {
    let regions = [
        ("North", [12.0, 14.0, 13.5, 17.0, 19.5, 21.0]),
        ("South", [8.0, 9.5, 11.0, 10.0, 12.5, 14.0]),
        ("West", [5.0, 4.5, 6.0, 7.5, 7.0, 9.0]),
    ];
    let mut records = Vec::new();
    for (region, values) in regions {
        for (month, sales) in MONTHS.iter().zip(values) {
            records.push(
                Record::new()
                    .with("month", *month)
                    .with("region", region)
                    .with("sales", sales),
            );
        }
    }
    records
}

fn sales_spec() -> TransformSpec {
    TransformSpec::new(["sales"])
        .with_series("region")
        .with_dimension("month")
}

fn stacked_bar_demo() -> Demo {
    let style = ChartStyle::default()
        .with_labels(LabelStyle::default().with_visibility(Visibility::Always))
        .with_y_axis(YAxisStyle::default().with_title("Sales (k$)"))
        .with_surrounds(
            SurroundsStyle::default()
                .with_caption("Sales by region")
                .with_subcaption("Stacked, first half of 2023")
                .with_footnote("Source: regional ledgers"),
        );
    (
        "stacked_bars",
        ChartSpec::new(sales_spec(), (640.0, 420.0)).with_style(style),
        regional_sales(),
    )
}

fn grouped_lines_demo() -> Demo {
    let style = ChartStyle::default()
        .with_bars(BarStyle::default().with_mode(BarMode::Grouped).with_width_ratio(0.7))
        .with_lines(LineStyle::default().with_visibility(Visibility::Always))
        .with_points(
            PointStyle::default()
                .with_visibility(Visibility::Always)
                .with_symbol(Symbol::Square),
        )
        .with_labels(
            LabelStyle::default()
                .with_visibility(Visibility::when(|info| info.value >= 15.0))
                .with_pattern("0.0"),
        )
        .with_surrounds(
            SurroundsStyle::default()
                .with_caption("Grouped bars with trend lines")
                .with_legend(LegendPosition::Right),
        );
    (
        "grouped_lines",
        ChartSpec::new(sales_spec(), (680.0, 420.0)).with_style(style),
        regional_sales(),
    )
}

fn period_axis_demo() -> Demo {
    let mut records = Vec::new();
    for year in 2021..=2023 {
        for quarter in 1..=4 {
            let t = f64::from((year - 2021) * 4 + quarter);
            records.push(
                Record::new()
                    .with("quarter", format!("{year}-Q{quarter}"))
                    .with("metric", "Revenue")
                    .with("value", 40.0 + 3.0 * t),
            );
            records.push(
                Record::new()
                    .with("quarter", format!("{year}-Q{quarter}"))
                    .with("metric", "Cost")
                    .with("value", 35.0 + 2.0 * t + if quarter == 4 { 6.0 } else { 0.0 }),
            );
        }
    }
    let style = ChartStyle::default()
        .with_bars(BarStyle::default().with_visibility(Visibility::Never))
        .with_lines(LineStyle::default().with_visibility(Visibility::Always).with_width(2.0))
        .with_x_axis(XAxisStyle::default().with_kind(XAxisKind::Period))
        .with_y_axis(YAxisStyle::default().with_include_zero(false))
        .with_surrounds(SurroundsStyle::default().with_caption("Quarterly revenue and cost"));
    (
        "period_axis",
        ChartSpec::new(
            TransformSpec::new(["value"])
                .with_series("metric")
                .with_dimension("quarter"),
            (720.0, 360.0),
        )
        .with_style(style),
        records,
    )
}

fn diff_area_demo() -> Demo {
    let planned = [10.0, 12.0, 15.0, 13.0, 11.0, 14.0];
    let actual = [9.0, 13.5, 14.0, 15.0, 10.0, 16.0];
    let records = MONTHS
        .iter()
        .zip(planned.into_iter().zip(actual))
        .map(|(month, (p, a))| {
            Record::new()
                .with("month", *month)
                .with("actual", a)
                .with("planned", p)
        })
        .collect();
    let style = ChartStyle::default()
        .with_bars(BarStyle::default().with_visibility(Visibility::Never))
        .with_lines(LineStyle::default().with_visibility(Visibility::Always))
        .with_areas(
            AreaStyle::default()
                .with_visibility(Visibility::Always)
                .with_diff(true)
                .with_opacity(0.35),
        )
        .with_y_axis(YAxisStyle::default().with_include_zero(false))
        .with_surrounds(SurroundsStyle::default().with_caption("Actual versus planned"))
        .with_annotation(Annotation::boxed(
            Rect::new(420.0, 60.0, 560.0, 84.0),
            "Ahead of plan",
        ))
        .with_annotation(Annotation::arrow((490.0, 84.0), (520.0, 130.0)));
    (
        "diff_area",
        ChartSpec::new(
            TransformSpec::new(["actual", "planned"])
                .with_series(Discriminator::ValueProperties)
                .with_dimension("month"),
            (640.0, 380.0),
        )
        .with_style(style),
        records,
    )
}

fn multi_pane_demo() -> Demo {
    let mut records = Vec::new();
    for (country, scale) in [("Canada", 1.0), ("Mexico", 0.8), ("United States", 3.5)] {
        for (channel, share) in [("Retail", 0.6), ("Online", 0.4)] {
            for (i, month) in MONTHS.iter().enumerate() {
                let units = scale * share * (20.0 + 2.0 * i as f64);
                records.push(
                    Record::new()
                        .with("country", country)
                        .with("channel", channel)
                        .with("month", *month)
                        .with("units", units)
                        .with("returns", -0.1 * units),
                );
            }
        }
    }
    let style = ChartStyle::default()
        .with_areas(
            AreaStyle::default()
                .with_visibility(Visibility::Always)
                .with_stacked(true)
                .with_anchor(AreaAnchor::PreviousSeries),
        )
        .with_bars(BarStyle::default().with_visibility(Visibility::Never))
        .with_y_axis(YAxisStyle::default().with_scale(TierScale::Independent))
        .with_layout(LayoutStyle::default().with_pane_columns(2))
        .with_surrounds(SurroundsStyle::default().with_caption("Units and returns by country"));
    (
        "multi_pane",
        ChartSpec::new(
            TransformSpec::new(["units", "returns"])
                .with_pane("country")
                .with_tier(Discriminator::ValueProperties)
                .with_series("channel")
                .with_dimension("month"),
            (900.0, 640.0),
        )
        .with_style(style),
        records,
    )
}

fn uncertainty_demo() -> Demo {
    let estimates = [
        ("Alpha", 12.0, 10.5, 13.0),
        ("Beta", 8.0, 6.0, 9.5),
        ("Gamma", 15.0, 14.0, 17.5),
    ];
    let records = estimates
        .iter()
        .map(|(name, mid, lo, hi)| {
            Record::new()
                .with("team", *name)
                .with("estimate", *mid)
                .with("low", *lo)
                .with("high", *hi)
        })
        .collect();
    let style = ChartStyle::default()
        .with_bars(BarStyle::default().with_mode(BarMode::Uncertainty))
        .with_labels(LabelStyle::default().with_visibility(Visibility::Always))
        .with_surrounds(
            SurroundsStyle::default()
                .with_caption("Estimates with confidence interval")
                .with_legend(LegendPosition::Hidden),
        );
    (
        "uncertainty",
        ChartSpec::new(
            TransformSpec::new(["estimate", "low", "high"])
                .with_series(Discriminator::ValueProperties)
                .with_dimension("team")
                .with_order(HeaderOrder::FirstSeen),
            Size::new(520.0, 360.0),
        )
        .with_style(style),
        records,
    )
}
