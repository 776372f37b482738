// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area polygons.
//!
//! Ordinary areas are built per series from a primary edge (the series) and
//! a mirror edge (zero or the previous series). Primaries are pushed to the
//! front of a deque and mirrors to the back, so the deque is always a closed
//! polygon in drawing order.
//!
//! Diff areas fill the space between exactly two series, one polygon per
//! stretch where the same series leads. Where the lead changes between two
//! samples the exact crossing of the two segments is inserted into both
//! polygons.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point};
use peniko::Color;

use crate::error::{ChartError, ChartResult};
use crate::primitive::{AreaPrimitive, Primitive, PrimitiveKind, SeriesOrder, points_bounds};
use crate::z_order;

/// Running sums over series, per dimension. Absent values stay absent and do
/// not contribute.
pub(crate) fn cumulative(values: &[Vec<Option<f64>>]) -> Vec<Vec<Option<f64>>> {
    let dims = values.first().map_or(0, Vec::len);
    let mut totals = alloc::vec![0.0; dims];
    values
        .iter()
        .map(|series| {
            series
                .iter()
                .zip(totals.iter_mut())
                .map(|(v, total)| {
                    v.map(|v| {
                        *total += v;
                        *total
                    })
                })
                .collect()
        })
        .collect()
}

/// Builds the runs of one ordinary area series.
#[derive(Clone, Debug, Default)]
pub(crate) struct AreaRunBuilder {
    ring: VecDeque<Point>,
    primaries: usize,
    runs: Vec<Vec<Point>>,
}

impl AreaRunBuilder {
    /// Adds a primary point and its mirror.
    pub(crate) fn push(&mut self, primary: Point, mirror: Point) {
        self.ring.push_front(primary);
        self.ring.push_back(mirror);
        self.primaries += 1;
    }

    /// Closes the current run. Runs with a single sample are dropped.
    pub(crate) fn close(&mut self) {
        if self.primaries >= 2 {
            self.runs.push(self.ring.drain(..).collect());
        } else {
            self.ring.clear();
        }
        self.primaries = 0;
    }

    /// Closes the last run and returns every polygon.
    pub(crate) fn finish(mut self) -> Vec<Vec<Point>> {
        self.close();
        self.runs
    }
}

/// One diff-area sample: both series' pixels and which leads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DiffSample {
    pub(crate) first: Point,
    pub(crate) second: Point,
    pub(crate) order: SeriesOrder,
}

/// Splits the space between two series into lead-tagged polygons.
#[derive(Clone, Debug, Default)]
pub(crate) struct DiffAreaBuilder {
    first: Vec<Point>,
    second: Vec<Point>,
    order: Option<SeriesOrder>,
    last: Option<DiffSample>,
    polygons: Vec<(Vec<Point>, SeriesOrder)>,
}

fn opposite(a: SeriesOrder, b: SeriesOrder) -> bool {
    matches!(
        (a, b),
        (SeriesOrder::Over, SeriesOrder::Under) | (SeriesOrder::Under, SeriesOrder::Over)
    )
}

/// The crossing of the two series' segments between `prev` and `next`.
pub(crate) fn crossing(prev: &DiffSample, next: &DiffSample) -> ChartResult<Point> {
    let a = Line::new(prev.first, next.first);
    let b = Line::new(prev.second, next.second);
    let (lo, hi) = (prev.first.x.min(next.first.x), prev.first.x.max(next.first.x));
    let p = a.crossing_point(b).ok_or_else(|| {
        ChartError::InternalInvariant(format!(
            "diff-area segments between x={lo} and x={hi} do not intersect"
        ))
    })?;
    let slack = 1e-9 * (hi - lo).max(1.0);
    if !(p.x >= lo - slack && p.x <= hi + slack) {
        return Err(ChartError::InternalInvariant(format!(
            "diff-area crossing at x={} lies outside [{lo}, {hi}]",
            p.x
        )));
    }
    Ok(Point::new(p.x.clamp(lo, hi), p.y))
}

impl DiffAreaBuilder {
    /// Adds the next sample.
    pub(crate) fn push(&mut self, sample: DiffSample) -> ChartResult<()> {
        if let Some(prev) = self.last {
            if opposite(prev.order, sample.order) {
                let c = crossing(&prev, &sample)?;
                self.first.push(c);
                self.second.push(c);
                self.flush();
                self.first.push(c);
                self.second.push(c);
            }
        }
        self.first.push(sample.first);
        self.second.push(sample.second);
        if sample.order == SeriesOrder::Equal {
            self.flush();
            self.first.push(sample.first);
            self.second.push(sample.second);
        } else {
            self.order = Some(sample.order);
        }
        self.last = Some(sample);
        Ok(())
    }

    /// Handles a missing sample: bridged when `join`, otherwise a break.
    pub(crate) fn gap(&mut self, join: bool) {
        if !join {
            self.flush();
            self.last = None;
        }
    }

    fn flush(&mut self) {
        let first = core::mem::take(&mut self.first);
        let mut second = core::mem::take(&mut self.second);
        let Some(order) = self.order.take() else {
            return;
        };
        second.reverse();
        let mut polygon: Vec<Point> = Vec::with_capacity(first.len() + second.len());
        for p in first.into_iter().chain(second) {
            if polygon.last() != Some(&p) {
                polygon.push(p);
            }
        }
        if polygon.len() > 1 && polygon.first() == polygon.last() {
            polygon.pop();
        }
        if polygon.len() >= 3 {
            self.polygons.push((polygon, order));
        }
    }

    /// Closes the last polygon and returns every polygon with its lead.
    pub(crate) fn finish(mut self) -> Vec<(Vec<Point>, SeriesOrder)> {
        self.flush();
        self.polygons
    }
}

/// Wraps a polygon as an area primitive.
pub(crate) fn area_primitive(
    key: String,
    polygon: Vec<Point>,
    fill: Color,
    order: Option<SeriesOrder>,
) -> Option<Primitive> {
    let bounds = points_bounds(&polygon)?;
    Some(Primitive::new(
        key,
        z_order::SERIES_AREAS,
        bounds,
        PrimitiveKind::AreaSeries(AreaPrimitive {
            polygon,
            fill,
            order,
        }),
    ))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample(x: f64, a: f64, b: f64) -> DiffSample {
        // Pixel y grows downward; values are negated to keep the lead visible.
        DiffSample {
            first: Point::new(x, -a),
            second: Point::new(x, -b),
            order: SeriesOrder::of(a, b),
        }
    }

    #[test]
    fn cumulative_skips_absent_values() {
        let v = vec![vec![Some(1.0), None], vec![Some(2.0), Some(3.0)]];
        assert_eq!(
            cumulative(&v),
            vec![vec![Some(1.0), None], vec![Some(3.0), Some(3.0)]]
        );
    }

    #[test]
    fn runs_break_on_close() {
        let mut b = AreaRunBuilder::default();
        b.push(Point::new(0.0, 1.0), Point::new(0.0, 0.0));
        b.push(Point::new(1.0, 2.0), Point::new(1.0, 0.0));
        b.close();
        b.push(Point::new(3.0, 1.0), Point::new(3.0, 0.0));
        let runs = b.finish();
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0],
            [
                Point::new(1.0, 2.0),
                Point::new(0.0, 1.0),
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0)
            ]
        );
    }

    #[test]
    fn single_crossing_splits_in_two() {
        let mut b = DiffAreaBuilder::default();
        b.push(sample(0.0, 10.0, 0.0)).unwrap();
        b.push(sample(10.0, 0.0, 10.0)).unwrap();
        let polys = b.finish();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].1, SeriesOrder::Over);
        assert_eq!(polys[1].1, SeriesOrder::Under);
        let c = Point::new(5.0, -5.0);
        assert!(polys[0].0.contains(&c));
        assert!(polys[1].0.contains(&c));
        assert_eq!(polys[0].0.len(), 3);
    }

    #[test]
    fn equal_points_split_without_crossing() {
        let mut b = DiffAreaBuilder::default();
        b.push(sample(0.0, 2.0, 1.0)).unwrap();
        b.push(sample(1.0, 3.0, 3.0)).unwrap();
        b.push(sample(2.0, 1.0, 2.0)).unwrap();
        b.push(sample(3.0, 5.0, 5.0)).unwrap();
        b.push(sample(4.0, 6.0, 6.0)).unwrap();
        let polys = b.finish();
        let orders: Vec<_> = polys.iter().map(|p| p.1).collect();
        assert_eq!(orders, [SeriesOrder::Over, SeriesOrder::Under]);
    }

    #[test]
    fn gaps_break_unless_joined() {
        let mut b = DiffAreaBuilder::default();
        b.push(sample(0.0, 2.0, 1.0)).unwrap();
        b.gap(false);
        b.push(sample(2.0, 1.0, 2.0)).unwrap();
        assert!(b.finish().is_empty());

        let mut b = DiffAreaBuilder::default();
        b.push(sample(0.0, 2.0, 1.0)).unwrap();
        b.gap(true);
        b.push(sample(2.0, 1.0, 2.0)).unwrap();
        assert_eq!(b.finish().len(), 2);
    }
}
