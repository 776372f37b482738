// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The record transform: discriminators, header collection, and the fill pass.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TransformError;
use crate::headers::{HeaderLookup, HeaderOrder, HeaderSet, Headers};
use crate::range::YScaleAxisData;
use crate::table::Record;
use crate::tensor::{CellIndex, ValueTensor};

/// Header used when an axis has no discriminator.
pub(crate) const DEFAULT_HEADER: &str = "default";

/// One of the five tensor axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top-level sub-charts.
    Pane,
    /// Vertical bands within a pane.
    Tier,
    /// Horizontal bands within a pane.
    Lane,
    /// Compared lines/categories.
    Series,
    /// X categories or periods.
    Dimension,
}

impl Axis {
    /// All axes, in tensor index order.
    pub const ALL: [Self; 5] = [
        Self::Pane,
        Self::Tier,
        Self::Lane,
        Self::Series,
        Self::Dimension,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Pane => "pane",
            Self::Tier => "tier",
            Self::Lane => "lane",
            Self::Series => "series",
            Self::Dimension => "dimension",
        }
    }
}

/// How a record is assigned an index along one axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Discriminator {
    /// No discriminator: everything lands in a single `"default"` bucket.
    #[default]
    Default,
    /// Use the stringified value of this record property.
    Property(String),
    /// Use the declared value properties themselves as headers.
    ///
    /// This is how wide-format input (one column per series) is spread over
    /// an axis.
    ValueProperties,
}

impl From<&str> for Discriminator {
    fn from(value: &str) -> Self {
        Self::Property(String::from(value))
    }
}

impl From<String> for Discriminator {
    fn from(value: String) -> Self {
        Self::Property(value)
    }
}

/// Describes how records are reshaped into a tensor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformSpec {
    /// Record properties that hold the plotted numbers.
    pub value_properties: Vec<String>,
    /// Discriminator per axis, indexed like [`Axis::ALL`].
    pub discriminators: [Discriminator; 5],
    /// Ordering applied to every header list.
    pub order: HeaderOrder,
}

impl TransformSpec {
    /// Creates a spec with the given value properties and default discriminators.
    pub fn new<I, S>(value_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value_properties: value_properties.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the discriminator for `axis`.
    pub fn with_discriminator(mut self, axis: Axis, d: impl Into<Discriminator>) -> Self {
        self.discriminators[axis as usize] = d.into();
        self
    }

    /// Sets the pane discriminator.
    pub fn with_pane(self, d: impl Into<Discriminator>) -> Self {
        self.with_discriminator(Axis::Pane, d)
    }

    /// Sets the tier discriminator.
    pub fn with_tier(self, d: impl Into<Discriminator>) -> Self {
        self.with_discriminator(Axis::Tier, d)
    }

    /// Sets the lane discriminator.
    pub fn with_lane(self, d: impl Into<Discriminator>) -> Self {
        self.with_discriminator(Axis::Lane, d)
    }

    /// Sets the series discriminator.
    pub fn with_series(self, d: impl Into<Discriminator>) -> Self {
        self.with_discriminator(Axis::Series, d)
    }

    /// Sets the dimension discriminator.
    pub fn with_dimension(self, d: impl Into<Discriminator>) -> Self {
        self.with_discriminator(Axis::Dimension, d)
    }

    /// Sets the header ordering.
    pub fn with_order(mut self, order: HeaderOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the discriminator for `axis`.
    pub fn discriminator(&self, axis: Axis) -> &Discriminator {
        &self.discriminators[axis as usize]
    }

    fn check_assignment(&self) -> Result<(), TransformError> {
        if self.value_properties.is_empty() {
            return Err(TransformError::InputShape(String::from(
                "no value properties declared",
            )));
        }
        let sentinel: Vec<&str> = Axis::ALL
            .iter()
            .filter(|a| *self.discriminator(**a) == Discriminator::ValueProperties)
            .map(|a| a.name())
            .collect();
        if sentinel.len() > 1 {
            return Err(TransformError::Assignment(format!(
                "value properties assigned to several axes: {}",
                sentinel.join(", ")
            )));
        }
        if self.value_properties.len() > 1 && sentinel.is_empty() {
            return Err(TransformError::Assignment(format!(
                "{} value properties declared but no axis uses them as headers",
                self.value_properties.len()
            )));
        }
        Ok(())
    }

    /// Reshapes `records` into headers and a value tensor.
    pub fn run(&self, records: &[Record]) -> Result<TransformOutput, TransformError> {
        self.check_assignment()?;
        if records.is_empty() {
            return Err(TransformError::InputShape(String::from("no records")));
        }

        let mut headers = Headers::default();
        let mut lookups: Vec<HeaderLookup> = Vec::with_capacity(5);
        for axis in Axis::ALL {
            let mut set = HeaderSet::default();
            match self.discriminator(axis) {
                Discriminator::Default => set.push(String::from(DEFAULT_HEADER)),
                Discriminator::ValueProperties => {
                    for vp in &self.value_properties {
                        set.push(vp.clone());
                    }
                }
                Discriminator::Property(name) => {
                    for h in records.iter().filter_map(|r| r.get(name)?.to_header()) {
                        set.push(h);
                    }
                }
            }
            let (values, lookup) = set.finish(&self.order);
            *headers.get_mut(axis) = values;
            lookups.push(lookup);
        }

        let shape = headers.shape();
        tracing::debug!(
            panes = shape[0],
            tiers = shape[1],
            lanes = shape[2],
            series = shape[3],
            dimensions = shape[4],
            "collected headers"
        );
        if shape.contains(&0) {
            return Err(TransformError::InputShape(format!(
                "empty header list in shape {shape:?}"
            )));
        }

        let mut tensor = ValueTensor::new(shape);
        for (row, record) in records.iter().enumerate() {
            for vp in &self.value_properties {
                let mut idx = [0_usize; 5];
                for (i, axis) in Axis::ALL.into_iter().enumerate() {
                    let header = match self.discriminator(axis) {
                        Discriminator::Default => Some(String::from(DEFAULT_HEADER)),
                        Discriminator::ValueProperties => Some(vp.clone()),
                        Discriminator::Property(name) => {
                            record.get(name).and_then(|v| v.to_header())
                        }
                    };
                    idx[i] = header
                        .and_then(|h| lookups[i].position(&h))
                        .ok_or_else(|| {
                            TransformError::InputShape(format!(
                                "record {row} has no {} header",
                                axis.name()
                            ))
                        })?;
                }
                let cell = CellIndex::new(idx[0], idx[1], idx[2], idx[3], idx[4]);
                let value = record.get(vp).and_then(|v| v.to_number());
                tensor.set(cell, value, vp)?;
            }
        }

        Ok(TransformOutput { headers, tensor })
    }
}

/// Result of [`TransformSpec::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransformOutput {
    /// Ordered header lists.
    pub headers: Headers,
    /// The filled value tensor.
    pub tensor: ValueTensor,
}

impl TransformOutput {
    /// Computes per-pane and per-tier ranges.
    pub fn y_scale_axis_data(&self, stacked: bool) -> YScaleAxisData {
        YScaleAxisData::compute(&self.tensor, &self.headers.tiers, stacked)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::range::ValueRange;
    use crate::table::Value;

    fn sales() -> Vec<Record> {
        [
            ("2023-01", "N", 10.0),
            ("2023-02", "N", 15.0),
            ("2023-01", "S", 7.0),
            ("2023-02", "S", 9.0),
        ]
        .into_iter()
        .map(|(p, r, s)| {
            Record::new()
                .with("period", p)
                .with("region", r)
                .with("sales", s)
        })
        .collect()
    }

    #[test]
    fn long_format_end_to_end() {
        let spec = TransformSpec::new(["sales"])
            .with_series("region")
            .with_dimension("period");
        let out = spec.run(&sales()).unwrap();
        assert_eq!(out.headers.series, ["N", "S"]);
        assert_eq!(out.headers.dimensions, ["2023-01", "2023-02"]);
        assert_eq!(out.headers.panes, ["default"]);
        assert_eq!(
            out.tensor.lane_values(0, 0, 0),
            vec![vec![Some(10.0), Some(15.0)], vec![Some(7.0), Some(9.0)]]
        );
        let y = out.y_scale_axis_data(false);
        assert_eq!(y.panes[0].overall, Some(ValueRange::new(7.0, 15.0)));
    }

    #[test]
    fn duplicate_record_is_rejected() {
        let mut records = sales();
        records.push(
            Record::new()
                .with("period", "2023-01")
                .with("region", "N")
                .with("sales", 3.0),
        );
        let spec = TransformSpec::new(["sales"])
            .with_series("region")
            .with_dimension("period");
        let err = spec.run(&records).unwrap_err();
        assert_eq!(
            err,
            TransformError::DuplicateData {
                cell: CellIndex::new(0, 0, 0, 0, 0),
                property: String::from("sales"),
            }
        );
    }

    #[test]
    fn wide_format_uses_value_properties_as_series() {
        let records = vec![
            Record::new().with("year", 2022).with("a", 1.0).with("b", 2.0),
            Record::new()
                .with("year", 2023)
                .with("a", "3")
                .with("b", Value::Absent),
        ];
        let spec = TransformSpec::new(["b", "a"])
            .with_series(Discriminator::ValueProperties)
            .with_dimension("year")
            .with_order(HeaderOrder::FirstSeen);
        let out = spec.run(&records).unwrap();
        assert_eq!(out.headers.series, ["b", "a"]);
        assert_eq!(out.headers.dimensions, ["2022", "2023"]);
        assert_eq!(
            out.tensor.lane_values(0, 0, 0),
            vec![vec![Some(2.0), None], vec![Some(1.0), Some(3.0)]]
        );
    }

    #[test]
    fn several_value_properties_need_one_sentinel() {
        let spec = TransformSpec::new(["a", "b"]);
        assert!(matches!(
            spec.run(&sales()),
            Err(TransformError::Assignment(_))
        ));
        let spec = TransformSpec::new(["a"])
            .with_series(Discriminator::ValueProperties)
            .with_lane(Discriminator::ValueProperties);
        assert!(matches!(
            spec.run(&sales()),
            Err(TransformError::Assignment(_))
        ));
    }

    #[test]
    fn missing_discriminator_is_shape_error() {
        let mut records = sales();
        records.push(Record::new().with("period", "2023-03").with("sales", 1.0));
        let spec = TransformSpec::new(["sales"])
            .with_series("region")
            .with_dimension("period");
        assert!(matches!(
            spec.run(&records),
            Err(TransformError::InputShape(_))
        ));
    }

    #[test]
    fn empty_input_is_shape_error() {
        let spec = TransformSpec::new(["sales"]);
        assert!(matches!(spec.run(&[]), Err(TransformError::InputShape(_))));
        let spec = TransformSpec::new(Vec::<String>::new());
        assert!(matches!(
            spec.run(&sales()),
            Err(TransformError::InputShape(_))
        ));
    }
}
