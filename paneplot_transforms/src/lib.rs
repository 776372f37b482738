// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record reshaping for paneplot.
//!
//! This crate turns a flat list of [`Record`]s into:
//! - ordered, unique [`Headers`] for the five chart axes (pane, tier, lane,
//!   series, dimension), and
//! - a dense [`ValueTensor`] indexed `[pane][tier][lane][series][dimension]`.
//!
//! It also derives the per-pane and per-tier value ranges ([`YScaleAxisData`])
//! that the axis measurer turns into tick sets.
//!
//! Every function here is pure: identical records and [`TransformSpec`]s
//! always produce identical output.

#![no_std]

extern crate alloc;

mod error;
mod headers;
mod range;
mod table;
mod tensor;
mod transform;

pub use error::TransformError;
pub use headers::{HeaderOrder, Headers, compare_case_insensitive};
pub use range::{PaneRanges, ValueRange, YScaleAxisData};
pub use table::{Record, Value};
pub use tensor::{CellIndex, ValueTensor};
pub use transform::{Axis, Discriminator, TransformOutput, TransformSpec};
