// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header collection and ordering.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;

use crate::transform::Axis;

/// Display ordering applied to every header list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HeaderOrder {
    /// Keep the order in which values were first seen.
    FirstSeen,
    /// Case-insensitive alphabetical order.
    #[default]
    Alphabetical,
    /// Headers listed here come first, in this order; the remaining headers
    /// follow alphabetically.
    Custom(Vec<String>),
}

impl HeaderOrder {
    /// Sorts `headers` in place according to this order.
    ///
    /// The sort is stable, so equal keys keep their first-seen order.
    pub fn apply(&self, headers: &mut [String]) {
        match self {
            Self::FirstSeen => {}
            Self::Alphabetical => headers.sort_by(|a, b| compare_case_insensitive(a, b)),
            Self::Custom(order) => {
                let rank = |h: &str| order.iter().position(|o| o == h);
                headers.sort_by(|a, b| match (rank(a), rank(b)) {
                    (Some(ra), Some(rb)) => ra.cmp(&rb),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => compare_case_insensitive(a, b),
                });
            }
        }
    }
}

/// Compares two strings ignoring case, falling back to a raw comparison so the
/// order stays total.
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

/// Ordered, unique header lists for the five tensor axes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    /// Pane headers.
    pub panes: Vec<String>,
    /// Tier (y-scale band) headers.
    pub tiers: Vec<String>,
    /// Lane headers.
    pub lanes: Vec<String>,
    /// Series headers.
    pub series: Vec<String>,
    /// Dimension headers (categories or period labels).
    pub dimensions: Vec<String>,
}

impl Headers {
    /// Returns the header list for `axis`.
    pub fn get(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Pane => &self.panes,
            Axis::Tier => &self.tiers,
            Axis::Lane => &self.lanes,
            Axis::Series => &self.series,
            Axis::Dimension => &self.dimensions,
        }
    }

    pub(crate) fn get_mut(&mut self, axis: Axis) -> &mut Vec<String> {
        match axis {
            Axis::Pane => &mut self.panes,
            Axis::Tier => &mut self.tiers,
            Axis::Lane => &mut self.lanes,
            Axis::Series => &mut self.series,
            Axis::Dimension => &mut self.dimensions,
        }
    }

    /// Returns the tensor shape `[panes, tiers, lanes, series, dimensions]`.
    pub fn shape(&self) -> [usize; 5] {
        Axis::ALL.map(|axis| self.get(axis).len())
    }
}

/// First-seen collector that also answers index lookups once sorted.
#[derive(Debug, Default)]
pub(crate) struct HeaderSet {
    values: Vec<String>,
    index: HashMap<String, usize>,
}

impl HeaderSet {
    pub(crate) fn push(&mut self, value: String) {
        if self.index.contains_key(&value) {
            return;
        }
        self.index.insert(value.clone(), self.values.len());
        self.values.push(value);
    }

    /// Sorts the collected values and rebuilds the lookup table.
    pub(crate) fn finish(mut self, order: &HeaderOrder) -> (Vec<String>, HeaderLookup) {
        order.apply(&mut self.values);
        self.index.clear();
        for (i, v) in self.values.iter().enumerate() {
            self.index.insert(v.clone(), i);
        }
        (self.values, HeaderLookup { index: self.index })
    }
}

/// Header string to display index.
#[derive(Debug, Default)]
pub(crate) struct HeaderLookup {
    index: HashMap<String, usize>,
}

impl HeaderLookup {
    pub(crate) fn position(&self, header: &str) -> Option<usize> {
        self.index.get(header).copied()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn alphabetical_ignores_case() {
        let mut h = strings(&["beta", "Alpha", "gamma", "alpha"]);
        HeaderOrder::Alphabetical.apply(&mut h);
        assert_eq!(h, ["Alpha", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn custom_order_falls_back_to_alphabetical() {
        let mut h = strings(&["d", "c", "b", "a"]);
        HeaderOrder::Custom(strings(&["c", "a"])).apply(&mut h);
        assert_eq!(h, ["c", "a", "b", "d"]);
    }

    #[test]
    fn first_seen_keeps_insertion_order() {
        let mut set = HeaderSet::default();
        for v in ["z", "y", "z", "x"] {
            set.push(String::from(v));
        }
        let (values, lookup) = set.finish(&HeaderOrder::FirstSeen);
        assert_eq!(values, vec!["z", "y", "x"]);
        assert_eq!(lookup.position("x"), Some(2));
        assert_eq!(lookup.position("w"), None);
    }
}
