// SPDX-License-Identifier: MIT OR Apache-2.0
//! Markers and regions.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default marker color
pub const DEFAULT_MARKER_COLOR: &str = "#FFFF00";

/// Default region color
pub const DEFAULT_REGION_COLOR: &str = "#00FF0033";

/// A labelled point (or span) on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Time in seconds
    pub time: f64,
    /// Label
    pub label: String,
    /// Display color
    pub color: String,
    /// Span length, zero for a point marker
    #[serde(default)]
    pub duration: f64,
}

/// Optional marker fields
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    /// Display color
    pub color: String,
    /// Span length
    pub duration: f64,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_MARKER_COLOR.to_string(),
            duration: 0.0,
        }
    }
}

/// A named time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Start time
    pub start: f64,
    /// End time
    pub end: f64,
    /// Name
    pub name: String,
    /// Display color
    pub color: String,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
}

impl Region {
    /// Region length
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `time` lies inside the region
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

pub(crate) fn insert_marker(markers: &mut Vec<Marker>, marker: Marker) {
    markers.push(marker);
    markers.sort_by(|a, b| a.time.total_cmp(&b.time));
}

pub(crate) fn insert_region(regions: &mut Vec<Region>, region: Region) {
    regions.push(region);
    regions.sort_by(|a, b| a.start.total_cmp(&b.start));
}
