//! Grid layout model.
//!
//! Keys are placed in a fixed three-column grid anchored to the bottom of
//! the viewport: key `i` sits in row `i / 3`, column `i % 3`, and the last
//! row starts `bottom_offset` above the viewport's bottom edge. Anchoring to
//! the bottom keeps the keypad still under small height changes while still
//! following an orientation change.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Viewport};
use super::key::Key;
use crate::error::ConfigError;

/// Number of keypad columns.
pub const COLUMNS: usize = 3;

/// Fixed sizes used by [`compute_layout`].
///
/// All lengths are in viewport units (pixels, or cells for a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Key width as a fraction of the viewport width.
    pub width_fraction: f64,
    /// Distance from the viewport's left edge to the first column.
    pub margin_left: f64,
    /// Horizontal space between adjacent keys.
    pub gutter: f64,
    /// Height of every key.
    pub key_height: f64,
    /// Vertical space between adjacent rows.
    pub row_gap: f64,
    /// Distance from the viewport's bottom edge to the top of the last row.
    pub bottom_offset: f64,
}

impl Default for LayoutMetrics {
    /// Metrics of the reference pixel layout: 30% wide keys, 60 px tall,
    /// 10 px apart, 20 px from the left and 100 px up from the bottom.
    fn default() -> Self {
        Self {
            width_fraction: 0.3,
            margin_left: 20.0,
            gutter: 10.0,
            key_height: 60.0,
            row_gap: 10.0,
            bottom_offset: 100.0,
        }
    }
}

impl LayoutMetrics {
    /// Metrics scaled for a terminal where one unit is one cell.
    pub fn terminal() -> Self {
        Self {
            width_fraction: 0.3,
            margin_left: 2.0,
            gutter: 1.0,
            key_height: 3.0,
            row_gap: 1.0,
            bottom_offset: 5.0,
        }
    }

    pub fn with_margin_left(mut self, margin_left: f64) -> Self {
        self.margin_left = margin_left;
        self
    }

    pub fn with_bottom_offset(mut self, bottom_offset: f64) -> Self {
        self.bottom_offset = bottom_offset;
        self
    }

    pub fn with_key_height(mut self, key_height: f64) -> Self {
        self.key_height = key_height;
        self
    }

    /// Reject metrics that would make keys touch or overlap.
    ///
    /// Hit-testing uses inclusive edges, so adjacent keys need a strictly
    /// positive gutter and row gap to stay disjoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("width_fraction", self.width_fraction),
            ("margin_left", self.margin_left),
            ("gutter", self.gutter),
            ("key_height", self.key_height),
            ("row_gap", self.row_gap),
            ("bottom_offset", self.bottom_offset),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, value, "must be finite"));
            }
        }
        if self.width_fraction <= 0.0 || self.width_fraction > 1.0 {
            return Err(ConfigError::invalid(
                "width_fraction",
                self.width_fraction,
                "must be in (0, 1]",
            ));
        }
        for (name, value) in [
            ("gutter", self.gutter),
            ("key_height", self.key_height),
            ("row_gap", self.row_gap),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::invalid(name, value, "must be positive"));
            }
        }
        Ok(())
    }
}

/// A key and the rectangle it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyRect {
    pub key: Key,
    pub rect: Rect,
}

/// Key rectangles for one viewport size.
///
/// Immutable once computed; a viewport change produces a new `Layout`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    viewport: Viewport,
    metrics: LayoutMetrics,
    entries: Vec<KeyRect>,
    rows: usize,
}

impl Layout {
    /// A layout with no keys. Hit-testing against it never matches.
    pub fn empty(viewport: Viewport, metrics: LayoutMetrics) -> Self {
        Self {
            viewport,
            metrics,
            entries: Vec::new(),
            rows: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width shared by every key.
    pub fn key_width(&self) -> f64 {
        self.viewport.width * self.metrics.width_fraction
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyRect> {
        self.entries.iter()
    }

    /// Entry at a layout index.
    pub fn get(&self, index: usize) -> Option<&KeyRect> {
        self.entries.get(index)
    }

    /// Rectangle of the first occurrence of `key`.
    pub fn rect_of(&self, key: Key) -> Option<Rect> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.rect)
    }
}

/// Compute the rectangle of every key for a viewport.
///
/// Pure and deterministic: identical inputs always give identical output.
pub fn compute_layout(viewport: Viewport, keys: &[Key], metrics: &LayoutMetrics) -> Layout {
    if keys.is_empty() {
        return Layout::empty(viewport, *metrics);
    }

    let rows = keys.len().div_ceil(COLUMNS);
    let key_width = viewport.width * metrics.width_fraction;
    let column_pitch = key_width + metrics.gutter;
    let row_pitch = metrics.key_height + metrics.row_gap;
    let last_row_top = viewport.height - metrics.bottom_offset;

    let entries = keys
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            let row = index / COLUMNS;
            let col = index % COLUMNS;
            let rows_below = (rows - 1 - row) as f64;
            KeyRect {
                key,
                rect: Rect::new(
                    metrics.margin_left + col as f64 * column_pitch,
                    last_row_top - rows_below * row_pitch,
                    key_width,
                    metrics.key_height,
                ),
            }
        })
        .collect();

    Layout {
        viewport,
        metrics: *metrics,
        entries,
        rows,
    }
}
