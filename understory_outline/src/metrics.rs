// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row geometry and indentation math.
//!
//! An outline is laid out on a fixed grid: every row is [`OutlineMetrics::row_height`]
//! tall and every nesting level shifts a row east by [`OutlineMetrics::level_width`].
//! [`IndentationLevel`] converts between that pixel grid and discrete depths.

/// Geometry shared by every operation on a [`MasterList`](crate::MasterList).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineMetrics {
    /// Height of a single row. Row `i` rests at `y == i * row_height`.
    pub row_height: f64,
    /// Horizontal offset of one nesting level.
    pub level_width: f64,
}

impl OutlineMetrics {
    /// Create metrics for the given row height; the level width is half of it.
    #[must_use]
    pub fn new(row_height: f64) -> Self {
        debug_assert!(
            row_height.is_finite() && row_height > 0.0,
            "row height must be finite and positive; got {row_height:?}"
        );
        Self {
            row_height,
            level_width: row_height / 2.0,
        }
    }

    /// Resting `y` of the row at `index`.
    #[must_use]
    pub fn y_for_index(&self, index: usize) -> f64 {
        index as f64 * self.row_height
    }

    /// Extent of `count` consecutive rows.
    #[must_use]
    pub fn rows_extent(&self, count: usize) -> f64 {
        count as f64 * self.row_height
    }
}

impl Default for OutlineMetrics {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Discrete nesting depth of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndentationLevel(pub i32);

impl IndentationLevel {
    /// The top level.
    pub const ROOT: Self = Self(0);

    /// One level deeper.
    #[must_use]
    pub const fn inc(self) -> Self {
        Self(self.0 + 1)
    }

    /// One level shallower.
    #[must_use]
    pub const fn dec(self) -> Self {
        Self(self.0 - 1)
    }

    /// The level a horizontal offset falls into: `floor(x / level_width)`.
    #[must_use]
    pub fn from_x(x: f64, metrics: &OutlineMetrics) -> Self {
        Self(floor_to_i32(x / metrics.level_width))
    }

    /// The horizontal offset of this level.
    #[must_use]
    pub fn to_x(self, metrics: &OutlineMetrics) -> f64 {
        f64::from(self.0) * metrics.level_width
    }
}

/// `floor` without relying on `std` float intrinsics.
fn floor_to_i32(v: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Indentation depths are small; the fractional part is handled below"
    )]
    let truncated = v as i32;
    if f64::from(truncated) > v {
        truncated - 1
    } else {
        truncated
    }
}
