// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: identifiers, rows, and per-drag state.

use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use kurbo::Point;

use crate::metrics::{IndentationLevel, OutlineMetrics};

/// Draw order given to rows carried by an active drag.
pub const Z_INDEX_DRAGGED: i32 = 9999;

/// Draw order of rows at rest.
pub const Z_INDEX_RESTING: i32 = 0;

/// Identifier of a row, unique within one [`MasterList`](crate::MasterList).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// A positioned row.
///
/// `location.x` encodes nesting (`level * level_width`) and `location.y` the
/// vertical offset. `previous_location` is the last committed position; it only
/// changes when a drag ends or when collapse/expand shifts the row.
/// `previous_parent_id` is the committed counterpart of `parent_id` and only
/// changes when a drag ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<P> {
    /// Stable identity.
    pub id: ItemId,
    /// Opaque display content.
    pub payload: P,
    /// Current position, possibly mid-drag.
    pub location: Point,
    /// Last committed position.
    pub previous_location: Point,
    /// Owning group, or `None` at top level.
    pub parent_id: Option<ItemId>,
    /// Owning group as of the last commit.
    pub previous_parent_id: Option<ItemId>,
    /// Whether the source node had children when it was flattened.
    ///
    /// This is provenance only and is never recomputed. Engine decisions use
    /// [`MasterList::has_children`](crate::MasterList::has_children).
    pub is_group: bool,
    /// Draw order; raised while the row is being dragged.
    pub z_index: i32,
}

impl<P> Item<P> {
    /// Create a row resting at `location`.
    pub fn new(
        id: ItemId,
        payload: P,
        location: Point,
        parent_id: Option<ItemId>,
        is_group: bool,
    ) -> Self {
        Self {
            id,
            payload,
            location,
            previous_location: location,
            parent_id,
            previous_parent_id: parent_id,
            is_group,
            z_index: Z_INDEX_RESTING,
        }
    }

    /// Committed indentation level, read from `previous_location.x`.
    ///
    /// Mid-drag `location.x` is a proposal; the committed level is what
    /// relative re-indentation is measured against.
    pub fn indentation_level(&self, metrics: &OutlineMetrics) -> IndentationLevel {
        IndentationLevel::from_x(self.previous_location.x, metrics)
    }

    /// Indentation level of the current `location.x`.
    pub fn current_level(&self, metrics: &OutlineMetrics) -> IndentationLevel {
        IndentationLevel::from_x(self.location.x, metrics)
    }

    /// Move the row vertically, committing the new position.
    pub(crate) fn settle_y(&mut self, y: f64) {
        self.location.y = y;
        self.previous_location = self.location;
    }
}

/// Ordered rows; at rest row `i` sits at `y == i * row_height`.
pub type ItemList<P> = Vec<Item<P>>;

/// Hidden rows keyed by the parent they were hidden under, in original order.
pub type ExcludedGroups<P> = HashMap<ItemId, ItemList<P>>;

/// Ids whose subtree is hidden.
pub type CollapsedGroups = HashSet<ItemId>;

/// A set of row ids.
pub type ItemIdSet = HashSet<ItemId>;

/// Candidate parent for a dragged row; `None` in its place means top level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProposedGroup {
    /// The group the row would join.
    pub parent_id: ItemId,
    /// Horizontal offset the row would take.
    pub x_indentation: f64,
}

impl ProposedGroup {
    /// Level of [`ProposedGroup::x_indentation`].
    pub fn indentation_level(&self, metrics: &OutlineMetrics) -> IndentationLevel {
        IndentationLevel::from_x(self.x_indentation, metrics)
    }
}

/// Raw horizontal pointer travel, independent of the row's snapped `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorDrag {
    /// Cumulative offset: `previous_x + translation.x`.
    pub x: f64,
    /// Committed `x` of the dragged row when the gesture started.
    pub previous_x: f64,
}

impl CursorDrag {
    /// Seed cursor tracking from a row's current and committed `x`.
    pub fn from_item<P>(item: &Item<P>) -> Self {
        Self {
            x: item.location.x,
            previous_x: item.previous_location.x,
        }
    }
}

/// The row under direct pointer control and the rows carried along with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeingDraggedItem {
    /// Directly dragged row.
    pub current: ItemId,
    /// Descendants moved as a block with `current`.
    pub dragged_along: ItemIdSet,
}

/// A payload node with ordered children, the input to flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineNode<P> {
    /// Display content.
    pub payload: P,
    /// Ordered children.
    pub children: Vec<OutlineNode<P>>,
}

impl<P> OutlineNode<P> {
    /// A node without children.
    pub fn leaf(payload: P) -> Self {
        Self {
            payload,
            children: Vec::new(),
        }
    }

    /// A node with the given children.
    pub fn group(payload: P, children: impl Into<Vec<Self>>) -> Self {
        Self {
            payload,
            children: children.into(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}
