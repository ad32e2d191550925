// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`MasterList`] aggregate and read-only queries over it.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::OutlineError;
use crate::flatten::{flatten, regroup};
use crate::metrics::OutlineMetrics;
use crate::types::{CollapsedGroups, ExcludedGroups, Item, ItemId, ItemList, OutlineNode};

/// Visible rows plus the hidden subtrees of collapsed groups.
///
/// Operations never mutate a list in place: collapse, expand, and the drag
/// entry points take `&self` and return the next state, which the caller keeps
/// as its new current value.
///
/// ## Example
///
/// ```rust
/// use understory_outline::{MasterList, OutlineMetrics, OutlineNode};
///
/// let list = MasterList::from_hierarchy(
///     &[
///         OutlineNode::group("blue", vec![OutlineNode::leaf("black")]),
///         OutlineNode::leaf("green"),
///     ],
///     OutlineMetrics::default(),
/// );
/// let blue = list.items[0].id;
///
/// let closed = list.collapse(blue).unwrap();
/// assert_eq!(closed.items.len(), 2);
/// assert!(closed.is_collapsed(blue));
///
/// let open = closed.expand(blue).unwrap();
/// assert_eq!(open, list);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MasterList<P> {
    /// Visible rows in row order.
    pub items: ItemList<P>,
    /// Hidden rows keyed by the parent they were hidden under.
    pub excluded_groups: ExcludedGroups<P>,
    /// Ids whose subtree is hidden.
    ///
    /// A nested group keeps its own entry here regardless of what happens to
    /// its ancestors.
    pub collapsed_groups: CollapsedGroups,
    /// Row geometry.
    pub metrics: OutlineMetrics,
}

impl<P: Clone> MasterList<P> {
    /// Wrap already positioned rows with every group open.
    pub fn new(items: ItemList<P>, metrics: OutlineMetrics) -> Self {
        Self {
            items,
            excluded_groups: ExcludedGroups::new(),
            collapsed_groups: CollapsedGroups::new(),
            metrics,
        }
    }

    /// Flatten a hierarchy into a fresh list with every group open.
    pub fn from_hierarchy(nodes: &[OutlineNode<P>], metrics: OutlineMetrics) -> Self {
        Self::new(flatten(nodes, &metrics), metrics)
    }

    /// Rebuild the nested hierarchy, hidden rows included.
    pub fn to_hierarchy(&self) -> Vec<OutlineNode<P>> {
        regroup(&self.items, &self.excluded_groups)
    }

    /// Row index of a visible item.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// A visible item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item<P>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn require_index(&self, id: ItemId) -> Result<usize, OutlineError> {
        self.index_of(id).ok_or(OutlineError::ItemNotFound(id))
    }

    /// Whether `id`'s subtree is hidden.
    pub fn is_collapsed(&self, id: ItemId) -> bool {
        self.collapsed_groups.contains(&id)
    }

    /// Whether `id` currently hosts children, visible or hidden.
    ///
    /// This is the single definition of "is a group" the engine uses; the
    /// creation-time [`Item::is_group`] flag is not consulted.
    pub fn has_children(&self, id: ItemId) -> bool {
        self.excluded_groups.contains_key(&id)
            || self.items.iter().any(|item| item.parent_id == Some(id))
    }

    /// Whether the row right below `id` is one of its children.
    pub fn has_open_children(&self, id: ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.items
            .get(index + 1)
            .is_some_and(|below| below.parent_id == Some(id))
    }

    /// Visible children of `parent`, in row order.
    pub fn children_of(&self, parent: ItemId) -> impl Iterator<Item = &Item<P>> + '_ {
        self.items
            .iter()
            .filter(move |item| item.parent_id == Some(parent))
    }

    /// Visible rows above `id`, top to bottom.
    pub fn items_above(&self, id: ItemId) -> &[Item<P>] {
        match self.index_of(id) {
            Some(index) => &self.items[..index],
            None => &[],
        }
    }

    /// Visible rows below `id`, top to bottom.
    pub fn items_below(&self, id: ItemId) -> &[Item<P>] {
        match self.index_of(id) {
            Some(index) => &self.items[index + 1..],
            None => &[],
        }
    }

    /// Visit every hidden row under `roots`, descending into nested hidden groups.
    pub(crate) fn for_each_hidden_under(
        &mut self,
        roots: impl IntoIterator<Item = ItemId>,
        mut visit: impl FnMut(&mut Item<P>),
    ) {
        let mut pending: SmallVec<[ItemId; 8]> = roots.into_iter().collect();
        while let Some(id) = pending.pop() {
            if let Some(rows) = self.excluded_groups.get_mut(&id) {
                for row in rows {
                    visit(row);
                    pending.push(row.id);
                }
            }
        }
    }

    /// The contiguous run of rows below `id` that are indented east of it.
    pub fn descendants_of(&self, id: ItemId) -> &[Item<P>] {
        match self.index_of(id) {
            Some(index) => descendants_at(&self.items, index),
            None => &[],
        }
    }
}

/// Rows after `index` up to (not including) the first one at or west of it.
pub(crate) fn descendants_at<P>(items: &[Item<P>], index: usize) -> &[Item<P>] {
    let parent_x = items[index].location.x;
    let below = &items[index + 1..];
    let len = below
        .iter()
        .position(|item| item.location.x <= parent_x)
        .unwrap_or(below.len());
    &below[..len]
}
