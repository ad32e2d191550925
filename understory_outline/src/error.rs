// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract violations reported by the engine.

use crate::types::ItemId;

/// A [`MasterList`](crate::MasterList) or id that the engine could not have produced.
///
/// Every fallible operation takes its input by reference and builds a new
/// value, so on `Err` the caller's current state is untouched. Receiving one
/// of these means the caller passed back inconsistent state; it is a bug to
/// fix, not a condition to retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// No visible row has this id.
    #[error("no visible item with id {0}")]
    ItemNotFound(ItemId),
    /// Expand was requested for a parent that is not collapsed.
    #[error("item {0} is not collapsed")]
    NotCollapsed(ItemId),
    /// Collapse was requested for a parent that is already collapsed.
    #[error("item {0} is already collapsed")]
    AlreadyCollapsed(ItemId),
    /// A row in a parent's contiguous run sits at or west of the parent.
    #[error("descendant {descendant} is not indented under parent {parent}")]
    DescendantOutsideParent {
        /// The parent being collapsed.
        parent: ItemId,
        /// The offending row.
        descendant: ItemId,
    },
    /// A nested row has no parent id.
    #[error("nested item {0} has no parent")]
    MissingParent(ItemId),
    /// A drag was ended for a row other than the one being dragged.
    #[error("item {0} is not the row being dragged")]
    DragNotActive(ItemId),
}
