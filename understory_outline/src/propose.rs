// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing a new parent for the dragged row.
//!
//! ## Rules
//!
//! Evaluated in order; a later rule that fires replaces the earlier result.
//!
//! 1. **Deepest ancestor.** Every row above the dragged row that lies west of
//!    the cursor proposes a parent:
//!    - an open group proposes itself, one level deeper than its own level;
//!    - otherwise a row whose parent is open proposes that parent at the row's
//!      own indentation;
//!    - otherwise a top-level row that hosts nothing proposes itself at level 1.
//!
//!    The last qualifying row in top-to-bottom order wins.
//! 2. **Bare top-level row right above.** If the row immediately above is top
//!    level and hosts nothing, there is no proposal.
//! 3. **Child below.** If the first row after the dragged block belongs to a
//!    parent that is visible above the dragged row, the dragged row joins that
//!    parent, unless rule 1 already proposed something and the cursor is east
//!    of the child-below indentation.
//!
//! "Is a group" is decided against the committed outline: a row hosts
//! children if it has hidden rows, a visible row other than the dragged one
//! names it as parent, or it was the dragged row's parent when the drag began.
//! Where the dragged row sits in the current sample never changes the answer,
//! so a proposal depends only on the latest translation.

use crate::logging::log_trace;
use crate::master::MasterList;
use crate::metrics::IndentationLevel;
use crate::types::{CursorDrag, Item, ItemId, ProposedGroup};

/// Compute the parent the row at `index` would join, or `None` for top level.
///
/// `dragged_along` is the number of rows that follow `index` as part of the
/// dragged block.
pub fn propose_group<P: Clone>(
    list: &MasterList<P>,
    index: usize,
    dragged_along: usize,
    cursor: &CursorDrag,
) -> Option<ProposedGroup> {
    if index >= list.items.len() {
        return None;
    }
    let dragged = &list.items[index];
    let mut proposed = deepest_parent(list, index, dragged, cursor);

    if blocked_by_bare_row_above(list, index, dragged) {
        log_trace!(index, "blocked by bare top-level row above");
        proposed = None;
    }

    if let Some(from_below) = group_from_child_below(list, index, dragged_along) {
        let keep = proposed.is_some() && from_below.x_indentation < cursor.x;
        if !keep {
            log_trace!(index, parent = %from_below.parent_id, "joined group of child below");
            proposed = Some(from_below);
        }
    }
    proposed
}

fn hosts_children<P: Clone>(list: &MasterList<P>, id: ItemId, dragged: &Item<P>) -> bool {
    list.excluded_groups.contains_key(&id)
        || dragged.previous_parent_id == Some(id)
        || list
            .items
            .iter()
            .any(|item| item.id != dragged.id && item.parent_id == Some(id))
}

fn deepest_parent<P: Clone>(
    list: &MasterList<P>,
    index: usize,
    dragged: &Item<P>,
    cursor: &CursorDrag,
) -> Option<ProposedGroup> {
    let metrics = &list.metrics;
    let mut proposed = None;
    for above in &list.items[..index] {
        if cursor.x <= above.location.x {
            continue;
        }
        let is_group = hosts_children(list, above.id, dragged);
        if is_group && !list.is_collapsed(above.id) {
            proposed = Some(ProposedGroup {
                parent_id: above.id,
                x_indentation: above.indentation_level(metrics).inc().to_x(metrics),
            });
        } else if let Some(parent_id) = above.parent_id
            && !list.is_collapsed(parent_id)
        {
            proposed = Some(ProposedGroup {
                parent_id,
                x_indentation: above.location.x,
            });
        } else if above.parent_id.is_none() && !is_group {
            proposed = Some(ProposedGroup {
                parent_id: above.id,
                x_indentation: IndentationLevel(1).to_x(metrics),
            });
        }
    }
    proposed
}

fn blocked_by_bare_row_above<P: Clone>(
    list: &MasterList<P>,
    index: usize,
    dragged: &Item<P>,
) -> bool {
    let Some(above) = index.checked_sub(1).and_then(|i| list.items.get(i)) else {
        return false;
    };
    above.parent_id.is_none() && !hosts_children(list, above.id, dragged)
}

fn group_from_child_below<P: Clone>(
    list: &MasterList<P>,
    index: usize,
    dragged_along: usize,
) -> Option<ProposedGroup> {
    let below = list.items.get(index + dragged_along + 1)?;
    let parent_id = below.parent_id?;
    let parent: &Item<P> = list.items[..index].iter().find(|i| i.id == parent_id)?;
    let metrics = &list.metrics;
    Some(ProposedGroup {
        parent_id,
        x_indentation: parent.indentation_level(metrics).inc().to_x(metrics),
    })
}
