// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ending a drag.

use crate::error::OutlineError;
use crate::logging::{log_debug, log_warn};
use crate::master::MasterList;
use crate::metrics::OutlineMetrics;
use crate::types::{Item, ItemId, ItemIdSet, ItemList, ProposedGroup, Z_INDEX_RESTING};

/// Settle every row onto its slot and commit the drag.
///
/// Each row's `y` becomes its row index times the row height, including the
/// dragged row, which followed the pointer until now. The dragged row and the
/// rows in `dragged_along` commit their `location` and `parent_id`, and every
/// row returns to [`Z_INDEX_RESTING`].
///
/// `proposed` is the proposal from the last update of this drag. The update
/// already applied it, so it is only checked here.
pub fn on_drag_ended<P: Clone>(
    id: ItemId,
    items: &[Item<P>],
    dragged_along: &ItemIdSet,
    proposed: Option<&ProposedGroup>,
    metrics: &OutlineMetrics,
) -> Result<ItemList<P>, OutlineError> {
    let Some(index) = items.iter().position(|item| item.id == id) else {
        log_warn!(%id, "drag ended for an unknown row");
        return Err(OutlineError::ItemNotFound(id));
    };
    debug_assert!(
        proposed.is_none_or(|group| items[index].parent_id == Some(group.parent_id)),
        "proposal was not applied to the dragged row"
    );

    let mut items = items.to_vec();
    for (row, item) in items.iter_mut().enumerate() {
        item.location.y = metrics.y_for_index(row);
        if item.id == id || dragged_along.contains(&item.id) {
            item.previous_location = item.location;
            item.previous_parent_id = item.parent_id;
        } else {
            item.previous_location.y = item.location.y;
        }
        item.z_index = Z_INDEX_RESTING;
    }
    log_debug!(%id, index, carried = dragged_along.len(), "drag committed");
    Ok(items)
}

impl<P: Clone> MasterList<P> {
    /// [`on_drag_ended`] over this list's rows and metrics.
    ///
    /// Rows hidden under the dragged block also commit their indentation.
    pub fn on_drag_ended(
        &self,
        id: ItemId,
        dragged_along: &ItemIdSet,
        proposed: Option<&ProposedGroup>,
    ) -> Result<Self, OutlineError> {
        let mut next = Self {
            items: on_drag_ended(id, &self.items, dragged_along, proposed, &self.metrics)?,
            ..self.clone()
        };
        let roots = core::iter::once(id).chain(dragged_along.iter().copied());
        next.for_each_hidden_under(roots, |row| {
            row.previous_location.x = row.location.x;
        });
        Ok(next)
    }
}

/// Set every row's `y` from its index, leaving `skip` where it is.
pub(crate) fn renumber_rows<P>(
    items: &mut [Item<P>],
    metrics: &OutlineMetrics,
    skip: Option<ItemId>,
) {
    for (index, item) in items.iter_mut().enumerate() {
        if Some(item.id) != skip {
            item.location.y = metrics.y_for_index(index);
        }
    }
}
