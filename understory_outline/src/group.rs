// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapse and expand.
//!
//! Collapsing moves a group's contiguous run of descendants out of
//! [`MasterList::items`] into [`MasterList::excluded_groups`], keyed by each
//! row's own parent so a nested group can later be reopened on its own.
//! Expanding reinserts them in their original order. A nested group that was
//! collapsed when its ancestor closed stays collapsed when the ancestor reopens.

use crate::error::OutlineError;
use crate::logging::{log_debug, log_warn};
use crate::master::{MasterList, descendants_at};
use crate::types::{ItemId, ItemList};

impl<P: Clone> MasterList<P> {
    /// Hide the subtree under `parent_id`.
    ///
    /// A parent whose next row is not its child still gets an (empty) excluded
    /// entry and is marked collapsed, so it keeps its disclosure state.
    pub fn collapse(&self, parent_id: ItemId) -> Result<Self, OutlineError> {
        if self.is_collapsed(parent_id) {
            log_warn!(%parent_id, "collapse of an already collapsed group");
            return Err(OutlineError::AlreadyCollapsed(parent_id));
        }
        let index = self.require_index(parent_id)?;
        let mut next = self.clone();

        if !self.has_open_children(parent_id) {
            next.excluded_groups.insert(parent_id, ItemList::new());
            next.collapsed_groups.insert(parent_id);
            log_debug!(%parent_id, "collapsed group without open children");
            return Ok(next);
        }

        let metrics = self.metrics;
        let parent_level = self.items[index].indentation_level(&metrics);
        let count = descendants_at(&self.items, index).len();
        let hidden: ItemList<P> = next.items.drain(index + 1..index + 1 + count).collect();

        let mut current_parent = parent_id;
        let mut current_level = parent_level.inc();
        for descendant in hidden {
            let level = descendant.indentation_level(&metrics);
            if level <= parent_level {
                log_warn!(%parent_id, descendant = %descendant.id, "descendant outside parent");
                return Err(OutlineError::DescendantOutsideParent {
                    parent: parent_id,
                    descendant: descendant.id,
                });
            }
            if level != current_level {
                current_parent = descendant
                    .parent_id
                    .ok_or(OutlineError::MissingParent(descendant.id))?;
                current_level = level;
            }
            next.excluded_groups
                .entry(current_parent)
                .or_default()
                .push(descendant);
        }

        let shift = metrics.rows_extent(count);
        for item in &mut next.items[index + 1..] {
            item.settle_y(item.location.y - shift);
        }
        next.collapsed_groups.insert(parent_id);
        log_debug!(%parent_id, hidden = count, "collapsed group");
        Ok(next)
    }

    /// Reveal the subtree under `parent_id`.
    pub fn expand(&self, parent_id: ItemId) -> Result<Self, OutlineError> {
        if !self.is_collapsed(parent_id) {
            log_warn!(%parent_id, "expand of a group that is not collapsed");
            return Err(OutlineError::NotCollapsed(parent_id));
        }
        let index = self.require_index(parent_id)?;
        let mut next = self.clone();
        next.collapsed_groups.remove(&parent_id);
        let Some(children) = next.excluded_groups.remove(&parent_id) else {
            log_warn!(%parent_id, "collapsed group has no excluded entry");
            return Err(OutlineError::NotCollapsed(parent_id));
        };

        let mut cursor = index;
        let mut height = self.items[index].location.y;
        let before = next.items.len();
        next.reveal(children, &mut cursor, &mut height);
        let added = next.items.len() - before;

        let shift = next.metrics.rows_extent(added);
        for item in &mut next.items[cursor + 1..] {
            item.settle_y(item.location.y + shift);
        }
        log_debug!(%parent_id, revealed = added, "expanded group");
        Ok(next)
    }

    /// Expand `id` if it is collapsed, otherwise collapse it.
    pub fn toggle(&self, id: ItemId) -> Result<Self, OutlineError> {
        if self.is_collapsed(id) {
            self.expand(id)
        } else {
            self.collapse(id)
        }
    }

    /// Insert `children` after `cursor`, descending into groups that are open.
    fn reveal(&mut self, children: ItemList<P>, cursor: &mut usize, height: &mut f64) {
        for mut child in children {
            *cursor += 1;
            *height += self.metrics.row_height;
            child.settle_y(*height);
            let child_id = child.id;
            self.items.insert(*cursor, child);
            if self.is_collapsed(child_id) {
                continue;
            }
            if let Some(grandchildren) = self.excluded_groups.remove(&child_id) {
                self.reveal(grandchildren, cursor, height);
            }
        }
    }
}
