// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live drag updates.
//!
//! ## Overview
//!
//! [`MasterList::on_drag_changed`] runs on every pointer sample. It is always
//! given the translation since the drag started, and it measures from each
//! row's committed `previous_location`, so repeating a sample gives the same
//! result.
//!
//! One update:
//!
//! 1. Offsets the dragged row and everything below it by `parent_id` links
//!    vertically. Nothing is indented yet.
//! 2. Tracks the raw horizontal pointer travel in a [`CursorDrag`].
//! 3. Picks the row the dragged row now falls into. The thresholds sit on half
//!    rows, so the target flips before the row's top reaches the next slot. The
//!    dragged block's own rows are not counted as destinations.
//! 4. Moves the block there and renumbers every row except the dragged one,
//!    which keeps following the pointer.
//! 5. Asks [`propose_group`] for a parent and re-indents the block by the same
//!    number of levels as the dragged row.

use alloc::vec::Vec;
use kurbo::Vec2;
use smallvec::SmallVec;

use crate::commit::renumber_rows;
use crate::error::OutlineError;
use crate::logging::log_debug;
use crate::master::MasterList;
use crate::metrics::{IndentationLevel, OutlineMetrics};
use crate::propose::propose_group;
use crate::types::{
    BeingDraggedItem, CursorDrag, Item, ItemId, ItemIdSet, ProposedGroup, Z_INDEX_DRAGGED,
};

type Indices = SmallVec<[usize; 8]>;

/// Everything a drag update produces.
#[derive(Clone, Debug, PartialEq)]
pub struct DragUpdate<P> {
    /// The list to keep as current state.
    pub master_list: MasterList<P>,
    /// Where the dragged row would land; `None` is top level.
    pub proposed: Option<ProposedGroup>,
    /// The dragged row and the rows it carries.
    pub being_dragged: BeingDraggedItem,
    /// Raw horizontal pointer travel.
    pub cursor_drag: CursorDrag,
}

impl<P: Clone> MasterList<P> {
    /// Apply one pointer sample to the row `id`.
    ///
    /// `translation` is the pointer offset since the drag started.
    pub fn on_drag_changed(
        &self,
        id: ItemId,
        translation: Vec2,
    ) -> Result<DragUpdate<P>, OutlineError> {
        let original_index = self.require_index(id)?;
        let metrics = self.metrics;
        let mut next = self.clone();

        let mut moved = Indices::new();
        let mut dragged_along = ItemIdSet::new();
        carry(
            &mut next.items,
            original_index,
            translation.y,
            &mut moved,
            &mut dragged_along,
        );

        let dragged = &next.items[original_index];
        let cursor_drag = CursorDrag {
            x: dragged.previous_location.x + translation.x,
            previous_x: dragged.previous_location.x,
        };

        let last_index = next.items.len() - 1;
        let max_index = max_moved_to_index(next.items.len(), dragged_along.len());
        let target = moved_to_index(
            dragged.location.y,
            max_index,
            translation.y > 0.0,
            &metrics,
        )
        .unwrap_or(original_index);
        let target = adjust_for_own_children(target, original_index, &moved, last_index);

        if target != original_index {
            log_debug!(%id, from = original_index, to = target, "reordering dragged block");
            let offset = if target > original_index {
                target + 1
            } else {
                target
            };
            move_block(&mut next.items, &moved, offset);
            renumber_rows(&mut next.items, &metrics, Some(id));
        }

        let index = next.require_index(id)?;
        let proposed = propose_group(&next, index, dragged_along.len(), &cursor_drag);
        next.apply_proposal(index, proposed, &dragged_along);

        for item in &mut next.items {
            if item.id == id || dragged_along.contains(&item.id) {
                item.z_index = Z_INDEX_DRAGGED;
            }
        }

        Ok(DragUpdate {
            master_list: next,
            proposed,
            being_dragged: BeingDraggedItem {
                current: id,
                dragged_along,
            },
            cursor_drag,
        })
    }

    /// Reparent the row at `index` and shift its block, hidden rows included,
    /// by the same level delta.
    fn apply_proposal(
        &mut self,
        index: usize,
        proposed: Option<ProposedGroup>,
        dragged_along: &ItemIdSet,
    ) {
        let metrics = self.metrics;
        let item = &mut self.items[index];
        let id = item.id;
        let old_level = item.indentation_level(&metrics);
        let new_level = match proposed {
            Some(group) => {
                item.parent_id = Some(group.parent_id);
                item.location.x = group.x_indentation;
                group.indentation_level(&metrics)
            }
            None => {
                item.parent_id = None;
                item.location.x = 0.0;
                IndentationLevel::ROOT
            }
        };

        let delta = new_level.0 - old_level.0;
        let shift = |row: &mut Item<P>| {
            let level = IndentationLevel(row.indentation_level(&metrics).0 + delta);
            row.location.x = level.to_x(&metrics);
        };
        for item in &mut self.items {
            if dragged_along.contains(&item.id) {
                shift(item);
            }
        }
        let roots = core::iter::once(id).chain(dragged_along.iter().copied());
        self.for_each_hidden_under(roots, shift);
    }
}

/// Offset the row at `index` and its descendants by `dy` from their committed
/// positions, collecting their indices and the descendants' ids.
fn carry<P>(
    items: &mut [Item<P>],
    index: usize,
    dy: f64,
    moved: &mut Indices,
    dragged_along: &mut ItemIdSet,
) {
    let item = &mut items[index];
    item.location.y = item.previous_location.y + dy;
    let id = item.id;
    moved.push(index);

    let children: Indices = items
        .iter()
        .enumerate()
        .filter(|(_, child)| child.parent_id == Some(id) && child.id != id)
        .map(|(i, _)| i)
        .collect();
    for child in children {
        if dragged_along.insert(items[child].id) {
            carry(items, child, dy, moved, dragged_along);
        }
    }
}

/// Highest row a block can move to: rows it carries are not destinations.
fn max_moved_to_index(len: usize, dragged_along: usize) -> usize {
    len.saturating_sub(1 + dragged_along)
}

/// Row index for a dragged row at `y`, on a half-row threshold grid.
///
/// Moving down, the deepest threshold the row has passed wins and is rounded
/// up; moving up, the first threshold still below the row wins and is rounded
/// down. `None` means no threshold matched.
fn moved_to_index(
    y: f64,
    max_index: usize,
    moving_down: bool,
    metrics: &OutlineMetrics,
) -> Option<usize> {
    let half = metrics.row_height / 2.0;
    let last = 2 * max_index + 1;
    let found = if moving_down {
        (0..=last)
            .rev()
            .find(|&k| y > k as f64 * half)
            .map(|k| k.div_ceil(2))
    } else {
        (0..=last).find(|&k| y < k as f64 * half).map(|k| k / 2)
    };
    found.map(|index| index.min(max_index))
}

/// Moving down, the block's own rows still sit right below it, so count the
/// distance from the bottom of the block instead of from the dragged row.
fn adjust_for_own_children(
    target: usize,
    original_index: usize,
    moved: &[usize],
    last_index: usize,
) -> usize {
    if target <= original_index {
        return target;
    }
    let bottom = moved.iter().copied().max().unwrap_or(original_index);
    (bottom + (target - original_index)).min(last_index)
}

/// Move the rows at `indices` as one block so it lands before the row
/// originally at `offset`.
fn move_block<P>(items: &mut Vec<Item<P>>, indices: &[usize], offset: usize) {
    let mut sorted: Indices = indices.iter().copied().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut before = Vec::with_capacity(items.len());
    let mut block = Vec::with_capacity(sorted.len());
    let mut after = Vec::new();
    for (i, item) in core::mem::take(items).into_iter().enumerate() {
        if sorted.binary_search(&i).is_ok() {
            block.push(item);
        } else if i < offset {
            before.push(item);
        } else {
            after.push(item);
        }
    }
    before.append(&mut block);
    before.append(&mut after);
    *items = before;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutlineNode, Z_INDEX_RESTING};
    use alloc::vec;

    const RED: ItemId = ItemId(0);
    const BLUE: ItemId = ItemId(1);
    const BLACK: ItemId = ItemId(2);
    const BROWN: ItemId = ItemId(3);
    const CYAN: ItemId = ItemId(4);
    const GREEN: ItemId = ItemId(5);

    fn sample() -> MasterList<&'static str> {
        MasterList::from_hierarchy(
            &[
                OutlineNode::leaf("red"),
                OutlineNode::group(
                    "blue",
                    vec![
                        OutlineNode::leaf("black"),
                        OutlineNode::group("brown", vec![OutlineNode::leaf("cyan")]),
                    ],
                ),
                OutlineNode::leaf("green"),
            ],
            OutlineMetrics::default(),
        )
    }

    fn order(list: &MasterList<&'static str>) -> Vec<ItemId> {
        list.items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn green_dragged_between_blue_and_black_joins_blue() {
        let list = sample();
        let update = list.on_drag_changed(GREEN, Vec2::new(50.0, -350.0)).unwrap();
        assert_eq!(
            update.proposed,
            Some(ProposedGroup {
                parent_id: BLUE,
                x_indentation: 50.0
            })
        );
        let next = &update.master_list;
        assert_eq!(order(next), [RED, BLUE, GREEN, BLACK, BROWN, CYAN]);
        let green = next.item(GREEN).unwrap();
        assert_eq!(green.parent_id, Some(BLUE));
        assert_eq!(green.location.x, 50.0);
        assert_eq!(green.location.y, 150.0, "dragged row follows the pointer");
        assert_eq!(green.previous_location.y, 500.0);
        assert_eq!(green.z_index, Z_INDEX_DRAGGED);
        assert_eq!(next.item(BLACK).unwrap().location.y, 300.0);
        assert_eq!(next.item(BLACK).unwrap().z_index, Z_INDEX_RESTING);
        assert_eq!(update.cursor_drag, CursorDrag { x: 50.0, previous_x: 0.0 });
        assert!(update.being_dragged.dragged_along.is_empty());
    }

    #[test]
    fn repeating_a_sample_is_stable() {
        let list = sample();
        let translation = Vec2::new(50.0, -350.0);
        let first = list.on_drag_changed(GREEN, translation).unwrap();
        let second = first
            .master_list
            .on_drag_changed(GREEN, translation)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn group_max_index_skips_carried_rows() {
        assert_eq!(max_moved_to_index(6, 3), 2);
        assert_eq!(max_moved_to_index(6, 0), 5);
        assert_eq!(max_moved_to_index(1, 0), 0);
    }

    #[test]
    fn group_moves_below_next_sibling_as_a_block() {
        let list = sample();
        let update = list.on_drag_changed(BLUE, Vec2::new(0.0, 130.0)).unwrap();
        let next = &update.master_list;
        assert_eq!(order(next), [RED, GREEN, BLUE, BLACK, BROWN, CYAN]);
        let along = &update.being_dragged.dragged_along;
        assert_eq!(along.len(), 3);
        assert!(along.contains(&BLACK) && along.contains(&BROWN) && along.contains(&CYAN));
        assert_eq!(update.proposed, None, "bare green right above blocks nesting");
        assert_eq!(next.item(BLUE).unwrap().location.y, 230.0);
        assert_eq!(next.item(GREEN).unwrap().location.y, 100.0);
        assert_eq!(next.item(CYAN).unwrap().location.y, 500.0);
        assert_eq!(next.item(CYAN).unwrap().location.x, 100.0);
        assert!(
            next.items
                .iter()
                .filter(|i| i.id != RED && i.id != GREEN)
                .all(|i| i.z_index == Z_INDEX_DRAGGED)
        );
    }

    #[test]
    fn group_cannot_pass_its_own_children() {
        let list = sample();
        let far = list.on_drag_changed(BLUE, Vec2::new(0.0, 10_000.0)).unwrap();
        assert_eq!(order(&far.master_list), [RED, GREEN, BLUE, BLACK, BROWN, CYAN]);
    }

    #[test]
    fn small_moves_inside_the_band_do_not_reorder() {
        let list = sample();
        let update = list.on_drag_changed(RED, Vec2::new(0.0, 40.0)).unwrap();
        assert_eq!(order(&update.master_list), order(&list));
        let update = list.on_drag_changed(RED, Vec2::new(0.0, 60.0)).unwrap();
        assert_eq!(
            order(&update.master_list),
            [BLUE, RED, BLACK, BROWN, CYAN, GREEN],
            "past half a row the target flips"
        );
    }

    #[test]
    fn outdenting_carries_children_by_the_same_delta() {
        let list = sample();
        let update = list.on_drag_changed(BROWN, Vec2::new(-50.0, 0.0)).unwrap();
        assert_eq!(update.proposed, None);
        let next = &update.master_list;
        let brown = next.item(BROWN).unwrap();
        assert_eq!(brown.parent_id, None);
        assert_eq!(brown.location.x, 0.0);
        let cyan = next.item(CYAN).unwrap();
        assert_eq!(cyan.location.x, 50.0);
        assert_eq!(cyan.parent_id, Some(BROWN), "carried rows keep their parent");
    }

    #[test]
    fn proposal_depends_only_on_latest_sample() {
        // red, blue(collapsed)[black], green
        let (blue, green) = (ItemId(1), ItemId(3));
        let list = MasterList::from_hierarchy(
            &[
                OutlineNode::leaf("red"),
                OutlineNode::group("blue", vec![OutlineNode::leaf("black")]),
                OutlineNode::leaf("green"),
            ],
            OutlineMetrics::default(),
        )
        .collapse(blue)
        .unwrap();
        let target = Vec2::new(10.0, -100.0);
        let direct = list.on_drag_changed(green, target).unwrap();
        assert_eq!(direct.proposed, None, "bare red right above blocks");

        let nudged = list.on_drag_changed(green, Vec2::new(10.0, 0.0)).unwrap();
        assert_eq!(nudged.proposed.map(|g| g.parent_id), Some(RED));
        let replayed = nudged.master_list.on_drag_changed(green, target).unwrap();
        assert_eq!(replayed.proposed, direct.proposed);
        assert_eq!(replayed.master_list, direct.master_list);
    }

    #[test]
    fn hidden_rows_follow_the_dragged_level() {
        let list = sample().collapse(BROWN).unwrap();
        let update = list.on_drag_changed(BROWN, Vec2::new(-50.0, 0.0)).unwrap();
        assert_eq!(update.proposed, None);
        let cyan = &update.master_list.excluded_groups[&BROWN][0];
        assert_eq!(cyan.location.x, 50.0);
        assert_eq!(cyan.previous_location.x, 100.0, "not committed yet");

        // Same translation again measures from the committed level.
        let again = update.master_list.on_drag_changed(BROWN, Vec2::new(-50.0, 0.0)).unwrap();
        assert_eq!(again.master_list.excluded_groups[&BROWN][0].location.x, 50.0);
    }

    #[test]
    fn zero_translation_changes_nothing_but_draw_order() {
        let list = sample();
        for item in &list.items {
            let mut update = list.on_drag_changed(item.id, Vec2::ZERO).unwrap();
            for row in &mut update.master_list.items {
                row.z_index = Z_INDEX_RESTING;
            }
            assert_eq!(update.master_list, list, "dragging {} in place", item.id);
        }
    }

    #[test]
    fn unknown_row_is_an_error() {
        assert_eq!(
            sample().on_drag_changed(ItemId(99), Vec2::ZERO),
            Err(OutlineError::ItemNotFound(ItemId(99)))
        );
    }

    #[test]
    fn threshold_grid() {
        let m = OutlineMetrics::default();
        assert_eq!(moved_to_index(150.0, 5, false, &m), Some(2));
        assert_eq!(moved_to_index(140.0, 5, false, &m), Some(1));
        assert_eq!(moved_to_index(-30.0, 5, false, &m), Some(0));
        assert_eq!(moved_to_index(60.0, 5, true, &m), Some(1));
        assert_eq!(moved_to_index(1e6, 5, true, &m), Some(5));
        assert_eq!(moved_to_index(-10.0, 5, true, &m), None);
        assert_eq!(moved_to_index(1e6, 5, false, &m), None);
    }

    #[test]
    fn downward_target_counts_from_block_bottom() {
        assert_eq!(adjust_for_own_children(2, 1, &[1, 2, 3, 4], 5), 5);
        assert_eq!(adjust_for_own_children(3, 1, &[1, 2, 3, 4], 5), 5);
        assert_eq!(adjust_for_own_children(1, 3, &[3, 4], 5), 1);
        assert_eq!(adjust_for_own_children(1, 0, &[0], 5), 1);
    }

    #[test]
    fn block_move_keeps_relative_order() {
        let mut list = sample();
        move_block(&mut list.items, &[1, 2, 3, 4], 6);
        assert_eq!(order(&list), [RED, GREEN, BLUE, BLACK, BROWN, CYAN]);
        let mut list = sample();
        move_block(&mut list.items, &[5], 1);
        assert_eq!(order(&list), [RED, GREEN, BLUE, BLACK, BROWN, CYAN]);
    }
}
