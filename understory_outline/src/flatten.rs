// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between a nested hierarchy and positioned rows.
//!
//! [`flatten`] is used once, at load or reset. [`regroup`] goes the other way
//! and rebuilds the nesting from `parent_id` links, including rows currently
//! hidden in [`ExcludedGroups`].

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Point;

use crate::metrics::{IndentationLevel, OutlineMetrics};
use crate::types::{ExcludedGroups, Item, ItemId, ItemList, OutlineNode};

/// Flatten `nodes` depth-first into rows.
///
/// Ids are assigned in visiting order, starting at `0`. A row's `y` is its
/// position in the flattening times the row height and its `x` is its depth
/// times the level width. `is_group` records whether the node had children.
pub fn flatten<P: Clone>(nodes: &[OutlineNode<P>], metrics: &OutlineMetrics) -> ItemList<P> {
    let mut items = Vec::with_capacity(nodes.iter().map(OutlineNode::subtree_len).sum());
    let mut next_id = 0_u32;
    for node in nodes {
        flatten_node(node, None, IndentationLevel::ROOT, &mut next_id, metrics, &mut items);
    }
    items
}

fn flatten_node<P: Clone>(
    node: &OutlineNode<P>,
    parent_id: Option<ItemId>,
    level: IndentationLevel,
    next_id: &mut u32,
    metrics: &OutlineMetrics,
    out: &mut ItemList<P>,
) {
    let id = ItemId(*next_id);
    *next_id += 1;
    let location = Point::new(
        level.to_x(metrics),
        f64::from(id.0) * metrics.row_height,
    );
    out.push(Item::new(
        id,
        node.payload.clone(),
        location,
        parent_id,
        !node.children.is_empty(),
    ));
    // Each child gets `level.inc()` from this frame, so siblings that follow a
    // deep subtree are back at their own level without any bookkeeping.
    for child in &node.children {
        flatten_node(child, Some(id), level.inc(), next_id, metrics, out);
    }
}

/// Rebuild the nested hierarchy from visible rows and hidden groups.
///
/// Visible children keep their row order; hidden children follow in the order
/// they were hidden. Rows whose parent is neither visible nor hidden are
/// dropped, since nothing can reach them.
pub fn regroup<P: Clone>(items: &[Item<P>], excluded: &ExcludedGroups<P>) -> Vec<OutlineNode<P>> {
    let mut children: HashMap<Option<ItemId>, Vec<&Item<P>>> = HashMap::new();
    for item in items {
        children.entry(item.parent_id).or_default().push(item);
    }
    for (parent, hidden) in excluded {
        children.entry(Some(*parent)).or_default().extend(hidden.iter());
    }
    build_level(None, &children)
}

fn build_level<P: Clone>(
    parent: Option<ItemId>,
    children: &HashMap<Option<ItemId>, Vec<&Item<P>>>,
) -> Vec<OutlineNode<P>> {
    let Some(rows) = children.get(&parent) else {
        return Vec::new();
    };
    rows.iter()
        .map(|item| OutlineNode {
            payload: item.payload.clone(),
            children: build_level(Some(item.id), children),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Vec<OutlineNode<&'static str>> {
        vec![
            OutlineNode::leaf("red"),
            OutlineNode::group(
                "blue",
                vec![
                    OutlineNode::leaf("black"),
                    OutlineNode::group("brown", vec![OutlineNode::leaf("cyan")]),
                ],
            ),
            OutlineNode::leaf("green"),
        ]
    }

    #[test]
    fn flatten_positions_rows_depth_first() {
        let items = flatten(&sample(), &OutlineMetrics::default());
        let payloads: Vec<_> = items.iter().map(|i| i.payload).collect();
        assert_eq!(payloads, ["red", "blue", "black", "brown", "cyan", "green"]);
        let ys: Vec<_> = items.iter().map(|i| i.location.y).collect();
        assert_eq!(ys, [0.0, 100.0, 200.0, 300.0, 400.0, 500.0]);
        let xs: Vec<_> = items.iter().map(|i| i.location.x).collect();
        assert_eq!(xs, [0.0, 0.0, 50.0, 50.0, 100.0, 0.0]);
    }

    #[test]
    fn flatten_records_groups_and_parents() {
        let items = flatten(&sample(), &OutlineMetrics::default());
        let groups: Vec<_> = items.iter().map(|i| i.is_group).collect();
        assert_eq!(groups, [false, true, false, true, false, false]);
        let parents: Vec<_> = items.iter().map(|i| i.parent_id).collect();
        assert_eq!(
            parents,
            [
                None,
                None,
                Some(ItemId(1)),
                Some(ItemId(1)),
                Some(ItemId(3)),
                None
            ]
        );
        assert!(
            items.iter().all(|i| i.location == i.previous_location),
            "fresh rows are at rest"
        );
    }

    #[test]
    fn sibling_after_deep_subtree_returns_to_its_level() {
        let nodes = vec![OutlineNode::group(
            "a",
            vec![
                OutlineNode::group(
                    "b",
                    vec![OutlineNode::group("c", vec![OutlineNode::leaf("d")])],
                ),
                OutlineNode::leaf("e"),
            ],
        )];
        let items = flatten(&nodes, &OutlineMetrics::default());
        let xs: Vec<_> = items.iter().map(|i| i.location.x).collect();
        assert_eq!(xs, [0.0, 50.0, 100.0, 150.0, 50.0]);
    }

    #[test]
    fn regroup_restores_nesting() {
        let nodes = sample();
        let items = flatten(&nodes, &OutlineMetrics::default());
        assert_eq!(regroup(&items, &ExcludedGroups::new()), nodes);
    }

    #[test]
    fn regroup_includes_hidden_rows() {
        let nodes = sample();
        let mut items = flatten(&nodes, &OutlineMetrics::default());
        let cyan = items.remove(4);
        let mut excluded = ExcludedGroups::new();
        excluded.insert(ItemId(3), vec![cyan]);
        assert_eq!(regroup(&items, &excluded), nodes);
    }

    #[test]
    fn flatten_empty() {
        let items = flatten::<()>(&[], &OutlineMetrics::default());
        assert!(items.is_empty());
    }
}
