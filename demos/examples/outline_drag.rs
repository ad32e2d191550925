// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted outline session: a collapse and expand, then two drags.
//!
//! Prints the rows after every step. Engine events are logged through
//! `tracing`; raise the level to see proposals:
//!
//! Run:
//! - `RUST_LOG=understory_outline=trace cargo run -p understory_outline_demos --example outline_drag`

use kurbo::Vec2;
use understory_outline::{DragSession, MasterList, OutlineError, OutlineMetrics, OutlineNode};

fn main() -> Result<(), OutlineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut list = MasterList::from_hierarchy(
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
    );
    // Ids follow the rows through every update; read them off the fresh list.
    let (blue, brown, green) = (list.items[1].id, list.items[3].id, list.items[5].id);
    print_rows("initial", &list);

    list = list.toggle(blue)?;
    print_rows("blue collapsed", &list);
    list = list.toggle(blue)?;
    print_rows("blue expanded", &list);

    // Green up between blue and black, one level east: it joins blue.
    let mut session = DragSession::new();
    for step in 1..=7 {
        let dy = -50.0 * f64::from(step);
        let dx = if step > 4 { 50.0 } else { 0.0 };
        list = session.changed(&list, green, Vec2::new(dx, dy))?;
        tracing::info!(dy, proposed = ?session.proposed, "pointer moved");
    }
    list = session.ended(&list, green)?;
    print_rows("green dropped under blue", &list);

    // Brown, carrying cyan, up above blue and out to the top level.
    for step in 1..=4 {
        let dy = -75.0 * f64::from(step);
        list = session.changed(&list, brown, Vec2::new(-50.0, dy))?;
    }
    list = session.ended(&list, brown)?;
    print_rows("brown moved above blue", &list);

    print_tree(&list.to_hierarchy(), 0);
    Ok(())
}

fn print_rows(title: &str, list: &MasterList<&str>) {
    println!("{title}:");
    for item in &list.items {
        let level = item.current_level(&list.metrics).0;
        let marker = if list.is_collapsed(item.id) {
            "+"
        } else if list.has_children(item.id) {
            "-"
        } else {
            " "
        };
        println!(
            "  {marker} {:indent$}{:<8} x={:>5} y={:>5}",
            "",
            item.payload,
            item.location.x,
            item.location.y,
            indent = 2 * usize::try_from(level).unwrap_or(0),
        );
    }
}

fn print_tree(nodes: &[OutlineNode<&str>], depth: usize) {
    for node in nodes {
        println!("{:indent$}{}", "", node.payload, indent = 2 * depth);
        print_tree(&node.children, depth + 1);
    }
}
