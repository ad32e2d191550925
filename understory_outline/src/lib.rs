// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: a headless engine for reorderable, collapsible outlines.
//!
//! ## Overview
//!
//! An outline is a tree shown as a flat list of rows, each indented by its
//! depth. This crate keeps that list consistent while the user:
//!
//! - collapses and expands groups, hiding and revealing whole subtrees;
//! - drags a row (and everything nested under it) up or down to reorder it;
//! - drags sideways to change which group the row belongs to.
//!
//! It does not draw anything and does not receive pointer events. A host
//! renders [`MasterList::items`] at their `location`s and forwards pointer
//! samples as translations since the drag started.
//!
//! ## Geometry
//!
//! Row `i` rests at `y = i * row_height`. A row's `x` is its indentation level
//! times `level_width`, so horizontal position and nesting are the same thing.
//! Both distances come from [`OutlineMetrics`]. Every row also remembers its
//! last committed position (`previous_location`); a drag is always measured
//! from there, so repeating a pointer sample is harmless.
//!
//! ## API overview
//!
//! - [`flatten`] / [`MasterList::from_hierarchy`]: build rows from [`OutlineNode`]s.
//! - [`regroup`] / [`MasterList::to_hierarchy`]: rebuild the nesting from `parent_id` links.
//! - [`MasterList::collapse`], [`MasterList::expand`], [`MasterList::toggle`]:
//!   disclosure state. Hidden rows are parked in [`MasterList::excluded_groups`].
//! - [`MasterList::on_drag_changed`] → [`DragUpdate`]: reorder and re-indent for one pointer sample.
//! - [`propose_group`]: the parent a dragged row would join, or top level.
//! - [`on_drag_ended`] / [`MasterList::on_drag_ended`]: snap rows to their slots and commit.
//! - [`DragSession`]: the transient per-drag state, with `changed`/`ended` entry points.
//!
//! Operations take `&MasterList` and return a new value. A failed call returns
//! an [`OutlineError`] and leaves the caller's list as it was.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_outline::{DragSession, MasterList, OutlineMetrics, OutlineNode};
//!
//! let mut list = MasterList::from_hierarchy(
//!     &[
//!         OutlineNode::leaf("red"),
//!         OutlineNode::group("blue", vec![OutlineNode::leaf("black")]),
//!         OutlineNode::leaf("green"),
//!     ],
//!     OutlineMetrics::default(),
//! );
//! let blue = list.items[1].id;
//! let green = list.items[3].id;
//!
//! // Drag green up between blue and black, nudged one level east.
//! let mut session = DragSession::new();
//! list = session.changed(&list, green, Vec2::new(50.0, -150.0)).unwrap();
//! list = session.ended(&list, green).unwrap();
//!
//! let row = list.item(green).unwrap();
//! assert_eq!(row.parent_id, Some(blue));
//! assert_eq!(list.index_of(green), Some(2));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: floating-point support for `no_std` builds.
//! - `tracing`: emits `debug`/`trace`/`warn` events through [`tracing`](https://docs.rs/tracing).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod commit;
mod drag;
mod error;
mod flatten;
mod group;
mod logging;
mod master;
mod metrics;
mod propose;
mod session;
mod types;

pub use commit::on_drag_ended;
pub use drag::DragUpdate;
pub use error::OutlineError;
pub use flatten::{flatten, regroup};
pub use master::MasterList;
pub use metrics::{IndentationLevel, OutlineMetrics};
pub use propose::propose_group;
pub use session::DragSession;
pub use types::{
    BeingDraggedItem, CollapsedGroups, CursorDrag, ExcludedGroups, Item, ItemId, ItemIdSet,
    ItemList, OutlineNode, ProposedGroup, Z_INDEX_DRAGGED, Z_INDEX_RESTING,
};
