// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient drag state owned by the host.

use kurbo::Vec2;

use crate::error::OutlineError;
use crate::logging::log_warn;
use crate::master::MasterList;
use crate::types::{BeingDraggedItem, CursorDrag, ItemId, ItemIdSet, ProposedGroup};

/// State that lives only while a drag is in progress.
///
/// Hosts keep one of these next to their [`MasterList`] and route pointer
/// callbacks through [`DragSession::changed`] and [`DragSession::ended`].
///
/// ```rust
/// use kurbo::Vec2;
/// use understory_outline::{DragSession, MasterList, OutlineMetrics, OutlineNode};
///
/// let mut list = MasterList::from_hierarchy(
///     &[OutlineNode::leaf("a"), OutlineNode::leaf("b")],
///     OutlineMetrics::default(),
/// );
/// let b = list.items[1].id;
///
/// let mut session = DragSession::new();
/// list = session.changed(&list, b, Vec2::new(0.0, -80.0)).unwrap();
/// list = session.ended(&list, b).unwrap();
///
/// assert!(!session.is_active());
/// assert_eq!(list.items[0].id, b);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragSession {
    /// The dragged row and the rows it carries.
    pub being_dragged: Option<BeingDraggedItem>,
    /// Latest proposal.
    pub proposed: Option<ProposedGroup>,
    /// Raw horizontal pointer travel.
    pub cursor_drag: Option<CursorDrag>,
}

impl DragSession {
    /// An idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a row is being dragged.
    pub fn is_active(&self) -> bool {
        self.being_dragged.is_some()
    }

    /// Feed a pointer sample and return the list to render.
    ///
    /// On error the session is left as it was.
    pub fn changed<P: Clone>(
        &mut self,
        list: &MasterList<P>,
        id: ItemId,
        translation: Vec2,
    ) -> Result<MasterList<P>, OutlineError> {
        let update = list.on_drag_changed(id, translation)?;
        self.being_dragged = Some(update.being_dragged);
        self.proposed = update.proposed;
        self.cursor_drag = Some(update.cursor_drag);
        Ok(update.master_list)
    }

    /// Finish the drag of `id` and return the settled list.
    ///
    /// Ending without any prior sample commits nothing but row positions, so a
    /// tap leaves the list as it was. Ending a row other than the one being
    /// dragged fails with [`OutlineError::DragNotActive`] and keeps the session.
    pub fn ended<P: Clone>(
        &mut self,
        list: &MasterList<P>,
        id: ItemId,
    ) -> Result<MasterList<P>, OutlineError> {
        let ended = match &self.being_dragged {
            Some(active) if active.current != id => {
                log_warn!(%id, active = %active.current, "drag ended for another row");
                return Err(OutlineError::DragNotActive(id));
            }
            Some(active) => {
                list.on_drag_ended(id, &active.dragged_along, self.proposed.as_ref())?
            }
            None => list.on_drag_ended(id, &ItemIdSet::new(), None)?,
        };
        *self = Self::default();
        Ok(ended)
    }
}
