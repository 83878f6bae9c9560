//! Multi-select of gallery items and the removal choices offered for them.

use photogroup_shared::constants::MAX_BULK_SELECTION;
use photogroup_shared::protocol::{MediaItem, RemovalAction};
use photogroup_shared::{MediaId, UserId};

use crate::error::{ClientError, ClientResult};

/// Selected media ids in selection order, at most
/// [`MAX_BULK_SELECTION`](photogroup_shared::constants::MAX_BULK_SELECTION).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<MediaId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id`, or deselects it when already selected. Returns whether
    /// the id is selected afterwards. Selecting past the cap fails and
    /// leaves the selection unchanged.
    pub fn toggle(&mut self, id: MediaId) -> ClientResult<bool> {
        if let Some(pos) = self.ids.iter().position(|&i| i == id) {
            self.ids.remove(pos);
            return Ok(false);
        }
        if self.ids.len() >= MAX_BULK_SELECTION {
            return Err(ClientError::selection_limit());
        }
        self.ids.push(id);
        Ok(true)
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[MediaId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keeps only the ids for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(MediaId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOption {
    HideForMe,
    DeleteForEveryone,
}

impl RemovalOption {
    pub fn action(self) -> RemovalAction {
        match self {
            RemovalOption::HideForMe => RemovalAction::Hide,
            RemovalOption::DeleteForEveryone => RemovalAction::Delete,
        }
    }
}

/// Deleting for everyone is offered only when `viewer` uploaded every target.
pub fn removal_options<'a>(
    targets: impl IntoIterator<Item = &'a MediaItem>,
    viewer: UserId,
) -> Vec<RemovalOption> {
    let mut any = false;
    let mut all_mine = true;
    for item in targets {
        any = true;
        all_mine &= item.uploader_id == viewer;
    }
    if any && all_mine {
        vec![RemovalOption::HideForMe, RemovalOption::DeleteForEveryone]
    } else {
        vec![RemovalOption::HideForMe]
    }
}
