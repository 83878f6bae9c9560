//! A group's media: grid, full-screen viewer, uploads, multi-select removal
//! and reporting.
//!
//! The backend returns the whole list in one response; the viewer pages
//! through it by index.

use tracing::{error, info, warn};

use photogroup_net::{LocalFile, MediaUpload};
use photogroup_shared::protocol::{
    BulkActionRequest, HideMediaRequest, MediaItem, RemovalAction, ReportRequest,
};
use photogroup_shared::validation::validate_required;
use photogroup_shared::{GroupId, MediaId, MediaKind};

use crate::error::{ClientError, ClientResult};
use crate::ports::{ensure_online, ensure_permission, Permission, PickedMedia};
use crate::selection::{removal_options, RemovalOption, Selection};
use crate::state::AppContext;

/// Result of a library upload batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
}

pub struct GalleryScreen {
    ctx: AppContext,
    group_id: GroupId,
    items: Vec<MediaItem>,
    selecting: bool,
    selection: Selection,
    /// Index shown in the full-screen viewer; `None` while it is closed
    viewer: Option<usize>,
}

impl GalleryScreen {
    pub fn new(ctx: AppContext, group_id: GroupId) -> Self {
        Self {
            ctx,
            group_id,
            items: Vec::new(),
            selecting: false,
            selection: Selection::new(),
            viewer: None,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub async fn load(&mut self) -> ClientResult<&[MediaItem]> {
        let me = self.ctx.require_session()?.user_id;
        let group_id = self.group_id;
        self.items = self
            .ctx
            .backend
            .group_media(group_id, me)
            .await
            .map_err(|e| {
                error!(%group_id, "Loading media failed: {}", e);
                e
            })?;
        if let Some(index) = self.viewer {
            self.viewer = self.clamped(index);
        }
        let items = &self.items;
        self.selection.retain(|id| items.iter().any(|m| m.id == id));
        Ok(&self.items)
    }

    /// Reload after a mutation; a failure keeps the previous list.
    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            warn!(group_id = %self.group_id, "Refresh failed: {}", e);
        }
    }

    fn clamped(&self, index: usize) -> Option<usize> {
        match self.items.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        }
    }

    // --- Viewer ---

    pub fn open_viewer(&mut self, index: usize) -> ClientResult<()> {
        if index >= self.items.len() {
            return Err(ClientError::InvalidState("no media at that position"));
        }
        self.viewer = Some(index);
        Ok(())
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    pub fn viewer_index(&self) -> Option<usize> {
        self.viewer
    }

    /// Moves the viewer, e.g. after a swipe.
    pub fn show(&mut self, index: usize) {
        if self.viewer.is_some() {
            self.viewer = self.clamped(index);
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.viewer.and_then(|i| self.items.get(i))
    }

    fn require_current(&self) -> ClientResult<MediaItem> {
        self.current()
            .cloned()
            .ok_or(ClientError::InvalidState("no media is open"))
    }

    // --- Uploads ---

    /// Picks photos and videos from the library and uploads them one after
    /// another, then reloads. Individual failures are logged and counted.
    pub async fn upload_from_library(&mut self) -> ClientResult<UploadSummary> {
        let me = self.ctx.require_session()?.user_id;
        ensure_online(self.ctx.devices.connectivity.as_ref()).await?;
        ensure_permission(self.ctx.devices.permissions.as_ref(), Permission::MediaLibrary).await?;

        let picked = self.ctx.devices.picker.pick_media().await;
        if picked.is_empty() {
            return Ok(UploadSummary::default());
        }

        let mut summary = UploadSummary::default();
        for media in &picked {
            let upload = MediaUpload {
                user_id: me,
                group_id: self.group_id,
                file: LocalFile::media(media.path(), upload_kind(media)),
            };
            match self.ctx.backend.upload_media(&upload).await {
                Ok(()) => summary.uploaded += 1,
                Err(e) => {
                    error!(file = %media.uri, "Upload failed: {}", e);
                    summary.failed += 1;
                }
            }
        }
        info!(
            group_id = %self.group_id,
            uploaded = summary.uploaded,
            failed = summary.failed,
            "Library upload finished"
        );
        self.refresh().await;
        Ok(summary)
    }

    // --- Selection ---

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Enters or leaves selection mode; either way the selection is cleared.
    pub fn toggle_selection_mode(&mut self) {
        self.selecting = !self.selecting;
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, id: MediaId) -> ClientResult<bool> {
        if !self.selecting {
            return Err(ClientError::InvalidState("selection mode is off"));
        }
        if !self.selection.contains(id) && !self.is_listed(id) {
            return Err(ClientError::InvalidState("no such media in this group"));
        }
        self.selection.toggle(id)
    }

    fn is_listed(&self, id: MediaId) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    fn selected_items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|m| self.selection.contains(m.id))
    }

    pub fn bulk_removal_options(&self) -> Vec<RemovalOption> {
        let me = match self.ctx.session() {
            Some(session) => session.user_id,
            None => return Vec::new(),
        };
        // Ownership of an unlisted id cannot be checked.
        if !self.selection.ids().iter().all(|&id| self.is_listed(id)) {
            return vec![RemovalOption::HideForMe];
        }
        removal_options(self.selected_items(), me)
    }

    /// Removes the selected items in one request, reloads, and leaves
    /// selection mode. Returns the ids the reloaded list still contains.
    pub async fn bulk_remove(&mut self, action: RemovalAction) -> ClientResult<Vec<MediaId>> {
        let me = self.ctx.require_session()?.user_id;
        if self.selection.is_empty() {
            return Err(ClientError::InvalidState("nothing is selected"));
        }
        if action == RemovalAction::Delete
            && !self
                .bulk_removal_options()
                .contains(&RemovalOption::DeleteForEveryone)
        {
            return Err(ClientError::InvalidState(
                "only your own media can be deleted for everyone",
            ));
        }
        ensure_online(self.ctx.devices.connectivity.as_ref()).await?;

        let ids = self.selection.ids().to_vec();
        let req = BulkActionRequest {
            user_id: me,
            photo_ids: ids.clone(),
            action_type: action,
        };
        let result = self.ctx.backend.bulk_action(&req).await;

        self.selecting = false;
        self.selection.clear();
        if let Err(e) = result {
            error!(count = ids.len(), ?action, "Bulk removal failed: {}", e);
            return Err(e.into());
        }

        self.refresh().await;
        let remaining: Vec<MediaId> = ids
            .into_iter()
            .filter(|id| self.items.iter().any(|m| m.id == *id))
            .collect();
        if remaining.is_empty() {
            info!(?action, count = req.photo_ids.len(), "Bulk removal done");
        } else {
            warn!(?action, ?remaining, "Bulk removal acknowledged but items are still listed");
        }
        Ok(remaining)
    }

    // --- Single item ---

    pub fn removal_options(&self) -> Vec<RemovalOption> {
        match (self.current(), self.ctx.session()) {
            (Some(item), Some(session)) => removal_options([item], session.user_id),
            _ => Vec::new(),
        }
    }

    /// Hides the open item for the viewer only.
    pub async fn hide_current(&mut self) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let item = self.require_current()?;
        ensure_online(self.ctx.devices.connectivity.as_ref()).await?;

        let req = HideMediaRequest {
            user_id: me,
            photo_id: item.id,
        };
        self.ctx.backend.hide_media(&req).await.map_err(|e| {
            error!(media_id = %item.id, "Hiding media failed: {}", e);
            e
        })?;
        info!(media_id = %item.id, "Media hidden");
        self.remove_locally(item.id);
        Ok(())
    }

    /// Deletes the open item for every member. Only the uploader may.
    pub async fn delete_current(&mut self) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let item = self.require_current()?;
        if item.uploader_id != me {
            return Err(ClientError::InvalidState(
                "only your own media can be deleted for everyone",
            ));
        }
        ensure_online(self.ctx.devices.connectivity.as_ref()).await?;

        self.ctx.backend.delete_media(me, item.id).await.map_err(|e| {
            error!(media_id = %item.id, "Deleting media failed: {}", e);
            e
        })?;
        info!(media_id = %item.id, "Media deleted");
        self.remove_locally(item.id);
        Ok(())
    }

    /// Drops `id` from the list. The viewer closes when nothing is left and
    /// otherwise stays in range, showing the next item.
    fn remove_locally(&mut self, id: MediaId) {
        self.items.retain(|m| m.id != id);
        if let Some(index) = self.viewer {
            self.viewer = self.clamped(index);
        }
    }

    pub async fn report_current(&self, reason: &str) -> ClientResult<()> {
        let me = self.ctx.require_session()?.user_id;
        let item = self.require_current()?;
        validate_required("Reason", reason)?;
        ensure_online(self.ctx.devices.connectivity.as_ref()).await?;

        let req = ReportRequest {
            reporter_id: me,
            photo_id: item.id,
            reason: reason.to_string(),
        };
        self.ctx.backend.report_content(&req).await.map_err(|e| {
            error!(media_id = %item.id, "Report failed: {}", e);
            e
        })?;
        info!(media_id = %item.id, reason, "Media reported");
        Ok(())
    }
}

/// Videos are recognised by the picker's type or by their extension.
fn upload_kind(media: &PickedMedia) -> MediaKind {
    match media.kind {
        MediaKind::Video => MediaKind::Video,
        MediaKind::Photo => MediaKind::from_file_name(&media.uri),
    }
}
