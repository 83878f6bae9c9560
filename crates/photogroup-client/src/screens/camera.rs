use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use photogroup_media::{
    BackgroundUploader, CaptureController, CaptureMode, CaptureSession, FlashMode, UploadReport,
};
use photogroup_shared::GroupId;

use crate::error::ClientResult;
use crate::events::{AppEvent, EventBus};
use crate::ports::{ensure_permission, Permission};
use crate::state::AppContext;

/// In-app camera bound to one group. Every capture is uploaded in the
/// background; the screen never waits for an upload.
pub struct CameraScreen {
    session: CaptureSession,
}

impl CameraScreen {
    /// Fails when camera permission is denied; the UI shows the alert and
    /// leaves the camera closed.
    pub async fn open(ctx: &AppContext, group_id: Option<GroupId>) -> ClientResult<Self> {
        ensure_permission(ctx.devices.permissions.as_ref(), Permission::Camera).await?;

        let user_id = ctx.session().map(|s| s.user_id);
        if user_id.is_none() || group_id.is_none() {
            warn!(?user_id, ?group_id, "Camera opened without user or group, captures will not be uploaded");
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let uploader =
            BackgroundUploader::new(Arc::clone(&ctx.backend), user_id, group_id).with_reports(tx);
        if let Some(group_id) = group_id {
            tokio::spawn(forward_reports(rx, ctx.events.clone(), group_id));
        }

        info!(?group_id, "Camera opened");
        Ok(Self {
            session: CaptureSession::new(Arc::clone(&ctx.devices.camera), Arc::new(uploader)),
        })
    }

    pub fn state(&self) -> CaptureController {
        self.session.state()
    }

    pub async fn press_shutter(&mut self) -> ClientResult<()> {
        Ok(self.session.press_shutter().await?)
    }

    pub async fn select_mode(&mut self, mode: CaptureMode) -> ClientResult<()> {
        Ok(self.session.select_mode(mode).await?)
    }

    pub fn flip_camera(&self) {
        self.session.update(|c| c.flip_facing());
    }

    pub fn toggle_flash_menu(&self) {
        self.session.update(|c| c.toggle_flash_menu());
    }

    pub fn set_flash(&self, flash: FlashMode) {
        self.session.update(|c| c.set_flash(flash));
    }

    pub fn begin_pinch(&self) {
        self.session.update(|c| c.begin_pinch());
    }

    pub fn update_pinch(&self, scale: f64) {
        self.session.update(|c| c.update_pinch(scale));
    }

    /// Stops a running recording before the screen goes away.
    pub async fn close(&mut self) -> ClientResult<()> {
        Ok(self.session.close().await?)
    }
}

async fn forward_reports(
    mut rx: mpsc::UnboundedReceiver<UploadReport>,
    events: EventBus,
    group_id: GroupId,
) {
    while let Some(report) = rx.recv().await {
        let file = report.file.display().to_string();
        events.emit(match report.outcome {
            Ok(()) => AppEvent::MediaUploaded { group_id, file },
            Err(reason) => AppEvent::UploadFailed {
                group_id,
                file,
                reason,
            },
        });
    }
}
