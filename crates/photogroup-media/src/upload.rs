//! Detached uploads of captured media.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use photogroup_net::{Backend, LocalFile, MediaUpload};
use photogroup_shared::{GroupId, MediaKind, UserId};

/// Outcome of one background upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub file: PathBuf,
    pub kind: MediaKind,
    /// `Err` carries the failure text.
    pub outcome: Result<(), String>,
}

/// Posts captured files to a group without making the caller wait.
///
/// Each upload runs in its own tokio task. Failures are logged and, when a
/// report channel is attached, reported there; nothing is retried.
#[derive(Clone)]
pub struct BackgroundUploader {
    backend: Arc<dyn Backend>,
    user_id: Option<UserId>,
    group_id: Option<GroupId>,
    reports: Option<mpsc::UnboundedSender<UploadReport>>,
}

impl BackgroundUploader {
    pub fn new(
        backend: Arc<dyn Backend>,
        user_id: Option<UserId>,
        group_id: Option<GroupId>,
    ) -> Self {
        Self {
            backend,
            user_id,
            group_id,
            reports: None,
        }
    }

    pub fn with_reports(mut self, reports: mpsc::UnboundedSender<UploadReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Starts the upload. Returns `None` when the user or group is unknown,
    /// in which case nothing is sent.
    pub fn spawn(&self, file: PathBuf, kind: MediaKind) -> Option<JoinHandle<()>> {
        let (Some(user_id), Some(group_id)) = (self.user_id, self.group_id) else {
            warn!(
                user_id = ?self.user_id,
                group_id = ?self.group_id,
                file = %file.display(),
                "Skipping upload: missing user or group"
            );
            return None;
        };

        let backend = Arc::clone(&self.backend);
        let reports = self.reports.clone();
        Some(tokio::spawn(async move {
            let upload = MediaUpload {
                user_id,
                group_id,
                file: LocalFile::media(&file, kind),
            };
            let outcome = match backend.upload_media(&upload).await {
                Ok(()) => {
                    info!(%group_id, %kind, file = %file.display(), "Upload finished");
                    Ok(())
                }
                Err(e) => {
                    error!(%group_id, %kind, file = %file.display(), "Upload failed: {}", e);
                    Err(e.to_string())
                }
            };
            if let Some(reports) = reports {
                let _ = reports.send(UploadReport {
                    file,
                    kind,
                    outcome,
                });
            }
        }))
    }
}
