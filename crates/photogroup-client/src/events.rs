//! App-level events the UI shell can subscribe to.

use serde::Serialize;
use tokio::sync::broadcast;

use photogroup_shared::{GroupId, UserId};

pub const EVENT_SESSION_STARTED: &str = "session-started";
pub const EVENT_SESSION_ENDED: &str = "session-ended";
pub const EVENT_MEDIA_UPLOADED: &str = "media-uploaded";
pub const EVENT_UPLOAD_FAILED: &str = "upload-failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum AppEvent {
    SessionStarted { user_id: UserId },
    SessionEnded,
    MediaUploaded { group_id: GroupId, file: String },
    UploadFailed { group_id: GroupId, file: String, reason: String },
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SessionStarted { .. } => EVENT_SESSION_STARTED,
            AppEvent::SessionEnded => EVENT_SESSION_ENDED,
            AppEvent::MediaUploaded { .. } => EVENT_MEDIA_UPLOADED,
            AppEvent::UploadFailed { .. } => EVENT_UPLOAD_FAILED,
        }
    }
}

/// Fan-out of [`AppEvent`]s. Emitting never fails the caller.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::trace!(event = name, "No subscribers for event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
