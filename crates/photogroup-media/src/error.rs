use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera is not ready")]
    NotReady,

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Recording failed: {0}")]
    Recording(String),
}
