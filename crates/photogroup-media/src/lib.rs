//! In-app camera: the capture-mode state machine, pinch zoom, the camera
//! port implemented by the host platform, and the detached uploader that
//! sends captured files to the group.

pub mod camera;
pub mod capture;
pub mod error;
pub mod session;
pub mod upload;
pub mod zoom;

pub use camera::{Camera, CapturedMedia, Facing, PictureOptions, RecordingOptions};
pub use capture::{CaptureAction, CaptureController, CaptureMode, FlashMode};
pub use error::CameraError;
pub use session::{CaptureSession, CaptureSink};
pub use upload::{BackgroundUploader, UploadReport};
pub use zoom::PinchZoom;
