//! Camera port. The host platform drives the real camera hardware; the
//! capture session only talks to this trait.

use std::path::PathBuf;

use async_trait::async_trait;

use photogroup_shared::MediaKind;

use crate::capture::FlashMode;
use crate::error::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Back,
    Front,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Back => Facing::Front,
            Facing::Front => Facing::Back,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureOptions {
    /// 0.0..=1.0
    pub quality: f64,
    pub skip_processing: bool,
    /// Mirror the image horizontally (front camera).
    pub mirror: bool,
    pub flash: FlashMode,
}

impl PictureOptions {
    pub fn for_capture(facing: Facing, flash: FlashMode) -> Self {
        Self {
            quality: 1.0,
            skip_processing: true,
            mirror: facing == Facing::Front,
            flash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOptions {
    pub quality: String,
    pub codec: String,
}

impl Default for RecordingOptions {
    fn default() -> Self {
        Self {
            quality: "2160p".to_string(),
            codec: "hevc".to_string(),
        }
    }
}

/// A file produced by the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMedia {
    pub path: PathBuf,
    pub kind: MediaKind,
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn take_picture(&self, options: PictureOptions) -> Result<PathBuf, CameraError>;

    /// Starts recording and resolves with the file once recording stops.
    async fn record(&self, options: RecordingOptions) -> Result<PathBuf, CameraError>;

    async fn stop_recording(&self) -> Result<(), CameraError>;
}
