//! Capture-mode state machine behind the camera screen.
//!
//! The controller is pure state: it decides which camera call the shutter
//! press maps to and keeps the recording timer, zoom, facing and flash. The
//! [`CaptureSession`](crate::session::CaptureSession) performs the calls.

use tracing::{debug, warn};

use photogroup_shared::constants::{
    BACK_CAMERA_MIN_MAGNIFICATION, FRONT_CAMERA_MIN_MAGNIFICATION, MAX_MAGNIFICATION,
    RECORDING_TICK_SECS,
};

use crate::camera::Facing;
use crate::zoom::PinchZoom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Picture,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    #[default]
    Off,
    On,
    Auto,
}

/// Camera call requested by a controller transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    TakePicture,
    StartRecording,
    StopRecording,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureController {
    mode: CaptureMode,
    recording: bool,
    facing: Facing,
    flash: FlashMode,
    flash_menu_open: bool,
    duration_secs: u64,
    zoom: PinchZoom,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn flash(&self) -> FlashMode {
        self.flash
    }

    pub fn flash_menu_open(&self) -> bool {
        self.flash_menu_open
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Normalized zoom in `[0, 1]`.
    pub fn zoom(&self) -> f64 {
        self.zoom.value()
    }

    pub fn press_shutter(&mut self) -> CaptureAction {
        match (self.mode, self.recording) {
            (CaptureMode::Picture, _) => CaptureAction::TakePicture,
            (CaptureMode::Video, false) => {
                self.recording = true;
                self.duration_secs = 0;
                debug!("Recording started");
                CaptureAction::StartRecording
            }
            (CaptureMode::Video, true) => {
                self.recording = false;
                debug!(duration_secs = self.duration_secs, "Recording stopped");
                CaptureAction::StopRecording
            }
        }
    }

    /// Switches mode. An active recording is stopped first; the caller must
    /// perform the returned action.
    ///
    /// Picking picture mode always resets zoom. Picking video mode resets it
    /// only when coming from picture mode.
    pub fn select_mode(&mut self, mode: CaptureMode) -> Option<CaptureAction> {
        let stop = if self.recording {
            self.recording = false;
            Some(CaptureAction::StopRecording)
        } else {
            None
        };
        if mode == CaptureMode::Picture || self.mode != mode {
            self.zoom.reset();
        }
        self.mode = mode;
        stop
    }

    pub fn flip_facing(&mut self) {
        self.facing = self.facing.flipped();
        self.zoom.reset();
    }

    pub fn toggle_flash_menu(&mut self) {
        self.flash_menu_open = !self.flash_menu_open;
    }

    pub fn set_flash(&mut self, flash: FlashMode) {
        self.flash = flash;
        self.flash_menu_open = false;
    }

    pub fn begin_pinch(&mut self) {
        self.zoom.begin();
    }

    pub fn update_pinch(&mut self, scale: f64) {
        self.zoom.update(scale);
    }

    /// Advances the recording timer; ignored while idle.
    pub fn tick(&mut self) {
        if self.recording {
            self.duration_secs += RECORDING_TICK_SECS;
        }
    }

    /// Forces idle after the camera's recording call failed.
    pub fn recording_failed(&mut self) {
        if self.recording {
            warn!("Recording ended with an error");
        }
        self.recording = false;
    }

    /// Marks idle after the camera ended a recording by itself.
    pub fn recording_finished(&mut self) {
        self.recording = false;
    }

    /// `M:SS`
    pub fn formatted_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }

    /// Magnification label for the current zoom, e.g. `1.6x`.
    pub fn display_zoom(&self) -> String {
        let min = match self.facing {
            Facing::Back => BACK_CAMERA_MIN_MAGNIFICATION,
            Facing::Front => FRONT_CAMERA_MIN_MAGNIFICATION,
        };
        format!("{:.1}x", min + self.zoom.value() * (MAX_MAGNIFICATION - min))
    }
}
