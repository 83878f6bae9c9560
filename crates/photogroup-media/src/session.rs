//! Runs the capture controller against a [`Camera`].

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use photogroup_shared::constants::RECORDING_TICK_SECS;
use photogroup_shared::MediaKind;

use crate::camera::{Camera, CapturedMedia, PictureOptions, RecordingOptions};
use crate::capture::{CaptureAction, CaptureController, CaptureMode};
use crate::error::CameraError;
use crate::upload::BackgroundUploader;

/// Receives every file the camera produces.
pub trait CaptureSink: Send + Sync {
    fn captured(&self, media: CapturedMedia);
}

impl CaptureSink for BackgroundUploader {
    fn captured(&self, media: CapturedMedia) {
        let _ = self.spawn(media.path, media.kind);
    }
}

struct ActiveRecording {
    recorder: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

pub struct CaptureSession {
    camera: Arc<dyn Camera>,
    sink: Arc<dyn CaptureSink>,
    controller: Arc<Mutex<CaptureController>>,
    active: Option<ActiveRecording>,
}

impl CaptureSession {
    pub fn new(camera: Arc<dyn Camera>, sink: Arc<dyn CaptureSink>) -> Self {
        Self {
            camera,
            sink,
            controller: Arc::new(Mutex::new(CaptureController::new())),
            active: None,
        }
    }

    /// Snapshot of the controller for rendering.
    pub fn state(&self) -> CaptureController {
        lock(&self.controller).clone()
    }

    /// Direct access for transitions that need no camera call (flash, flip,
    /// pinch).
    pub fn update<R>(&self, f: impl FnOnce(&mut CaptureController) -> R) -> R {
        f(&mut lock(&self.controller))
    }

    pub async fn press_shutter(&mut self) -> Result<(), CameraError> {
        let action = lock(&self.controller).press_shutter();
        self.perform(action).await
    }

    pub async fn select_mode(&mut self, mode: CaptureMode) -> Result<(), CameraError> {
        let action = lock(&self.controller).select_mode(mode);
        match action {
            Some(action) => self.perform(action).await,
            None => Ok(()),
        }
    }

    /// Stops an active recording, e.g. when the screen goes away.
    pub async fn close(&mut self) -> Result<(), CameraError> {
        if self.active.is_none() {
            return Ok(());
        }
        lock(&self.controller).recording_finished();
        self.stop_recording().await
    }

    async fn perform(&mut self, action: CaptureAction) -> Result<(), CameraError> {
        match action {
            CaptureAction::TakePicture => self.take_picture().await,
            CaptureAction::StartRecording => {
                self.start_recording();
                Ok(())
            }
            CaptureAction::StopRecording => self.stop_recording().await,
        }
    }

    async fn take_picture(&self) -> Result<(), CameraError> {
        let options = {
            let c = lock(&self.controller);
            PictureOptions::for_capture(c.facing(), c.flash())
        };
        match self.camera.take_picture(options).await {
            Ok(path) => {
                info!(file = %path.display(), "Picture taken");
                self.sink.captured(CapturedMedia {
                    path,
                    kind: MediaKind::Photo,
                });
                Ok(())
            }
            Err(e) => {
                error!("Failed to take picture: {}", e);
                Err(e)
            }
        }
    }

    fn start_recording(&mut self) {
        let camera = Arc::clone(&self.camera);
        let sink = Arc::clone(&self.sink);
        let controller = Arc::clone(&self.controller);
        let recorder = tokio::spawn(async move {
            match camera.record(RecordingOptions::default()).await {
                Ok(path) => {
                    lock(&controller).recording_finished();
                    info!(file = %path.display(), "Recording saved");
                    sink.captured(CapturedMedia {
                        path,
                        kind: MediaKind::Video,
                    });
                }
                Err(e) => {
                    error!("Recording failed: {}", e);
                    lock(&controller).recording_failed();
                }
            }
        });

        let controller = Arc::clone(&self.controller);
        let ticker = tokio::spawn(async move {
            let period = Duration::from_secs(RECORDING_TICK_SECS);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut c = lock(&controller);
                if !c.is_recording() {
                    break;
                }
                c.tick();
            }
        });

        // A recording that ended on its own leaves its ticker parked until
        // the next period; it must not count for this one.
        if let Some(previous) = self.active.replace(ActiveRecording { recorder, ticker }) {
            previous.ticker.abort();
        }
    }

    async fn stop_recording(&mut self) -> Result<(), CameraError> {
        let Some(active) = self.active.take() else {
            debug!("Stop requested without an active recording");
            return Ok(());
        };
        active.ticker.abort();
        let stopped = self.camera.stop_recording().await;
        if let Err(e) = &stopped {
            error!("Failed to stop recording: {}", e);
            active.recorder.abort();
            return stopped;
        }
        // record() resolves once the camera has finalized the file
        if let Err(e) = active.recorder.await {
            if !e.is_cancelled() {
                error!("Recording task panicked: {}", e);
            }
        }
        Ok(())
    }
}

fn lock(controller: &Mutex<CaptureController>) -> MutexGuard<'_, CaptureController> {
    controller.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;

    #[derive(Default)]
    struct FakeCamera {
        stop: Notify,
        pictures: Mutex<Vec<PictureOptions>>,
        fail_recording: bool,
        fail_next_recording: AtomicBool,
    }

    #[async_trait]
    impl Camera for FakeCamera {
        async fn take_picture(&self, options: PictureOptions) -> Result<PathBuf, CameraError> {
            self.pictures.lock().unwrap().push(options);
            Ok(PathBuf::from("/cache/photo.jpg"))
        }

        async fn record(&self, _options: RecordingOptions) -> Result<PathBuf, CameraError> {
            if self.fail_recording || self.fail_next_recording.swap(false, Ordering::SeqCst) {
                return Err(CameraError::Recording("no space left".into()));
            }
            self.stop.notified().await;
            Ok(PathBuf::from("/cache/clip.mp4"))
        }

        async fn stop_recording(&self) -> Result<(), CameraError> {
            self.stop.notify_one();
            Ok(())
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<CapturedMedia>>);

    impl CaptureSink for Collect {
        fn captured(&self, media: CapturedMedia) {
            self.0.lock().unwrap().push(media);
        }
    }

    fn session(camera: Arc<FakeCamera>) -> (CaptureSession, Arc<Collect>) {
        let sink = Arc::new(Collect::default());
        (CaptureSession::new(camera, sink.clone()), sink)
    }

    #[tokio::test]
    async fn picture_goes_to_sink_with_facing_options() {
        let camera = Arc::new(FakeCamera::default());
        let (mut session, sink) = session(camera.clone());

        session.update(|c| c.flip_facing());
        session.press_shutter().await.unwrap();

        let captured = sink.0.lock().unwrap().clone();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].kind, MediaKind::Photo);
        assert!(camera.pictures.lock().unwrap()[0].mirror);
    }

    #[tokio::test]
    async fn stopping_delivers_the_video() {
        let camera = Arc::new(FakeCamera::default());
        let (mut session, sink) = session(camera);

        session.select_mode(CaptureMode::Video).await.unwrap();
        session.press_shutter().await.unwrap();
        assert!(session.state().is_recording());

        session.press_shutter().await.unwrap();
        assert!(!session.state().is_recording());

        let captured = sink.0.lock().unwrap().clone();
        assert_eq!(
            captured,
            vec![CapturedMedia {
                path: PathBuf::from("/cache/clip.mp4"),
                kind: MediaKind::Video,
            }]
        );
    }

    #[tokio::test]
    async fn switching_to_picture_stops_the_recording() {
        let camera = Arc::new(FakeCamera::default());
        let (mut session, sink) = session(camera);

        session.select_mode(CaptureMode::Video).await.unwrap();
        session.press_shutter().await.unwrap();
        session.select_mode(CaptureMode::Picture).await.unwrap();

        assert!(!session.state().is_recording());
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_recording_returns_to_idle() {
        let camera = Arc::new(FakeCamera {
            fail_recording: true,
            ..Default::default()
        });
        let (mut session, sink) = session(camera);

        session.select_mode(CaptureMode::Video).await.unwrap();
        session.press_shutter().await.unwrap();
        session.close().await.unwrap();

        assert!(!session.state().is_recording());
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restarted_recording_has_one_timer() {
        let camera = Arc::new(FakeCamera {
            fail_next_recording: AtomicBool::new(true),
            ..Default::default()
        });
        let (mut session, _sink) = session(camera);

        session.select_mode(CaptureMode::Video).await.unwrap();
        session.press_shutter().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!session.state().is_recording());

        session.press_shutter().await.unwrap();
        assert!(session.state().is_recording());
        tokio::time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(session.state().duration_secs(), 1);

        session.close().await.unwrap();
    }
}
