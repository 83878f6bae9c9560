use photogroup_shared::constants::PINCH_ZOOM_SENSITIVITY;

/// Normalized camera zoom in `[0, 1]` driven by a pinch gesture.
///
/// The gesture's scale is relative to where it started, so the zoom at the
/// start of the gesture is snapshotted by [`begin`](Self::begin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchZoom {
    value: f64,
    start: f64,
}

impl PinchZoom {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn begin(&mut self) {
        self.start = self.value;
    }

    /// `scale` is the gesture's cumulative scale factor (1.0 = unchanged).
    pub fn update(&mut self, scale: f64) {
        let next = self.start + (scale - 1.0) * PINCH_ZOOM_SENSITIVITY;
        self.value = if next.is_nan() { self.start } else { next.clamp(0.0, 1.0) };
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.start = 0.0;
    }
}
