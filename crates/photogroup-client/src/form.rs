//! Change tracking for edit forms.

/// Baseline values loaded from the server plus the user's current edits.
///
/// The form is dirty while the edits differ from the baseline. A successful
/// save commits the edits as the new baseline; a failed save leaves both
/// untouched so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedForm<T> {
    baseline: T,
    current: T,
}

impl<T: Clone + PartialEq> TrackedForm<T> {
    pub fn new(initial: T) -> Self {
        Self {
            baseline: initial.clone(),
            current: initial,
        }
    }

    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn edit(&mut self) -> &mut T {
        &mut self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    pub fn commit(&mut self) {
        self.baseline = self.current.clone();
    }

    /// Discards the edits.
    pub fn revert(&mut self) {
        self.current = self.baseline.clone();
    }

    /// Replaces both baseline and edits, e.g. after a reload.
    pub fn reset(&mut self, value: T) {
        self.baseline = value.clone();
        self.current = value;
    }
}
