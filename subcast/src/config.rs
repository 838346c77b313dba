use crate::error::{Error, Result};

/// Options for the sliding-window condenser.
///
/// Defaults: windows of 50 segments with 20% overlap between neighbors.
#[derive(Debug, Clone)]
pub struct CondenseOptions {
    /// Maximum number of segments per window.
    pub window_size: usize,
    /// Fraction of each window shared with its neighbor, in `[0, 1)`.
    pub overlap: f64,
}

impl Default for CondenseOptions {
    fn default() -> Self {
        Self {
            window_size: 50,
            overlap: 0.2,
        }
    }
}

impl CondenseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    pub fn overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Number of segments shared between consecutive windows.
    pub fn overlap_size(&self) -> usize {
        (self.window_size as f64 * self.overlap).floor() as usize
    }

    /// Distance between consecutive window starts.
    pub fn step_size(&self) -> usize {
        self.window_size - self.overlap_size()
    }

    /// Check the configuration before condensing.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidOption(
                "window_size must be at least 1".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(Error::InvalidOption(format!(
                "overlap must be in [0, 1), got {}",
                self.overlap
            )));
        }
        if self.step_size() == 0 {
            return Err(Error::InvalidOption("window step must be at least 1".into()));
        }
        Ok(())
    }
}
