//! Configuration for text reveal pacing.

use std::time::Duration;

/// Default pacing used when a scene does not ask for its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Pause between two revealed lines.
    pub line_delay: Duration,
    /// Pause between two pages of a paged text.
    pub pager_delay: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            line_delay: Duration::ZERO,
            pager_delay: Duration::from_secs(2),
        }
    }
}

impl RevealConfig {
    /// Set the pause between lines.
    pub fn with_line_delay(mut self, delay: Duration) -> Self {
        self.line_delay = delay;
        self
    }

    /// Set the pause between pages.
    pub fn with_pager_delay(mut self, delay: Duration) -> Self {
        self.pager_delay = delay;
        self
    }
}

/// Convert a delay given in seconds into a [`Duration`].
///
/// Negative, NaN and non-finite values become zero.
pub fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::ZERO)
}
