//! Run configuration.

/// Step budget used when a caller does not pick one.
pub const DEFAULT_STEPS_LIMIT: usize = 100_000;

/// Options for a single run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of steps before the run fails with
    /// [`RunError::LongExecution`](crate::RunError::LongExecution).
    pub steps_limit: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps_limit: DEFAULT_STEPS_LIMIT,
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn with_steps_limit(mut self, steps_limit: usize) -> Self {
        self.steps_limit = steps_limit;
        self
    }
}
