//! Observer hook for pipeline stage reporting

/// Stage reached by a running pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStep {
    /// Source rotated onto a canvas of the given size
    Rotated {
        /// Canvas width in pixels
        width: usize,
        /// Canvas height in pixels
        height: usize,
    },
    /// A batch of rows finished sorting
    RowsSorted {
        /// Rows sorted so far
        completed: usize,
        /// Rows on the canvas
        total: usize,
    },
    /// A whole-image effect was applied
    EffectApplied,
    /// Canvas derotated and cropped back to the source size
    Reassembled,
}

/// Receives pipeline steps as they happen
///
/// Observers may be called from the thread driving the pipeline only, but
/// must be shareable so a pipeline can be moved between threads.
pub trait ProgressObserver: Send + Sync {
    /// Called once per step
    fn on_step(&self, step: ProgressStep);
}

/// Observer that ignores every step
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_step(&self, _step: ProgressStep) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressStep) + Send + Sync,
{
    fn on_step(&self, step: ProgressStep) {
        self(step);
    }
}
