//! Cancellation and progress reporting for a render pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::Frame;

/// Shared cancellation flag.
///
/// Clones share the same flag, so a UI thread can hold one copy while the
/// render loop polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the render loop to stop at its next poll point.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Clear the flag so the token can be reused for another pass.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Snapshot of how far a render pass has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub rows_done: u32,
    pub pixels_done: u64,
    pub total_pixels: u64,
    /// Set on the last report of a pass, whether completed or cancelled
    pub finished: bool,
    pub cancelled: bool,
}

impl RenderProgress {
    /// Completed pixels as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.total_pixels == 0 {
            return 1.0;
        }
        self.pixels_done as f32 / self.total_pixels as f32
    }
}

/// Receives progress after every row and once more when the pass ends.
pub trait ProgressSink {
    fn report(&mut self, progress: &RenderProgress, frame: &Frame);
}

impl<F> ProgressSink for F
where
    F: FnMut(&RenderProgress, &Frame),
{
    fn report(&mut self, progress: &RenderProgress, frame: &Frame) {
        self(progress, frame)
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: &RenderProgress, _frame: &Frame) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());

        token.cancel();
        assert!(other.is_cancelled());

        other.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancelToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_fraction() {
        let mut progress = RenderProgress {
            rows_done: 1,
            pixels_done: 25,
            total_pixels: 100,
            finished: false,
            cancelled: false,
        };
        assert_eq!(progress.fraction(), 0.25);
        progress.total_pixels = 0;
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_closure_sink() {
        let frame = Frame::new(1, 1);
        let progress = RenderProgress {
            rows_done: 1,
            pixels_done: 1,
            total_pixels: 1,
            finished: true,
            cancelled: false,
        };
        let mut seen = Vec::new();
        {
            let mut sink = |p: &RenderProgress, _: &Frame| seen.push(p.pixels_done);
            sink.report(&progress, &frame);
        }
        NoProgress.report(&progress, &frame);
        assert_eq!(seen, vec![1]);
    }
}
