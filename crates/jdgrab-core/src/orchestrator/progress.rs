//! Progress and outcome of one download run.

use std::path::PathBuf;

/// Linear progress over a run's task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunProgress {
    /// Tasks submitted so far, whatever their outcome.
    pub completed: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, ok: bool) {
        self.completed += 1;
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed as f64 / self.total as f64).min(1.0)
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Run folder name, relative to the download root.
    pub folder: String,
    /// Tasks submitted; the number the final status line reports.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub saved: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_counts_every_outcome() {
        let mut p = RunProgress::new(4);
        p.record(true);
        p.record(false);
        assert_eq!(p.completed, 2);
        assert_eq!(p.succeeded, 1);
        assert_eq!(p.failed, 1);
        assert!((p.percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_queue_is_complete() {
        assert!((RunProgress::new(0).fraction() - 1.0).abs() < 1e-9);
    }
}
