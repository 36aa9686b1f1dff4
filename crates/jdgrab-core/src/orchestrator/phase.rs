//! Run state machine and the events published while a run progresses.

use std::fmt;

use super::progress::RunProgress;

/// `Validating → Extracting → Deriving → Downloading(i..N) → Done | Aborted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Validating,
    Extracting,
    Deriving,
    /// `index` is 1-based.
    Downloading { index: usize, total: usize },
    Done,
    Aborted(String),
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Validating => write!(f, "validating"),
            RunPhase::Extracting => write!(f, "extracting"),
            RunPhase::Deriving => write!(f, "deriving"),
            RunPhase::Downloading { index, total } => write!(f, "downloading {}/{}", index, total),
            RunPhase::Done => write!(f, "done"),
            RunPhase::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// Published to the status consumer (terminal, tests).
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Phase(RunPhase),
    /// Human-readable status line.
    Status(String),
    Progress(RunProgress),
}
