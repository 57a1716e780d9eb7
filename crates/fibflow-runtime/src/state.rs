//! The lifecycle of a generation run.

use crate::error::StateError;
use derive_more::Display;

/// `Stopped` is terminal.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    #[default]
    #[display("not started")]
    NotStarted,
    #[display("running")]
    Running,
    #[display("stopped")]
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Moves to `Running`.
    ///
    /// Returns `true` when the caller has to launch the run
    /// and `false` if it's running already.
    pub fn start(&mut self) -> Result<bool, StateError> {
        match self {
            Self::NotStarted => {
                *self = Self::Running;
                Ok(true)
            }
            Self::Running => Ok(false),
            Self::Stopped => Err(StateError::Stopped),
        }
    }

    /// Moves to `Stopped` and returns the previous state.
    pub fn stop(&mut self) -> RunState {
        std::mem::replace(self, Self::Stopped)
    }
}
