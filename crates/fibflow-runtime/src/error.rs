use thiserror::Error;

/// A forbidden transition of a [`RunState`](crate::RunState).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("The run has been stopped already and can't be started again")]
    Stopped,
}
