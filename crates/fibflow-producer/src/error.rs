use fibflow_core::oneshot::error::RecvError;
use fibflow_runtime::StateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("The producer has been stopped")]
    Stopped,
}

impl From<StateError> for ProducerError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Stopped => Self::Stopped,
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Failed(#[from] anyhow::Error),
    #[error("Request canceled: {0}")]
    Canceled(#[from] RecvError),
}
