pub mod context;
pub mod controller;
pub mod error;
pub mod state;
pub mod task;

pub use context::Label;
pub use controller::{StopSignal, Stopper};
pub use error::StateError;
pub use state::RunState;
pub use task::JobHandle;
