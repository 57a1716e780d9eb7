//! The module with runtime parts used by every crate of the workspace,
//! so that only this crate pins the tokio features it needs.

pub use tokio::runtime::Handle;
pub use tokio::sync::{self, mpsc, oneshot, watch};
pub use tokio::time;
pub use tokio::{spawn, task::JoinHandle};
