//! Producers of the sequence and the one-shot user fetch.
//!
//! - [`RestartableProducer`] starts a fresh run for every subscriber.
//! - [`BroadcastProducer`] shares one run among all subscribers and
//!   replays the last value to late joiners.
//! - [`UserRepository`] fetches a user name after a fixed latency.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod fetch;
pub mod replay;
pub mod restartable;
pub mod source;
pub mod subscription;

pub use broadcast::*;
pub use config::*;
pub use error::*;
pub use fetch::*;
pub use replay::*;
pub use restartable::*;
pub use source::*;
pub use subscription::*;
