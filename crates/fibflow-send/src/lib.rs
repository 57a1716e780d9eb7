//! Sinks that receive values produced by fibflow producers.
//!
//! A sink is anything that implements [`Sender`]: a display, a test
//! recorder or another channel. Errors are returned as `anyhow::Error`
//! so that every implementation keeps its own failure details.

pub mod sender;

pub mod kit {
    pub use crate::sender::*;
}

pub use sender::*;
