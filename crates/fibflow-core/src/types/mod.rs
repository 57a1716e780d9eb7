//! Generic traits to easily represent different requirements
//! for values passed through producers.

pub mod slot;

pub use slot::*;

/// A value that can be cloned into every subscriber of a broadcast.
pub trait Clony: Clone + Sync + Send + 'static {}

impl<T> Clony for T where T: Clone + Sync + Send + 'static {}
