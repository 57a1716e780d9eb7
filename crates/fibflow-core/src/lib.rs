//! Core building blocks shared by the fibflow producers.

pub mod compatible_runtime;
pub mod sequence;
pub mod types;

pub use compatible_runtime::*;
pub use sequence::Fibonacci;
pub use types::*;
