//! Restartable and replaying broadcast producers of the sequence
//! 2, 3, 5, 8, ... together with the consumers that drive them.
//!
//! [`AppGraph`] builds every producer once and hands them to consumers.

pub mod consumer;
pub mod graph;

pub use consumer::{Binding, MainConsumer, UserConsumer, ERROR_MESSAGE};
pub use graph::{AppConfig, AppGraph};

pub mod kit {
    pub mod core {
        pub use fibflow_core::*;
    }

    pub mod producer {
        pub use fibflow_producer::*;
    }

    pub mod runtime {
        pub use fibflow_runtime::*;
    }

    pub mod send {
        pub use fibflow_send::kit::*;
    }
}
