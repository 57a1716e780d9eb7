//! Seams between producers and the consumers built on top of them.

use crate::broadcast::BroadcastProducer;
use crate::error::ProducerError;
use crate::restartable::RestartableProducer;
use crate::subscription::Subscription;
use futures::stream::{BoxStream, StreamExt};

/// A source that starts over for every consumer.
pub trait ColdFibonacci: Send + Sync {
    fn fibonacci(&self) -> BoxStream<'static, u64>;
}

impl ColdFibonacci for RestartableProducer {
    fn fibonacci(&self) -> BoxStream<'static, u64> {
        self.subscribe().boxed()
    }
}

/// A source shared by all consumers that replays its last value.
pub trait NeverEndingFibonacci: Send + Sync {
    fn fibonacci(&self) -> Result<Subscription<u64>, ProducerError>;
}

impl NeverEndingFibonacci for BroadcastProducer {
    fn fibonacci(&self) -> Result<Subscription<u64>, ProducerError> {
        self.subscribe()
    }
}
