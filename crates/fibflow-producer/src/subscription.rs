use crate::replay::{Entry, SubscriberId};
use fibflow_core::mpsc;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// An attachment to a [`ReplayHub`](crate::ReplayHub).
///
/// Yields values in the order they were published and ends when the
/// hub is closed.
/// Dropping the subscription detaches it.
pub struct Subscription<T> {
    stream: UnboundedReceiverStream<T>,
    entry: Entry<T>,
}

impl<T> Unpin for Subscription<T> {}

impl<T> Subscription<T> {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<T>, entry: Entry<T>) -> Self {
        Self {
            stream: UnboundedReceiverStream::new(rx),
            entry,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.entry.id()
    }

    /// Waits for the next value, `None` once the subscription has ended.
    pub async fn recv(&mut self) -> Option<T> {
        self.stream.next().await
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.poll_next_unpin(cx)
    }
}
