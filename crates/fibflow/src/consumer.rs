//! Consumers that connect producers to display sinks.

use fibflow_producer::{ColdFibonacci, NeverEndingFibonacci, ProducerError, Subscription, UserRepo};
use fibflow_runtime::{JobHandle, StopSignal, Stopper};
use fibflow_send::Sender;
use futures::{Stream, StreamExt};
use std::sync::Arc;

/// What a user sees when the fetch fails for any reason.
pub const ERROR_MESSAGE: &str = "Error!";

/// A forwarding of a stream into a sink.
///
/// Dropping the binding is the signal that the consuming view has gone:
/// the forwarding stops and the producer sees its subscriber disappear.
pub struct Binding {
    job: JobHandle,
}

impl Binding {
    fn spawn<S, T, K>(stream: S, sink: K) -> Self
    where
        S: Stream<Item = T> + Unpin + Send + 'static,
        T: Send + 'static,
        K: Sender<T> + 'static,
    {
        let (stopper, signal) = Stopper::new_pair();
        let mut job = JobHandle::spawn(stopper, None, forward(stream, sink, signal));
        job.cancel_on_drop(true);
        Self { job }
    }

    pub fn is_finished(&self) -> bool {
        self.job.is_finished()
    }

    /// Stops forwarding and waits for the forwarding task to end.
    pub async fn unbind(mut self) {
        self.job.interrupt();
        self.job.join().await;
    }

    /// Waits until the stream has ended on its own.
    pub async fn join(&mut self) {
        self.job.join().await;
    }
}

async fn forward<S, T, K>(mut stream: S, sink: K, mut signal: StopSignal)
where
    S: Stream<Item = T> + Unpin,
    K: Sender<T>,
{
    loop {
        tokio::select! {
            biased;
            _ = signal.stopped() => break,
            item = stream.next() => match item {
                Some(value) => {
                    if let Err(err) = sink.send(value) {
                        log::error!("Can't display a value: {err}");
                        break;
                    }
                }
                None => break,
            },
        }
    }
}

/// Drives the cold and the never-ending sources.
pub struct MainConsumer {
    cold: Arc<dyn ColdFibonacci>,
    never_ending: Arc<dyn NeverEndingFibonacci>,
}

impl MainConsumer {
    pub fn new(cold: Arc<dyn ColdFibonacci>, never_ending: Arc<dyn NeverEndingFibonacci>) -> Self {
        Self { cold, never_ending }
    }

    /// Shows the cold sequence in the sink from its first term.
    ///
    /// Every binding starts a new run, so rebinding after the previous
    /// binding was dropped shows the sequence from the beginning again.
    pub fn bind_cold<K>(&self, sink: K) -> Binding
    where
        K: Sender<u64> + 'static,
    {
        Binding::spawn(self.cold.fibonacci(), sink)
    }

    /// A fresh subscription on every call, so a recreated view
    /// starts with the last value instead of an exhausted handle.
    pub fn never_ending(&self) -> Result<Subscription<u64>, ProducerError> {
        self.never_ending.fibonacci()
    }

    pub fn bind_never_ending<K>(&self, sink: K) -> Result<Binding, ProducerError>
    where
        K: Sender<u64> + 'static,
    {
        let subscription = self.never_ending()?;
        Ok(Binding::spawn(subscription, sink))
    }
}

/// Turns the user fetch into a greeting.
pub struct UserConsumer {
    repo: Arc<dyn UserRepo>,
}

impl UserConsumer {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    /// `"Hello, {name}!"` or [`ERROR_MESSAGE`]. The cause is never shown.
    pub async fn load_user(&self) -> String {
        match self.repo.fetch_user_name().await {
            Ok(name) => format!("Hello, {name}!"),
            Err(err) => {
                log::debug!("Fetching the user failed: {err}");
                ERROR_MESSAGE.into()
            }
        }
    }

    pub fn bind_user<K>(&self, sink: K) -> Binding
    where
        K: Sender<String> + 'static,
    {
        let repo = self.repo.clone();
        let greeting = futures::stream::once(async move {
            UserConsumer { repo }.load_user().await
        });
        Binding::spawn(Box::pin(greeting), sink)
    }
}
