//! A cold producer: every subscriber gets its own run.

use fibflow_core::time::{self, Duration, MissedTickBehavior};
use fibflow_core::{mpsc, Fibonacci};
use fibflow_runtime::{JobHandle, Label, StopSignal, Stopper};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_stream::wrappers::ReceiverStream;

use crate::config::ProducerConfig;

pub struct RestartableProducer {
    label: Label,
    interval: Duration,
    runs: AtomicUsize,
    active: Arc<AtomicUsize>,
}

impl RestartableProducer {
    pub fn new(config: &ProducerConfig) -> Self {
        Self {
            label: Label::new("restartable"),
            interval: config.cold_period(),
            runs: AtomicUsize::new(0),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts a new run from the seed state.
    ///
    /// The first value is delivered right away, the next ones every
    /// interval. The run ends when the returned stream is dropped.
    /// Must be called within a tokio runtime.
    pub fn subscribe(&self) -> ColdRun {
        let number = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        let label = self.label.stack(&format!("run-{number}"));
        // A single in-flight value: a slow consumer suspends the run.
        let (tx, rx) = mpsc::channel(1);
        let (stopper, signal) = Stopper::new_pair();
        let guard = RunGuard::new(self.active.clone());
        let run = cold_run(tx, self.interval, signal, label, guard);
        let job = JobHandle::spawn(stopper, None, run);
        ColdRun {
            stream: ReceiverStream::new(rx),
            job,
        }
    }

    /// How many runs were started so far.
    pub fn started_runs(&self) -> usize {
        self.runs.load(Ordering::Relaxed)
    }

    /// How many runs haven't released their resources yet.
    pub fn active_runs(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

/// Counts a run as active until it's dropped.
struct RunGuard {
    active: Arc<AtomicUsize>,
}

impl RunGuard {
    fn new(active: Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self { active }
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

async fn cold_run(
    tx: mpsc::Sender<u64>,
    period: Duration,
    mut signal: StopSignal,
    label: Label,
    _guard: RunGuard,
) {
    log::debug!("Run {label} started.");
    let mut ticks = time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fibonacci = Fibonacci::new();
    loop {
        tokio::select! {
            biased;
            _ = tx.closed() => break,
            _ = signal.stopped() => break,
            _ = ticks.tick() => {}
        }
        if tx.is_closed() || !signal.is_active() {
            break;
        }
        let Some(value) = fibonacci.advance() else {
            log::warn!("Run {label} exhausted the u64 range.");
            break;
        };
        log::trace!("Run {label} produced {value}.");
        tokio::select! {
            biased;
            _ = signal.stopped() => break,
            res = tx.send(value) => {
                if res.is_err() {
                    break;
                }
            }
        }
    }
    log::debug!("Run {label} finished.");
}

/// The values of a single restartable run.
pub struct ColdRun {
    stream: ReceiverStream<u64>,
    job: JobHandle,
}

impl ColdRun {
    /// Waits for the next value, `None` once the run has ended.
    pub async fn recv(&mut self) -> Option<u64> {
        self.stream.next().await
    }

    /// Detaches from the run and waits until it has released its resources.
    pub async fn cancel(mut self) {
        self.job.interrupt();
        self.stream.close();
        self.job.join().await;
    }

    pub fn is_finished(&self) -> bool {
        self.job.is_finished()
    }
}

impl Stream for ColdRun {
    type Item = u64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.poll_next_unpin(cx)
    }
}
