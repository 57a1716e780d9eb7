//! A hot producer: one run for the whole lifetime, shared by all subscribers.

use crate::config::ProducerConfig;
use crate::error::ProducerError;
use crate::replay::ReplayHub;
use crate::subscription::Subscription;
use fibflow_core::time::{self, Duration, MissedTickBehavior};
use fibflow_core::{Fibonacci, Handle};
use fibflow_runtime::{JobHandle, Label, RunState, StopSignal, Stopper};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Lifecycle {
    state: RunState,
    stopper: Option<Stopper>,
    job: Option<JobHandle>,
}

pub struct BroadcastProducer {
    label: Label,
    interval: Duration,
    hub: ReplayHub<u64>,
    lifecycle: Mutex<Lifecycle>,
}

impl BroadcastProducer {
    pub fn new(config: &ProducerConfig) -> Self {
        let label = Label::new("broadcast");
        let hub = ReplayHub::new(label.stack("hub"));
        let lifecycle = Lifecycle {
            state: RunState::NotStarted,
            stopper: None,
            job: None,
        };
        Self {
            label,
            interval: config.broadcast_period(),
            hub,
            lifecycle: Mutex::new(lifecycle),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        let mut lifecycle = self
            .lifecycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // An exhausted run closes the hub on its own.
        if lifecycle.state.is_running() && self.hub.is_closed() {
            lifecycle.state.stop();
        }
        lifecycle
    }

    /// Launches the run once.
    ///
    /// The run is spawned on `clock` if it's provided or on the ambient
    /// runtime otherwise. Repeated calls are no-ops, starting a stopped
    /// producer fails.
    pub fn start(&self, clock: Option<Handle>) -> Result<(), ProducerError> {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state.start()? {
            let (stopper, signal) = Stopper::new_pair();
            let label = self.label.stack("run");
            let run = broadcast_run(self.hub.clone(), self.interval, signal, label);
            let job = JobHandle::spawn(stopper.clone(), clock.as_ref(), run);
            lifecycle.stopper = Some(stopper);
            lifecycle.job = Some(job);
            log::info!("Producer {} started.", self.label);
        }
        Ok(())
    }

    /// Attaches a new subscriber, starting the run if necessary.
    ///
    /// The first value a late subscriber receives is the last value the
    /// run produced. Fails once the producer has been stopped.
    pub fn subscribe(&self) -> Result<Subscription<u64>, ProducerError> {
        self.start(None)?;
        self.hub.subscribe()
    }

    /// Stops the run forever and detaches all subscribers.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        let previous = lifecycle.state.stop();
        // The job may be taken by a pending `join`.
        if let Some(stopper) = lifecycle.stopper.as_ref() {
            stopper.stop();
        }
        self.hub.close();
        if !previous.is_stopped() {
            log::info!("Producer {} stopped (was {previous}).", self.label);
        }
    }

    /// Waits until the run has released its resources.
    ///
    /// Only the first caller waits for the run.
    pub async fn join(&self) {
        let job = self.lifecycle().job.take();
        if let Some(mut job) = job {
            job.join().await;
        }
    }

    pub fn state(&self) -> RunState {
        self.lifecycle().state
    }

    /// The most recently produced value.
    pub fn last(&self) -> Option<u64> {
        self.hub.last()
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }
}

impl Drop for BroadcastProducer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn broadcast_run(
    hub: ReplayHub<u64>,
    period: Duration,
    mut signal: StopSignal,
    label: Label,
) {
    log::debug!("Run {label} started.");
    let mut ticks = time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fibonacci = Fibonacci::new();
    loop {
        tokio::select! {
            biased;
            _ = signal.stopped() => break,
            _ = ticks.tick() => {}
        }
        if !signal.is_active() {
            break;
        }
        let Some(value) = fibonacci.advance() else {
            log::warn!("Run {label} exhausted the u64 range.");
            hub.close();
            break;
        };
        let delivered = hub.publish(value);
        log::trace!("Run {label} produced {value} for {delivered} subscribers.");
    }
    log::debug!("Run {label} finished.");
}
