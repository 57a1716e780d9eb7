use fibflow_core::watch;
use std::sync::Arc;

/// Requests a run to stop. Stopping is irreversible.
#[derive(Debug, Clone)]
pub struct Stopper {
    active: Arc<watch::Sender<bool>>,
}

impl Stopper {
    /// Creates both ends of a cooperative cancellation.
    ///
    /// The run keeps the [`StopSignal`] and polls it at every
    /// suspension point; the owner keeps the [`Stopper`].
    pub fn new_pair() -> (Stopper, StopSignal) {
        let (tx, rx) = watch::channel(true);
        let stopper = Stopper {
            active: Arc::new(tx),
        };
        let signal = StopSignal { active: rx };
        (stopper, signal)
    }

    pub fn stop(&self) {
        self.active.send_replace(false);
    }

    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }
}

/// The run side of a [`Stopper`].
#[derive(Debug, Clone)]
pub struct StopSignal {
    active: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Resolves once the stop was requested or the stopper has gone.
    pub async fn stopped(&mut self) {
        if self.active.wait_for(|active| !active).await.is_err() {
            log::trace!("Stopper dropped, treating the signal as stopped.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use fibflow_core::time::{timeout, Duration};

    #[tokio::test]
    async fn test_stop_wakes_the_signal() -> Result<()> {
        let (stopper, mut signal) = Stopper::new_pair();
        assert!(signal.is_active());

        stopper.stop();
        timeout(Duration::from_secs(1), signal.stopped()).await?;
        assert!(!signal.is_active());
        assert!(!stopper.is_active());
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_stopper_stops_the_signal() -> Result<()> {
        let (stopper, mut signal) = Stopper::new_pair();
        drop(stopper);
        timeout(Duration::from_secs(1), signal.stopped()).await?;
        Ok(())
    }
}
