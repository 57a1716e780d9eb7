use crate::controller::Stopper;
use fibflow_core::{Handle, JoinHandle};
use std::future::Future;

/// A spawned run together with the means to stop it.
pub struct JobHandle {
    stopper: Stopper,
    handle: JoinHandle<()>,
    joined: bool,
    cancel_on_drop: bool,
}

impl JobHandle {
    /// Spawns the future on the given runtime or on the ambient one.
    pub fn spawn<F>(stopper: Stopper, clock: Option<&Handle>, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = match clock {
            Some(clock) => clock.spawn(fut),
            None => fibflow_core::spawn(fut),
        };
        Self {
            stopper,
            handle,
            joined: false,
            cancel_on_drop: false,
        }
    }

    pub fn cancel_on_drop(&mut self, cancel: bool) {
        self.cancel_on_drop = cancel;
    }

    /// Asks the run to stop at its next suspension point.
    pub fn interrupt(&self) {
        self.stopper.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run to finish.
    pub async fn join(&mut self) {
        if self.joined {
            return;
        }
        let res = (&mut self.handle).await;
        self.joined = true;
        if let Err(err) = res {
            if err.is_panic() {
                log::error!("The run panicked: {err}");
            }
        }
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        if self.cancel_on_drop {
            self.handle.abort();
        }
    }
}
