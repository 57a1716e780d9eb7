//! The one-shot user request.

use crate::config::UserConfig;
use crate::error::{FetchError, ProducerError};
use crate::replay::ReplayHub;
use crate::subscription::Subscription;
use async_trait::async_trait;
use fibflow_core::time::{sleep, Duration};
use fibflow_core::oneshot;
use fibflow_runtime::Label;

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Resolves to the name of the current user.
    async fn fetch_user_name(&self) -> Result<String, FetchError>;
}

/// Returns a constant name after a fixed latency and keeps
/// a replaying stream of the signed-in users.
pub struct UserRepository {
    latency: Duration,
    name: String,
    users: ReplayHub<String>,
}

impl UserRepository {
    pub fn new(config: &UserConfig) -> Self {
        Self {
            latency: config.latency,
            name: config.name.clone(),
            users: ReplayHub::new(Label::new("users")),
        }
    }

    /// Announces a user to every observer of [`Self::user_stream`].
    pub fn publish_user(&self, name: impl Into<String>) {
        self.users.publish(name.into());
    }

    /// A new observer receives the last announced user first.
    pub fn user_stream(&self) -> Result<Subscription<String>, ProducerError> {
        self.users.subscribe()
    }
}

#[async_trait]
impl UserRepo for UserRepository {
    async fn fetch_user_name(&self) -> Result<String, FetchError> {
        let (tx, rx) = oneshot::channel();
        let latency = self.latency;
        let name = self.name.clone();
        fibflow_core::spawn(async move {
            sleep(latency).await;
            tx.send(name).ok();
        });
        let name = rx.await?;
        log::debug!("User {name} fetched.");
        Ok(name)
    }
}
