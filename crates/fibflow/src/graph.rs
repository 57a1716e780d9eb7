//! The composition root.

use crate::consumer::{MainConsumer, UserConsumer};
use fibflow_producer::{
    BroadcastProducer, ProducerConfig, RestartableProducer, UserConfig, UserRepository,
};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub producer: ProducerConfig,
    pub user: UserConfig,
}

/// Owns one instance of every producer and wires consumers to them.
pub struct AppGraph {
    pub cold: Arc<RestartableProducer>,
    pub never_ending: Arc<BroadcastProducer>,
    pub users: Arc<UserRepository>,
}

impl AppGraph {
    pub fn new(config: &AppConfig) -> Self {
        log::info!("Building the app graph.");
        Self {
            cold: Arc::new(RestartableProducer::new(&config.producer)),
            never_ending: Arc::new(BroadcastProducer::new(&config.producer)),
            users: Arc::new(UserRepository::new(&config.user)),
        }
    }

    pub fn main_consumer(&self) -> MainConsumer {
        MainConsumer::new(self.cold.clone(), self.never_ending.clone())
    }

    pub fn user_consumer(&self) -> UserConsumer {
        UserConsumer::new(self.users.clone())
    }

    /// Stops the never-ending run and waits for it to finish.
    pub async fn shutdown(&self) {
        self.never_ending.stop();
        self.never_ending.join().await;
        log::info!("The app graph is shut down.");
    }
}
