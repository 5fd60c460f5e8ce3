use crate::clients::{AccountClient, OrderClient, UserClient};
use crate::config::TrackerConfig;
use crate::files::FileStore;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    /// A store task panicked or was cancelled.
    #[error("Store task failed: {0}")]
    StoreTaskFailed(#[from] JoinError),
}

/// The running tracker: both stores and the clients over them.
///
/// ```rust
/// use install_tracker::config::TrackerConfig;
/// use install_tracker::files::MemoryFileStore;
/// use install_tracker::lifecycle::TrackerSystem;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let files = Arc::new(MemoryFileStore::new());
///     let system = TrackerSystem::new(&TrackerConfig::default(), files);
///     // ... use system.order_client / system.account_client ...
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct TrackerSystem {
    /// Order lifecycle.
    pub order_client: OrderClient,

    pub user_client: UserClient,

    /// Admin and invitation flows.
    pub account_client: AccountClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackerSystem {
    /// Creates both stores, wires the clients and spawns the store tasks.
    pub fn new(config: &TrackerConfig, files: Arc<dyn FileStore>) -> Self {
        let (user_actor, user_client) = crate::user_actor::new(config.channel_capacity);
        let (order_actor, order_client) = crate::order_actor::new(
            config.channel_capacity,
            user_client.clone(),
            files,
            config.file_root.clone(),
        );

        let order_handle = tokio::spawn(order_actor.run(()));
        let user_handle = tokio::spawn(user_actor.run(()));

        info!(
            channel_capacity = config.channel_capacity,
            file_root = %config.file_root,
            "Tracker started"
        );

        Self {
            account_client: AccountClient::new(user_client.clone()),
            order_client,
            user_client,
            handles: vec![order_handle, user_handle],
        }
    }

    /// Drops the clients and waits for both stores to stop.
    ///
    /// Fails if a store task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down tracker...");

        // The order client holds user clients, so it goes first.
        drop(self.order_client);
        drop(self.account_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Store task failed");
                return Err(e.into());
            }
        }

        info!("Tracker shutdown complete.");
        Ok(())
    }
}
