use crate::auth::{AuthProvider, InMemoryAuth};
use crate::clients::{MenuClient, OrderClient};
use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::insights::{GeminiAnalyst, SalesAnalyst, StaticAnalyst};
use crate::kiosk::Kiosk;
use crate::{menu_actor, order_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running kiosk and the collections behind it.
///
/// # Example
///
/// ```ignore
/// let system = KioskSystem::new(KioskConfig::load()?).await?;
///
/// system.kiosk.login_student("Riya", "21CS042").await?;
/// // ...
///
/// system.shutdown().await?;
/// ```
pub struct KioskSystem {
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    pub kiosk: Kiosk,
    /// Collection tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl KioskSystem {
    /// Starts everything with the in-memory auth provider. Sales analysis goes to the hosted
    /// model when an API key is configured and returns a fixed text otherwise.
    pub async fn new(config: KioskConfig) -> Result<Self, KioskError> {
        let analyst: Arc<dyn SalesAnalyst> = match &config.gemini_api_key {
            Some(key) => Arc::new(GeminiAnalyst::new(key.clone(), config.gemini_model.clone())),
            None => Arc::new(StaticAnalyst::default()),
        };
        Self::with_services(config, Arc::new(InMemoryAuth::new()), analyst).await
    }

    pub async fn with_services(
        config: KioskConfig,
        auth: Arc<dyn AuthProvider>,
        analyst: Arc<dyn SalesAnalyst>,
    ) -> Result<Self, KioskError> {
        let (menu_actor, menu_resource_client) = menu_actor::new(config.channel_buffer);
        let menu_client = MenuClient::new(menu_resource_client);
        let menu_handle = tokio::spawn(menu_actor.run(()));

        let (order_actor, order_resource_client) = order_actor::new(config.channel_buffer);
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run(config.status_policy));

        info!(policy = %config.status_policy, "Collections started");

        let kiosk = Kiosk::new(
            menu_client.clone(),
            order_client.clone(),
            auth,
            analyst,
            config,
        )
        .await?;

        Ok(Self {
            menu_client,
            order_client,
            kiosk,
            handles: vec![menu_handle, order_handle],
        })
    }

    /// Closes the kiosk, drops the clients and waits for every collection to stop.
    pub async fn shutdown(self) -> Result<(), KioskError> {
        info!("Shutting down kiosk...");
        self.kiosk.close().await;

        drop(self.kiosk);
        drop(self.menu_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(KioskError::Shutdown(e.to_string()));
            }
        }

        info!("Kiosk shutdown complete.");
        Ok(())
    }
}
