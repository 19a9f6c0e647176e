//! # Menu Client
//!
//! High-level API for the `menu` collection, used by the admin screens.
use crate::menu_actor::{MenuAction, MenuError};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use collection_framework::{BatchOp, CollectionClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Adds a dish. New dishes always start available.
    #[instrument(skip(self))]
    pub async fn add_item(&self, mut params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        params.is_available = true;
        self.inner.create(params).await.map_err(MenuError::from)
    }

    #[instrument(skip(self))]
    pub async fn edit_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(MenuError::from)
    }

    /// Flips availability and returns the new value.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: MenuItemId) -> Result<bool, MenuError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, MenuAction::ToggleAvailability)
            .await
            .map_err(MenuError::from)
    }

    /// Replaces the whole menu with `items` in one atomic batch.
    ///
    /// Every current dish is deleted and every new one written under its own id. If any
    /// write is rejected nothing changes. Returns the number of dishes written.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn reset_menu(&self, items: Vec<MenuItem>) -> Result<usize, MenuError> {
        let current = self.inner.list().await.map_err(MenuError::from)?;
        let count = items.len();
        let mut ops: Vec<BatchOp<MenuItem>> = current
            .into_iter()
            .map(|item| BatchOp::Delete(item.id))
            .collect();
        ops.extend(items.into_iter().map(|item| {
            let (id, params) = item.into_parts();
            BatchOp::Set { id, params }
        }));

        debug!(ops = ops.len(), "Sending batch");
        self.inner.batch(ops).await.map_err(MenuError::from)?;
        info!(count, "Menu reset");
        Ok(count)
    }
}

#[async_trait]
impl CollectionClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MenuError::from(e)
    }
}
