//! [`CollectionEntity`] implementation for [`MenuItem`].
//!
//! Validation happens here, inside the collection, so a dish written through a batch goes
//! through the same checks as one added from the admin form.

use super::actions::MenuAction;
use super::error::MenuError;
use crate::image::{embeds_name, random_image_url};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use collection_framework::CollectionEntity;
use tracing::debug;

fn check_price(price: f64) -> Result<f64, MenuError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(MenuError::InvalidPrice(price))
    }
}

fn required(value: String, missing: MenuError) -> Result<String, MenuError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl CollectionEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = MenuAction;
    type ActionResult = bool;
    type Context = ();
    type Error = MenuError;

    const COLLECTION: &'static str = "menu";

    fn id(&self) -> &MenuItemId {
        &self.id
    }

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        let name = required(params.name, MenuError::MissingName)?;
        let description = required(params.description, MenuError::MissingDescription)?;
        let price = check_price(params.price)?;
        let image_url = match params.image_url {
            Some(url) if !url.is_empty() => url,
            _ => random_image_url(&name),
        };

        Ok(Self {
            id,
            name,
            description,
            price,
            category: params.category,
            diet_type: params.diet_type,
            image_url,
            is_available: params.is_available,
        })
    }

    /// Applies the patch field by field.
    ///
    /// When the name changes and the current image no longer matches it, a new image
    /// reference is generated, unless the patch sets one explicitly.
    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), MenuError> {
        if let Some(name) = update.name {
            self.name = required(name, MenuError::MissingName)?;
        }
        if let Some(description) = update.description {
            self.description = required(description, MenuError::MissingDescription)?;
        }
        if let Some(price) = update.price {
            self.price = check_price(price)?;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(diet_type) = update.diet_type {
            self.diet_type = Some(diet_type);
        }
        if let Some(available) = update.is_available {
            self.is_available = available;
        }

        match update.image_url {
            Some(url) if !url.is_empty() => self.image_url = url,
            _ => {
                if self.image_url.is_empty() || !embeds_name(&self.image_url, &self.name) {
                    debug!(id = %self.id, name = %self.name, "Regenerating image");
                    self.image_url = random_image_url(&self.name);
                }
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: MenuAction, _ctx: &()) -> Result<bool, MenuError> {
        match action {
            MenuAction::ToggleAvailability => {
                self.is_available = !self.is_available;
                Ok(self.is_available)
            }
        }
    }
}
