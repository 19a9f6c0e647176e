//! A dish on the canteen menu, stored in the `menu` collection.
//!
//! # Collection Framework
//! This struct implements the [`CollectionEntity`](collection_framework::CollectionEntity)
//! trait, allowing it to be managed by a [`ResourceActor`](collection_framework::ResourceActor).
//!
//! See [`impl CollectionEntity for MenuItem`](#impl-CollectionEntity-for-MenuItem) for:
//! - Creation parameters ([`MenuItemCreate`])
//! - Patch parameters ([`MenuItemUpdate`])
//! - Custom actions ([`MenuAction`](crate::menu_actor::MenuAction))
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Identifier of a menu document (`m1`, `sw3`, or a generated id for admin-added dishes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub String);

impl MenuItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl From<&str> for MenuItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Menu section. The serialized labels are the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Main Course")]
    MainCourse,
    Snack,
    Drink,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MainCourse,
        Category::Snack,
        Category::Drink,
        Category::Dessert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::MainCourse => "Main Course",
            Category::Snack => "Snack",
            Category::Drink => "Drink",
            Category::Dessert => "Dessert",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietType {
    #[serde(rename = "VEG")]
    Veg,
    #[serde(rename = "NON-VEG")]
    NonVeg,
}

/// Name fragments that mark an untagged dish as non-vegetarian.
pub const NON_VEG_KEYWORDS: [&str; 8] = [
    "chicken", "egg", "non-veg", "mutton", "fish", "prawn", "beef", "pork",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: Category,
    /// Absent on documents written before diet tags existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<DietType>,
    #[serde(default)]
    pub image_url: String,
    pub is_available: bool,
}

impl MenuItem {
    /// Tagged dishes follow their tag. Untagged dishes count as vegetarian unless the
    /// name contains one of [`NON_VEG_KEYWORDS`]; the keyword check is a heuristic.
    pub fn is_vegetarian(&self) -> bool {
        match self.diet_type {
            Some(DietType::Veg) => true,
            Some(DietType::NonVeg) => false,
            None => {
                let name = self.name.to_lowercase();
                !NON_VEG_KEYWORDS.iter().any(|k| name.contains(k))
            }
        }
    }

    /// Splits the document into its id and the payload that recreates it.
    pub fn into_parts(self) -> (MenuItemId, MenuItemCreate) {
        let params = MenuItemCreate {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            diet_type: self.diet_type,
            image_url: Some(self.image_url),
            is_available: self.is_available,
        };
        (self.id, params)
    }
}

/// Payload for a new menu document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub diet_type: Option<DietType>,
    /// Generated from the name when `None` or empty.
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl MenuItemCreate {
    /// A new, available, vegetarian dish with a generated image.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            category,
            diet_type: Some(DietType::Veg),
            image_url: None,
            is_available: true,
        }
    }

    pub fn diet(mut self, diet_type: DietType) -> Self {
        self.diet_type = Some(diet_type);
        self
    }
}

/// Patch for an existing menu document. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub diet_type: Option<DietType>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}
