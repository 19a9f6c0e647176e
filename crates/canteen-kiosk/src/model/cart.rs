//! The session-local tray. It never reaches the backend on its own; checkout copies the
//! lines into the order.
use crate::model::{MenuItem, MenuItemId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A menu item with a quantity. Serialized flat, as stored inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("{0} is sold out")]
    Unavailable(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    /// Adds one of `item`, stacking onto an existing line. Returns the line's new quantity.
    pub fn add(&mut self, item: &MenuItem) -> Result<u32, CartError> {
        if !item.is_available {
            return Err(CartError::Unavailable(item.name.clone()));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += 1;
            return Ok(line.quantity);
        }
        self.lines.push(CartItem {
            item: item.clone(),
            quantity: 1,
        });
        Ok(1)
    }

    /// Drops the whole line. Returns whether there was one.
    pub fn remove(&mut self, id: &MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.item.id != id);
        self.lines.len() != before
    }

    pub fn items(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total payable.
    pub fn total(&self) -> f64 {
        total_of(&self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Σ price × quantity.
pub fn total_of(lines: &[CartItem]) -> f64 {
    lines.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, DietType};

    fn dish(id: &str, price: f64, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::from(id),
            name: format!("Dish {id}"),
            description: String::new(),
            price,
            category: Category::MainCourse,
            diet_type: Some(DietType::Veg),
            image_url: String::new(),
            is_available: available,
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        let biryani = dish("m1", 120.0, true);
        let cutlet = dish("s9", 40.0, true);
        let mut cart = Cart::default();

        assert_eq!(cart.add(&biryani), Ok(1));
        assert_eq!(cart.add(&cutlet), Ok(1));
        assert_eq!(cart.add(&biryani), Ok(2));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 280.0);
    }

    #[test]
    fn sold_out_items_are_refused() {
        let mut cart = Cart::default();
        let err = cart.add(&dish("d3", 60.0, false)).unwrap_err();
        assert_eq!(err, CartError::Unavailable("Dish d3".to_string()));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_drops_the_whole_line() {
        let mut cart = Cart::default();
        let chai = dish("d1", 15.0, true);
        cart.add(&chai).unwrap();
        cart.add(&chai).unwrap();

        assert!(cart.remove(&chai.id));
        assert!(!cart.remove(&chai.id));
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn cart_items_serialize_flat() {
        let line = CartItem {
            item: dish("m1", 120.0, true),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], "m1");
        assert_eq!(json["price"], 120.0);
        assert_eq!(json["quantity"], 2);
    }
}
