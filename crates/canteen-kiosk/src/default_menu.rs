//! The 40-dish catalogue used by "reset menu".
use crate::image::random_image_url;
use crate::model::{Category, DietType, MenuItem, MenuItemId};

use Category::{Dessert, Drink, MainCourse, Snack};
use DietType::{NonVeg, Veg};

struct Dish {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: Category,
    diet: DietType,
    /// Prompt used for the generated image, often shorter than the name.
    image: &'static str,
}

const fn dish(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: Category,
    diet: DietType,
    image: &'static str,
) -> Dish {
    Dish {
        id,
        name,
        description,
        price,
        category,
        diet,
        image,
    }
}

#[rustfmt::skip]
const CATALOGUE: [Dish; 40] = [
    dish("m1", "Veg Biryani", "Aromatic basmati rice cooked with mixed vegetables and authentic spices.", 120.0, MainCourse, Veg, "Veg Biryani"),
    dish("m2", "Chicken Biryani", "Flavorful spiced rice with tender chicken pieces and raita.", 180.0, MainCourse, NonVeg, "Chicken Biryani"),
    dish("m3", "Rajma Chawal", "Red kidney beans in thick gravy served with steamed rice.", 90.0, MainCourse, Veg, "Rajma Chawal"),
    dish("m4", "Mini Thali", "2 seasonal curries, 2 roti, rice, and pickle.", 110.0, MainCourse, Veg, "Indian Thali"),
    dish("m5", "Fried Rice with Manchurian", "Indo-Chinese veg fried rice served with gobi manchurian gravy.", 130.0, MainCourse, Veg, "Fried Rice Manchurian"),
    dish("m6", "Masala Dosa", "Crispy crepe stuffed with potato masala, served with chutney and sambar.", 70.0, MainCourse, Veg, "Masala Dosa"),
    dish("m7", "Poori with Aloo Curry", "3 fluffy pooris served with spiced potato curry.", 80.0, MainCourse, Veg, "Poori Aloo"),
    dish("m8", "Egg Maggi", "Classic Masala Maggi tossed with scrambled eggs and veggies.", 60.0, MainCourse, NonVeg, "Egg Maggi"),
    dish("m9", "Paneer Curry with Roti", "Rich paneer butter masala served with 3 tawa rotis.", 140.0, MainCourse, Veg, "Paneer Roti"),
    dish("m10", "Curd Rice", "Cool and comforting seasoned yogurt rice with pomegranate.", 60.0, MainCourse, Veg, "Curd Rice"),

    dish("s1", "Samosa (2 pcs)", "Crispy pastry filled with spiced potatoes and peas.", 30.0, Snack, Veg, "Samosa"),
    dish("s2", "Veg Puff", "Flaky bakery style puff pastry with vegetable filling.", 25.0, Snack, Veg, "Veg Puff"),
    dish("s3", "Bread Omelette", "Spiced omelette sandwiched between toasted bread slices.", 50.0, Snack, NonVeg, "Bread Omelette"),
    dish("s4", "Vada Pav", "Mumbai style potato fritter in a bun with garlic chutney.", 25.0, Snack, Veg, "Vada Pav"),
    dish("s5", "Peri Peri Fries", "Crispy french fries tossed in spicy peri peri masala.", 80.0, Snack, Veg, "French Fries"),
    dish("s6", "Spring Rolls", "Crispy rolls filled with stir-fried vegetables.", 70.0, Snack, Veg, "Spring Rolls"),
    dish("s7", "Aloo Bonda (2 pcs)", "Deep fried spiced potato balls in gram flour batter.", 30.0, Snack, Veg, "Aloo Bonda"),
    dish("s8", "Chicken Momos (6 pcs)", "Steamed dumplings filled with minced chicken.", 90.0, Snack, NonVeg, "Momos"),
    dish("s9", "Veg Cutlet (2 pcs)", "Hearty vegetable patties crumb coated and fried.", 40.0, Snack, Veg, "Veg Cutlet"),
    dish("s10", "Grilled Paneer Sandwich", "Toasted sandwich with spiced paneer filling.", 85.0, Snack, Veg, "Grilled Sandwich"),

    dish("d1", "Masala Chai", "Hot brewed tea with ginger and cardamom.", 15.0, Drink, Veg, "Masala Chai"),
    dish("d2", "Filter Coffee", "South Indian style strong coffee.", 20.0, Drink, Veg, "Filter Coffee"),
    dish("d3", "Cold Coffee", "Creamy blended coffee served chilled.", 60.0, Drink, Veg, "Cold Coffee"),
    dish("d4", "Boost / Horlicks", "Hot malted milk drink.", 40.0, Drink, Veg, "Hot Milk Drink"),
    dish("d5", "Seasonal Fruit Juice", "Freshly squeezed watermelon or orange juice.", 50.0, Drink, Veg, "Fruit Juice"),
    dish("d6", "Soft Drink (300ml)", "Coke, Sprite, or Pepsi.", 40.0, Drink, Veg, "Soda Bottle"),
    dish("d7", "Sweet Lassi", "Thick churned yogurt drink topped with malai.", 50.0, Drink, Veg, "Lassi"),
    dish("d8", "Buttermilk (Chaas)", "Spiced watery yogurt drink with coriander.", 20.0, Drink, Veg, "Chaas"),
    dish("d9", "Oreo Milkshake", "Thick milkshake blended with Oreo cookies.", 90.0, Drink, Veg, "Oreo Milkshake"),
    dish("d10", "Fresh Lime Soda", "Refreshing lemon soda (Sweet/Salt).", 40.0, Drink, Veg, "Lemon Soda"),

    dish("sw1", "Gulab Jamun (2 pcs)", "Soft milk solids dumplings in sugar syrup.", 40.0, Dessert, Veg, "Gulab Jamun"),
    dish("sw2", "Vanilla Ice Cream", "2 scoops of vanilla ice cream.", 50.0, Dessert, Veg, "Vanilla Ice Cream"),
    dish("sw3", "Sizzling Brownie", "Warm chocolate brownie.", 90.0, Dessert, NonVeg, "Brownie"),
    dish("sw4", "Black Forest Pastry", "Layered chocolate cake with cherry filling.", 60.0, Dessert, NonVeg, "Chocolate Pastry"),
    dish("sw5", "Vanilla Muffin", "Soft sponge muffin.", 30.0, Dessert, NonVeg, "Muffin"),
    dish("sw6", "Rice Kheer", "Traditional rice pudding with nuts.", 50.0, Dessert, Veg, "Kheer"),
    dish("sw7", "Fruit Salad", "Bowl of mixed fresh seasonal fruits.", 60.0, Dessert, Veg, "Fruit Salad"),
    dish("sw8", "Rasgulla (2 pcs)", "Spongy cottage cheese balls in light syrup.", 40.0, Dessert, Veg, "Rasgulla"),
    dish("sw9", "Gajar Ka Halwa", "Sweet carrot pudding cooked in milk and ghee.", 70.0, Dessert, Veg, "Gajar Halwa"),
    dish("sw10", "Dairy Milk Silk", "Chocolate bar.", 80.0, Dessert, Veg, "Dairy Milk Chocolate"),
];

/// The default catalogue, every dish available, with freshly seeded image URLs.
pub fn default_menu() -> Vec<MenuItem> {
    CATALOGUE
        .iter()
        .map(|d| MenuItem {
            id: MenuItemId::from(d.id),
            name: d.name.to_string(),
            description: d.description.to_string(),
            price: d.price,
            category: d.category,
            diet_type: Some(d.diet),
            image_url: random_image_url(d.image),
            is_available: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_ten_dishes_per_category() {
        let menu = default_menu();
        assert_eq!(menu.len(), 40);
        for category in Category::ALL {
            assert_eq!(menu.iter().filter(|i| i.category == category).count(), 10);
        }
        let ids: HashSet<_> = menu.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn every_dish_is_tagged_and_priced() {
        for item in default_menu() {
            assert!(item.diet_type.is_some(), "{} untagged", item.name);
            assert!(item.price > 0.0);
            assert!(item.is_available);
            assert!(item.image_url.starts_with("https://image.pollinations.ai/"));
        }
    }
}
