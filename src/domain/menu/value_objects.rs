use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Menu Value Objects
// ============================================================================

/// Identifier of a catalog entry
pub type MenuItemId = u32;

/// Hottest spice level a dish can carry
pub const MAX_SPICE_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Appetizers,
    Mains,
    Biryanis,
    Seafood,
    Desserts,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Appetizers,
        Category::Mains,
        Category::Biryanis,
        Category::Seafood,
        Category::Desserts,
        Category::Beverages,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Appetizers => "Appetizers",
            Category::Mains => "Main Courses",
            Category::Biryanis => "Biryanis",
            Category::Seafood => "Seafood",
            Category::Desserts => "Desserts",
            Category::Beverages => "Beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static catalog entry. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: Category,
    pub image: String,
    pub spice_level: u8,
    pub is_veg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

impl MenuItem {
    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }

    /// Case-insensitive substring match against name or description.
    /// The term is used as typed; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn paneer_tikka() -> MenuItem {
        MenuItem {
            id: 2,
            name: "Paneer Tikka".to_string(),
            description: "Grilled cottage cheese marinated in aromatic spices".to_string(),
            price: BigDecimal::from(320),
            category: Category::Appetizers,
            image: "🧀".to_string(),
            spice_level: 2,
            is_veg: true,
            popular: Some(true),
        }
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let item = paneer_tikka();

        assert!(item.matches_search("paneer"));
        assert!(item.matches_search("COTTAGE"));
        assert!(item.matches_search(""));
        assert!(!item.matches_search("biryani"));
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let mut item = paneer_tikka();
        assert!(item.matches_search(" "));
        assert!(!item.matches_search(" paneer"));

        item.name = "Raita".to_string();
        item.description = "Yogurt".to_string();
        assert!(!item.matches_search("   "));
    }

    #[test]
    fn test_popular_defaults_to_false() {
        let mut item = paneer_tikka();
        assert!(item.is_popular());

        item.popular = None;
        assert!(!item.is_popular());
    }

    #[test]
    fn test_menu_item_wire_shape() {
        let json = r#"{
            "id": 13, "name": "Gulab Jamun", "description": "Soft milk dumplings",
            "price": 120, "category": "desserts", "image": "🍮",
            "spice_level": 0, "is_veg": true
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Desserts);
        assert_eq!(item.price, BigDecimal::from(120));
        assert_eq!(item.popular, None);
    }

    #[test]
    fn test_category_display_names() {
        assert_eq!(Category::Mains.to_string(), "Main Courses");
        assert_eq!(Category::ALL.len(), 6);
    }
}
