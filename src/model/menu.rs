//! Menu catalog: immutable items loaded once at startup.

use crate::model::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display};

/// The menu shipped with the storefront.
const BUILTIN_MENU: &str = include_str!("../../data/menu.json");

/// Type-safe identifier for menu items (e.g. `"hot-1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of menu sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCategory {
    #[serde(rename = "Hot Coffee")]
    HotCoffee,
    #[serde(rename = "Cold Coffee")]
    ColdCoffee,
    #[serde(rename = "Signature Drinks")]
    SignatureDrinks,
    #[serde(rename = "Pastries")]
    Pastries,
    #[serde(rename = "Light Bites")]
    LightBites,
}

impl MenuCategory {
    /// Every category, in menu order.
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::HotCoffee,
        MenuCategory::ColdCoffee,
        MenuCategory::SignatureDrinks,
        MenuCategory::Pastries,
        MenuCategory::LightBites,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCategory::HotCoffee => "Hot Coffee",
            MenuCategory::ColdCoffee => "Cold Coffee",
            MenuCategory::SignatureDrinks => "Signature Drinks",
            MenuCategory::Pastries => "Pastries",
            MenuCategory::LightBites => "Light Bites",
        }
    }
}

impl Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Browsing filter over the menu ("All" or a single section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MenuCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: MenuCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// A catalog entry. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: MenuCategory,
    pub image: String,
    #[serde(default)]
    pub is_popular: bool,
}

impl MenuItem {
    /// Creates a menu item with no description or image.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: MenuCategory,
    ) -> Self {
        Self {
            id: ItemId(id.into()),
            name: name.into(),
            description: String::new(),
            price: Money(price),
            category,
            image: String::new(),
            is_popular: false,
        }
    }
}

/// Errors raised while loading a menu document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed menu document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(ItemId),
    #[error("Invalid price {price} for menu item {id}")]
    InvalidPrice { id: ItemId, price: f64 },
}

/// The loaded menu, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Loads the menu embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_MENU)
    }

    /// Parses a JSON array of menu items.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_json::from_str(document)?;
        Self::from_items(items)
    }

    /// Builds a catalog, rejecting duplicate ids and negative or non-finite prices.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            let price = item.price.amount();
            if !price.is_finite() || price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: item.id.clone(),
                    price,
                });
            }
            if !seen.insert(&item.id) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| filter.matches(item.category))
    }

    /// Items flagged as popular, for the featured strip.
    pub fn popular(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_popular)
    }

    /// Categories that have at least one item, in menu order.
    pub fn categories(&self) -> Vec<MenuCategory> {
        MenuCategory::ALL
            .into_iter()
            .filter(|category| self.items.iter().any(|item| item.category == *category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_menu_loads() {
        let catalog = Catalog::builtin().expect("embedded menu parses");
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.categories(), MenuCategory::ALL.to_vec());

        let espresso = catalog.get(&ItemId::from("hot-1")).unwrap();
        assert_eq!(espresso.name, "Classic Espresso");
        assert_eq!(espresso.price, Money(3.49));
        assert!(espresso.is_popular);
    }

    #[test]
    fn test_filter_and_popular() {
        let catalog = Catalog::builtin().unwrap();
        let pastries: Vec<_> = catalog
            .filter(CategoryFilter::Only(MenuCategory::Pastries))
            .map(|item| item.id.0.as_str())
            .collect();
        assert_eq!(pastries, ["pastry-1", "pastry-2", "pastry-3"]);
        assert_eq!(catalog.filter(CategoryFilter::All).count(), 15);
        assert_eq!(catalog.popular().count(), 6);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            MenuItem::new("a", "A", 1.0, MenuCategory::Pastries),
            MenuItem::new("a", "A again", 2.0, MenuCategory::Pastries),
        ];
        let err = Catalog::from_items(items).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.0 == "a"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let items = vec![MenuItem::new("x", "X", -0.5, MenuCategory::LightBites)];
        assert!(matches!(
            Catalog::from_items(items),
            Err(CatalogError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let doc = r#"[{"id":"x","name":"X","description":"","price":1.0,"category":"All","image":""}]"#;
        assert!(matches!(Catalog::from_json(doc), Err(CatalogError::Parse(_))));
    }
}
