//! Place categories the assistant can search for

use serde::{Deserialize, Serialize};

/// Kind of place the user can search for
///
/// This is a closed set: the same identifiers are used in the conversation
/// engine and on the wire to the lookup provider, so no free-form category
/// strings ever cross that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Hospital,
    Pharmacy,
    GasStation,
    Atm,
    School,
    ShoppingMall,
    Bank,
    Cafe,
    Lodging,
}

impl Category {
    /// All categories in canonical order
    ///
    /// This order is load-bearing: the lexicon iterates it when scoring an
    /// utterance, and score ties resolve to the earlier category.
    pub const ALL: [Category; 10] = [
        Category::Restaurant,
        Category::Hospital,
        Category::Pharmacy,
        Category::GasStation,
        Category::Atm,
        Category::School,
        Category::ShoppingMall,
        Category::Bank,
        Category::Cafe,
        Category::Lodging,
    ];

    /// Wire identifier, also the provider's place type
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Hospital => "hospital",
            Category::Pharmacy => "pharmacy",
            Category::GasStation => "gas_station",
            Category::Atm => "atm",
            Category::School => "school",
            Category::ShoppingMall => "shopping_mall",
            Category::Bank => "bank",
            Category::Cafe => "cafe",
            Category::Lodging => "lodging",
        }
    }

    /// Human-readable name for prompts ("Great! You selected Hospitals.")
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurants",
            Category::Hospital => "Hospitals",
            Category::Pharmacy => "Pharmacies",
            Category::GasStation => "Gas Stations",
            Category::Atm => "ATMs",
            Category::School => "Schools",
            Category::ShoppingMall => "Malls",
            Category::Bank => "Banks",
            Category::Cafe => "Cafes",
            Category::Lodging => "Hotels",
        }
    }

    /// Lowercase plural used inside sentences ("no restaurants within 5 km")
    pub fn plural(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurants",
            Category::Hospital => "hospitals",
            Category::Pharmacy => "pharmacies",
            Category::GasStation => "gas stations",
            Category::Atm => "ATMs",
            Category::School => "schools",
            Category::ShoppingMall => "malls",
            Category::Bank => "banks",
            Category::Cafe => "cafes",
            Category::Lodging => "hotels",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identifiers() {
        assert_eq!(Category::GasStation.as_str(), "gas_station");
        assert_eq!(Category::ShoppingMall.as_str(), "shopping_mall");
        assert_eq!(Category::Atm.as_str(), "atm");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Category::GasStation).unwrap();
        assert_eq!(json, "\"gas_station\"");

        let back: Category = serde_json::from_str("\"shopping_mall\"").unwrap();
        assert_eq!(back, Category::ShoppingMall);
    }

    #[test]
    fn test_all_is_exhaustive_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for category in Category::ALL {
            assert!(seen.insert(category.as_str()));
        }
        assert_eq!(seen.len(), 10);
    }
}
