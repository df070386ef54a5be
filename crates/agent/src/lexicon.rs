//! Category keyword lexicon
//!
//! Static mapping from each category to its ordered keyword variants:
//! canonical terms, plural forms, common misspellings, and a few
//! second-language equivalents. Stored as an insertion-ordered table, not a
//! hash map: iteration order follows `Category::ALL` and is what breaks
//! score ties in the parser.

use nearby_agent_core::Category;
use once_cell::sync::Lazy;

static LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::new);

/// Ordered keyword table for category resolution
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<(Category, Vec<&'static str>)>,
}

impl Lexicon {
    /// The process-wide lexicon, built on first use
    pub fn global() -> &'static Lexicon {
        &LEXICON
    }

    /// Build the lexicon
    pub fn new() -> Self {
        let entries = vec![
            (
                Category::Restaurant,
                vec![
                    "restaurant",
                    "restaurants",
                    "resturant",
                    "food",
                    "dining",
                    "eat",
                    "restaurante",
                ],
            ),
            (
                Category::Hospital,
                vec![
                    "hospital",
                    "hospitals",
                    "hospitl",
                    "clinic",
                    "medical center",
                    "emergency room",
                    "hopital",
                ],
            ),
            (
                Category::Pharmacy,
                vec![
                    "pharmacy",
                    "pharmacies",
                    "farmacy",
                    "drugstore",
                    "chemist",
                    "medicine",
                    "farmacia",
                ],
            ),
            (
                Category::GasStation,
                vec![
                    "gas station",
                    "gas stations",
                    "petrol",
                    "petrol pump",
                    "fuel",
                    "gas",
                    "gasolinera",
                ],
            ),
            (
                Category::Atm,
                vec![
                    "atm",
                    "atms",
                    "cash machine",
                    "cash point",
                    "cash",
                    "geldautomat",
                ],
            ),
            (
                Category::School,
                vec![
                    "school",
                    "schools",
                    "shool",
                    "college",
                    "education",
                    "escuela",
                ],
            ),
            (
                Category::ShoppingMall,
                vec![
                    "mall",
                    "malls",
                    "shopping mall",
                    "shopping",
                    "shoping",
                    "centro comercial",
                ],
            ),
            (Category::Bank, vec!["bank", "banks", "bnak", "banco"]),
            (
                Category::Cafe,
                vec![
                    "cafe",
                    "cafes",
                    "caffe",
                    "coffee",
                    "coffee shop",
                    "cafeteria",
                ],
            ),
            (
                Category::Lodging,
                vec![
                    "hotel",
                    "hotels",
                    "lodging",
                    "accommodation",
                    "accomodation",
                    "motel",
                    "guest house",
                ],
            ),
        ];

        Self { entries }
    }

    /// Keyword variants for one category
    pub fn lookup(&self, category: Category) -> &[&'static str] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or(&[])
    }

    /// All categories in iteration (tie-breaking) order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// Iterate entries in tie-breaking order
    pub fn entries(&self) -> impl Iterator<Item = (Category, &[&'static str])> + '_ {
        self.entries.iter().map(|(c, k)| (*c, k.as_slice()))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_canonical_order() {
        let lexicon = Lexicon::new();
        let order: Vec<Category> = lexicon.categories().collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_every_category_has_variants() {
        let lexicon = Lexicon::new();
        for category in Category::ALL {
            let keywords = lexicon.lookup(category);
            assert!(
                keywords.len() >= 4,
                "{category} needs canonical, plural, misspelling and foreign variants"
            );
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let lexicon = Lexicon::new();
        for (_, keywords) in lexicon.entries() {
            for keyword in keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }
}
