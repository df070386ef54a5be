//! Intent parsing: category and radius slot extraction
//!
//! Turns a raw utterance into a `ParseResult` using the lexicon plus fuzzy
//! matching for the category slot and a fixed ladder of compiled numeric
//! patterns for the radius slot. The parser is pure: re-parsing the same
//! utterance always yields the same result.

use nearby_agent_config::ParserConfig;
use nearby_agent_core::Category;
use regex::Regex;

use crate::fuzzy;
use crate::lexicon::Lexicon;

/// Slots extracted from one utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseResult {
    /// Resolved category, if any keyword variant matched
    pub category: Option<Category>,
    /// Resolved search radius in kilometers
    pub radius_km: Option<f64>,
}

impl ParseResult {
    /// Both slots filled, ready to dispatch
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.radius_km.is_some()
    }
}

/// Radius extraction patterns, compiled once at construction
///
/// Tried in order, first success wins. The bare-number fallback is applied
/// separately because it is gated on a resolved category and a plausible
/// range, to avoid reading e.g. an address number as a radius.
struct RadiusPatterns {
    unit: Regex,
    within: Regex,
    around: Regex,
    about: Regex,
    bare: Regex,
}

impl RadiusPatterns {
    fn compile() -> Self {
        Self {
            unit: Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:kilometers?|kilometres?|kms?|k)\b")
                .unwrap(),
            within: Regex::new(r"(?i)\bwithin\s+(\d+(?:\.\d+)?)").unwrap(),
            around: Regex::new(r"(?i)\baround\s+(\d+(?:\.\d+)?)").unwrap(),
            about: Regex::new(r"(?i)\babout\s+(\d+(?:\.\d+)?)").unwrap(),
            bare: Regex::new(r"(\d+(?:\.\d+)?)").unwrap(),
        }
    }
}

/// Utterance parser
pub struct IntentParser {
    lexicon: &'static Lexicon,
    config: ParserConfig,
    patterns: RadiusPatterns,
}

impl IntentParser {
    /// Create a parser with the given tuning
    pub fn new(config: ParserConfig) -> Self {
        Self {
            lexicon: Lexicon::global(),
            config,
            patterns: RadiusPatterns::compile(),
        }
    }

    /// Parse an utterance into category and radius slots
    pub fn parse(&self, utterance: &str) -> ParseResult {
        let lowered = utterance.to_lowercase();

        let category = self.resolve_category(&lowered);
        let radius_km = self.resolve_radius(&lowered, category.is_some());

        tracing::debug!(?category, ?radius_km, "Parsed utterance");

        ParseResult {
            category,
            radius_km,
        }
    }

    /// The lexicon backing this parser
    pub fn lexicon(&self) -> &Lexicon {
        self.lexicon
    }

    /// Score every category by counting matching keyword variants
    ///
    /// Variants are matched against the entire lowercased utterance, not
    /// tokens. Comparison is strict `>`, so a later category with an equal
    /// count never overrides an earlier one.
    fn resolve_category(&self, lowered: &str) -> Option<Category> {
        let mut best: Option<(Category, usize)> = None;

        for (category, keywords) in self.lexicon.entries() {
            let count = keywords
                .iter()
                .filter(|keyword| fuzzy::matches(lowered, keyword, self.config.fuzzy_threshold))
                .count();
            if count == 0 {
                continue;
            }
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((category, count));
            }
        }

        best.map(|(category, _)| category)
    }

    /// Extract the radius slot
    fn resolve_radius(&self, lowered: &str, has_category: bool) -> Option<f64> {
        let explicit = [
            &self.patterns.unit,
            &self.patterns.within,
            &self.patterns.around,
            &self.patterns.about,
        ];
        for pattern in explicit {
            if let Some(value) = capture_number(pattern, lowered) {
                return Some(value);
            }
        }

        // Bare-number fallback: only alongside a recognized category and
        // inside the configured plausible range.
        if !has_category {
            return None;
        }
        let value = capture_number(&self.patterns.bare, lowered)?;
        (value >= self.config.bare_number_min && value <= self.config.bare_number_max)
            .then_some(value)
    }
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> IntentParser {
        IntentParser::default()
    }

    #[test]
    fn test_every_lexicon_keyword_resolves_to_its_category() {
        let parser = parser();
        for (category, keywords) in parser.lexicon().entries() {
            for keyword in keywords {
                let result = parser.parse(keyword);
                assert_eq!(
                    result.category,
                    Some(category),
                    "keyword {keyword:?} resolved to {:?}, expected {category:?}",
                    result.category
                );
            }
        }
    }

    #[test]
    fn test_category_with_unit_radius() {
        let result = parser().parse("find restaurants within 5 km");
        assert_eq!(result.category, Some(Category::Restaurant));
        assert_eq!(result.radius_km, Some(5.0));
    }

    #[test]
    fn test_terse_unit_radius() {
        let result = parser().parse("food 3km");
        assert_eq!(result.category, Some(Category::Restaurant));
        assert_eq!(result.radius_km, Some(3.0));
    }

    #[test]
    fn test_category_without_radius() {
        let result = parser().parse("show me food");
        assert_eq!(result.category, Some(Category::Restaurant));
        assert_eq!(result.radius_km, None);
    }

    #[test]
    fn test_unit_radius_without_category() {
        // A unit-bearing number is accepted on its own; the dialog layer
        // answers with the category clarification.
        let result = parser().parse("5 km away");
        assert_eq!(result.category, None);
        assert_eq!(result.radius_km, Some(5.0));
        assert!(!result.is_complete());
    }

    #[test]
    fn test_phrase_patterns() {
        let parser = parser();
        assert_eq!(parser.parse("cafes within 2.5").radius_km, Some(2.5));
        assert_eq!(parser.parse("banks around 4").radius_km, Some(4.0));
        assert_eq!(parser.parse("hotels about 7").radius_km, Some(7.0));
    }

    #[test]
    fn test_bare_number_needs_category_and_range() {
        let parser = parser();

        // Terse "restaurants 5" is accepted
        let result = parser.parse("restaurants 5");
        assert_eq!(result.category, Some(Category::Restaurant));
        assert_eq!(result.radius_km, Some(5.0));

        // Out of range: likely an address number, not a radius
        assert_eq!(parser.parse("restaurants 25").radius_km, None);
        assert_eq!(parser.parse("restaurants 1").radius_km, None);

        // No category, no bare-number radius
        let result = parser.parse("42");
        assert_eq!(result.category, None);
        assert_eq!(result.radius_km, None);
    }

    #[test]
    fn test_misspelling_resolves() {
        let result = parser().parse("any resturant nearby");
        assert_eq!(result.category, Some(Category::Restaurant));
    }

    #[test]
    fn test_tie_breaks_to_earlier_category() {
        // "bank atm" scores one variant for Atm and one for Bank; Atm comes
        // first in lexicon order and must win the tie.
        let result = parser().parse("bank atm");
        assert_eq!(result.category, Some(Category::Atm));
    }

    #[test]
    fn test_parse_is_pure() {
        let parser = parser();
        let first = parser.parse("find cafes within 2 km");
        let second = parser.parse("find cafes within 2 km");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_utterance() {
        // The empty utterance matches every keyword by containment; the
        // highest-scoring first category wins, and no radius is extracted.
        let result = parser().parse("");
        assert_eq!(result.radius_km, None);
    }
}
