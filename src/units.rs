//! The vocabulary of units a quantity must be followed by.
//!
//! Units only bound a match; they are never converted or interpreted. Each entry is a regular
//! expression fragment, matched case-insensitively. Order matters: alternatives are tried in
//! sequence and the first one that completes a match wins, so "c" gives way to "cups" only
//! because the trailing word boundary fails after "c".

/// Default units, volume first, then mass and weight.
///
/// Technically incorrect but common forms (such as "tsps") are accepted on purpose.
pub const DEFAULT_UNITS: &[&str] = &[
    // Volume
    "t|tsps?|teaspoons?",
    "tbl|tbs|tbsps?|tablespoons?",
    r"(?:(?:fl|fluid)\s+)?(?:oz|ounces?)",
    "gills?",
    "c|cups?",
    r"(?:(?:fl|fluid)\s+)?(?:p|pts?|pints?)",
    r"(?:(?:fl|fluid)\s+)?(?:q|qts?|quarts?)",
    "g|gals?|gallons?",
    "ml?|milliliters?|millilitres?|cc",
    "l|liters?|litres?",
    "dl|deciliters?|decilitres?",
    // Mass and weight
    "lbs?|#|pounds?",
    "mg|milligrams?|milligrammes?",
    "g|grams?|grammes?",
    "kgs?|kilograms?|kilogrammes?",
];

/// An ordered list of unit patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitVocabulary {
    patterns: Vec<String>,
}

impl Default for UnitVocabulary {
    /// Return the [`DEFAULT_UNITS`] vocabulary.
    fn default() -> Self {
        Self::from_patterns(DEFAULT_UNITS.iter().copied())
    }
}

impl UnitVocabulary {
    /// Build a vocabulary from regular expression fragments, kept in the given order.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a vocabulary from literal unit names, escaping any special characters.
    ///
    /// ```
    /// use recipe_scaler::units::UnitVocabulary;
    ///
    /// let units = UnitVocabulary::from_terms(["pinch", "dash"]);
    /// assert_eq!(units.pattern(), "pinch|dash");
    /// ```
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: terms
                .into_iter()
                .map(|term| regex::escape(term.as_ref()))
                .collect(),
        }
    }

    /// The patterns in order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// All patterns joined into a single alternation, without an enclosing group.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.patterns.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn matches_whole(units: &UnitVocabulary, text: &str) -> bool {
        Regex::new(&format!("(?i)^(?:{})$", units.pattern()))
            .unwrap()
            .is_match(text)
    }

    #[test]
    fn default_vocabulary_compiles() {
        let units = UnitVocabulary::default();
        assert_eq!(units.patterns().len(), DEFAULT_UNITS.len());
        Regex::new(&units.pattern()).unwrap();
    }

    #[test]
    fn default_vocabulary_terms() {
        let units = UnitVocabulary::default();
        for term in [
            "t", "tsp", "tsps", "Teaspoon", "TBSP", "tablespoons", "oz", "fl oz", "fluid ounces",
            "gill", "c", "cups", "pint", "qt", "gal", "ml", "cc", "litre", "dl", "lbs", "#",
            "pound", "mg", "g", "grammes", "kg", "kilograms",
        ] {
            assert!(matches_whole(&units, term), "{term} should be a unit");
        }
    }

    #[test]
    fn default_vocabulary_rejects() {
        let units = UnitVocabulary::default();
        for term in ["eggs", "px", "cloves", "pinch"] {
            assert!(!matches_whole(&units, term), "{term} should not be a unit");
        }
    }

    #[test]
    fn terms_are_escaped() {
        let units = UnitVocabulary::from_terms(["c.", "a+b"]);
        assert_eq!(units.pattern(), r"c\.|a\+b");
    }
}
