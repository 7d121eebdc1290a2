use regex::Regex;

/// Canonicalizes free text to lowercase `[a-z0-9 ]` with single spaces.
#[derive(Debug, Clone)]
pub struct Normalizer {
    disallowed: Regex,
    whitespace: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            // Patterns are literals; they cannot fail to compile
            disallowed: Regex::new(r"[^a-z0-9\s]").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Lowercase, replace anything outside `[a-z0-9\s]` with a space,
    /// collapse whitespace runs and trim.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let replaced = self.disallowed.replace_all(&lowered, " ");
        let collapsed = self.whitespace.replace_all(&replaced, " ");
        collapsed.trim().to_string()
    }

    /// Ingredient-term variant: trims and lowercases before applying the
    /// same character rule. Output is identical to [`Normalizer::normalize`].
    pub fn normalize_term(&self, term: &str) -> String {
        self.normalize(term.trim())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
            && !s.contains("  ")
            && !s.starts_with(' ')
            && !s.ends_with(' ')
    }

    #[test]
    fn test_normalize_basic() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("Fried Rice!"), "fried rice");
        assert_eq!(n.normalize("  1/2 cup   Sugar,\tfine "), "1 2 cup sugar fine");
        assert_eq!(n.normalize("Confectioners' Sugar"), "confectioners sugar");
    }

    #[test]
    fn test_normalize_empty() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("!!! ---"), "");
    }

    #[test]
    fn test_normalize_non_ascii() {
        let n = Normalizer::new();
        // Accented letters are outside [a-z0-9]
        assert_eq!(n.normalize("Crème Brûlée"), "cr me br l e");
        assert_eq!(n.normalize("JALAPEÑO peppers"), "jalape o peppers");
    }

    #[test]
    fn test_normalize_idempotent_and_canonical() {
        let n = Normalizer::new();
        let inputs = [
            "Chicken & Waffles",
            "  ½ tsp. salt\n\n",
            "2 (14.5 oz) cans TOMATOES",
            "ÉCLAIR",
            "",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once);
            assert!(is_canonical(&once), "not canonical: {once:?}");
        }
    }

    #[test]
    fn test_normalize_term_matches_normalize() {
        let n = Normalizer::new();
        assert_eq!(n.normalize_term("  Green Onion "), "green onion");
        assert_eq!(n.normalize_term("Green-Onion"), n.normalize("Green-Onion"));
    }
}
