//! Whole-word term matching against resume text
//!
//! A term matches when it occurs bounded on each side by a non-word
//! character or the edge of the text, ignoring case. Terms that begin or end
//! with a symbol (`c++`, `.net`) are handled by asserting a non-boundary on
//! that side, so the neighbouring character must also be a non-word character.

use log::warn;
use regex::Regex;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn edge_assertion(edge: Option<char>) -> &'static str {
    match edge {
        Some(c) if is_word_char(c) => r"\b",
        Some(_) => r"\B",
        None => "",
    }
}

/// Regex fragment matching `term` as a whole word.
pub fn whole_word_pattern(term: &str) -> String {
    format!(
        "{}{}{}",
        edge_assertion(term.chars().next()),
        regex::escape(term),
        edge_assertion(term.chars().last()),
    )
}

/// Case-insensitive whole-word regex for a single term.
pub fn whole_word_regex(term: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i){}", whole_word_pattern(term))) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Cannot build matcher for term '{}': {}", term, e);
            None
        }
    }
}

pub fn contains_whole_word(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    whole_word_regex(term).is_some_and(|re| re.is_match(text))
}

/// The subset of `terms` present in `text`, in the order of `terms`.
/// Duplicated terms are reported once per occurrence in `terms`.
pub fn find_terms_in_text(terms: &[String], text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    terms
        .iter()
        .filter(|term| contains_whole_word(&lower, &term.to_lowercase()))
        .cloned()
        .collect()
}

/// One alternation over several terms, reporting each distinct term found.
pub struct AlternationMatcher {
    regex: Option<Regex>,
}

impl AlternationMatcher {
    pub fn new<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut terms: Vec<&str> = terms.into_iter().filter(|t| !t.is_empty()).collect();
        // Longest first so that "master's" wins over "master" at the same position.
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();

        if terms.is_empty() {
            return Self { regex: None };
        }

        let alternation = terms
            .iter()
            .map(|t| whole_word_pattern(t))
            .collect::<Vec<_>>()
            .join("|");

        let regex = match Regex::new(&format!("(?i)(?:{})", alternation)) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Cannot build alternation over {} terms: {}", terms.len(), e);
                None
            }
        };
        Self { regex }
    }

    /// Distinct lowercased matches in order of first appearance.
    pub fn find_distinct(&self, text: &str) -> Vec<String> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let lower = text.to_lowercase();
        let mut found: Vec<String> = Vec::new();
        for m in regex.find_iter(&lower) {
            let term = m.as_str().to_string();
            if !found.contains(&term) {
                found.push(term);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_is_case_insensitive() {
        assert!(contains_whole_word("Senior PYTHON developer", "python"));
    }

    #[test]
    fn test_substrings_inside_words_do_not_match() {
        assert!(!contains_whole_word("javascript expert", "java"));
        assert!(!contains_whole_word("golang", "go"));
    }

    #[test]
    fn test_symbol_terms_respect_boundaries() {
        assert!(contains_whole_word("c++ developer", "c++"));
        assert!(contains_whole_word("knows c++", "c++"));
        assert!(!contains_whole_word("c++x", "c++"));
        assert!(contains_whole_word("built on .net core", ".net"));
        assert!(!contains_whole_word("asp.net", ".net"));
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(!contains_whole_word("anything", ""));
    }

    #[test]
    fn test_find_terms_keeps_requirement_order() {
        let terms = vec!["sql".to_string(), "rust".to_string(), "go".to_string()];
        assert_eq!(find_terms_in_text(&terms, "Rust and SQL"), vec!["sql", "rust"]);
    }

    #[test]
    fn test_alternation_reports_distinct_terms() {
        let matcher = AlternationMatcher::new(["bsc", "msc", "phd"]);
        let found = matcher.find_distinct("BSc in CS, MSc in AI, another BSc");
        assert_eq!(found, vec!["bsc", "msc"]);
    }

    #[test]
    fn test_alternation_prefers_longest_term() {
        let matcher = AlternationMatcher::new(["master", "master's"]);
        assert_eq!(matcher.find_distinct("Master's degree"), vec!["master's"]);
    }

    #[test]
    fn test_empty_alternation_finds_nothing() {
        let matcher = AlternationMatcher::new(std::iter::empty());
        assert!(matcher.find_distinct("bsc").is_empty());
    }
}
