//! Entity extraction: candidate skills, organizations and years of experience

use crate::error::{MatcherError, Result};
use crate::processing::chunker::NeChunker;
use crate::processing::document::ParsedEntities;
use crate::processing::tagger::PosTagger;
use crate::processing::text_processor::TextProcessor;
use log::{debug, error};
use regex::Regex;

/// Experience figures at or above this are treated as parsing noise.
pub const MAX_EXPERIENCE_YEARS: u32 = 40;

pub struct EntityExtractor {
    processor: TextProcessor,
    tagger: PosTagger,
    chunker: NeChunker,
    experience_regex: Regex,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        let experience_regex = Regex::new(r"(?i)(\d+)\+?\s*(?:yrs?|years?)")
            .expect("Invalid experience regex");

        Self {
            processor: TextProcessor::new(),
            tagger: PosTagger::new(),
            chunker: NeChunker::new(),
            experience_regex,
        }
    }

    /// Extract entities, falling back to the empty bundle on any failure.
    pub fn extract(&self, text: &str) -> ParsedEntities {
        match self.try_extract(text) {
            Ok(entities) => entities,
            Err(e) => {
                error!("Entity parse error: {}", e);
                ParsedEntities::default()
            }
        }
    }

    pub fn try_extract(&self, text: &str) -> Result<ParsedEntities> {
        let clean = self.processor.normalize_whitespace(text);
        let tokens = self.processor.tokenize(&clean);
        let tagged = self.tagger.tag(&tokens);

        if tagged.len() != tokens.len() {
            return Err(MatcherError::TextProcessing(format!(
                "tagger returned {} tags for {} tokens",
                tagged.len(),
                tokens.len()
            )));
        }

        let skills = tagged
            .iter()
            .filter(|t| t.tag.is_skill_candidate())
            .map(|t| t.word.to_lowercase())
            .collect();

        let organizations = self.chunker.organizations(&tagged);
        let experience_years = self.experience_years(&clean);

        let entities = ParsedEntities {
            skills,
            experience_years,
            organizations,
        };
        debug!(
            "Extracted {} skills, {} organizations, {} years",
            entities.skills.len(),
            entities.organizations.len(),
            entities.experience_years
        );
        Ok(entities)
    }

    /// Largest "N years" figure below the noise cap, or 0.
    pub fn experience_years(&self, text: &str) -> u32 {
        self.experience_regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1)?.as_str().parse::<u32>().ok())
            .filter(|years| *years < MAX_EXPERIENCE_YEARS)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_discards_noise_values() {
        let extractor = EntityExtractor::new();
        let text = "5+ years of Python, 45 years of experience in another field";
        assert_eq!(extractor.extract(text).experience_years, 5);
    }

    #[test]
    fn test_experience_pattern_variants() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.experience_years("3 yrs Java, 7YEARS Go, 2 yr Rust"), 7);
        assert_eq!(extractor.experience_years("10+years leading teams"), 10);
        assert_eq!(extractor.experience_years("no figures here"), 0);
        assert_eq!(extractor.experience_years("40 years old company"), 0);
        assert_eq!(extractor.experience_years("99999999999999999999 years"), 0);
    }

    #[test]
    fn test_skills_are_lowercased_nouns_and_adjectives() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("Senior engineer building scalable systems and APIs.");
        assert!(entities.skills.contains("senior"));
        assert!(entities.skills.contains("engineer"));
        assert!(entities.skills.contains("scalable"));
        assert!(entities.skills.contains("systems"));
        assert!(!entities.skills.contains("and"));
        assert!(!entities.skills.contains("building"));
        assert!(entities.skills.iter().all(|s| *s == s.to_lowercase()));
    }

    #[test]
    fn test_whitespace_is_normalized_before_extraction() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("Worked\n\nat   Initech\tLLC\nfor 4\n years");
        assert_eq!(entities.organizations, vec!["Initech LLC"]);
        assert_eq!(entities.experience_years, 4);
    }

    #[test]
    fn test_empty_text_yields_empty_entities() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract(""), ParsedEntities::default());
        assert_eq!(extractor.extract("   \n\t "), ParsedEntities::default());
    }
}
