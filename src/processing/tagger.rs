//! Part-of-speech tagging over word tokens
//!
//! A deterministic lexicon and suffix-rule tagger that emits Penn Treebank
//! categories. Closed-class words come from fixed word lists; open-class
//! words are decided by capitalization and morphology.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    PluralNoun,
    ProperNoun,
    ProperPluralNoun,
    Adjective,
    ComparativeAdjective,
    SuperlativeAdjective,
    Verb,
    PastVerb,
    Gerund,
    PresentVerb,
    ThirdPersonVerb,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Number,
    Pronoun,
    PossessivePronoun,
    Possessive,
    Modal,
    To,
    WhWord,
    Symbol,
    Punctuation,
}

impl PosTag {
    /// Penn Treebank tag string.
    pub fn penn(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::PluralNoun => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::ProperPluralNoun => "NNPS",
            PosTag::Adjective => "JJ",
            PosTag::ComparativeAdjective => "JJR",
            PosTag::SuperlativeAdjective => "JJS",
            PosTag::Verb => "VB",
            PosTag::PastVerb => "VBD",
            PosTag::Gerund => "VBG",
            PosTag::PresentVerb => "VBP",
            PosTag::ThirdPersonVerb => "VBZ",
            PosTag::Adverb => "RB",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Conjunction => "CC",
            PosTag::Number => "CD",
            PosTag::Pronoun => "PRP",
            PosTag::PossessivePronoun => "PRP$",
            PosTag::Possessive => "POS",
            PosTag::Modal => "MD",
            PosTag::To => "TO",
            PosTag::WhWord => "WP",
            PosTag::Symbol => "SYM",
            PosTag::Punctuation => ".",
        }
    }

    /// Tags whose tokens are treated as candidate skills.
    pub fn is_skill_candidate(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::PluralNoun | PosTag::Adjective)
    }

    pub fn is_closed_class(&self) -> bool {
        matches!(
            self,
            PosTag::Determiner
                | PosTag::Preposition
                | PosTag::Conjunction
                | PosTag::Pronoun
                | PosTag::PossessivePronoun
                | PosTag::Modal
                | PosTag::To
                | PosTag::WhWord
        )
    }

    pub fn is_proper_noun(&self) -> bool {
        matches!(self, PosTag::ProperNoun | PosTag::ProperPluralNoun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: PosTag,
}

/// Tokens after which the next word starts a new sentence or list item.
const SENTENCE_BREAKS: &[&str] = &[".", "!", "?", ":", ";", "•", "|", "·", "*"];

pub struct PosTagger {
    lexicon: HashMap<&'static str, PosTag>,
}

impl Default for PosTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl PosTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        let groups: [(&[&'static str], PosTag); 15] = [
            (DETERMINERS, PosTag::Determiner),
            (PREPOSITIONS, PosTag::Preposition),
            (CONJUNCTIONS, PosTag::Conjunction),
            (PRONOUNS, PosTag::Pronoun),
            (POSSESSIVE_PRONOUNS, PosTag::PossessivePronoun),
            (MODALS, PosTag::Modal),
            (TO, PosTag::To),
            (WH_WORDS, PosTag::WhWord),
            (BASE_VERBS, PosTag::Verb),
            (PRESENT_VERBS, PosTag::PresentVerb),
            (THIRD_PERSON_VERBS, PosTag::ThirdPersonVerb),
            (PAST_VERBS, PosTag::PastVerb),
            (ADVERBS, PosTag::Adverb),
            (ADJECTIVES, PosTag::Adjective),
            (NOUNS, PosTag::Noun),
        ];
        for (words, tag) in groups {
            for word in words {
                lexicon.insert(*word, tag);
            }
        }
        for word in ["more", "better", "greater", "larger", "higher"] {
            lexicon.insert(word, PosTag::ComparativeAdjective);
        }
        for word in ["most", "best", "largest", "highest"] {
            lexicon.insert(word, PosTag::SuperlativeAdjective);
        }

        Self { lexicon }
    }

    /// Tag a token sequence. The output has exactly one entry per token.
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let sentence_start = i == 0 || SENTENCE_BREAKS.contains(&tokens[i - 1].as_str());
                let next = tokens.get(i + 1).map(String::as_str);
                TaggedToken {
                    word: word.clone(),
                    tag: self.tag_word(word, sentence_start, next),
                }
            })
            .collect()
    }

    fn tag_word(&self, word: &str, sentence_start: bool, next: Option<&str>) -> PosTag {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().any(|c| matches!(c, '$' | '%' | '&' | '+' | '#' | '@')) {
                PosTag::Symbol
            } else {
                PosTag::Punctuation
            };
        }

        let lower = word.to_lowercase();
        if lower == "'s" || lower == "\u{2019}s" {
            return PosTag::Possessive;
        }
        if is_number(word) {
            return PosTag::Number;
        }
        if lower == "i" {
            return PosTag::Pronoun;
        }

        if is_acronym(word) {
            return PosTag::ProperNoun;
        }

        if starts_uppercase(word) {
            if !sentence_start {
                return match self.lexicon.get(lower.as_str()) {
                    Some(tag) if tag.is_closed_class() => *tag,
                    _ => self.proper(&lower),
                };
            }
            // Sentence-initial capitals are ambiguous: trust the lexicon,
            // otherwise treat a capitalized run as a name.
            if let Some(tag) = self.lexicon.get(lower.as_str()) {
                return *tag;
            }
            if next.is_some_and(|n| starts_uppercase(n) && n.chars().any(char::is_alphabetic)) {
                return self.proper(&lower);
            }
        }

        if let Some(tag) = self.lexicon.get(lower.as_str()) {
            return *tag;
        }

        self.by_suffix(&lower)
    }

    fn proper(&self, lower: &str) -> PosTag {
        let singular = lower
            .strip_suffix('s')
            .filter(|stem| stem.len() > 2 && !stem.ends_with('s'));
        if singular.is_some_and(|stem| self.lexicon.get(stem) == Some(&PosTag::Noun)) {
            PosTag::ProperPluralNoun
        } else {
            PosTag::ProperNoun
        }
    }

    fn by_suffix(&self, lower: &str) -> PosTag {
        let len = lower.chars().count();

        if len > 4 && lower.ends_with("ly") {
            return PosTag::Adverb;
        }
        if len > 4 && lower.ends_with("ing") {
            return PosTag::Gerund;
        }
        if len > 4 && lower.ends_with("ed") {
            return PosTag::PastVerb;
        }
        if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PosTag::Adjective;
        }
        if len > 3
            && lower.ends_with('s')
            && !NON_PLURAL_ENDINGS.iter().any(|s| lower.ends_with(s))
            && lower.chars().all(|c| c.is_alphabetic() || c == '-')
        {
            return PosTag::PluralNoun;
        }
        PosTag::Noun
    }
}

fn is_number(word: &str) -> bool {
    let digits = word.chars().filter(char::is_ascii_digit).count();
    digits > 0 && word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/'))
}

fn is_acronym(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && word.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ic", "ish", "ary", "ent", "ant",
];

const NON_PLURAL_ENDINGS: &[&str] = &["ss", "us", "is", "ous", "ics", "sys"];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "every", "each", "all", "some", "any",
    "no", "another", "both", "either", "neither",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "about", "over", "under",
    "between", "through", "during", "before", "after", "across", "against", "among", "around",
    "within", "without", "upon", "via", "per", "than", "since", "until", "toward", "towards",
    "along", "throughout", "like", "as", "if", "because", "while", "whereas", "including",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus", "&"];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself",
    "itself", "ourselves", "themselves",
];

const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const MODALS: &[&str] = &[
    "can", "could", "will", "would", "shall", "should", "may", "might", "must",
];

const TO: &[&str] = &["to"];

const WH_WORDS: &[&str] = &["which", "what", "who", "whom", "whose", "where", "when", "why", "how"];

const BASE_VERBS: &[&str] = &["be", "do", "have", "make", "lead", "build", "manage", "work"];

const PRESENT_VERBS: &[&str] = &["am", "are"];

const THIRD_PERSON_VERBS: &[&str] = &["is", "has", "does"];

const PAST_VERBS: &[&str] = &[
    "was", "were", "been", "had", "did", "led", "built", "wrote", "ran", "made", "grew", "drove",
    "taught", "won", "began", "became", "held", "oversaw",
];

const ADVERBS: &[&str] = &[
    "not", "also", "very", "well", "only", "just", "too", "then", "now", "often", "always",
    "never", "currently", "here", "there", "again", "already", "still",
];

const ADJECTIVES: &[&str] = &[
    "senior", "junior", "lead", "principal", "strong", "good", "excellent", "new", "several",
    "various", "key", "main", "strategic", "technical", "professional", "solid", "deep", "broad",
    "remote", "hybrid", "full", "high", "large", "small", "modern", "agile", "scalable", "other",
    "many", "much", "few", "first", "last", "next", "previous", "current", "proficient", "fluent",
    "native", "responsible", "hands-on", "cross-functional", "real-time", "open-source",
];

/// Open-class nouns whose endings would otherwise mislead the suffix rules.
const NOUNS: &[&str] = &[
    "experience", "engineering", "training", "testing", "marketing", "accounting", "learning",
    "programming", "analytics", "statistics", "physics", "mathematics", "economics", "business",
    "process", "access", "address", "class", "status", "campus", "bachelor", "master", "degree",
    "diploma", "certificate", "university", "college", "design", "development", "management",
    "software", "data", "cloud", "security", "infrastructure", "team", "project", "product",
    "engineer", "developer", "manager", "analyst", "architect", "consultant", "python", "java",
    "rust", "go", "sql", "excel", "kubernetes", "docker", "ms", "phd", "mba", "bsc", "msc",
];
