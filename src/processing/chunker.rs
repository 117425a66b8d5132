//! Named-entity chunking over tagged tokens

use crate::processing::tagger::TaggedToken;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "ORGANIZATION")]
    Organization,
    /// A proper-noun run with no organizational evidence.
    #[serde(rename = "NAME")]
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub tokens: Vec<String>,
}

impl EntitySpan {
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Words that may sit inside a proper-noun run, e.g. "Bank of America".
const CONNECTORS: &[&str] = &["of", "&"];

/// Words directly before a run that mark it as an employer.
const EMPLOYMENT_CUES: &[&str] = &["at", "@", "joined"];

const ORG_INDICATORS: &[&str] = &[
    "inc", "corp", "corporation", "llc", "ltd", "plc", "gmbh", "co", "company", "group",
    "technologies", "technology", "labs", "systems", "solutions", "software", "services",
    "consulting", "partners", "holdings", "bank", "university", "college", "institute", "school",
    "academy", "foundation", "association", "agency", "department", "ministry", "hospital",
];

#[derive(Default)]
pub struct NeChunker;

impl NeChunker {
    pub fn new() -> Self {
        Self
    }

    /// Group maximal proper-noun runs into labelled spans, in text order.
    pub fn chunk(&self, tagged: &[TaggedToken]) -> Vec<EntitySpan> {
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tagged.len() {
            if !tagged[i].tag.is_proper_noun() {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = i + 1;
            loop {
                if end < tagged.len() && tagged[end].tag.is_proper_noun() {
                    end += 1;
                } else if end + 1 < tagged.len()
                    && CONNECTORS.contains(&tagged[end].word.to_lowercase().as_str())
                    && tagged[end + 1].tag.is_proper_noun()
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let tokens: Vec<String> = tagged[start..end].iter().map(|t| t.word.clone()).collect();
            let cue_before = start > 0
                && EMPLOYMENT_CUES.contains(&tagged[start - 1].word.to_lowercase().as_str());
            let has_indicator = tokens
                .iter()
                .any(|t| ORG_INDICATORS.contains(&t.trim_end_matches('.').to_lowercase().as_str()));

            let label = if cue_before || has_indicator {
                EntityLabel::Organization
            } else {
                EntityLabel::Name
            };
            spans.push(EntitySpan { label, tokens });
            i = end;
        }

        spans
    }

    /// Organization names in text order, duplicates kept.
    pub fn organizations(&self, tagged: &[TaggedToken]) -> Vec<String> {
        self.chunk(tagged)
            .into_iter()
            .filter(|span| span.label == EntityLabel::Organization)
            .map(|span| span.text())
            .collect()
    }
}
