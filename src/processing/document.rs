//! Resume, job requirement and analysis data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entities derived once from a resume's text at upload time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntities {
    /// Lowercased candidate skill terms.
    pub skills: BTreeSet<String>,
    /// Best-guess years of experience, always below the noise cap.
    pub experience_years: u32,
    /// Organization spans in document order, duplicates kept.
    pub organizations: Vec<String>,
}

/// A resume as handed to the scorer: identity, raw text and entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: String,
    pub text: String,
    pub entities: ParsedEntities,
}

impl ResumeDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>, entities: ParsedEntities) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            entities,
        }
    }
}

/// Structured job requirement fields, as submitted for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_title: String,
    /// Free text; carried along but not used for scoring.
    pub job_description: String,
    /// Comma-separated skill terms.
    pub required_skills: String,
    /// Required years, parsed leniently.
    pub experience: String,
    /// Comma-separated education terms.
    pub education: String,
    pub company: Option<String>,
}

impl JobRequirement {
    /// Trimmed, lowercased, non-empty skill terms in submitted order.
    /// Duplicates are kept.
    pub fn skill_terms(&self) -> Vec<String> {
        split_terms(&self.required_skills).collect()
    }

    /// Trimmed, lowercased, non-empty education terms as a set.
    pub fn education_terms(&self) -> BTreeSet<String> {
        split_terms(&self.education).collect()
    }

    /// Required years of experience; blank or unparsable input means 0.
    pub fn required_experience(&self) -> u32 {
        self.experience.trim().parse().unwrap_or(0)
    }

    /// Lowercased whitespace-separated words of the job title.
    pub fn title_words(&self) -> Vec<String> {
        self.job_title
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn split_terms(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
}

/// The four scored dimensions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    #[serde(rename = "Skills Match")]
    Skills,
    #[serde(rename = "Experience Match")]
    Experience,
    #[serde(rename = "Education Match")]
    Education,
    #[serde(rename = "Title Relevance")]
    Title,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::Skills,
        CategoryKind::Experience,
        CategoryKind::Education,
        CategoryKind::Title,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Skills => "Skills Match",
            CategoryKind::Experience => "Experience Match",
            CategoryKind::Education => "Education Match",
            CategoryKind::Title => "Title Relevance",
        }
    }

    /// Fixed contribution to the overall score. The four weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            CategoryKind::Skills => 0.5,
            CategoryKind::Experience => 0.3,
            CategoryKind::Education => 0.15,
            CategoryKind::Title => 0.05,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCategory {
    pub category: CategoryKind,
    /// 0 to 100, rounded to one decimal.
    pub score: f64,
    pub matched_items: Vec<String>,
    pub missing_items: Vec<String>,
    pub details: Option<String>,
}

/// Display-only summary attached to each analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeInsights {
    pub top_skills: Vec<String>,
    pub experience_years: u32,
    pub matched_education: Vec<String>,
}

/// Deterministic part of an analysis: everything except identity and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub overall_score: f64,
    pub matches: Vec<MatchCategory>,
    pub suggestions: Vec<String>,
    pub resume_insights: ResumeInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub resume_id: String,
    pub overall_score: f64,
    pub matches: Vec<MatchCategory>,
    pub suggestions: Vec<String>,
    pub resume_insights: ResumeInsights,
    pub analysis_date: DateTime<Utc>,
}

impl AnalysisResult {
    /// Stamp an outcome with a fresh id and the current time.
    pub fn new(resume_id: impl Into<String>, outcome: MatchOutcome) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            resume_id: resume_id.into(),
            overall_score: outcome.overall_score,
            matches: outcome.matches,
            suggestions: outcome.suggestions,
            resume_insights: outcome.resume_insights,
            analysis_date: Utc::now(),
        }
    }

    pub fn category(&self, kind: CategoryKind) -> Option<&MatchCategory> {
        self.matches.iter().find(|m| m.category == kind)
    }
}
