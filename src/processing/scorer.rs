//! Scoring a resume against a job requirement
//!
//! Four independent categories (skills, experience, education, title) are
//! scored on a 0 to 100 scale and combined with fixed weights:
//!
//! | Category   | Weight |
//! |------------|--------|
//! | Skills     | 0.50   |
//! | Experience | 0.30   |
//! | Education  | 0.15   |
//! | Title      | 0.05   |
//!
//! Skills and title are matched against the raw resume text, not against the
//! extracted skill set. Only skill and experience gaps produce suggestions.

use crate::processing::document::{
    AnalysisResult, CategoryKind, JobRequirement, MatchCategory, MatchOutcome, ParsedEntities,
    ResumeInsights,
};
use crate::processing::matcher::{contains_whole_word, find_terms_in_text, AlternationMatcher};
use std::collections::BTreeSet;

/// Number of matched skills surfaced in the insights.
const TOP_SKILLS: usize = 5;

const TRANSFERABLE_EXPERIENCE_SUGGESTION: &str = "Emphasise transferable experience.";

/// Round to one decimal place, ties to even on the exact binary value.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

fn ratio_percent(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(matched as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one resume and stamp the outcome with an id and timestamp.
    pub fn score(
        &self,
        resume_id: &str,
        entities: &ParsedEntities,
        resume_text: &str,
        job: &JobRequirement,
    ) -> AnalysisResult {
        AnalysisResult::new(resume_id, self.evaluate(entities, resume_text, job))
    }

    /// Deterministic scoring of one resume against one requirement.
    pub fn evaluate(
        &self,
        entities: &ParsedEntities,
        resume_text: &str,
        job: &JobRequirement,
    ) -> MatchOutcome {
        let mut suggestions = Vec::new();

        let (skills, matched_skills) = self.skills_match(job, resume_text);
        if !skills.missing_items.is_empty() {
            suggestions.push(format!("Add or highlight: {}", skills.missing_items.join(", ")));
        }

        let resume_exp = entities.experience_years;
        let required_exp = job.required_experience();
        let experience = self.experience_match(resume_exp, required_exp);
        if resume_exp < required_exp {
            suggestions.push(TRANSFERABLE_EXPERIENCE_SUGGESTION.to_string());
        }

        let education = self.education_match(job, resume_text);
        let title = self.title_match(job, resume_text);

        let matches = vec![skills, experience, education, title];
        let overall_score = round1(matches.iter().map(|m| m.score * m.category.weight()).sum());

        let resume_insights = ResumeInsights {
            top_skills: matched_skills.into_iter().take(TOP_SKILLS).collect(),
            experience_years: resume_exp,
            matched_education: matches[2].matched_items.clone(),
        };

        MatchOutcome {
            overall_score,
            matches,
            suggestions,
            resume_insights,
        }
    }

    fn skills_match(
        &self,
        job: &JobRequirement,
        resume_text: &str,
    ) -> (MatchCategory, Vec<String>) {
        let required = job.skill_terms();
        let matched = find_terms_in_text(&required, resume_text);

        let matched_set: BTreeSet<&String> = matched.iter().collect();
        let missing: Vec<String> = required
            .iter()
            .filter(|s| !matched_set.contains(s))
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let category = MatchCategory {
            category: CategoryKind::Skills,
            score: ratio_percent(matched.len(), required.len()),
            matched_items: matched.clone(),
            missing_items: missing,
            details: Some(format!("{} / {} skills matched", matched.len(), required.len())),
        };
        (category, matched)
    }

    fn experience_match(&self, resume_exp: u32, required_exp: u32) -> MatchCategory {
        let score = if required_exp > 0 {
            let ratio = f64::from(resume_exp) / f64::from(required_exp.max(1));
            round1(ratio.min(1.0) * 100.0)
        } else {
            100.0
        };

        let missing_items = if resume_exp < required_exp {
            vec![format!("{} years required", required_exp)]
        } else {
            Vec::new()
        };

        MatchCategory {
            category: CategoryKind::Experience,
            score,
            matched_items: vec![format!("{} years", resume_exp)],
            missing_items,
            details: Some(format!("Has {} vs needs {}", resume_exp, required_exp)),
        }
    }

    fn education_match(&self, job: &JobRequirement, resume_text: &str) -> MatchCategory {
        let required = job.education_terms();
        if required.is_empty() {
            return MatchCategory {
                category: CategoryKind::Education,
                score: 100.0,
                matched_items: Vec::new(),
                missing_items: Vec::new(),
                details: Some("No education requirements specified".to_string()),
            };
        }

        let matcher = AlternationMatcher::new(required.iter().map(String::as_str));
        let matched: Vec<String> = matcher
            .find_distinct(resume_text)
            .into_iter()
            .filter(|term| required.contains(term))
            .collect();
        let missing: Vec<String> = required
            .iter()
            .filter(|term| !matched.contains(term))
            .cloned()
            .collect();

        MatchCategory {
            category: CategoryKind::Education,
            score: ratio_percent(matched.len(), required.len()),
            details: Some(format!("Meets {} of {} requirements", matched.len(), required.len())),
            matched_items: matched,
            missing_items: missing,
        }
    }

    fn title_match(&self, job: &JobRequirement, resume_text: &str) -> MatchCategory {
        let words = job.title_words();
        let lower = resume_text.to_lowercase();
        let found = words.iter().filter(|w| contains_whole_word(&lower, w)).count();

        MatchCategory {
            category: CategoryKind::Title,
            score: ratio_percent(found, words.len()),
            matched_items: vec![job.job_title.clone()],
            missing_items: Vec::new(),
            details: Some(format!("{} of {} keywords matched", found, words.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::entities::EntityExtractor;

    const RESUME: &str =
        "Senior Python Developer with 6 years experience at Acme Corp, Bachelor's degree";

    fn job(title: &str, skills: &str, experience: &str, education: &str) -> JobRequirement {
        JobRequirement {
            job_title: title.to_string(),
            job_description: "Build backend services".to_string(),
            required_skills: skills.to_string(),
            experience: experience.to_string(),
            education: education.to_string(),
            company: None,
        }
    }

    fn entities(years: u32) -> ParsedEntities {
        ParsedEntities {
            experience_years: years,
            ..Default::default()
        }
    }

    fn weighted_sum(outcome: &MatchOutcome) -> f64 {
        outcome.matches.iter().map(|m| m.score * m.category.weight()).sum()
    }

    #[test]
    fn test_end_to_end_example() {
        let extracted = EntityExtractor::new().extract(RESUME);
        let outcome = MatchScorer::new().evaluate(
            &extracted,
            RESUME,
            &job("Python Developer", "python,java", "5", "bachelor's"),
        );

        let scores: Vec<f64> = outcome.matches.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![50.0, 100.0, 100.0, 100.0]);
        assert_eq!(outcome.overall_score, 75.0);
        assert_eq!(outcome.suggestions, vec!["Add or highlight: java"]);
        assert_eq!(outcome.resume_insights.top_skills, vec!["python"]);
        assert_eq!(outcome.resume_insights.experience_years, 6);
        assert_eq!(outcome.resume_insights.matched_education, vec!["bachelor's"]);
    }

    #[test]
    fn test_categories_have_fixed_order() {
        let outcome = MatchScorer::new().evaluate(&entities(0), "", &JobRequirement::default());
        let kinds: Vec<CategoryKind> = outcome.matches.iter().map(|m| m.category).collect();
        assert_eq!(kinds, CategoryKind::ALL.to_vec());
    }

    #[test]
    fn test_overall_is_weighted_sum() {
        let scorer = MatchScorer::new();
        let cases = [
            job("Data Engineer", "sql, spark, airflow", "8", "msc, phd"),
            job("", "", "", ""),
            job("Rust Engineer", "rust", "2", "bsc"),
        ];
        for case in &cases {
            let outcome = scorer.evaluate(&entities(3), "Rust engineer, SQL and Spark, MSc", case);
            assert!((outcome.overall_score - weighted_sum(&outcome)).abs() <= 0.1);
        }
    }

    #[test]
    fn test_no_required_skills_scores_zero() {
        let outcome = MatchScorer::new().evaluate(&entities(0), RESUME, &job("x", " , ", "", ""));
        let skills = &outcome.matches[0];
        assert_eq!(skills.score, 0.0);
        assert!(skills.matched_items.is_empty());
        assert!(skills.missing_items.is_empty());
    }

    #[test]
    fn test_all_skills_present_scores_hundred() {
        let outcome = MatchScorer::new().evaluate(
            &entities(0),
            "Python, SQL and Docker",
            &job("", "python,sql,docker", "", ""),
        );
        assert_eq!(outcome.matches[0].score, 100.0);
        assert!(outcome.suggestions.is_empty());
    }

    #[test]
    fn test_missing_skills_are_sorted() {
        let outcome =
            MatchScorer::new().evaluate(&entities(0), "go", &job("", "rust, go, c++, ada", "", ""));
        assert_eq!(outcome.matches[0].missing_items, vec!["ada", "c++", "rust"]);
        assert_eq!(outcome.suggestions, vec!["Add or highlight: ada, c++, rust"]);
    }

    #[test]
    fn test_skills_use_text_not_extracted_set() {
        let mut extracted = entities(0);
        extracted.skills.insert("kotlin".to_string());
        let requirement = job("", "kotlin", "", "");
        let outcome = MatchScorer::new().evaluate(&extracted, "no relevant words", &requirement);
        assert_eq!(outcome.matches[0].score, 0.0);
    }

    #[test]
    fn test_experience_scoring() {
        let scorer = MatchScorer::new();
        let none_required = scorer.evaluate(&entities(0), "", &job("", "", "", ""));
        assert_eq!(none_required.matches[1].score, 100.0);

        let enough = scorer.evaluate(&entities(7), "", &job("", "", "5", ""));
        assert_eq!(enough.matches[1].score, 100.0);
        assert!(enough.matches[1].missing_items.is_empty());

        let short = scorer.evaluate(&entities(2), "", &job("", "", "3", ""));
        let category = &short.matches[1];
        assert!(category.score > 0.0 && category.score < 100.0);
        assert_eq!(category.score, 66.7);
        assert_eq!(category.missing_items, vec!["3 years required"]);
        assert_eq!(category.matched_items, vec!["2 years"]);
        assert_eq!(short.suggestions, vec![TRANSFERABLE_EXPERIENCE_SUGGESTION]);
    }

    #[test]
    fn test_unparsable_experience_requirement_counts_as_zero() {
        let outcome = MatchScorer::new().evaluate(&entities(0), "", &job("", "", "several", ""));
        assert_eq!(outcome.matches[1].score, 100.0);
        assert!(outcome.suggestions.is_empty());
    }

    #[test]
    fn test_empty_education_requirement() {
        let outcome = MatchScorer::new().evaluate(&entities(0), RESUME, &job("", "", "", " "));
        let education = &outcome.matches[2];
        assert_eq!(education.score, 100.0);
        assert!(education.matched_items.is_empty());
        assert!(education.missing_items.is_empty());
        assert_eq!(education.details.as_deref(), Some("No education requirements specified"));
    }

    #[test]
    fn test_partial_education_match() {
        let outcome = MatchScorer::new().evaluate(
            &entities(0),
            "MSc in Physics",
            &job("", "", "", "phd, msc, MSc"),
        );
        let education = &outcome.matches[2];
        assert_eq!(education.score, 50.0);
        assert_eq!(education.matched_items, vec!["msc"]);
        assert_eq!(education.missing_items, vec!["phd"]);
        assert!(outcome.suggestions.is_empty());
    }

    #[test]
    fn test_title_relevance() {
        let scorer = MatchScorer::new();
        let outcome =
            scorer.evaluate(&entities(0), RESUME, &job("Lead Python Developer", "", "", ""));
        let title = &outcome.matches[3];
        assert_eq!(title.score, 66.7);
        assert_eq!(title.matched_items, vec!["Lead Python Developer"]);
        assert!(title.missing_items.is_empty());

        for blank in ["", "   "] {
            let outcome = scorer.evaluate(&entities(0), RESUME, &job(blank, "", "", ""));
            assert_eq!(outcome.matches[3].score, 0.0);
        }
    }

    #[test]
    fn test_top_skills_capped_at_five_in_match_order() {
        let text = "a b c d e f g";
        let outcome =
            MatchScorer::new().evaluate(&entities(0), text, &job("", "g,f,e,d,c,b,a", "", ""));
        assert_eq!(outcome.resume_insights.top_skills, vec!["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn test_score_stamps_identity() {
        let result = MatchScorer::new().score(
            "resume-1",
            &entities(0),
            RESUME,
            &job("Developer", "python", "", ""),
        );
        assert_eq!(result.resume_id, "resume-1");
        assert!(!result.id.is_empty());
        assert_eq!(result.matches.len(), 4);
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        assert_eq!(round1(6.25), 6.2);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(66.666), 66.7);

        let skills: Vec<String> = (0..16).map(|i| format!("s{}", i)).collect();
        let outcome =
            MatchScorer::new().evaluate(&entities(0), "s0", &job("", &skills.join(","), "", ""));
        assert_eq!(outcome.matches[0].score, 6.2);
        assert_eq!(outcome.overall_score, 48.1);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let scorer = MatchScorer::new();
        let requirement = job("Python Developer", "python,java,sql", "10", "bachelor's, master's");
        let a = scorer.evaluate(&entities(4), RESUME, &requirement);
        let b = scorer.evaluate(&entities(4), RESUME, &requirement);
        assert_eq!(a, b);
    }
}
