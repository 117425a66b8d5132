//! Rendering of analysis results for the terminal or as JSON

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::processing::document::AnalysisResult;
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

/// One analysed resume, labelled with the name it was uploaded under.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub resume_name: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

pub trait OutputFormatter {
    fn format_report(&self, entries: &[ReportEntry]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Strong
        } else if score >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "STRONG",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Weak => "WEAK",
        }
    }

    fn color(&self) -> Color {
        match self {
            ScoreBand::Strong => Color::Green,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Weak => Color::Red,
        }
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score(&self, score: f64) -> String {
        let band = ScoreBand::from_score(score);
        let text = format!("{:.1}% [{}]", score, band.label());
        if self.use_colors {
            text.color(band.color()).bold().to_string()
        } else {
            text
        }
    }

    fn format_entry(&self, entry: &ReportEntry) -> String {
        let result = &entry.result;
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📄 {}", entry.resume_name)));
        output.push_str(&format!("Overall Score: {}\n", self.format_score(result.overall_score)));

        for category in &result.matches {
            output.push_str(&format!(
                "  • {}: {}",
                category.category,
                self.format_score(category.score)
            ));
            if let Some(details) = &category.details {
                let details = self.colorize(&format!("({})", details), Color::BrightBlack);
                output.push_str(&format!(" {}", details));
            }
            output.push('\n');

            if self.detailed {
                if !category.matched_items.is_empty() {
                    output.push_str(&format!(
                        "      ✅ {}\n",
                        self.colorize(&category.matched_items.join(", "), Color::Green)
                    ));
                }
                if !category.missing_items.is_empty() {
                    output.push_str(&format!(
                        "      ⚠️  {}\n",
                        self.colorize(&category.missing_items.join(", "), Color::Yellow)
                    ));
                }
            }
        }

        if !result.suggestions.is_empty() {
            output.push_str("💡 Suggestions:\n");
            for suggestion in &result.suggestions {
                output.push_str(&format!("  • {}\n", suggestion));
            }
        }

        let insights = &result.resume_insights;
        if self.detailed {
            output.push_str(&format!("🧠 Experience: {} years\n", insights.experience_years));
            if !insights.top_skills.is_empty() {
                output.push_str(&format!("🔤 Top skills: {}\n", insights.top_skills.join(", ")));
            }
            if !insights.matched_education.is_empty() {
                let education = insights.matched_education.join(", ");
                output.push_str(&format!("🎓 Education: {}\n", education));
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, entries: &[ReportEntry]) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("📊 {} resume(s) analysed\n", entries.len()));
        for entry in entries {
            output.push_str(&self.format_entry(entry));
        }
        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, entries: &[ReportEntry]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(entries)?)
        } else {
            Ok(serde_json::to_string(entries)?)
        }
    }
}

pub fn formatter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => {
            Box::new(ConsoleFormatter::new(config.color_output, config.detailed))
        }
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{JobRequirement, ParsedEntities};
    use crate::processing::scorer::MatchScorer;

    fn entry() -> ReportEntry {
        let job = JobRequirement {
            job_title: "Data Engineer".to_string(),
            required_skills: "python, sql".to_string(),
            experience: "3".to_string(),
            ..Default::default()
        };
        let entities = ParsedEntities {
            experience_years: 5,
            ..Default::default()
        };
        let result = MatchScorer::new().score("r1", &entities, "python and spark", &job);
        ReportEntry {
            resume_name: "cv.txt".to_string(),
            result,
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(59.9), ScoreBand::Weak);
    }

    #[test]
    fn test_console_report_lists_categories_and_suggestions() {
        let report = ConsoleFormatter::new(false, true).format_report(&[entry()]).unwrap();

        assert!(report.contains("cv.txt"));
        assert!(report.contains("Skills Match: 50.0% [WEAK] (1 / 2 skills matched)"));
        assert!(report.contains("Experience Match: 100.0% [STRONG]"));
        assert!(report.contains("Add or highlight: sql"));
        assert!(report.contains("Experience: 5 years"));
    }

    #[test]
    fn test_json_report_flattens_result() {
        let report = JsonFormatter::new(false).format_report(&[entry()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value[0]["resume_name"], "cv.txt");
        assert_eq!(value[0]["resume_id"], "r1");
        assert_eq!(value[0]["matches"][0]["category"], "Skills Match");
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("out.json");
        save_report_to_file("[]", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
