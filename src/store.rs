//! JSON-file store for uploaded resumes and their analyses
//!
//! Two documents live under the data directory, `resumes.json` and
//! `analyses.json`. Every mutation rewrites the affected document through a
//! temporary file in the same directory followed by a rename.

use crate::config::StorageConfig;
use crate::error::{MatcherError, Result};
use crate::processing::document::{
    AnalysisResult, MatchCategory, ParsedEntities, ResumeDocument, ResumeInsights,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

const RESUMES_FILE: &str = "resumes.json";
const ANALYSES_FILE: &str = "analyses.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: String,
    pub name: String,
    pub file_path: PathBuf,
    pub upload_date: DateTime<Utc>,
    pub content: String,
    pub parsed_data: ParsedEntities,
}

impl ResumeRecord {
    pub fn to_document(&self) -> ResumeDocument {
        ResumeDocument::new(self.id.clone(), self.content.clone(), self.parsed_data.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub resume_id: String,
    pub overall_score: f64,
    pub matches: Vec<MatchCategory>,
    pub suggestions: Vec<String>,
    pub resume_insights: ResumeInsights,
    pub analysis_date: DateTime<Utc>,
    /// Title of the requirement the resume was scored against.
    #[serde(default)]
    pub job_title: String,
}

impl AnalysisRecord {
    pub fn from_result(result: &AnalysisResult, job_title: &str) -> Self {
        Self {
            id: result.id.clone(),
            resume_id: result.resume_id.clone(),
            overall_score: result.overall_score,
            matches: result.matches.clone(),
            suggestions: result.suggestions.clone(),
            resume_insights: result.resume_insights.clone(),
            analysis_date: result.analysis_date,
            job_title: job_title.to_string(),
        }
    }
}

pub struct Store {
    data_dir: PathBuf,
    uploads_dir: PathBuf,
    resumes: Vec<ResumeRecord>,
    analyses: Vec<AnalysisRecord>,
}

impl Store {
    /// Open the store, creating its directories when needed.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        std::fs::create_dir_all(&config.uploads_dir)?;

        let resumes: Vec<ResumeRecord> = read_document(&config.data_dir.join(RESUMES_FILE))?;
        let analyses: Vec<AnalysisRecord> = read_document(&config.data_dir.join(ANALYSES_FILE))?;
        info!(
            "Opened store at {} ({} resumes, {} analyses)",
            config.data_dir.display(),
            resumes.len(),
            analyses.len()
        );

        Ok(Self {
            data_dir: config.data_dir.clone(),
            uploads_dir: config.uploads_dir.clone(),
            resumes,
            analyses,
        })
    }

    /// Keep a copy of an uploaded document as `<id>.<ext>`.
    pub fn save_upload(&self, id: &str, bytes: &[u8], extension: &str) -> Result<PathBuf> {
        let path = self.uploads_dir.join(format!("{}.{}", id, extension));
        write_atomically(&path, bytes)?;
        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Append a resume. On a failed write the in-memory list is left unchanged.
    pub fn add_resume(&mut self, record: ResumeRecord) -> Result<()> {
        self.resumes.push(record);
        if let Err(e) = self.flush_resumes() {
            self.resumes.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Resumes in upload order.
    pub fn list_resumes(&self) -> &[ResumeRecord] {
        &self.resumes
    }

    pub fn get_resume(&self, id: &str) -> Result<&ResumeRecord> {
        self.resumes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("resume {}", id)))
    }

    /// Remove a resume, its stored document and every analysis of it.
    ///
    /// Each document is written before memory changes, analyses first, so a
    /// failed write never leaves analyses pointing at a missing resume.
    pub fn delete_resume(&mut self, id: &str) -> Result<ResumeRecord> {
        let position = self
            .resumes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| MatcherError::NotFound(format!("resume {}", id)))?;

        let kept: Vec<&AnalysisRecord> =
            self.analyses.iter().filter(|a| a.resume_id != id).collect();
        let removed = self.analyses.len() - kept.len();
        if removed > 0 {
            write_document(&self.data_dir.join(ANALYSES_FILE), &kept)?;
            self.analyses.retain(|a| a.resume_id != id);
        }

        let remaining: Vec<&ResumeRecord> = self.resumes.iter().filter(|r| r.id != id).collect();
        write_document(&self.data_dir.join(RESUMES_FILE), &remaining)?;
        let record = self.resumes.remove(position);

        if let Err(e) = std::fs::remove_file(&record.file_path) {
            warn!("Could not remove stored file {}: {}", record.file_path.display(), e);
        }
        info!("Deleted resume {} and {} analyses", id, removed);
        Ok(record)
    }

    /// Append analyses. On a failed write the in-memory list is left unchanged.
    pub fn add_analyses(
        &mut self,
        records: impl IntoIterator<Item = AnalysisRecord>,
    ) -> Result<()> {
        let len = self.analyses.len();
        self.analyses.extend(records);
        if let Err(e) = self.flush_analyses() {
            self.analyses.truncate(len);
            return Err(e);
        }
        Ok(())
    }

    /// All analyses in the order they were stored.
    pub fn analyses(&self) -> &[AnalysisRecord] {
        &self.analyses
    }

    pub fn analyses_for(&self, resume_id: &str) -> Vec<&AnalysisRecord> {
        self.analyses.iter().filter(|a| a.resume_id == resume_id).collect()
    }

    fn flush_resumes(&self) -> Result<()> {
        write_document(&self.data_dir.join(RESUMES_FILE), &self.resumes)
    }

    fn flush_analyses(&self) -> Result<()> {
        write_document(&self.data_dir.join(ANALYSES_FILE), &self.analyses)
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let records = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

fn write_document<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;
    write_atomically(path, &json)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
