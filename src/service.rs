//! Upload processing and batch analysis: the two entry points callers use

use crate::config::ExtractionConfig;
use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::manager::InputManager;
use crate::processing::document::{
    AnalysisResult, JobRequirement, ParsedEntities, ResumeDocument,
};
use crate::processing::entities::EntityExtractor;
use crate::processing::indices::Indices;
use crate::processing::scorer::MatchScorer;
use crate::store::{AnalysisRecord, ResumeRecord, Store};
use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// What an upload produces; the caller decides how to persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedUpload {
    pub id: String,
    pub name: String,
    pub content: String,
    pub parsed_entities: ParsedEntities,
}

pub struct MatcherService {
    input: InputManager,
    extractor: EntityExtractor,
    scorer: MatchScorer,
    indices: Arc<Indices>,
}

impl MatcherService {
    pub fn new(config: &ExtractionConfig, indices: Arc<Indices>) -> Self {
        Self::with_input(InputManager::new(config), indices)
    }

    pub fn with_input(input: InputManager, indices: Arc<Indices>) -> Self {
        Self {
            input,
            extractor: EntityExtractor::new(),
            scorer: MatchScorer::new(),
            indices,
        }
    }

    pub fn indices(&self) -> &Arc<Indices> {
        &self.indices
    }

    /// Extract text and entities from an uploaded document.
    ///
    /// Only an unsupported extension is an error. A document that cannot be
    /// read still produces an upload, with empty text and empty entities.
    /// Nothing is indexed here; [`upload_file`](Self::upload_file) indexes
    /// the skills once the record is stored.
    pub async fn process_upload(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
    ) -> Result<ProcessedUpload> {
        let file_type = FileType::from_path(Path::new(filename));
        if file_type == FileType::Unknown {
            return Err(MatcherError::UnsupportedFormat(filename.to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let content = self.input.extract(file_type, file_bytes).await.into_text(filename);
        let parsed_entities = self.extractor.extract(&content);

        info!(
            "Processed upload '{}' as {}: {} chars, {} skills, {} years",
            filename,
            id,
            content.len(),
            parsed_entities.skills.len(),
            parsed_entities.experience_years
        );

        Ok(ProcessedUpload {
            id,
            name: filename.to_string(),
            content,
            parsed_entities,
        })
    }

    /// Score every resume against one requirement, in input order.
    pub fn analyze_batch(
        &self,
        resumes: &[ResumeDocument],
        job: &JobRequirement,
    ) -> Vec<AnalysisResult> {
        self.analyze_batch_with(resumes, job, |_| {})
    }

    /// As [`analyze_batch`](Self::analyze_batch), calling `on_result` after each resume.
    ///
    /// A blank job title is not recorded in the titles index.
    pub fn analyze_batch_with<F>(
        &self,
        resumes: &[ResumeDocument],
        job: &JobRequirement,
        mut on_result: F,
    ) -> Vec<AnalysisResult>
    where
        F: FnMut(&AnalysisResult),
    {
        let results: Vec<AnalysisResult> = resumes
            .iter()
            .map(|resume| {
                let result = self.scorer.score(&resume.id, &resume.entities, &resume.text, job);
                on_result(&result);
                result
            })
            .collect();

        record_title(&self.indices, &job.job_title);
        info!("Analyzed {} resumes for '{}'", results.len(), job.job_title);
        results
    }

    /// Upload a document from disk and persist it with its parsed entities.
    ///
    /// The skills index is updated only after the record is stored. A stored
    /// copy of the document is removed again if the record cannot be saved.
    pub async fn upload_file(&self, store: &mut Store, path: &Path) -> Result<ResumeRecord> {
        let extension = FileType::from_path(path)
            .extension()
            .ok_or_else(|| MatcherError::UnsupportedFormat(path.display().to_string()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = tokio::fs::read(path).await?;

        let upload = self.process_upload(bytes.clone(), &name).await?;
        let file_path = store.save_upload(&upload.id, &bytes, extension)?;

        let record = ResumeRecord {
            id: upload.id,
            name: upload.name,
            file_path,
            upload_date: Utc::now(),
            content: upload.content,
            parsed_data: upload.parsed_entities,
        };
        if let Err(e) = store.add_resume(record.clone()) {
            if let Err(remove_err) = std::fs::remove_file(&record.file_path) {
                warn!(
                    "Could not remove stored file {}: {}",
                    record.file_path.display(),
                    remove_err
                );
            }
            return Err(e);
        }

        self.indices.skills.record(&record.id, &record.parsed_data.skills);
        Ok(record)
    }

    /// Score every stored resume and persist one analysis per resume.
    pub fn analyze_stored<F>(
        &self,
        store: &mut Store,
        job: &JobRequirement,
        on_result: F,
    ) -> Result<Vec<AnalysisResult>>
    where
        F: FnMut(&AnalysisResult),
    {
        if store.list_resumes().is_empty() {
            return Err(MatcherError::NoResumes);
        }

        let resumes: Vec<ResumeDocument> =
            store.list_resumes().iter().map(ResumeRecord::to_document).collect();
        let results = self.analyze_batch_with(&resumes, job, on_result);
        let records = results.iter().map(|r| AnalysisRecord::from_result(r, &job.job_title));
        store.add_analyses(records)?;
        Ok(results)
    }

    /// Remove a resume from the store and from the skills index.
    pub fn delete_resume(&self, store: &mut Store, id: &str) -> Result<ResumeRecord> {
        let record = store.delete_resume(id)?;
        self.indices.skills.remove_resume(id);
        Ok(record)
    }

    /// Repopulate the indices from the persisted resumes and analyses.
    pub fn restore_indices(&self, store: &Store) {
        for resume in store.list_resumes() {
            self.indices.skills.record(&resume.id, &resume.parsed_data.skills);
        }
        // Records written before titles were stored carry an empty title.
        for analysis in store.analyses() {
            record_title(&self.indices, &analysis.job_title);
        }
        info!(
            "Restored indices: {} skills, {} job titles",
            self.indices.skills.len(),
            self.indices.job_titles.titles().len()
        );
    }
}

fn record_title(indices: &Indices, title: &str) {
    if !title.trim().is_empty() {
        indices.job_titles.record(title);
    }
}
