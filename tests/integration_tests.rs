//! Integration tests for the resume matcher

use docx_rs::{Docx, Paragraph, Run};
use resume_matcher::config::{ExtractionConfig, StorageConfig};
use resume_matcher::input::manager::InputManager;
use resume_matcher::processing::document::{CategoryKind, JobRequirement, ParsedEntities};
use resume_matcher::processing::indices::Indices;
use resume_matcher::store::Store;
use resume_matcher::{MatcherError, MatcherService};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const SAMPLE_RESUME: &str = "tests/fixtures/sample_resume.txt";

fn storage(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        data_dir: dir.path().join("data"),
        uploads_dir: dir.path().join("uploads"),
    }
}

fn service() -> MatcherService {
    MatcherService::new(&ExtractionConfig::default(), Arc::new(Indices::new()))
}

fn backend_job() -> JobRequirement {
    JobRequirement {
        job_title: "Backend Engineer".to_string(),
        job_description: "Own our data platform".to_string(),
        required_skills: "python, sql, haskell, rust".to_string(),
        experience: "5".to_string(),
        education: "master, phd".to_string(),
        company: Some("Hooli".to_string()),
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::default();
    let text = manager.extract_text(Path::new(SAMPLE_RESUME)).await;

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Initech LLC"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    let file = std::fs::File::create(&path).unwrap();
    Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("Data Engineer with 4 years of Python")),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Bachelor of Science")))
        .build()
        .pack(file)
        .unwrap();

    let text = InputManager::default().extract_text(&path).await;
    assert_eq!(text, "Data Engineer with 4 years of Python Bachelor of Science");
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::default();
    assert_eq!(manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await, "");

    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&storage(&dir)).unwrap();
    let err = service()
        .upload_file(&mut store, Path::new("tests/fixtures/unsupported.xyz"))
        .await
        .unwrap_err();

    assert!(matches!(err, MatcherError::UnsupportedFormat(_)));
    assert!(store.list_resumes().is_empty());
}

#[tokio::test]
async fn test_missing_file_extracts_empty_text() {
    let manager = InputManager::default();
    assert_eq!(manager.extract_text(Path::new("tests/fixtures/missing.pdf")).await, "");
}

#[tokio::test]
async fn test_corrupt_pdf_upload_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.4 this is not really a pdf").unwrap();

    let mut store = Store::open(&storage(&dir)).unwrap();
    let record = service().upload_file(&mut store, &path).await.unwrap();

    assert_eq!(record.name, "broken.pdf");
    assert!(record.content.is_empty());
    assert_eq!(record.parsed_data, ParsedEntities::default());
    assert!(record.file_path.exists());
}

#[tokio::test]
async fn test_upload_and_analyze_sample_resume() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&storage(&dir)).unwrap();
    let service = service();

    let record = service.upload_file(&mut store, Path::new(SAMPLE_RESUME)).await.unwrap();
    assert_eq!(record.parsed_data.experience_years, 7);
    assert!(record.parsed_data.organizations.iter().any(|o| o == "Initech LLC"));
    assert!(service.indices().skills.resumes_with("pipelines").contains(&record.id));

    let job = backend_job();
    let mut seen = 0;
    let results = service.analyze_stored(&mut store, &job, |_| seen += 1).unwrap();
    assert_eq!(seen, 1);
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.resume_id, record.id);

    let skills = result.category(CategoryKind::Skills).unwrap();
    assert_eq!(skills.score, 75.0);
    assert_eq!(skills.matched_items, vec!["python", "sql", "rust"]);
    assert_eq!(skills.missing_items, vec!["haskell"]);

    assert_eq!(result.category(CategoryKind::Experience).unwrap().score, 100.0);
    let education = result.category(CategoryKind::Education).unwrap();
    assert_eq!(education.score, 50.0);
    assert_eq!(education.matched_items, vec!["master"]);
    assert_eq!(result.category(CategoryKind::Title).unwrap().score, 100.0);

    assert_eq!(result.overall_score, 80.0);
    assert_eq!(result.suggestions, vec!["Add or highlight: haskell"]);
    assert_eq!(result.resume_insights.top_skills, vec!["python", "sql", "rust"]);

    let stored = store.analyses_for(&record.id);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].job_title, "Backend Engineer");
    assert_eq!(service.indices().job_titles.titles(), vec!["Backend Engineer"]);
}

#[test]
fn test_analyze_without_resumes_fails() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&storage(&dir)).unwrap();

    let err = service().analyze_stored(&mut store, &backend_job(), |_| {}).unwrap_err();
    assert!(matches!(err, MatcherError::NoResumes));
    assert_eq!(err.to_string(), "No resumes uploaded");
    assert!(store.analyses().is_empty());
}

#[tokio::test]
async fn test_delete_cascades_and_updates_index() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open(&storage(&dir)).unwrap();
    let service = service();

    let first = service.upload_file(&mut store, Path::new(SAMPLE_RESUME)).await.unwrap();
    let second = service.upload_file(&mut store, Path::new(SAMPLE_RESUME)).await.unwrap();
    service.analyze_stored(&mut store, &backend_job(), |_| {}).unwrap();
    assert_eq!(store.analyses().len(), 2);

    service.delete_resume(&mut store, &first.id).unwrap();

    assert!(store.analyses_for(&first.id).is_empty());
    assert_eq!(store.analyses_for(&second.id).len(), 1);
    assert!(!first.file_path.exists());
    assert_eq!(service.indices().skills.resumes_with("pipelines"), vec![second.id.clone()]);
}

#[tokio::test]
async fn test_indices_are_restored_from_store() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut store = Store::open(&storage(&dir)).unwrap();
        let service = service();
        let record = service.upload_file(&mut store, Path::new(SAMPLE_RESUME)).await.unwrap();
        service.analyze_stored(&mut store, &backend_job(), |_| {}).unwrap();

        let mut other = backend_job();
        other.job_title = "BACKEND ENGINEER".to_string();
        service.analyze_stored(&mut store, &other, |_| {}).unwrap();
        record.id
    };

    let store = Store::open(&storage(&dir)).unwrap();
    let service = service();
    service.restore_indices(&store);

    assert_eq!(service.indices().skills.resumes_with("pipelines"), vec![id]);
    assert_eq!(service.indices().job_titles.titles(), vec!["Backend Engineer"]);
}
