//! In-memory lookup indices maintained alongside uploads and analyses
//!
//! Neither index is authoritative: both are rebuilt from the persisted
//! resumes and analyses when a process starts. Each index has its own lock so
//! concurrent uploads cannot lose updates.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Skill term to the ids of resumes that have it, each id at most once.
#[derive(Debug, Default)]
pub struct SkillsIndex {
    entries: Mutex<BTreeMap<String, Vec<String>>>,
}

impl SkillsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `resume_id` has each of `skills`. Idempotent.
    pub fn record<'a>(&self, resume_id: &str, skills: impl IntoIterator<Item = &'a String>) {
        let mut entries = lock(&self.entries);
        for skill in skills {
            let ids = entries.entry(skill.clone()).or_default();
            if !ids.iter().any(|id| id == resume_id) {
                ids.push(resume_id.to_string());
            }
        }
    }

    /// Drop a resume from every skill, removing skills left without resumes.
    pub fn remove_resume(&self, resume_id: &str) {
        let mut entries = lock(&self.entries);
        entries.retain(|_, ids| {
            ids.retain(|id| id != resume_id);
            !ids.is_empty()
        });
    }

    pub fn resumes_with(&self, skill: &str) -> Vec<String> {
        lock(&self.entries)
            .get(&skill.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Every skill with its resume count, alphabetically.
    pub fn skill_counts(&self) -> Vec<(String, usize)> {
        lock(&self.entries)
            .iter()
            .map(|(skill, ids)| (skill.clone(), ids.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distinct job titles in first-seen order, compared case-insensitively.
#[derive(Debug, Default)]
pub struct JobTitleIndex {
    titles: Mutex<Vec<String>>,
}

impl JobTitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the title was not seen before.
    pub fn record(&self, title: &str) -> bool {
        let mut titles = lock(&self.titles);
        let folded = title.to_lowercase();
        if titles.iter().any(|t| t.to_lowercase() == folded) {
            return false;
        }
        titles.push(title.to_string());
        true
    }

    pub fn titles(&self) -> Vec<String> {
        lock(&self.titles).clone()
    }
}

/// The indices shared by every request a service handles.
#[derive(Debug, Default)]
pub struct Indices {
    pub skills: SkillsIndex,
    pub job_titles: JobTitleIndex,
}

impl Indices {
    pub fn new() -> Self {
        Self::default()
    }
}
