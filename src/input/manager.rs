//! Input manager: runs extraction off the async runtime under a time bound

use crate::config::ExtractionConfig;
use crate::error::MatcherError;
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{self, Extraction};
use log::{info, warn};
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

pub struct InputManager {
    timeout: Duration,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl InputManager {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extract text from a stored document. Never fails: problems are
    /// logged and surface as an empty string.
    pub async fn extract_text(&self, path: &Path) -> String {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Extraction::from_result(Err(MatcherError::Io(e)))
                    .into_text(&path.display().to_string());
            }
        };

        let file_type = FileType::from_path(path);
        info!("Extracting {:?} text from: {}", file_type, path.display());
        self.extract(file_type, bytes)
            .await
            .into_text(&path.display().to_string())
    }

    /// Extract text from document bytes already in memory.
    pub async fn extract(&self, file_type: FileType, bytes: Vec<u8>) -> Extraction {
        let task =
            tokio::task::spawn_blocking(move || text_extractor::extract_bytes(file_type, &bytes));

        match timeout(self.timeout, task).await {
            Ok(Ok(extraction)) => extraction,
            Ok(Err(join_error)) => Extraction::Failed {
                reason: format!("extraction task failed: {}", join_error),
            },
            Err(_) => {
                // The blocking task cannot be cancelled; it finishes in the background.
                warn!("Extraction exceeded {}s, giving up", self.timeout.as_secs());
                Extraction::Failed {
                    reason: MatcherError::ExtractionTimeout(self.timeout.as_secs()).to_string(),
                }
            }
        }
    }
}
