//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use service::{MatcherService, ProcessedUpload};
