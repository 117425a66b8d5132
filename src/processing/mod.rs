//! Text processing, entity extraction and scoring

pub mod document;
pub mod text_processor;
pub mod tagger;
pub mod chunker;
pub mod entities;
pub mod matcher;
pub mod scorer;
pub mod indices;
