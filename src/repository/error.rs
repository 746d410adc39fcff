// ABOUTME: Error types for template repository resolution
// ABOUTME: Covers missing templates, reference cycles, and loader failures

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Recursive template reference: {0}")]
    Cycle(String),

    #[error("Failed to load template '{name}': {reason}")]
    Load { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
