// ABOUTME: Error types for identifier-path expression parsing
// ABOUTME: Distinguishes blank tag content from malformed expressions

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The tag content was empty or whitespace only. Some call sites treat
    /// this as valid (empty closing tags, alternate-section continuation).
    #[error("Missing expression")]
    Blank,

    #[error("Invalid expression: `{0}`")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
