// ABOUTME: Error types for template compilation
// ABOUTME: Defines one structured variant per failure kind, each carrying a source line

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Tokenization failed at line {line}: {message}")]
    Tokenization { line: usize, message: String },

    #[error("Parse error at line {line}: {message}")]
    ExpressionSyntax { line: usize, message: String },

    #[error("Parse error at line {line}: Unmatched closing tag")]
    UnmatchedClosingTag { line: usize },

    #[error("Parse error at line {line}: Unclosed tag")]
    UnclosedTag { line: usize },

    #[error("Parse error at line {line}: {message}")]
    InvalidName { line: usize, message: String },

    #[error("Failed to resolve partial '{name}' at line {line}: {message}")]
    PartialResolution {
        line: usize,
        name: String,
        message: String,
    },
}

impl CompileError {
    /// Source line the error was recorded at. For unclosed tags this is the
    /// opening token's line, not the end of input.
    pub fn line(&self) -> usize {
        match self {
            CompileError::Tokenization { line, .. }
            | CompileError::ExpressionSyntax { line, .. }
            | CompileError::UnmatchedClosingTag { line }
            | CompileError::UnclosedTag { line }
            | CompileError::InvalidName { line, .. }
            | CompileError::PartialResolution { line, .. } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
