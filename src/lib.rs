// ABOUTME: Main library module for the heirloom template compiler core
// ABOUTME: Exports the compiler, AST, context chain, and repository modules

pub mod ast;
pub mod compiler;
pub mod context;
pub mod expression;
pub mod repository;

// Re-export commonly used types
pub use ast::{
    AstNode, ContentType, InheritablePartialNode, InheritableSectionNode, PartialNode, TemplateAst,
};
pub use compiler::{CompileError, Compiler, TemplateToken, TokenKind};
pub use context::Context;
pub use expression::{Expression, ExpressionError};
pub use repository::{InMemoryRepository, RepositoryError, TemplateRepository};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
