// ABOUTME: Compiler module turning tokenized template fragments into a compiled AST
// ABOUTME: Exports the state machine, the token input shape, and compile errors

pub mod compile;
pub mod error;
pub mod token;

pub use compile::Compiler;
pub use error::{CompileError, Result};
pub use token::{TemplateToken, TokenKind};
