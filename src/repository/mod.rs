// ABOUTME: Template repository seam for partial-name resolution
// ABOUTME: Exports the resolution trait and the in-memory implementation

pub mod error;
pub mod memory;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRepository;

use crate::ast::TemplateAst;

/// Resolves a partial name to a previously compiled template.
///
/// Implementors own caching (compile once, reuse many) and recursive or
/// mutual-reference cycle detection across templates. `relative_to` is the
/// including template's identity, for hierarchical naming schemes.
///
/// Implementations must be safe to share across threads; independent
/// compilations may resolve partials concurrently.
pub trait TemplateRepository: Send + Sync {
    fn template_ast(&self, name: &str, relative_to: Option<&str>) -> Result<TemplateAst>;
}
