// ABOUTME: In-memory template repository keyed by partial name
// ABOUTME: Backs tests and embedders that register compiled templates directly

use std::collections::HashMap;

use super::error::{RepositoryError, Result};
use super::TemplateRepository;
use crate::ast::TemplateAst;

/// A name-to-AST map. Registration happens up front; afterwards the
/// repository is shared immutably, which satisfies the compile-once,
/// reuse-many contract without locking.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    templates: HashMap<String, TemplateAst>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ast: TemplateAst) {
        self.templates.insert(name.into(), ast);
    }
}

impl TemplateRepository for InMemoryRepository {
    fn template_ast(&self, name: &str, _relative_to: Option<&str>) -> Result<TemplateAst> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }
}
