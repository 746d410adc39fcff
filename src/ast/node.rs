// ABOUTME: Template AST node model and the shared, cacheable node tree
// ABOUTME: Defines the tagged node variants composed into ordered template trees

use std::sync::Arc;

use crate::expression::Expression;

/// Content-escaping mode stamped on every compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// A compiled template: an ordered node sequence plus its escaping mode.
///
/// Nodes live behind a shared allocation, so clones are cheap and every clone
/// of one compilation keeps the same identity. Override resolution relies on
/// that identity and never mutates a cached tree.
#[derive(Debug, Clone)]
pub struct TemplateAst {
    nodes: Arc<[AstNode]>,
    content_type: ContentType,
}

impl TemplateAst {
    pub fn new(nodes: Vec<AstNode>, content_type: ContentType) -> Self {
        Self {
            nodes: nodes.into(),
            content_type,
        }
    }

    pub fn nodes(&self) -> &[AstNode] {
        &self.nodes
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Allocation identity, stable across clones of the same compilation.
    pub(crate) fn identity(&self) -> usize {
        self.nodes.as_ptr() as usize
    }
}

#[derive(Debug, Clone)]
pub enum AstNode {
    /// A run of literal template text.
    Text(String),
    /// A variable tag; `escaped` distinguishes `{{name}}` from `{{{name}}}`.
    Variable {
        expression: Expression,
        escaped: bool,
    },
    /// A section or inverted section with its compiled body.
    Section {
        expression: Expression,
        inverted: bool,
        body: TemplateAst,
    },
    /// A plain partial inclusion, resolved eagerly at compile time.
    Partial(PartialNode),
    /// A partial inclusion carrying a local override body.
    InheritablePartial(InheritablePartialNode),
    /// A named placeholder with a default body, replaceable by an enclosing
    /// inheritable partial's override.
    InheritableSection(InheritableSectionNode),
}

/// A reference to another compiled template, by name.
#[derive(Debug, Clone)]
pub struct PartialNode {
    pub name: String,
    pub ast: TemplateAst,
}

/// A partial inclusion plus the override body captured between its tags.
///
/// The override body is consulted at render time through the context chain;
/// the referenced `partial.ast` stays untouched so it can be shared across
/// call sites with different overrides.
#[derive(Debug, Clone)]
pub struct InheritablePartialNode {
    pub partial: PartialNode,
    pub overrides: TemplateAst,
}

#[derive(Debug, Clone)]
pub struct InheritableSectionNode {
    pub name: String,
    pub default_body: TemplateAst,
}
