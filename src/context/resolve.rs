// ABOUTME: Inheritable-section override resolution over the context chain
// ABOUTME: Walks active inheritable-partial frames with an identity-based cycle guard

use super::chain::{Context, Frame};
use crate::ast::{AstNode, InheritablePartialNode, TemplateAst};

impl Context {
    /// Resolve a node against the active inheritance overrides.
    ///
    /// Walks from the chain head; each inheritable-partial frame gets one
    /// chance to substitute the node through its override body. A frame whose
    /// referenced partial AST was already consulted during this walk is
    /// skipped, which keeps recursive partial instantiations from re-applying
    /// the same template's overrides. A frame is only recorded as consulted
    /// once it actually substitutes something, so a pass-through does not
    /// block a later frame referencing the same AST.
    ///
    /// Returns the input node unchanged when no override applies; the
    /// renderer then falls back to the placeholder's own default body.
    pub fn resolve_node(&self, node: &AstNode) -> AstNode {
        let mut node = node.clone();
        let mut consulted: Vec<usize> = Vec::new();
        let mut current = self;
        loop {
            match current.frame.as_ref() {
                Frame::Root => return node,
                Frame::Value { parent, .. } => current = parent,
                Frame::InheritablePartial {
                    node: inheritable,
                    parent,
                } => {
                    let identity = inheritable.partial.ast.identity();
                    if !consulted.contains(&identity) {
                        let mut replaced = false;
                        node = inheritable.resolve(node, &mut replaced);
                        if replaced {
                            consulted.push(identity);
                        }
                    }
                    current = parent;
                }
            }
        }
    }
}

impl InheritablePartialNode {
    /// Substitute `node` through this instantiation's override body, setting
    /// `replaced` when an override fired anywhere in the search.
    pub(crate) fn resolve(&self, node: AstNode, replaced: &mut bool) -> AstNode {
        resolve_in(&self.overrides, node, replaced)
    }
}

fn resolve_in(overrides: &TemplateAst, mut node: AstNode, replaced: &mut bool) -> AstNode {
    for candidate in overrides.nodes() {
        node = match candidate {
            AstNode::InheritableSection(section) => match &node {
                AstNode::InheritableSection(target) if target.name == section.name => {
                    *replaced = true;
                    candidate.clone()
                }
                _ => node,
            },
            // An override body may itself defer further through a nested
            // inheritable partial.
            AstNode::InheritablePartial(inner) => inner.resolve(node, replaced),
            _ => node,
        };
    }
    node
}
