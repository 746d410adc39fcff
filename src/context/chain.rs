// ABOUTME: Immutable, persistent context chain for render-time identifier lookup
// ABOUTME: Frames share parents through reference counting; extension never mutates ancestors

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::ast::InheritablePartialNode;
use crate::expression::Expression;

/// A point in the chain of enclosing bound values and active inheritance
/// overrides visible during rendering.
///
/// Contexts are cheap to clone and safe to read from multiple threads;
/// every extension returns a new head that shares its ancestors.
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) frame: Arc<Frame>,
}

#[derive(Debug)]
pub(crate) enum Frame {
    Root,
    Value {
        value: Value,
        parent: Context,
    },
    InheritablePartial {
        node: InheritablePartialNode,
        parent: Context,
    },
}

impl Context {
    pub fn new() -> Self {
        Self {
            frame: Arc::new(Frame::Root),
        }
    }

    /// Extend the chain with a bound value. Null denotes absence and creates
    /// no frame; the unchanged chain is returned.
    pub fn with_value(&self, value: Value) -> Context {
        if value.is_null() {
            return self.clone();
        }
        Context {
            frame: Arc::new(Frame::Value {
                value,
                parent: self.clone(),
            }),
        }
    }

    /// Extend the chain with any serializable value.
    pub fn with_serializable<T: Serialize>(&self, value: &T) -> serde_json::Result<Context> {
        Ok(self.with_value(serde_json::to_value(value)?))
    }

    /// Extend the chain with an inheritable-partial instantiation. Pushed
    /// just before rendering the referenced partial, so placeholders inside
    /// it can find this instantiation's overrides.
    pub fn with_inheritable_partial(&self, node: InheritablePartialNode) -> Context {
        Context {
            frame: Arc::new(Frame::InheritablePartial {
                node,
                parent: self.clone(),
            }),
        }
    }

    /// Look an identifier up in the chain. Nearer value frames shadow outer
    /// ones; misses fall through. Inheritable-partial frames never shadow.
    pub fn lookup(&self, identifier: &str) -> Option<Value> {
        let mut current = self;
        loop {
            match current.frame.as_ref() {
                Frame::Root => return None,
                Frame::Value { value, parent } => {
                    if let Some(found) = field(value, identifier) {
                        return Some(found);
                    }
                    current = parent;
                }
                Frame::InheritablePartial { parent, .. } => current = parent,
            }
        }
    }

    /// The nearest bound value, skipping inheritable-partial frames. This is
    /// what the implicit iterator (`.`) refers to.
    pub fn top_value(&self) -> Option<&Value> {
        let mut current = self;
        loop {
            match current.frame.as_ref() {
                Frame::Root => return None,
                Frame::Value { value, .. } => return Some(value),
                Frame::InheritablePartial { parent, .. } => current = parent,
            }
        }
    }

    /// Evaluate a path expression: the first key resolves through the chain,
    /// the remaining keys descend within the found value.
    pub fn evaluate(&self, expression: &Expression) -> Option<Value> {
        if expression.is_implicit_iterator() {
            return self.top_value().cloned();
        }
        let mut keys = expression.keys().iter();
        let first = keys.next()?;
        let mut value = self.lookup(first)?;
        for key in keys {
            value = field(&value, key)?;
        }
        Some(value)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

fn field(value: &Value, identifier: &str) -> Option<Value> {
    match value {
        Value::Object(map) => map.get(identifier).cloned(),
        _ => None,
    }
}
