// ABOUTME: Compiled template AST module
// ABOUTME: Exports the node tree types produced by the compiler and shared by repositories

pub mod node;

pub use node::{
    AstNode, ContentType, InheritablePartialNode, InheritableSectionNode, PartialNode, TemplateAst,
};
