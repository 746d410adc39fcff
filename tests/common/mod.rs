// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides token builders and compile helpers shared by the test suites

#![allow(dead_code)]

use heirloom::{
    AstNode, CompileError, Compiler, ContentType, InMemoryRepository, TemplateAst,
    TemplateRepository, TemplateToken, TokenKind,
};

pub fn text(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::Text(content.to_string()), line)
}

pub fn variable(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::EscapedVariable(content.to_string()), line)
}

pub fn unescaped(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::UnescapedVariable(content.to_string()), line)
}

pub fn section(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::Section(content.to_string()), line)
}

pub fn inverted(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::InvertedSection(content.to_string()), line)
}

pub fn inheritable_section(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::InheritableSection(content.to_string()), line)
}

pub fn inheritable_partial(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::InheritablePartial(content.to_string()), line)
}

pub fn partial(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::Partial(content.to_string()), line)
}

pub fn close(content: &str, line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::Close(content.to_string()), line)
}

pub fn comment(line: usize) -> TemplateToken {
    TemplateToken::new(TokenKind::Comment, line)
}

/// Compile a token sequence against an empty repository.
pub fn compile(tokens: &[TemplateToken]) -> Result<TemplateAst, CompileError> {
    compile_with(tokens, &InMemoryRepository::new())
}

/// Compile a token sequence against the given repository.
pub fn compile_with(
    tokens: &[TemplateToken],
    repository: &dyn TemplateRepository,
) -> Result<TemplateAst, CompileError> {
    let mut compiler = Compiler::new(ContentType::Html, repository, None);
    for token in tokens {
        if !compiler.consume_token(token) {
            break;
        }
    }
    compiler.finish()
}

/// A repository holding one compiled template made of a single text node.
pub fn repository_with(name: &str, body: &str) -> InMemoryRepository {
    let mut repository = InMemoryRepository::new();
    repository.insert(
        name,
        TemplateAst::new(vec![AstNode::Text(body.to_string())], ContentType::Html),
    );
    repository
}

/// The text content of a node expected to be a text node.
pub fn text_content(node: &AstNode) -> &str {
    match node {
        AstNode::Text(content) => content,
        other => panic!("expected text node, got {other:?}"),
    }
}
