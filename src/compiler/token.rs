// ABOUTME: Token input shape produced by the external tokenizer
// ABOUTME: Defines the typed token kinds and their source line numbers

/// One tokenized template fragment, as delivered by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateToken {
    pub kind: TokenKind,
    /// Source line the token starts on, 1-based.
    pub line: usize,
}

impl TemplateToken {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// Token kinds, carrying the raw tag content where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    SetDelimiters,
    Comment,
    Pragma(String),
    Text(String),
    EscapedVariable(String),
    UnescapedVariable(String),
    Section(String),
    InvertedSection(String),
    InheritableSection(String),
    InheritablePartial(String),
    Close(String),
    Partial(String),
}
