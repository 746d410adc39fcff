// ABOUTME: Token-to-AST compiler state machine with an explicit scope stack
// ABOUTME: Handles tag matching, alternate-section merging, and eager partial resolution

use tracing::{debug, trace};

use super::error::{CompileError, Result};
use super::token::{TemplateToken, TokenKind};
use crate::ast::{
    AstNode, ContentType, InheritablePartialNode, InheritableSectionNode, PartialNode, TemplateAst,
};
use crate::expression::{Expression, ExpressionError};
use crate::repository::TemplateRepository;

/// Compiles an ordered token stream into a [`TemplateAst`].
///
/// The compiler is a two-state machine: it either accumulates nodes on a
/// scope stack, or it holds the first error it hit and ignores everything
/// after it. There is no recovery path; `finish` surfaces the stored error.
pub struct Compiler<'a> {
    state: State,
    repository: &'a dyn TemplateRepository,
    template_id: Option<String>,
}

enum State {
    Compiling(CompilationState),
    Failed(CompileError),
}

struct CompilationState {
    content_type: ContentType,
    scopes: Vec<Scope>,
}

struct Scope {
    kind: ScopeKind,
    nodes: Vec<AstNode>,
}

#[derive(Clone)]
enum ScopeKind {
    Root,
    Section {
        opening: TemplateToken,
        expression: Expression,
    },
    InvertedSection {
        opening: TemplateToken,
        expression: Expression,
    },
    InheritablePartial {
        opening: TemplateToken,
        name: String,
    },
    InheritableSection {
        opening: TemplateToken,
        name: String,
    },
}

enum NameParse {
    Name(String),
    Blank,
    Invalid,
}

impl<'a> Compiler<'a> {
    pub fn new(
        content_type: ContentType,
        repository: &'a dyn TemplateRepository,
        template_id: Option<String>,
    ) -> Self {
        Self {
            state: State::Compiling(CompilationState::new(content_type)),
            repository,
            template_id,
        }
    }

    /// Process one token. Returns false once the compiler has failed, so the
    /// caller may stop feeding tokens.
    pub fn consume_token(&mut self, token: &TemplateToken) -> bool {
        let outcome = match &mut self.state {
            State::Failed(_) => return false,
            State::Compiling(compilation) => apply(
                compilation,
                self.repository,
                self.template_id.as_deref(),
                token,
            ),
        };
        match outcome {
            Ok(()) => true,
            Err(error) => {
                self.state = State::Failed(error);
                false
            }
        }
    }

    /// Record a fatal tokenizer error. The first recorded error wins.
    pub fn fail(&mut self, error: CompileError) {
        if matches!(self.state, State::Compiling(_)) {
            self.state = State::Failed(error);
        }
    }

    /// Finalize the compilation, returning the compiled template or the
    /// first recorded error. An open non-root scope fails with an unclosed
    /// tag error citing the opening token's line.
    pub fn finish(self) -> Result<TemplateAst> {
        match self.state {
            State::Failed(error) => Err(error),
            State::Compiling(compilation) => {
                let CompilationState {
                    content_type,
                    mut scopes,
                } = compilation;
                if scopes.len() > 1 {
                    let line = scopes.last().and_then(Scope::opening_line).unwrap_or(0);
                    return Err(CompileError::UnclosedTag { line });
                }
                let nodes = scopes.pop().map(|scope| scope.nodes).unwrap_or_default();
                debug!(nodes = nodes.len(), "template compiled");
                Ok(TemplateAst::new(nodes, content_type))
            }
        }
    }
}

impl CompilationState {
    fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            scopes: vec![Scope::root()],
        }
    }

    fn current_scope(&self) -> &Scope {
        self.scopes.last().expect("scope stack always has a root")
    }

    fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    fn pop_scope(&mut self) -> Scope {
        self.scopes.pop().expect("scope stack always has a root")
    }

    fn append_node(&mut self, node: AstNode) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.nodes.push(node);
        }
    }
}

impl Scope {
    fn root() -> Self {
        Self {
            kind: ScopeKind::Root,
            nodes: Vec::new(),
        }
    }

    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
        }
    }

    fn section(opening: TemplateToken, expression: Expression, inverted: bool) -> Self {
        let kind = if inverted {
            ScopeKind::InvertedSection {
                opening,
                expression,
            }
        } else {
            ScopeKind::Section {
                opening,
                expression,
            }
        };
        Self::new(kind)
    }

    fn opening_line(&self) -> Option<usize> {
        match &self.kind {
            ScopeKind::Root => None,
            ScopeKind::Section { opening, .. }
            | ScopeKind::InvertedSection { opening, .. }
            | ScopeKind::InheritablePartial { opening, .. }
            | ScopeKind::InheritableSection { opening, .. } => Some(opening.line),
        }
    }
}

fn apply(
    state: &mut CompilationState,
    repository: &dyn TemplateRepository,
    template_id: Option<&str>,
    token: &TemplateToken,
) -> Result<()> {
    match &token.kind {
        // Delimiter changes and comments are the tokenizer's concern; pragmas
        // carry no compile-time behavior here.
        TokenKind::SetDelimiters | TokenKind::Comment | TokenKind::Pragma(_) => Ok(()),

        TokenKind::Text(text) => {
            state.append_node(AstNode::Text(text.clone()));
            Ok(())
        }

        TokenKind::EscapedVariable(content) => append_variable(state, token, content, true),
        TokenKind::UnescapedVariable(content) => append_variable(state, token, content, false),

        TokenKind::Section(content) => open_section(state, token, content, false),
        TokenKind::InvertedSection(content) => open_section(state, token, content, true),

        TokenKind::InheritableSection(content) => {
            let name = required_name(token, content, "inheritable section name")?;
            trace!(name = %name, "opening inheritable section scope");
            state.push_scope(Scope::new(ScopeKind::InheritableSection {
                opening: token.clone(),
                name,
            }));
            Ok(())
        }

        TokenKind::InheritablePartial(content) => {
            let name = required_name(token, content, "template name")?;
            trace!(name = %name, "opening inheritable partial scope");
            state.push_scope(Scope::new(ScopeKind::InheritablePartial {
                opening: token.clone(),
                name,
            }));
            Ok(())
        }

        TokenKind::Partial(content) => {
            let name = required_name(token, content, "template name")?;
            let ast = resolve_partial(repository, template_id, token, &name)?;
            state.append_node(AstNode::Partial(PartialNode { name, ast }));
            Ok(())
        }

        TokenKind::Close(content) => close_scope(state, repository, template_id, token, content),
    }
}

fn append_variable(
    state: &mut CompilationState,
    token: &TemplateToken,
    content: &str,
    escaped: bool,
) -> Result<()> {
    let expression = Expression::parse(content).map_err(|error| CompileError::ExpressionSyntax {
        line: token.line,
        message: error.to_string(),
    })?;
    state.append_node(AstNode::Variable {
        expression,
        escaped,
    });
    Ok(())
}

fn open_section(
    state: &mut CompilationState,
    token: &TemplateToken,
    content: &str,
    inverted: bool,
) -> Result<()> {
    let parsed = match Expression::parse(content) {
        Ok(expression) => Some(expression),
        Err(ExpressionError::Blank) => None,
        Err(error) => {
            return Err(CompileError::ExpressionSyntax {
                line: token.line,
                message: error.to_string(),
            });
        }
    };

    // Alternate-section rule: an opening tag whose expression is blank or
    // equal to the current opposite-kind scope's expression closes that scope
    // and reopens the opposite kind under the same expression. This is how
    // `{{#a}}X{{^}}Y{{/}}` becomes two sibling sections for `a`.
    let continued = match (&state.current_scope().kind, inverted) {
        (
            ScopeKind::InvertedSection {
                expression: opener, ..
            },
            false,
        )
        | (
            ScopeKind::Section {
                expression: opener, ..
            },
            true,
        ) if parsed.is_none() || parsed.as_ref() == Some(opener) => Some(opener.clone()),
        _ => None,
    };

    if let Some(expression) = continued {
        let scope = state.pop_scope();
        let body = TemplateAst::new(scope.nodes, state.content_type);
        state.append_node(AstNode::Section {
            expression: expression.clone(),
            inverted: !inverted,
            body,
        });
        trace!(expression = %expression, "continuing alternate section");
        state.push_scope(Scope::section(token.clone(), expression, inverted));
        return Ok(());
    }

    match parsed {
        Some(expression) => {
            trace!(expression = %expression, inverted, "opening section scope");
            state.push_scope(Scope::section(token.clone(), expression, inverted));
            Ok(())
        }
        None => Err(CompileError::ExpressionSyntax {
            line: token.line,
            message: ExpressionError::Blank.to_string(),
        }),
    }
}

fn close_scope(
    state: &mut CompilationState,
    repository: &dyn TemplateRepository,
    template_id: Option<&str>,
    token: &TemplateToken,
    content: &str,
) -> Result<()> {
    let kind = state.current_scope().kind.clone();
    match kind {
        ScopeKind::Root => Err(CompileError::UnmatchedClosingTag { line: token.line }),

        ScopeKind::Section { expression, .. } => {
            close_section(state, token, content, expression, false)
        }
        ScopeKind::InvertedSection { expression, .. } => {
            close_section(state, token, content, expression, true)
        }

        ScopeKind::InheritablePartial { name, .. } => {
            check_closing_name(token, content, &name, "template name")?;
            let ast = resolve_partial(repository, template_id, token, &name)?;
            let scope = state.pop_scope();
            let overrides = TemplateAst::new(scope.nodes, state.content_type);
            state.append_node(AstNode::InheritablePartial(InheritablePartialNode {
                partial: PartialNode { name, ast },
                overrides,
            }));
            Ok(())
        }

        ScopeKind::InheritableSection { name, .. } => {
            check_closing_name(token, content, &name, "inheritable section name")?;
            let scope = state.pop_scope();
            let default_body = TemplateAst::new(scope.nodes, state.content_type);
            state.append_node(AstNode::InheritableSection(InheritableSectionNode {
                name,
                default_body,
            }));
            Ok(())
        }
    }
}

fn close_section(
    state: &mut CompilationState,
    token: &TemplateToken,
    content: &str,
    opener: Expression,
    inverted: bool,
) -> Result<()> {
    match Expression::parse(content) {
        Err(ExpressionError::Blank) => {}
        Err(error) => {
            return Err(CompileError::ExpressionSyntax {
                line: token.line,
                message: error.to_string(),
            });
        }
        Ok(ref expression) if *expression == opener => {}
        Ok(_) => return Err(CompileError::UnmatchedClosingTag { line: token.line }),
    }

    let scope = state.pop_scope();
    let body = TemplateAst::new(scope.nodes, state.content_type);
    trace!(expression = %opener, inverted, "closing section scope");
    state.append_node(AstNode::Section {
        expression: opener,
        inverted,
        body,
    });
    Ok(())
}

fn resolve_partial(
    repository: &dyn TemplateRepository,
    template_id: Option<&str>,
    token: &TemplateToken,
    name: &str,
) -> Result<TemplateAst> {
    let ast = repository
        .template_ast(name, template_id)
        .map_err(|error| CompileError::PartialResolution {
            line: token.line,
            name: name.to_string(),
            message: error.to_string(),
        })?;
    debug!(partial = %name, "resolved partial reference");
    Ok(ast)
}

fn check_closing_name(
    token: &TemplateToken,
    content: &str,
    open_name: &str,
    what: &str,
) -> Result<()> {
    match parse_name(content) {
        NameParse::Blank => Ok(()),
        NameParse::Invalid => Err(CompileError::InvalidName {
            line: token.line,
            message: format!("Invalid {what}"),
        }),
        NameParse::Name(closed) if closed == open_name => Ok(()),
        NameParse::Name(_) => Err(CompileError::UnmatchedClosingTag { line: token.line }),
    }
}

fn required_name(token: &TemplateToken, content: &str, what: &str) -> Result<String> {
    match parse_name(content) {
        NameParse::Name(name) => Ok(name),
        NameParse::Blank => Err(CompileError::InvalidName {
            line: token.line,
            message: format!("Missing {what}"),
        }),
        NameParse::Invalid => Err(CompileError::InvalidName {
            line: token.line,
            message: format!("Invalid {what}"),
        }),
    }
}

fn parse_name(content: &str) -> NameParse {
    let name = content.trim();
    if name.is_empty() {
        NameParse::Blank
    } else if name.chars().any(char::is_whitespace) {
        NameParse::Invalid
    } else {
        NameParse::Name(name.to_string())
    }
}
