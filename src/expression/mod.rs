// ABOUTME: Identifier-path expression module for variable and section tags
// ABOUTME: Exports the parsed expression type and its parser

pub mod error;

pub use error::{ExpressionError, Result};

use std::fmt;

/// A parsed identifier path such as `user.name`.
///
/// Equality is structural: the compiler compares expressions to match opening
/// and closing tags and to detect alternate-section continuation. The empty
/// key path is the implicit iterator (`.`), which refers to the nearest bound
/// value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    keys: Vec<String>,
}

impl Expression {
    /// Parse tag content into an expression.
    ///
    /// Blank content is reported separately from malformed content so callers
    /// can apply the alternate-section and empty-close rules.
    pub fn parse(content: &str) -> Result<Expression> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ExpressionError::Blank);
        }
        if trimmed == "." {
            return Ok(Expression { keys: Vec::new() });
        }

        let mut keys = Vec::new();
        for segment in trimmed.split('.') {
            if segment.is_empty() || segment.chars().any(char::is_whitespace) {
                return Err(ExpressionError::Malformed(trimmed.to_string()));
            }
            keys.push(segment.to_string());
        }
        Ok(Expression { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_implicit_iterator(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_implicit_iterator() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.keys.join("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_identifier() {
        let expression = Expression::parse("name").unwrap();
        assert_eq!(expression.keys(), ["name"]);
    }

    #[test]
    fn test_parse_dotted_path() {
        let expression = Expression::parse("user.address.city").unwrap();
        assert_eq!(expression.keys(), ["user", "address", "city"]);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let expression = Expression::parse("  user.name  ").unwrap();
        assert_eq!(expression.keys(), ["user", "name"]);
    }

    #[test]
    fn test_blank_content_is_distinguished_from_malformed() {
        assert_eq!(Expression::parse(""), Err(ExpressionError::Blank));
        assert_eq!(Expression::parse("   "), Err(ExpressionError::Blank));
        assert!(matches!(
            Expression::parse("a b"),
            Err(ExpressionError::Malformed(_))
        ));
        assert!(matches!(
            Expression::parse("a..b"),
            Err(ExpressionError::Malformed(_))
        ));
    }

    #[test]
    fn test_implicit_iterator() {
        let expression = Expression::parse(".").unwrap();
        assert!(expression.is_implicit_iterator());
        assert_eq!(expression.to_string(), ".");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(
            Expression::parse("user.name").unwrap(),
            Expression::parse(" user.name ").unwrap()
        );
        assert_ne!(
            Expression::parse("user").unwrap(),
            Expression::parse("account").unwrap()
        );
    }
}
