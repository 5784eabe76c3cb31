//! # Error
//!
//! This module contains the shared error value every stage of the pipeline reports
//! through. The first error wins: stages return it through `Result` and the driver
//! prints it once, with the location of the offending token when one is known.

use std::{error::Error, fmt::Display};

use colored::Colorize;

use crate::lexer::{Position, Token};

/// Kinds of failure the pipeline can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An invariant was violated by the implementation itself. Bug signal.
    Internal,
    /// The lexer hit a byte it does not recognise.
    Lex,
    /// The parser hit a token no grammar rule admits.
    Parse,
    /// Otherwise valid syntax could not be interpreted.
    Interpret,
}

impl ErrorKind {
    fn header(&self) -> &'static str {
        match self {
            ErrorKind::Internal => "dicelang: internal error",
            ErrorKind::Lex => "dicelang: reading error",
            ErrorKind::Parse => "dicelang: syntax error",
            ErrorKind::Interpret => "dicelang: interpreter error",
        }
    }
}

/// Owned snapshot of the token an error points at, so the error can outlive the
/// source buffer the token borrowed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToken {
    pub name: &'static str,
    pub lexeme: String,
    pub position: Position,
}

impl From<&Token<'_>> for ErrorToken {
    fn from(token: &Token<'_>) -> Self {
        Self {
            name: token.kind.name(),
            lexeme: token.lexeme.to_owned(),
            position: token.position,
        }
    }
}

/// An error produced by the lexer, the parser or the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicelangError {
    pub kind: ErrorKind,
    pub token: Option<ErrorToken>,
    pub what: &'static str,
}

impl DicelangError {
    /// Error raised by the lexer at an unrecognised byte.
    pub fn lex(token: &Token<'_>, what: &'static str) -> Self {
        Self {
            kind: ErrorKind::Lex,
            token: Some(token.into()),
            what,
        }
    }

    /// Error raised by the parser at an offending token.
    pub fn parse(token: &Token<'_>, what: &'static str) -> Self {
        Self {
            kind: ErrorKind::Parse,
            token: Some(token.into()),
            what,
        }
    }

    /// Parse error with no token left to point at.
    pub fn parse_eof(what: &'static str) -> Self {
        Self {
            kind: ErrorKind::Parse,
            token: None,
            what,
        }
    }

    /// Error raised by the interpreter, pointing at a token when one is known.
    pub fn interpret(token: Option<&Token<'_>>, what: &'static str) -> Self {
        Self {
            kind: ErrorKind::Interpret,
            token: token.map(ErrorToken::from),
            what,
        }
    }

    /// Violated implementation invariant.
    pub fn internal(what: &'static str) -> Self {
        Self {
            kind: ErrorKind::Internal,
            token: None,
            what,
        }
    }
}

impl Display for DicelangError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.kind.header().red())?;

        if let Some(token) = &self.token {
            write!(
                f,
                "at ({}:{}) near token '{}'",
                token.position.0, token.position.1, token.name
            )?;

            if !token.lexeme.is_empty() {
                write!(f, " (\"{}\")", token.lexeme.escape_default())?;
            }

            writeln!(f)?;
        }

        write!(f, "{}", self.what)
    }
}

impl Error for DicelangError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_display_with_token() {
        let token = Token {
            kind: TokenKind::Invalid,
            lexeme: "",
            position: (1, 1),
        };
        let error = DicelangError::lex(&token, "unrecognized token");

        let printed = format!("{error}");

        assert!(printed.contains("dicelang: reading error"));
        assert!(printed.contains("at (1:1) near token 'invalid'"));
        assert!(printed.contains("unrecognized token"));
    }

    #[test]
    fn test_display_escapes_lexeme() {
        let token = Token {
            kind: TokenKind::LineEnd,
            lexeme: "\n",
            position: (2, 5),
        };
        let error = DicelangError::parse(&token, "unexpected token");

        let printed = format!("{error}");

        assert!(printed.contains("dicelang: syntax error"));
        assert!(printed.contains("at (2:5) near token 'line_end' (\"\\n\")"));
    }

    #[test]
    fn test_display_without_token() {
        let error = DicelangError::internal("interpreter could not init a context");

        let printed = format!("{error}");

        assert!(printed.contains("dicelang: internal error"));
        assert!(!printed.contains("near token"));
    }

    #[test]
    fn test_interpret_error_keeps_the_token() {
        let token = Token {
            kind: TokenKind::Identifier,
            lexeme: "Q",
            position: (1, 7),
        };
        let error = DicelangError::interpret(Some(&token), "unknown variable");

        assert_eq!(ErrorKind::Interpret, error.kind);
        assert_eq!(
            Some(ErrorToken {
                name: "identifier",
                lexeme: "Q".to_owned(),
                position: (1, 7),
            }),
            error.token
        );
    }

    #[test]
    fn test_parse_eof_has_no_token() {
        let error = DicelangError::parse_eof("end of stream reached");

        assert_eq!(ErrorKind::Parse, error.kind);
        assert_eq!(None, error.token);
    }
}
