//! # dicelang
//!
//! Interpreter for dicelang, a small scripting language whose programs compute exact,
//! integer-weighted probability distributions of dice experiments — no sampling, no
//! floating point values in the language itself.
//!
//! The pipeline: source text is tokenized by [`lexer::Lexer`], shaped into a parse
//! tree by [`parser::parse`], and executed by [`interpreter::Interpreter`], which
//! evaluates expressions over the [`distribution::Distribution`] algebra. Any stage
//! may fail with a [`error::DicelangError`]; the first error stops the pipeline.

pub mod distribution;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use std::io::Write;

use error::DicelangError;
use interpreter::Interpreter;
use lexer::Lexer;

/// Runs a whole script against an output stream, stopping at the first error.
pub fn run(source: &str, out: &mut dyn Write) -> Result<(), DicelangError> {
    let tokens = Lexer::new(source).lex()?;
    let tree = parser::parse(tokens)?;

    Interpreter::new(out).interpret(&tree)
}
