//! # Lexer
//!
//! This module turns raw source text into a sequence of tagged, positioned tokens.
//!
//! The tokenizer is a table-driven automaton: the transition table maps a
//! `(current state, input byte)` pair to the next state, where the states are the token
//! kinds themselves. From each starting position the longest acceptable prefix wins.
//! Whitespace and `#` comments are skipped between tokens, while newlines become
//! `line_end` tokens of their own (adjacent newlines are absorbed into a single token).
//!
//! On success the token sequence always ends with a `file_end` token. The first
//! unrecognised byte stops the scan with a reading error pointing at it.

mod token;

pub use token::*;

use log::debug;
use once_cell::sync::Lazy;

use crate::error::DicelangError;

/// One cell of the automaton table: the state reached and whether the scan may stop
/// there with a valid token.
#[derive(Debug, Clone, Copy)]
struct Transition {
    to: TokenKind,
    accept: bool,
}

/// Trap cell. Reaching it ends the scan of the current token.
const TRAP: Transition = Transition {
    to: TokenKind::Invalid,
    accept: false,
};

struct TransitionTable([[Transition; TokenKind::COUNT]; 256]);

impl TransitionTable {
    fn set(&mut self, byte: u8, from: TokenKind, to: TokenKind, accept: bool) {
        self.0[byte as usize][from as usize] = Transition { to, accept };
    }

    fn get(&self, byte: u8, from: TokenKind) -> Transition {
        self.0[byte as usize][from as usize]
    }
}

static TRANSITIONS: Lazy<TransitionTable> = Lazy::new(|| {
    use TokenKind::*;

    let mut table = TransitionTable([[TRAP; TokenKind::COUNT]; 256]);

    table.set(b'\0', Empty, FileEnd, true);

    table.set(b'\n', Empty, LineEnd, true);
    table.set(b'\n', LineEnd, LineEnd, true);

    for byte in (b'a'..=b'z').chain(b'A'..=b'Z') {
        if byte != b'd' {
            table.set(byte, Empty, Identifier, true);
        }
        table.set(byte, Identifier, Identifier, true);
        // a lone 'd' followed by a letter was an identifier all along
        table.set(byte, OpDice, Identifier, true);
    }
    table.set(b'd', Empty, OpDice, true);

    table.set(b'_', Empty, Identifier, true);
    table.set(b'_', Identifier, Identifier, true);
    table.set(b'_', OpDice, Identifier, true);

    for byte in b'0'..=b'9' {
        table.set(byte, Empty, Value, true);
        table.set(byte, Value, Value, true);
        table.set(byte, Identifier, Identifier, true);
        // no transition from OpDice: in `d20` the 'd' stands alone as the dice operator
    }

    table.set(b':', Empty, Designator, true);
    table.set(b',', Empty, Separator, true);
    table.set(b'+', Empty, OpAdd, true);
    table.set(b'-', Empty, OpSub, true);
    table.set(b'*', Empty, OpMul, true);

    table.set(b'(', Empty, OpenParen, true);
    table.set(b')', Empty, CloseParen, true);
    table.set(b'{', Empty, OpenBrace, true);
    table.set(b'}', Empty, CloseBrace, true);
    table.set(b'[', Empty, OpenBracket, true);
    table.set(b']', Empty, CloseBracket, true);

    table
});

/// Longest-match tokenizer over a source buffer.
pub struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    position: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: vec![],
            position: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenizes the whole input.
    pub fn lex(mut self) -> Result<Vec<Token<'a>>, DicelangError> {
        loop {
            self.skip_blanks();

            let token = self.read_token();
            self.position += token.lexeme.len();

            if token.kind == TokenKind::LineEnd {
                self.line += token.lexeme.len();
                self.col = 1;
            } else {
                self.col += token.lexeme.len();
            }

            self.tokens.push(token);

            match token.kind {
                TokenKind::FileEnd => break,
                TokenKind::Invalid => {
                    return Err(DicelangError::lex(&token, "unrecognized token"));
                }
                _ => {}
            }
        }

        debug!("lexed {} tokens", self.tokens.len());

        Ok(self.tokens)
    }

    /// Byte at some offset, with the end of the input masquerading as a NUL terminator.
    fn byte_at(&self, at: usize) -> u8 {
        self.input.as_bytes().get(at).copied().unwrap_or(b'\0')
    }

    /// Skips spaces, tabs and `#` comments. Comments run up to, but not including, the
    /// next newline.
    fn skip_blanks(&mut self) {
        loop {
            match self.byte_at(self.position) {
                b' ' | b'\t' => {
                    self.position += 1;
                    self.col += 1;
                }
                b'#' => {
                    while self.position < self.input.len() && self.byte_at(self.position) != b'\n' {
                        self.position += 1;
                        self.col += 1;
                    }
                }
                _ => return,
            }
        }
    }

    /// Runs the automaton from the scan head and cuts out the longest acceptable lexeme.
    /// Produces an `invalid` token when the automaton stops in a non-accepting state.
    fn read_token(&self) -> Token<'a> {
        let start = self.position;
        let mut at = start;
        let mut current = Transition {
            to: TokenKind::Empty,
            accept: false,
        };

        loop {
            let byte = self.byte_at(at);
            let next = TRANSITIONS.get(byte, current.to);

            if next.to == TokenKind::Invalid {
                break;
            }

            current = next;

            if byte == b'\0' {
                break;
            }
            at += 1;
        }

        if current.accept {
            return Token {
                kind: current.to,
                lexeme: &self.input[start..at],
                position: (self.line, self.col),
            };
        }

        Token {
            kind: TokenKind::Invalid,
            lexeme: "",
            position: (self.line, self.col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex()
            .expect("input should lex")
            .iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lex_assignment() {
        use TokenKind::*;

        assert_eq!(
            Ok(vec![
                Token {
                    kind: Identifier,
                    lexeme: "R",
                    position: (1, 1)
                },
                Token {
                    kind: Designator,
                    lexeme: ":",
                    position: (1, 3)
                },
                Token {
                    kind: Value,
                    lexeme: "4",
                    position: (1, 5)
                },
                Token {
                    kind: LineEnd,
                    lexeme: "\n",
                    position: (1, 6)
                },
                Token {
                    kind: FileEnd,
                    lexeme: "",
                    position: (2, 1)
                },
            ]),
            Lexer::new("R : 4\n").lex()
        );
    }

    #[test]
    fn test_lex_empty_input() {
        use TokenKind::*;

        assert_eq!(vec![FileEnd], kinds(""));
        assert_eq!(vec![FileEnd], kinds("   \t "));
        assert_eq!(vec![FileEnd], kinds("# just a comment"));
    }

    #[test]
    fn test_lex_dice_operator() {
        use TokenKind::*;

        assert_eq!(vec![Value, OpDice, Value, FileEnd], kinds("1d6"));
        assert_eq!(vec![OpDice, Value, FileEnd], kinds("d20"));
        assert_eq!(vec![OpDice, FileEnd], kinds("d"));
    }

    #[test]
    fn test_lex_dice_promotes_to_identifier() {
        use TokenKind::*;

        let tokens = Lexer::new("dice").lex().expect("input should lex");
        assert_eq!(TokenKind::Identifier, tokens[0].kind);
        assert_eq!("dice", tokens[0].lexeme);

        assert_eq!(vec![Identifier, FileEnd], kinds("d_6"));
        assert_eq!(vec![Identifier, FileEnd], kinds("_d"));
        assert_eq!(vec![Identifier, FileEnd], kinds("drop2"));
    }

    #[test]
    fn test_lex_operators_and_brackets() {
        use TokenKind::*;

        assert_eq!(
            vec![
                OpAdd,
                OpSub,
                OpMul,
                Separator,
                Designator,
                OpenParen,
                CloseParen,
                OpenBrace,
                CloseBrace,
                OpenBracket,
                CloseBracket,
                FileEnd
            ],
            kinds("+ - * , : ( ) { } [ ]")
        );
    }

    #[test]
    fn test_lex_collapses_adjacent_newlines() {
        let tokens = Lexer::new("\n\n\nx").lex().expect("input should lex");

        assert_eq!(
            Token {
                kind: TokenKind::LineEnd,
                lexeme: "\n\n\n",
                position: (1, 1)
            },
            tokens[0]
        );
        assert_eq!(
            Token {
                kind: TokenKind::Identifier,
                lexeme: "x",
                position: (4, 1)
            },
            tokens[1]
        );
    }

    #[test]
    fn test_lex_comment_runs_to_line_end() {
        let tokens = Lexer::new("# comment\nR").lex().expect("input should lex");

        assert_eq!(TokenKind::LineEnd, tokens[0].kind);
        assert_eq!((1, 10), tokens[0].position);
        assert_eq!(TokenKind::Identifier, tokens[1].kind);
        assert_eq!((2, 1), tokens[1].position);
    }

    #[test]
    fn test_lex_unrecognized_byte() {
        let result = Lexer::new("R : @\n").lex();

        let error = result.expect_err("'@' should not lex");
        assert_eq!(ErrorKind::Lex, error.kind);
        assert_eq!("unrecognized token", error.what);

        let token = error.token.expect("error should carry a token");
        assert_eq!("invalid", token.name);
        assert_eq!((1, 5), token.position);
    }

    #[test]
    fn test_lex_positions_track_columns() {
        let tokens = Lexer::new("ab + 12").lex().expect("input should lex");

        assert_eq!((1, 1), tokens[0].position);
        assert_eq!((1, 4), tokens[1].position);
        assert_eq!((1, 6), tokens[2].position);
    }

    #[test]
    fn test_lex_value_keeps_leading_zeroes() {
        let tokens = Lexer::new("007").lex().expect("input should lex");

        assert_eq!(TokenKind::Value, tokens[0].kind);
        assert_eq!("007", tokens[0].lexeme);
    }
}
