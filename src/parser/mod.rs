//! # Parser
//!
//! This module shapes a token sequence into a parse tree.
//!
//! The parser is a hand-written recursive descent with one token of lookahead (two at
//! `statement`, to tell an assignment from a function call). Every rule creates a node
//! tagged with its nonterminal, and every consumed token is attached to the current
//! rule's node as a leaf, so a depth-first walk of the leaves replays the token
//! sequence.
//!
//! Parsing is fail-fast: the first unexpected token is recorded, and with an error
//! recorded the token primitives refuse to consume anything, which unwinds the rule
//! descent without further diagnostics.
//!
//! ```text
//! program         := line_end? statement (line_end (statement)?)* file_end
//! statement       := assignment | function_call
//! assignment      := identifier designator addition
//! function_call   := identifier open_paren expression_set close_paren
//! addition        := multiplication ((op_add | op_sub) multiplication)*
//! multiplication  := operand ((op_mul | &op_dice) operand)*
//! operand         := open_paren addition close_paren
//!                  | open_bracket expression_set close_bracket
//!                  | op_dice dice
//!                  | value
//!                  | variable_access
//! dice            := value
//! variable_access := identifier
//! expression_set  := addition (separator addition)*
//! ```

mod node;

pub use node::*;

use log::debug;

use crate::{
    error::DicelangError,
    lexer::{Token, TokenKind},
};

/// Builds the parse tree for a whole token sequence, returning the `program` root or
/// the error recorded at the first offending token.
pub fn parse(tokens: Vec<Token<'_>>) -> Result<ParseNode<'_>, DicelangError> {
    Parser::new(tokens).run()
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
    error: Option<DicelangError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            index: 0,
            error: None,
        }
    }

    fn run(mut self) -> Result<ParseNode<'a>, DicelangError> {
        let mut root = ParseNode::rule(RuleKind::Program);
        self.program(&mut root);

        match self.error {
            Some(error) => Err(error),
            None => {
                debug!("parsed {} top level nodes", root.children().len());
                Ok(root)
            }
        }
    }

    fn peek(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.index + offset)
    }

    /// Peeks at the leading token without consuming it.
    fn next_is(&self, what: TokenKind) -> bool {
        self.peek(0).map(|token| token.kind == what).unwrap_or(false)
    }

    /// Consumes the leading token when it matches, attaching it under `parent`.
    fn accept(&mut self, what: TokenKind, parent: &mut ParseNode<'a>) -> bool {
        if self.error.is_some() || !self.next_is(what) {
            return false;
        }

        let token = self.tokens[self.index];
        self.index += 1;
        parent.push(ParseNode::Leaf(token));

        true
    }

    /// Like [`Parser::accept`], but records a syntax error when the leading token does
    /// not match. The first recorded error wins.
    fn expect(&mut self, what: TokenKind, parent: &mut ParseNode<'a>) -> bool {
        if self.accept(what, parent) {
            return true;
        }

        if self.error.is_none() {
            self.error = Some(match self.peek(0) {
                Some(token) => DicelangError::parse(token, "unexpected token"),
                None => DicelangError::parse_eof("end of stream reached"),
            });
        }

        false
    }

    fn program(&mut self, parent: &mut ParseNode<'a>) {
        self.accept(TokenKind::LineEnd, parent);

        while self.error.is_none() && self.peek(0).is_some() && !self.next_is(TokenKind::FileEnd) {
            // a line may also be blank: a statement after a line_end is optional
            if !self.next_is(TokenKind::LineEnd) {
                self.statement(parent);
            }

            if !self.accept(TokenKind::LineEnd, parent) {
                break;
            }
        }

        self.expect(TokenKind::FileEnd, parent);
    }

    /// Dispatches on two tokens of lookahead: an identifier followed by a designator
    /// starts an assignment, anything else must be a function call.
    fn statement(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Statement);

        let assigns = self.next_is(TokenKind::Identifier)
            && self
                .peek(1)
                .map(|token| token.kind == TokenKind::Designator)
                .unwrap_or(false);

        if assigns {
            self.assignment(&mut node);
        } else {
            self.function_call(&mut node);
        }

        parent.push(node);
    }

    fn assignment(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Assignment);

        self.expect(TokenKind::Identifier, &mut node);
        self.expect(TokenKind::Designator, &mut node);
        self.addition(&mut node);

        parent.push(node);
    }

    fn function_call(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::FunctionCall);

        self.expect(TokenKind::Identifier, &mut node);
        self.expect(TokenKind::OpenParen, &mut node);
        self.expression_set(&mut node);
        self.expect(TokenKind::CloseParen, &mut node);

        parent.push(node);
    }

    fn addition(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Addition);

        self.multiplication(&mut node);
        while self.accept(TokenKind::OpAdd, &mut node) || self.accept(TokenKind::OpSub, &mut node) {
            self.multiplication(&mut node);
        }

        parent.push(node);
    }

    fn multiplication(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Multiplication);

        self.operand(&mut node);
        loop {
            if self.accept(TokenKind::OpMul, &mut node) {
                self.operand(&mut node);
            } else if self.error.is_none() && self.next_is(TokenKind::OpDice) {
                // implicit dice continuation: `operand` consumes the operator itself
                self.operand(&mut node);
            } else {
                break;
            }
        }

        parent.push(node);
    }

    fn operand(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Operand);

        if self.accept(TokenKind::OpenParen, &mut node) {
            self.addition(&mut node);
            self.expect(TokenKind::CloseParen, &mut node);
        } else if self.accept(TokenKind::OpenBracket, &mut node) {
            self.expression_set(&mut node);
            self.expect(TokenKind::CloseBracket, &mut node);
        } else if self.accept(TokenKind::OpDice, &mut node) {
            self.dice(&mut node);
        } else if self.next_is(TokenKind::Identifier) {
            self.variable_access(&mut node);
        } else {
            // a value, or nothing this rule admits; braces land here too, reserved
            self.expect(TokenKind::Value, &mut node);
        }

        parent.push(node);
    }

    fn dice(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::Dice);

        self.expect(TokenKind::Value, &mut node);

        parent.push(node);
    }

    fn variable_access(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::VariableAccess);

        self.expect(TokenKind::Identifier, &mut node);

        parent.push(node);
    }

    fn expression_set(&mut self, parent: &mut ParseNode<'a>) {
        let mut node = ParseNode::rule(RuleKind::ExpressionSet);

        self.addition(&mut node);
        while self.accept(TokenKind::Separator, &mut node) {
            self.addition(&mut node);
        }

        parent.push(node);
    }
}
