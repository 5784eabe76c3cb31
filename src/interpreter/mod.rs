//! # Interpreter
//!
//! This module executes a parse tree.
//!
//! The walk is post-order and driven by an explicit context stack instead of native
//! recursion, so deep trees cannot exhaust the call stack. Every frame remembers the
//! depth of the value stack when it was entered: a routine running once all children
//! have executed knows exactly which distributions its subtree produced, consumes
//! them, and pushes its own result.
//!
//! Only some tags carry a routine. `program`, `statement` and `expression_set` exist
//! purely through their children; `operand` only acts for `[...]` expression sets,
//! where it folds the evaluated elements into a single union.

mod functions;
mod variables;

pub use functions::*;
pub use variables::*;

use std::io::Write;

use log::debug;

use crate::{
    distribution::Distribution,
    error::DicelangError,
    lexer::{Token, TokenKind},
    parser::{ParseNode, RuleKind},
};

/// One frame of the execution stack: a node being visited, the next child to descend
/// into, and how deep the value stack was when the frame was entered.
#[derive(Clone, Copy)]
struct Frame<'t, 'a> {
    node: &'t ParseNode<'a>,
    next_child: usize,
    values_depth: usize,
}

/// Post-order tree evaluator over a stack of distributions.
pub struct Interpreter<'out> {
    variables: Variables,
    functions: Functions,
    values: Vec<Distribution>,
    out: &'out mut dyn Write,
}

impl<'out> Interpreter<'out> {
    /// Fresh interpreter printing to `out`, with the built-in functions registered.
    pub fn new(out: &'out mut dyn Write) -> Self {
        Self {
            variables: Variables::default(),
            functions: Functions::default(),
            values: vec![],
            out,
        }
    }

    /// The variable table, as left behind by the last run.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Runs a `program`-rooted parse tree to completion or to its first error.
    pub fn interpret(&mut self, tree: &ParseNode<'_>) -> Result<(), DicelangError> {
        let mut contexts = vec![Frame {
            node: tree,
            next_child: 0,
            values_depth: self.values.len(),
        }];

        while let Some(index) = contexts.len().checked_sub(1) {
            let frame = contexts[index];

            if frame.next_child < frame.node.children().len() {
                contexts[index].next_child += 1;
                contexts.push(Frame {
                    node: &frame.node.children()[frame.next_child],
                    next_child: 0,
                    values_depth: self.values.len(),
                });
                continue;
            }

            self.dispatch(&frame)?;
            contexts.pop();
        }

        Ok(())
    }

    /// Runs the routine tied to a node's tag once all its children have executed.
    fn dispatch(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        match frame.node {
            ParseNode::Leaf(token) if token.kind == TokenKind::Value => self.exec_value(token),
            ParseNode::Leaf(_) => Ok(()),
            ParseNode::Rule { kind, .. } => match kind {
                RuleKind::Assignment => self.exec_assignment(frame),
                RuleKind::VariableAccess => self.exec_variable_access(frame),
                RuleKind::Addition => self.exec_addition(frame),
                RuleKind::Multiplication => self.exec_multiplication(frame),
                RuleKind::Dice => self.exec_dice(frame),
                RuleKind::FunctionCall => self.exec_function_call(frame),
                RuleKind::Operand => self.exec_operand(frame),
                RuleKind::Program | RuleKind::Statement | RuleKind::ExpressionSet => Ok(()),
            },
        }
    }

    /// Number of distributions the value stack gained since the frame was entered.
    fn gained(&self, frame: &Frame<'_, '_>) -> usize {
        self.values.len() - frame.values_depth
    }

    /// Decodes an integer literal into a singleton distribution.
    fn exec_value(&mut self, token: &Token<'_>) -> Result<(), DicelangError> {
        let value = token
            .lexeme
            .parse::<i64>()
            .map_err(|_| DicelangError::interpret(Some(token), "integer literal out of range"))?;

        self.values.push(Distribution::singleton(value));

        Ok(())
    }

    /// Moves the distribution the subtree produced into the variable named by the
    /// node's first leaf.
    fn exec_assignment(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        let name = frame
            .node
            .leading_leaf()
            .filter(|token| token.kind == TokenKind::Identifier)
            .map(|token| token.lexeme);

        let (Some(name), 1) = (name, self.gained(frame)) else {
            if self.gained(frame) > 0 {
                self.values.pop();
            }
            return Ok(());
        };

        let Some(value) = self.values.pop() else {
            return Ok(());
        };

        debug!("binding '{}' to {} entries", name, value.len());
        self.variables.set(name, value);

        Ok(())
    }

    /// Pushes a copy of the distribution bound to the accessed name.
    fn exec_variable_access(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        let Some(token) = frame
            .node
            .leading_leaf()
            .filter(|token| token.kind == TokenKind::Identifier)
        else {
            return Ok(());
        };

        match self.variables.find(token.lexeme) {
            Some(value) => {
                self.values.push(value.clone());
                Ok(())
            }
            None => Err(DicelangError::interpret(Some(token), "unknown variable")),
        }
    }

    /// Folds the subtree's results with `add` or `sub`, left operand the deeper one.
    fn exec_addition(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        let adds = frame.node.has_leaf(TokenKind::OpAdd);

        while self.gained(frame) > 1 {
            let Some(rhs) = self.values.pop() else { break };
            let Some(lhs) = self.values.pop() else { break };

            let combined = if adds { lhs.add(&rhs) } else { lhs.sub(&rhs) };

            self.values.push(combined.map_err(|_| overflow(frame.node))?);
        }

        Ok(())
    }

    /// Folds the subtree's results: `mul` under an explicit `*`, otherwise the pair is
    /// an implicit dice continuation and the left operand counts rolls of the right.
    fn exec_multiplication(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        let multiplies = frame.node.has_leaf(TokenKind::OpMul);

        while self.gained(frame) > 1 {
            let Some(rhs) = self.values.pop() else { break };
            let Some(lhs) = self.values.pop() else { break };

            let combined = if multiplies { lhs.mul(&rhs) } else { lhs.roll(&rhs) };

            self.values.push(combined.map_err(|_| overflow(frame.node))?);
        }

        Ok(())
    }

    /// Replaces the subtree's single result with its dice expansion.
    fn exec_dice(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        if self.gained(frame) != 1 {
            return Ok(());
        }

        let Some(top) = self.values.pop() else {
            return Ok(());
        };

        let expanded = top.dice().map_err(|_| overflow(frame.node))?;
        self.values.push(expanded);

        Ok(())
    }

    /// Calls the built-in named by the node's first leaf on the distributions the
    /// argument list pushed. Arguments are consumed; a returning built-in's result is
    /// pushed in their place.
    fn exec_function_call(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        let Some(token) = frame
            .node
            .leading_leaf()
            .filter(|token| token.kind == TokenKind::Identifier)
        else {
            return Ok(());
        };

        let Some(builtin) = self.functions.find(token.lexeme) else {
            return Err(DicelangError::interpret(Some(token), "unknown function"));
        };

        if builtin.arity != self.gained(frame) {
            return Err(DicelangError::interpret(Some(token), "wrong number of arguments"));
        }

        let result = (builtin.call)(&self.values[frame.values_depth..], self.out)
            .map_err(|_| DicelangError::internal("builtin could not write to the output stream"))?;

        self.values.truncate(frame.values_depth);

        if builtin.returns {
            if let Some(value) = result {
                self.values.push(value);
            }
        }

        Ok(())
    }

    /// Folds a bracketed expression set into a single union. Other operand shapes pass
    /// their single result through untouched.
    fn exec_operand(&mut self, frame: &Frame<'_, '_>) -> Result<(), DicelangError> {
        if !frame.node.has_leaf(TokenKind::OpenBracket) {
            return Ok(());
        }

        while self.gained(frame) > 1 {
            let Some(rhs) = self.values.pop() else { break };
            let Some(lhs) = self.values.pop() else { break };

            let merged = lhs.union(&rhs).map_err(|_| overflow(frame.node))?;
            self.values.push(merged);
        }

        Ok(())
    }
}

fn overflow(node: &ParseNode<'_>) -> DicelangError {
    DicelangError::interpret(node.first_token(), "arithmetic overflow in distribution weights")
}
