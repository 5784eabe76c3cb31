use crate::lexer::{Position, Token, TokenKind};

/// Nonterminal tags of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Program,
    Statement,
    Assignment,
    FunctionCall,
    VariableAccess,
    Addition,
    Dice,
    Multiplication,
    Operand,
    ExpressionSet,
}

impl RuleKind {
    /// Static display name used by diagnostics and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Program => "program",
            RuleKind::Statement => "statement",
            RuleKind::Assignment => "assignment",
            RuleKind::FunctionCall => "function_call",
            RuleKind::VariableAccess => "variable_access",
            RuleKind::Addition => "addition",
            RuleKind::Dice => "dice",
            RuleKind::Multiplication => "multiplication",
            RuleKind::Operand => "operand",
            RuleKind::ExpressionSet => "expression_set",
        }
    }
}

/// One node of the parse tree: either a consumed token, or a grammar rule with the
/// nodes built while matching it. The root owns its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode<'a> {
    Leaf(Token<'a>),
    Rule {
        kind: RuleKind,
        children: Vec<ParseNode<'a>>,
    },
}

impl<'a> ParseNode<'a> {
    /// Fresh childless rule node.
    pub fn rule(kind: RuleKind) -> Self {
        ParseNode::Rule {
            kind,
            children: vec![],
        }
    }

    /// The node's children, in match order. Empty for leaves.
    pub fn children(&self) -> &[ParseNode<'a>] {
        match self {
            ParseNode::Leaf(_) => &[],
            ParseNode::Rule { children, .. } => children,
        }
    }

    /// Attaches a child node. Attaching to a leaf does nothing.
    pub fn push(&mut self, child: ParseNode<'a>) {
        if let ParseNode::Rule { children, .. } = self {
            children.push(child);
        }
    }

    /// First token found depth-first, which carries the node's source position.
    pub fn first_token(&self) -> Option<&Token<'a>> {
        match self {
            ParseNode::Leaf(token) => Some(token),
            ParseNode::Rule { children, .. } => children.iter().find_map(ParseNode::first_token),
        }
    }

    /// The node's source position, derived from its first leaf.
    pub fn position(&self) -> Position {
        self.first_token().map(|token| token.position).unwrap_or((0, 0))
    }

    /// Whether one of the node's direct children is a leaf of the given kind.
    pub fn has_leaf(&self, kind: TokenKind) -> bool {
        self.children()
            .iter()
            .any(|child| matches!(child, ParseNode::Leaf(token) if token.kind == kind))
    }

    /// The token of the node's first child, when that child is a leaf.
    pub fn leading_leaf(&self) -> Option<&Token<'a>> {
        match self.children().first() {
            Some(ParseNode::Leaf(token)) => Some(token),
            _ => None,
        }
    }

    /// Static display name of the node's tag.
    pub fn name(&self) -> &'static str {
        match self {
            ParseNode::Leaf(token) => token.kind.name(),
            ParseNode::Rule { kind, .. } => kind.name(),
        }
    }
}
