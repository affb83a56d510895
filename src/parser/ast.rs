// Syntax tree definitions for the C- front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Declared type of a variable, parameter or function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclType {
    Integer,
    Void,
}

impl fmt::Display for DeclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclType::Integer => write!(f, "int"),
            DeclType::Void => write!(f, "void"),
        }
    }
}

/// Arithmetic and relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    // Additive
    Plus,
    Minus,
    // Multiplicative
    Times,
    Over,
}

impl Operator {
    /// The operator as it is spelled in source
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Over => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Top-level discriminant of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFamily {
    Statement,
    Expression,
}

/// Kind-specific payload and child slots of a tree node.
///
/// Each variant owns exactly the children its construct can have. Lists that
/// C- writes as consecutive items (declarations, statements, parameters,
/// arguments) are kept as `Vec`s in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Statement family
    Compound {
        locals: Vec<TreeNode>,
        statements: Vec<TreeNode>,
    },
    Selection {
        condition: Box<TreeNode>,
        then_branch: Option<Box<TreeNode>>,
        else_branch: Option<Box<TreeNode>>,
    },
    Iteration {
        condition: Box<TreeNode>,
        body: Option<Box<TreeNode>>,
    },
    Return {
        value: Option<Box<TreeNode>>,
    },
    SimpleExpr {
        left: Box<TreeNode>,
        op: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    AdditiveExpr {
        left: Box<TreeNode>,
        op: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Term {
        left: Box<TreeNode>,
        op: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Call {
        name: String,
        args: Vec<TreeNode>,
    },

    // Expression family
    VarDecl {
        name: String,
        decl_type: DeclType,
        is_param: bool,
    },
    ArrayDecl {
        name: String,
        decl_type: DeclType,
        size: Option<usize>, // None for `name[]` parameters
        is_param: bool,
    },
    FuncDecl {
        name: String,
        return_type: DeclType,
        params: Vec<TreeNode>,
        body: Box<TreeNode>,
    },
    Assign {
        target: Box<TreeNode>,
        value: Box<TreeNode>,
    },
    Op(Operator),
    Const(i32),
    Id {
        name: String,
        index: Option<Box<TreeNode>>,
    },
}

/// A syntax tree node: a kind plus the source line it was created on
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub line: usize,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn new(kind: NodeKind, line: usize) -> Self {
        TreeNode { line, kind }
    }

    pub fn family(&self) -> NodeFamily {
        match self.kind {
            NodeKind::Compound { .. }
            | NodeKind::Selection { .. }
            | NodeKind::Iteration { .. }
            | NodeKind::Return { .. }
            | NodeKind::SimpleExpr { .. }
            | NodeKind::AdditiveExpr { .. }
            | NodeKind::Term { .. }
            | NodeKind::Call { .. } => NodeFamily::Statement,
            NodeKind::VarDecl { .. }
            | NodeKind::ArrayDecl { .. }
            | NodeKind::FuncDecl { .. }
            | NodeKind::Assign { .. }
            | NodeKind::Op(_)
            | NodeKind::Const(_)
            | NodeKind::Id { .. } => NodeFamily::Expression,
        }
    }

    /// Short kind name, used in debug output and test failure messages
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Compound { .. } => "CompoundStmt",
            NodeKind::Selection { .. } => "SelectionStmt",
            NodeKind::Iteration { .. } => "IterationStmt",
            NodeKind::Return { .. } => "ReturnStmt",
            NodeKind::SimpleExpr { .. } => "SimpleExpr",
            NodeKind::AdditiveExpr { .. } => "AdditiveExpr",
            NodeKind::Term { .. } => "Term",
            NodeKind::Call { .. } => "Call",
            NodeKind::VarDecl { .. } => "VarDecl",
            NodeKind::ArrayDecl { .. } => "ArrayDecl",
            NodeKind::FuncDecl { .. } => "FuncDecl",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::Op(_) => "Op",
            NodeKind::Const(_) => "Const",
            NodeKind::Id { .. } => "Id",
        }
    }

    /// Name attribute of declarations, calls and variable references
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Call { name, .. }
            | NodeKind::VarDecl { name, .. }
            | NodeKind::ArrayDecl { name, .. }
            | NodeKind::FuncDecl { name, .. }
            | NodeKind::Id { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Value attribute of a constant
    pub fn value(&self) -> Option<i32> {
        match self.kind {
            NodeKind::Const(value) => Some(value),
            _ => None,
        }
    }

    /// Operator attribute of an `Op` node
    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            NodeKind::Op(op) => Some(op),
            _ => None,
        }
    }

    /// The operator of a binary node (`SimpleExpr`, `AdditiveExpr`, `Term`)
    /// or of an `Op` node itself
    pub fn binary_operator(&self) -> Option<Operator> {
        match &self.kind {
            NodeKind::SimpleExpr { op, .. }
            | NodeKind::AdditiveExpr { op, .. }
            | NodeKind::Term { op, .. } => op.operator(),
            NodeKind::Op(op) => Some(*op),
            _ => None,
        }
    }

    /// Declared type of a declaration
    pub fn decl_type(&self) -> Option<DeclType> {
        match self.kind {
            NodeKind::VarDecl { decl_type, .. } | NodeKind::ArrayDecl { decl_type, .. } => {
                Some(decl_type)
            }
            NodeKind::FuncDecl { return_type, .. } => Some(return_type),
            _ => None,
        }
    }

    /// Declared element count; only sized array declarations have one
    pub fn size(&self) -> Option<usize> {
        match self.kind {
            NodeKind::ArrayDecl { size, .. } => size,
            _ => None,
        }
    }

    /// Whether this is a parameter declaration; `false` for every other kind
    pub fn is_param(&self) -> bool {
        match self.kind {
            NodeKind::VarDecl { is_param, .. } | NodeKind::ArrayDecl { is_param, .. } => is_param,
            _ => false,
        }
    }

    /// Occupied child slots in order, lists flattened
    pub fn children(&self) -> Vec<&TreeNode> {
        match &self.kind {
            NodeKind::Compound { locals, statements } => {
                locals.iter().chain(statements.iter()).collect()
            }
            NodeKind::Selection {
                condition,
                then_branch,
                else_branch,
            } => std::iter::once(condition.as_ref())
                .chain(then_branch.as_deref())
                .chain(else_branch.as_deref())
                .collect(),
            NodeKind::Iteration { condition, body } => std::iter::once(condition.as_ref())
                .chain(body.as_deref())
                .collect(),
            NodeKind::Return { value } => value.as_deref().into_iter().collect(),
            NodeKind::SimpleExpr { left, op, right }
            | NodeKind::AdditiveExpr { left, op, right }
            | NodeKind::Term { left, op, right } => {
                vec![left.as_ref(), op.as_ref(), right.as_ref()]
            }
            NodeKind::Call { args, .. } => args.iter().collect(),
            NodeKind::FuncDecl { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            NodeKind::Assign { target, value } => vec![target.as_ref(), value.as_ref()],
            NodeKind::Id { index, .. } => index.as_deref().into_iter().collect(),
            NodeKind::VarDecl { .. }
            | NodeKind::ArrayDecl { .. }
            | NodeKind::Op(_)
            | NodeKind::Const(_) => Vec::new(),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<TreeNode>, // FuncDecl, VarDecl and ArrayDecl in source order
}
