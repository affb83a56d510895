//! Syntax tree printer
//!
//! Renders a tree pre-order: a node's own line(s), then its children in slot
//! order, then the next node of the same list. Every nesting level adds two
//! spaces of indentation and top-level nodes are already indented once, so
//!
//! ```text
//! int f(void) { return 1 + x; }
//! ```
//!
//! prints as
//!
//! ```text
//!   Function Declare : f
//!   Type : int
//!     Compound Statement
//!       Return Statement
//!         Additive Expression
//!           Constant : 1
//!           Operator : +
//!           Variable : x
//! ```

use crate::parser::ast::{NodeKind, TreeNode};

/// Spaces added per nesting level
pub const INDENT_WIDTH: usize = 2;

/// One printed line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Nesting depth; top-level nodes are at depth 1
    pub depth: usize,
    pub text: String,
    /// Source line of the node this row belongs to
    pub line: usize,
}

impl TreeRow {
    pub fn indent(&self) -> usize {
        self.depth * INDENT_WIDTH
    }
}

/// Flatten a list of nodes (and everything below them) into printed rows
pub fn tree_rows(nodes: &[TreeNode]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for node in nodes {
        push_node(node, 1, &mut rows);
    }
    rows
}

/// Render a list of nodes as indented text, one row per line
pub fn print_tree(nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    for row in tree_rows(nodes) {
        out.push_str(&" ".repeat(row.indent()));
        out.push_str(&row.text);
        out.push('\n');
    }
    out
}

fn push_node(node: &TreeNode, depth: usize, rows: &mut Vec<TreeRow>) {
    for text in labels(node) {
        rows.push(TreeRow {
            depth,
            text,
            line: node.line,
        });
    }

    for child in node.children() {
        push_node(child, depth + 1, rows);
    }
}

/// The label line of a node followed by its attribute lines
fn labels(node: &TreeNode) -> Vec<String> {
    match &node.kind {
        NodeKind::Compound { .. } => vec!["Compound Statement".to_string()],
        NodeKind::Selection { .. } => vec!["If".to_string()],
        NodeKind::Iteration { .. } => vec!["While".to_string()],
        NodeKind::Return { .. } => vec!["Return Statement".to_string()],
        NodeKind::SimpleExpr { .. } => vec!["Simple Expression".to_string()],
        NodeKind::AdditiveExpr { .. } => vec!["Additive Expression".to_string()],
        NodeKind::Term { .. } => vec!["Term".to_string()],
        NodeKind::Call { name, args } => vec![
            format!("Function Call : {}", name),
            format!("Numbers of Arguments : {}", args.len()),
        ],
        NodeKind::VarDecl {
            name,
            decl_type,
            is_param,
        } => {
            let label = if *is_param {
                format!("Parameter : {}", name)
            } else {
                format!("Variable Declare : {}", name)
            };
            vec![label, format!("Type : {}", decl_type)]
        }
        NodeKind::ArrayDecl {
            name,
            decl_type,
            size,
            is_param,
        } => {
            if *is_param {
                vec![
                    format!("Parameter(Array) : {}", name),
                    format!("Type : {}", decl_type),
                ]
            } else {
                let mut lines = vec![
                    format!("Array Declare : {}", name),
                    format!("Type : {}", decl_type),
                ];
                if let Some(size) = size {
                    lines.push(format!("Size : {}", size));
                }
                lines
            }
        }
        NodeKind::FuncDecl {
            name, return_type, ..
        } => vec![
            format!("Function Declare : {}", name),
            format!("Type : {}", return_type),
        ],
        NodeKind::Assign { .. } => vec!["Assign : = ".to_string()],
        NodeKind::Op(op) => vec![format!("Operator : {}", op)],
        NodeKind::Const(value) => vec![format!("Constant : {}", value)],
        NodeKind::Id { name, .. } => vec![format!("Variable : {}", name)],
    }
}
