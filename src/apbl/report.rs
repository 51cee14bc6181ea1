//! Text reports for the lexical and syntax phases.

use super::ast::{Call, Expr, Param, Program, Stmt};
use super::lexer::LexError;
use super::token::Token;

pub const LEXICAL_HEADER: &str = "LEXICAL ANALYSIS\n================\n\n";
pub const SYNTAX_HEADER: &str = "SYNTAX ANALYSIS\n===============\n\n";

pub fn lexical_analysis(tokens: &[Token]) -> String {
    let mut out = String::from(LEXICAL_HEADER);
    for token in tokens {
        out.push_str(&format!("Line {}: {}({})\n", token.line, token.kind, token.value));
    }
    out
}

/// Written in place of the token listing when tokenizing stops on an error.
pub fn lexical_failure(error: &LexError) -> String {
    format!("{}Failed to tokenize: {}\n", LEXICAL_HEADER, error)
}

/// `None` renders the failure marker instead of a tree.
pub fn syntax_analysis(program: Option<&Program>) -> String {
    let mut out = String::from(SYNTAX_HEADER);
    match program {
        Some(program) => out.push_str(&render_tree(program)),
        None => out.push_str("Failed to generate AST\n"),
    }
    out
}

pub fn render_tree(program: &Program) -> String {
    let root = TreeNode::branch("program", program.statements.iter().map(stmt_node).collect());
    let mut out = String::new();
    out.push_str(&root.label);
    out.push('\n');
    write_children(&root.children, &mut out);
    out
}

struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

struct Pending<'a> {
    node: &'a TreeNode,
    prefix: String,
    last: bool,
}

fn push_children<'a>(stack: &mut Vec<Pending<'a>>, children: &'a [TreeNode], prefix: &str) {
    for (i, node) in children.iter().enumerate().rev() {
        stack.push(Pending {
            node,
            prefix: prefix.to_string(),
            last: i + 1 == children.len(),
        });
    }
}

fn write_children(children: &[TreeNode], out: &mut String) {
    let mut stack = Vec::new();
    push_children(&mut stack, children, "");
    while let Some(Pending { node, prefix, last }) = stack.pop() {
        out.push_str(&prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&node.label);
        out.push('\n');
        let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
        push_children(&mut stack, &node.children, &nested);
    }
}

fn block_node(label: &str, statements: &[Stmt]) -> TreeNode {
    TreeNode::branch(format!("{}:", label), statements.iter().map(stmt_node).collect())
}

fn param_node(param: &Param) -> TreeNode {
    TreeNode::leaf(format!("parameter '{}' : {}", param.name, param.param_type))
}

fn call_node(call: &Call) -> TreeNode {
    TreeNode::branch(
        format!("function_call '{}'", call.name),
        call.arguments.iter().map(expr_node).collect(),
    )
}

fn stmt_node(stmt: &Stmt) -> TreeNode {
    match stmt {
        Stmt::Declaration {
            var_type,
            name,
            value,
            ..
        } => TreeNode::branch(
            format!("declaration '{}' : {}", name, var_type),
            vec![expr_node(value)],
        ),
        Stmt::Assignment { target, value, .. } => {
            TreeNode::branch(format!("assignment '{}'", target), vec![expr_node(value)])
        }
        Stmt::FunctionDef {
            return_type,
            name,
            params,
            body,
            ..
        } => {
            let mut children = Vec::new();
            if !params.is_empty() {
                children.push(TreeNode::branch("params:", params.iter().map(param_node).collect()));
            }
            children.push(block_node("body", body));
            TreeNode::branch(format!("function_def '{}' : {}", name, return_type), children)
        }
        Stmt::Call(call) => call_node(call),
        Stmt::If {
            condition,
            then_block,
            else_block,
            ..
        } => {
            let mut children = vec![
                TreeNode::branch("condition:", vec![expr_node(condition)]),
                block_node("then", then_block),
            ];
            if let Some(else_block) = else_block {
                children.push(block_node("else", else_block));
            }
            TreeNode::branch("if", children)
        }
        Stmt::While {
            condition, body, ..
        } => TreeNode::branch(
            "while",
            vec![
                TreeNode::branch("condition:", vec![expr_node(condition)]),
                block_node("body", body),
            ],
        ),
        Stmt::Return { value, .. } => TreeNode::branch("return", vec![expr_node(value)]),
    }
}

fn expr_node(expr: &Expr) -> TreeNode {
    match expr {
        Expr::Literal { value, .. } => TreeNode::leaf(format!("literal = {}", value)),
        Expr::Identifier { name, .. } => TreeNode::leaf(format!("identifier '{}'", name)),
        Expr::BinaryOp {
            op, left, right, ..
        } => TreeNode::branch(
            format!("binary_op [{}]", op.symbol()),
            vec![expr_node(left), expr_node(right)],
        ),
        Expr::Call(call) => call_node(call),
    }
}
