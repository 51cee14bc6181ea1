use std::fmt;

use super::token::TokenValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Float,
    String,
    Bool,
    Date,
    Time,
    Void,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::String => "string",
            TypeName::Bool => "bool",
            TypeName::Date => "date",
            TypeName::Time => "time",
            TypeName::Void => "void",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Neq,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub param_type: TypeName,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration {
        var_type: TypeName,
        name: String,
        value: Expr,
        line: usize,
    },
    Assignment {
        target: String,
        value: Expr,
        line: usize,
    },
    FunctionDef {
        return_type: TypeName,
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
        line: usize,
    },
    Call(Call),
    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
        line: usize,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        line: usize,
    },
    Return {
        value: Expr,
        line: usize,
    },
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Declaration { line, .. }
            | Stmt::Assignment { line, .. }
            | Stmt::FunctionDef { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::Return { line, .. } => *line,
            Stmt::Call(call) => call.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: TokenValue,
        line: usize,
    },
    Identifier {
        name: String,
        line: usize,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
    },
    Call(Call),
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Literal { line, .. }
            | Expr::Identifier { line, .. }
            | Expr::BinaryOp { line, .. } => *line,
            Expr::Call(call) => call.line,
        }
    }
}
