//! The SRL abstract syntax tree, consumed as an already-parsed, immutable
//! tree of tagged nodes. Lexing/parsing SRL source text into this shape is
//! out of scope here; programs are built directly or deserialized from
//! JSON matching this shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    In,
    Out,
    Inout,
    State,
    Wire,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub kind: VariableKind,
    pub name: String,
    pub dimensions: Vec<u32>,
    pub bitwidth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub parameters: Vec<Variable>,
    pub variables: Vec<Variable>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub modules: Vec<Module>,
}

/// A constant-foldable numeric expression, evaluated against the current
/// loop-variable bindings. Used for array indices, bit-ranges, and for-loop
/// bounds — contexts where a qubit vector would make no sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericExpr {
    Literal(u64),
    LoopVariable(String),
    BinaryOp(Box<NumericExpr>, NumericOp, Box<NumericExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    Div,
    Modulo,
}

impl NumericExpr {
    pub fn evaluate(&self, loop_map: &HashMap<String, u64>) -> u64 {
        match self {
            NumericExpr::Literal(v) => *v,
            NumericExpr::LoopVariable(name) => *loop_map.get(name).unwrap_or(&0),
            NumericExpr::BinaryOp(lhs, op, rhs) => {
                let l = lhs.evaluate(loop_map);
                let r = rhs.evaluate(loop_map);
                match op {
                    NumericOp::Add => l.wrapping_add(r),
                    NumericOp::Sub => l.wrapping_sub(r),
                    NumericOp::Mul => l.wrapping_mul(r),
                    NumericOp::Div => {
                        if r == 0 {
                            0
                        } else {
                            l / r
                        }
                    }
                    NumericOp::Modulo => {
                        if r == 0 {
                            0
                        } else {
                            l % r
                        }
                    }
                }
            }
        }
    }
}

/// A reference to a (sub-range of a) declared variable: `var[i1]...[ik]`
/// optionally followed by a `.range` bit slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAccess {
    pub var: String,
    pub indexes: Vec<NumericExpr>,
    pub range: Option<(NumericExpr, NumericExpr)>,
}

impl VariableAccess {
    pub fn whole(var: impl Into<String>) -> Self {
        Self { var: var.into(), indexes: Vec::new(), range: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Exor,
    Multiply,
    Divide,
    Modulo,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    LessThan,
    GreaterThan,
    Equals,
    NotEquals,
    LessEquals,
    GreaterEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryExprOp {
    LogicalNegation,
    BitwiseNegation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftOp {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Add,
    Subtract,
    Exor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryStmtOp {
    Invert,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Numeric(u64, u32),
    Variable(VariableAccess),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Unary(UnaryExprOp, Box<Expression>),
    Shift(ShiftOp, Box<Expression>, NumericExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Skip,
    Swap(VariableAccess, VariableAccess),
    Unary(UnaryStmtOp, VariableAccess),
    Assign(AssignOp, VariableAccess, Expression),
    If {
        cond: Expression,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
    For {
        loop_var: String,
        from: NumericExpr,
        to: NumericExpr,
        step: NumericExpr,
        body: Vec<Statement>,
    },
    Call {
        target: String,
        args: Vec<String>,
    },
    Uncall {
        target: String,
        args: Vec<String>,
    },
}
