//! Shared-operand additive-chain rewrite: the line-aware strategy's
//! alternative to always allocating a fresh result vector for an
//! assignment's right-hand side.
//!
//! Detects right-hand sides of the shape `x op1 y op2 z ...` where every
//! node is a variable or a `{+, -, ^}` binary of such a chain, and — only
//! when an operand repeats — applies the statement directly against the
//! already-resolved qubit lines of each operand, never allocating a clean
//! result vector. When the pattern doesn't match, or no operand repeats,
//! the caller falls back to the cost-aware assignment path for that one
//! statement.

use crate::ast::{AssignOp, BinaryOp, Expression, VariableAccess};
use crate::circuit::QubitId;
use crate::synth::gadgets;
use crate::synth::engine::SynthesisEngine;

/// A flattened `first op1 second op2 third ...` chain. All `op`s are
/// required equal (a homogeneous chain) for the rewrite to apply; mixed
/// `+`/`-`/`^` chains fall back to the baseline strategy.
struct Chain {
    op: BinaryOp,
    operands: Vec<VariableAccess>,
}

fn as_variable(expr: &Expression) -> Option<&VariableAccess> {
    match expr {
        Expression::Variable(v) => Some(v),
        _ => None,
    }
}

fn chain_op(op: BinaryOp) -> Option<BinaryOp> {
    matches!(op, BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Exor).then_some(op)
}

/// Recursively flattens a left-deep chain of `{+,-,^}` binaries whose
/// right-hand leaves are plain variables. Fails (returns `None`) as soon as
/// a node doesn't fit that shape — numeric literals, other operators,
/// shifts, or a right operand that is itself a binary expression.
fn flatten(expr: &Expression) -> Option<Chain> {
    match expr {
        Expression::Variable(v) => Some(Chain { op: BinaryOp::Add, operands: vec![v.clone()] }),
        Expression::Binary(op, lhs, rhs) => {
            let op = chain_op(*op)?;
            let rhs_var = as_variable(rhs)?.clone();
            let mut inner = flatten(lhs)?;
            if inner.operands.len() > 1 && inner.op != op {
                return None;
            }
            inner.op = op;
            inner.operands.push(rhs_var);
            Some(inner)
        }
        _ => None,
    }
}

/// `outer` is the statement's own assign op (`+=`/`-=`/`^=`); `inner` is the
/// chain's homogeneous op. Per spec: a statement op of `-=` flips each
/// fused arithmetic op between `+` and `-`; `^` is unaffected by sign.
fn compose(outer: AssignOp, inner: BinaryOp) -> Option<BinaryOp> {
    match (outer, inner) {
        (AssignOp::Exor, BinaryOp::Exor) => Some(BinaryOp::Exor),
        (AssignOp::Exor, _) | (_, BinaryOp::Exor) => None,
        (AssignOp::Add, BinaryOp::Add) => Some(BinaryOp::Add),
        (AssignOp::Add, BinaryOp::Subtract) => Some(BinaryOp::Subtract),
        (AssignOp::Subtract, BinaryOp::Add) => Some(BinaryOp::Subtract),
        (AssignOp::Subtract, BinaryOp::Subtract) => Some(BinaryOp::Add),
        _ => None,
    }
}

/// Attempts the rewrite for `lhs OUTER= rhs`. Returns `None` when the
/// pattern doesn't apply (caller must fall back to cost-aware); otherwise
/// returns whether the rewritten emission succeeded.
pub fn try_rewrite_assign(
    engine: &mut SynthesisEngine,
    outer: AssignOp,
    lhs: &VariableAccess,
    rhs: &Expression,
) -> Option<bool> {
    let chain = flatten(rhs)?;
    if chain.operands.len() < 2 {
        return None;
    }

    let lhs_lines = engine.resolve(lhs)?;

    let mut resolved: Vec<Vec<QubitId>> = Vec::with_capacity(chain.operands.len());
    for access in &chain.operands {
        resolved.push(engine.resolve(access)?);
    }

    if !has_duplicate(&resolved) {
        return None;
    }

    if chain.op == BinaryOp::Exor {
        if outer != AssignOp::Exor {
            return None;
        }
        // Operands XORed together associatively commute; a pair of equal
        // operands cancels, so keep only odd-multiplicity operands.
        let surviving = cancel_xor_pairs(resolved);
        let mut ok = true;
        for operand in &surviving {
            ok &= gadgets::bitwise_cnot(engine.builder_mut(), &lhs_lines, operand);
        }
        return Some(ok);
    }

    // Homogeneous +/- chain: assign coefficients by walking the chain,
    // flipping sign every time the chain op is Subtract, then compose each
    // operand's coefficient with the statement's own op.
    let mut ok = true;
    let mut sign_is_add = true;
    for (i, operand) in resolved.iter().enumerate() {
        if i > 0 && chain.op == BinaryOp::Subtract {
            sign_is_add = !sign_is_add;
        }
        let inner_op = if sign_is_add { BinaryOp::Add } else { BinaryOp::Subtract };
        let effective = compose(outer, inner_op)?;
        ok &= match effective {
            BinaryOp::Add => gadgets::increase(engine.builder_mut(), &lhs_lines, operand),
            BinaryOp::Subtract => gadgets::decrease(engine.builder_mut(), &lhs_lines, operand),
            BinaryOp::Exor => unreachable!("homogeneous +/- chain never composes to Exor"),
            _ => return None,
        };
    }
    Some(ok)
}

fn has_duplicate(vectors: &[Vec<QubitId>]) -> bool {
    for i in 0..vectors.len() {
        for j in (i + 1)..vectors.len() {
            if vectors[i] == vectors[j] {
                return true;
            }
        }
    }
    false
}

/// Multiset-XOR cancellation: an operand appearing an even number of times
/// contributes nothing and is dropped entirely; odd counts keep one copy.
fn cancel_xor_pairs(operands: Vec<Vec<QubitId>>) -> Vec<Vec<QubitId>> {
    let mut counts: Vec<(Vec<QubitId>, usize)> = Vec::new();
    for op in operands {
        if let Some(entry) = counts.iter_mut().find(|(v, _)| *v == op) {
            entry.1 += 1;
        } else {
            counts.push((op, 1));
        }
    }
    counts.into_iter().filter(|(_, c)| c % 2 == 1).map(|(v, _)| v).collect()
}
