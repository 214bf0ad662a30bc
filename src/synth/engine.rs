//! Recursive, side-effect-driven translator from the SRL AST to circuit
//! operations. Walks modules, statements, and expressions in source order,
//! allocating ancillary qubits as working registers and dispatching
//! operators to [`crate::synth::gadgets`].

use std::collections::HashMap;

use crate::ast::{
    AssignOp, BinaryOp, Expression, Module, NumericExpr, Program, ShiftOp, Statement,
    UnaryExprOp, UnaryStmtOp, VariableAccess,
};
use crate::circuit::{CircuitBuilder, QubitId};
use crate::synth::constants::ConstantLinePool;
use crate::synth::gadgets;
use crate::synth::line_aware;

/// Which of the two synthesis strategies (spec §4.7) drives assignment
/// emission. Every other statement/expression kind is strategy-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    CostAware,
    LineAware,
}

/// One lexical level of variable bindings: a call's formal parameters
/// (aliased to the caller's qubit lines) plus its own locals. Lookups never
/// cross frame boundaries — a call starts a fresh scope, matching SRL's
/// call-by-reference-parameter-list semantics (spec §4.6 Call).
#[derive(Debug, Default)]
struct Frame {
    variables: HashMap<String, VarSlot>,
}

#[derive(Debug, Clone)]
struct VarSlot {
    qubits: Vec<QubitId>,
    bitwidth: u32,
    dimensions: Vec<u32>,
}

/// Walks an SRL [`Program`], emitting operations into an owned
/// [`CircuitBuilder`]. One engine instance is used for exactly one
/// `synthesize` call; its `expOpStack`/`expLhsStack`/`expRhsStack`-style
/// scratch lives entirely in [`line_aware`] and is reset per assignment, so
/// no extra state needs resetting here between runs.
pub struct SynthesisEngine {
    builder: CircuitBuilder,
    constants: ConstantLinePool,
    modules: HashMap<String, Module>,
    frames: Vec<Frame>,
    loop_map: HashMap<String, u64>,
    strategy: Strategy,
    statement_counter: u64,
}

impl SynthesisEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            builder: CircuitBuilder::new(),
            constants: ConstantLinePool::new(),
            modules: HashMap::new(),
            frames: vec![Frame::default()],
            loop_map: HashMap::new(),
            strategy,
            statement_counter: 0,
        }
    }

    pub fn builder(&self) -> &CircuitBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut CircuitBuilder {
        &mut self.builder
    }

    pub fn into_builder(self) -> CircuitBuilder {
        self.builder
    }

    #[cfg(test)]
    pub fn bind_test_variable(&mut self, name: &str, qubits: Vec<QubitId>) {
        let bitwidth = qubits.len() as u32;
        self.frames.last_mut().unwrap().variables.insert(
            name.to_string(),
            VarSlot { qubits, bitwidth, dimensions: vec![] },
        );
    }

    // --- top level ------------------------------------------------------

    /// Selects the main module (the supplied name, else `"main"`, else the
    /// first declared), allocates its parameter/variable qubits, walks its
    /// statements in order, then promotes every ancillary allocated along
    /// the way. A `false` return means synthesis aborted partway; whatever
    /// was already emitted is retained (spec §7 policy).
    pub fn synthesize(&mut self, program: &Program, main_module_name: Option<&str>) -> bool {
        if program.modules.is_empty() {
            return false;
        }
        for module in &program.modules {
            self.modules.insert(module.name.clone(), module.clone());
        }

        let main = match main_module_name {
            Some(name) => self.modules.get(name).cloned(),
            None => self
                .modules
                .get("main")
                .cloned()
                .or_else(|| program.modules.first().cloned()),
        };
        let Some(main) = main else {
            return false;
        };

        for var in main.parameters.iter().chain(main.variables.iter()) {
            // `In`/`Out`/`Inout` are all externally observable; none are
            // garbage at allocation time (spec §3, DESIGN.md).
            if self.allocate_non_ancillary(var.name.clone(), var.bitwidth, &var.dimensions, false).is_none() {
                return false;
            }
        }

        let mut ok = true;
        for stmt in &main.statements {
            if !ok {
                break;
            }
            ok = self.synth_statement(stmt);
        }

        self.promote_all_ancillaries();
        ok
    }

    fn promote_all_ancillaries(&mut self) {
        let len = self.builder.registry().len();
        for i in 0..len {
            let q = QubitId::new(i);
            if matches!(
                self.builder.registry().class(q),
                Some(crate::circuit::QubitClass::PreliminaryAncillary)
            ) {
                self.builder.promote(q);
            }
        }
    }

    fn allocate_non_ancillary(
        &mut self,
        name: String,
        bitwidth: u32,
        dimensions: &[u32],
        garbage: bool,
    ) -> Option<()> {
        let total_elements: u32 = dimensions.iter().product::<u32>().max(1);
        let mut qubits = Vec::with_capacity((bitwidth * total_elements) as usize);
        if dimensions.is_empty() {
            for bit in 0..bitwidth {
                let label = format!("{name}.{bit}");
                qubits.push(self.builder.add_non_ancillary(label, garbage)?);
            }
        } else {
            for elem in 0..total_elements {
                let indices = unflatten_index(elem, dimensions);
                for bit in 0..bitwidth {
                    let idx_str = indices.iter().map(|i| format!("[{i}]")).collect::<String>();
                    let label = format!("{name}{idx_str}.{bit}");
                    qubits.push(self.builder.add_non_ancillary(label, garbage)?);
                }
            }
        }
        self.frames.last_mut().unwrap().variables.insert(
            name,
            VarSlot { qubits, bitwidth, dimensions: dimensions.to_vec() },
        );
        Some(())
    }

    /// Allocates one call frame's `State`/`Wire` locals as preliminary
    /// ancillaries. They are never promoted here — see the promotion note
    /// at the `synth_call` call site.
    fn allocate_ancillary_locals(&mut self, module: &Module) -> Option<()> {
        for var in &module.variables {
            let total_elements: u32 = var.dimensions.iter().product::<u32>().max(1);
            let mut qubits = Vec::with_capacity((var.bitwidth * total_elements) as usize);
            for _ in 0..(var.bitwidth * total_elements) {
                let label = format!("__{}_{}", var.name, self.builder.registry().len());
                qubits.push(self.builder.add_preliminary_ancillary(label, false)?);
            }
            self.frames.last_mut().unwrap().variables.insert(
                var.name.clone(),
                VarSlot { qubits, bitwidth: var.bitwidth, dimensions: var.dimensions.clone() },
            );
        }
        Some(())
    }

    // --- variable resolution ---------------------------------------------

    /// Resolves a `VariableAccess` against the current (topmost) frame into
    /// a concrete qubit vector: array indices are evaluated against the
    /// current loop bindings and folded into a row-major bit offset, then an
    /// optional `.range` narrows to a bit sub-slice.
    pub fn resolve(&self, access: &VariableAccess) -> Option<Vec<QubitId>> {
        let frame = self.frames.last()?;
        let slot = frame.variables.get(&access.var)?;

        // Row-major bit offset: dim_stride[i] = bitwidth * product(dimensions[i+1..]).
        let mut offset = 0usize;
        if !access.indexes.is_empty() {
            let mut dim_stride = vec![0usize; slot.dimensions.len()];
            let mut acc = slot.bitwidth as usize;
            for i in (0..slot.dimensions.len()).rev() {
                dim_stride[i] = acc;
                acc *= slot.dimensions[i] as usize;
            }
            for (i, idx_expr) in access.indexes.iter().enumerate() {
                let idx = idx_expr.evaluate(&self.loop_map) as usize;
                offset += idx * dim_stride.get(i).copied().unwrap_or(0);
            }
        }

        let (lo, hi) = match &access.range {
            Some((lo_expr, hi_expr)) => (
                lo_expr.evaluate(&self.loop_map) as usize,
                hi_expr.evaluate(&self.loop_map) as usize,
            ),
            None => (0, slot.bitwidth as usize - 1),
        };
        if hi < lo {
            return None;
        }
        let start = offset + lo;
        let end = offset + hi + 1;
        slot.qubits.get(start..end).map(|s| s.to_vec())
    }

    fn set_lno_annotation(&mut self) {
        self.statement_counter += 1;
        let n = self.statement_counter;
        self.builder.set_global_annotation("lno", n.to_string());
    }

    // --- statements -------------------------------------------------------

    fn synth_block(&mut self, stmts: &[Statement]) -> bool {
        for stmt in stmts {
            if !self.synth_statement(stmt) {
                return false;
            }
        }
        true
    }

    fn synth_statement(&mut self, stmt: &Statement) -> bool {
        self.set_lno_annotation();
        match stmt {
            Statement::Skip => true,
            Statement::Swap(lhs, rhs) => {
                let Some(l) = self.resolve(lhs) else { return false };
                let Some(r) = self.resolve(rhs) else { return false };
                if l.len() != r.len() {
                    return false;
                }
                gadgets::swap(&mut self.builder, &l, &r)
            }
            Statement::Unary(op, var) => {
                let Some(lines) = self.resolve(var) else { return false };
                match op {
                    UnaryStmtOp::Invert => gadgets::bitwise_negation(&mut self.builder, &lines),
                    UnaryStmtOp::Increment => gadgets::increment(&mut self.builder, &lines),
                    UnaryStmtOp::Decrement => gadgets::decrement(&mut self.builder, &lines),
                }
            }
            Statement::Assign(op, lhs, rhs) => self.synth_assign(*op, lhs, rhs),
            Statement::If { cond, then_branch, else_branch } => self.synth_if(cond, then_branch, else_branch),
            Statement::For { loop_var, from, to, step, body } => {
                self.synth_for(loop_var, from, to, step, body)
            }
            Statement::Call { target, args } => self.synth_call(target, args, false),
            Statement::Uncall { target, args } => self.synth_call(target, args, true),
        }
    }

    fn synth_assign(&mut self, op: AssignOp, lhs: &VariableAccess, rhs: &Expression) -> bool {
        if self.strategy == Strategy::LineAware {
            if let Some(result) = line_aware::try_rewrite_assign(self, op, lhs, rhs) {
                return result;
            }
        }

        let Some(rhs_lines) = self.synth_expression(rhs) else { return false };
        let Some(lhs_lines) = self.resolve(lhs) else { return false };
        if lhs_lines.len() != rhs_lines.len() {
            return false;
        }
        match op {
            AssignOp::Add => gadgets::increase(&mut self.builder, &lhs_lines, &rhs_lines),
            AssignOp::Subtract => gadgets::decrease(&mut self.builder, &lhs_lines, &rhs_lines),
            AssignOp::Exor => gadgets::bitwise_cnot(&mut self.builder, &lhs_lines, &rhs_lines),
        }
    }

    /// Synthesizes the condition into a single helper qubit `h`, runs
    /// `then` under `h` as an active control, flips `h` in place, runs
    /// `else` under (now-inverted) `h`, flips `h` back. `h` is deliberately
    /// never released to the constant pool afterward — see the
    /// if-statement helper-qubit open question.
    fn synth_if(&mut self, cond: &Expression, then_branch: &[Statement], else_branch: &[Statement]) -> bool {
        let Some(h_lines) = self.synth_condition(cond) else { return false };
        let h = h_lines[0];

        self.builder.activate_scope();
        self.builder.register_control(h);
        let then_ok = self.synth_block(then_branch);
        self.builder.deregister_control(h);
        self.builder.add_not(h);
        self.builder.register_control(h);
        let else_ok = then_ok && self.synth_block(else_branch);
        self.builder.deregister_control(h);
        self.builder.add_not(h);
        self.builder.deactivate_scope();

        then_ok && else_ok
    }

    /// Synthesizes an expression down to a single boolean qubit, for use as
    /// an if-condition. A multi-bit relational/logical expression already
    /// produces a single-qubit vector; anything else is reduced via
    /// bitwise-OR-into-one-line (logical truthiness of a wider value).
    fn synth_condition(&mut self, cond: &Expression) -> Option<Vec<QubitId>> {
        let lines = self.synth_expression(cond)?;
        if lines.len() == 1 {
            return Some(lines);
        }
        self.truthiness(&lines).map(|q| vec![q])
    }

    /// Reduces a multi-bit vector to a single qubit that is `1` iff any bit
    /// of `lines` is set: `NOT(lines == 0)`, built on the `equals` gadget
    /// (which restores both its operands, so `lines` comes back unchanged).
    fn truthiness(&mut self, lines: &[QubitId]) -> Option<QubitId> {
        if lines.len() == 1 {
            return Some(lines[0]);
        }
        let mut zero = Vec::new();
        if !self.constants.get_constant_lines(&mut self.builder, lines.len() as u32, 0, &mut zero) {
            return None;
        }
        let dest = self.constants.get_constant_line(&mut self.builder, false)?;
        if !gadgets::equals(&mut self.builder, dest, lines, &zero) {
            return None;
        }
        self.builder.add_not(dest);
        Some(dest)
    }

    fn synth_for(
        &mut self,
        loop_var: &str,
        from: &NumericExpr,
        to: &NumericExpr,
        step: &NumericExpr,
        body: &[Statement],
    ) -> bool {
        let from_v = from.evaluate(&self.loop_map) as i128;
        let to_v = to.evaluate(&self.loop_map) as i128;
        let step_v = (step.evaluate(&self.loop_map) as i128).max(1);

        let mut ok = true;
        let mut i = from_v;
        if from_v <= to_v {
            while i <= to_v && ok {
                self.loop_map.insert(loop_var.to_string(), i as u64);
                ok = self.synth_block(body);
                i += step_v;
            }
        } else {
            while i >= to_v && ok {
                self.loop_map.insert(loop_var.to_string(), i as u64);
                ok = self.synth_block(body);
                i -= step_v;
            }
        }
        self.loop_map.remove(loop_var);
        ok
    }

    fn synth_call(&mut self, target: &str, args: &[String], uncall: bool) -> bool {
        let Some(module) = self.modules.get(target).cloned() else { return false };
        if module.parameters.len() != args.len() {
            return false;
        }

        let mut frame = Frame::default();
        for (param, arg_name) in module.parameters.iter().zip(args) {
            let Some(slot) = self.frames.last().and_then(|f| f.variables.get(arg_name)).cloned() else {
                return false;
            };
            frame.variables.insert(param.name.clone(), slot);
        }
        self.frames.push(frame);

        if self.allocate_ancillary_locals(&module).is_none() {
            self.frames.pop();
            return false;
        }

        let ok = if uncall {
            let inverted: Vec<Statement> = invert_block(&module.statements);
            self.synth_block(&inverted)
        } else {
            self.synth_block(&module.statements)
        };

        // Locals stay preliminary until the top-level `synthesize` call
        // promotes every remaining ancillary at once (spec §4.6 step 4):
        // `promote` closes the register against further additions (I5), so
        // promoting here would make any later call's local allocation, or
        // even a later constant-line draw, fail for the rest of the program.
        self.frames.pop();
        ok
    }

    // --- expressions --------------------------------------------------

    fn synth_expression(&mut self, expr: &Expression) -> Option<Vec<QubitId>> {
        match expr {
            Expression::Numeric(value, bitwidth) => {
                let mut out = Vec::new();
                self.constants.get_constant_lines(&mut self.builder, *bitwidth, *value, &mut out).then_some(out)
            }
            Expression::Variable(access) => self.resolve(access),
            Expression::Unary(op, inner) => self.synth_unary_expr(*op, inner),
            Expression::Binary(op, lhs, rhs) => self.synth_binary_expr(*op, lhs, rhs),
            Expression::Shift(op, inner, amount) => self.synth_shift_expr(*op, inner, amount),
        }
    }

    fn synth_unary_expr(&mut self, op: UnaryExprOp, inner: &Expression) -> Option<Vec<QubitId>> {
        let lines = self.synth_expression(inner)?;
        match op {
            UnaryExprOp::BitwiseNegation => {
                let mut out = Vec::new();
                if !self.constants.get_constant_lines(&mut self.builder, lines.len() as u32, 0, &mut out) {
                    return None;
                }
                gadgets::bitwise_cnot(&mut self.builder, &out, &lines).then_some(())?;
                gadgets::bitwise_negation(&mut self.builder, &out).then_some(())?;
                Some(out)
            }
            UnaryExprOp::LogicalNegation => {
                let mut zero = Vec::new();
                if !self.constants.get_constant_lines(&mut self.builder, lines.len() as u32, 0, &mut zero) {
                    return None;
                }
                let dest = self.constants.get_constant_line(&mut self.builder, false)?;
                gadgets::equals(&mut self.builder, dest, &lines, &zero).then_some(vec![dest])
            }
        }
    }

    fn synth_binary_expr(&mut self, op: BinaryOp, lhs: &Expression, rhs: &Expression) -> Option<Vec<QubitId>> {
        let lhs_lines = self.synth_expression(lhs)?;
        let rhs_lines = self.synth_expression(rhs)?;
        let n = lhs_lines.len().max(rhs_lines.len());

        match op {
            BinaryOp::Add => self.exp_add(&lhs_lines, &rhs_lines),
            BinaryOp::Subtract => self.exp_subtract(&lhs_lines, &rhs_lines),
            BinaryOp::Exor => self.exp_exor(&lhs_lines, &rhs_lines),
            BinaryOp::Multiply => {
                let out = self.clean_vector(n as u32)?;
                gadgets::multiplication(&mut self.builder, &out, &lhs_lines, &rhs_lines).then_some(out)
            }
            BinaryOp::Divide => {
                let out = self.clean_vector(n as u32)?;
                gadgets::division(&mut self.builder, &out, &lhs_lines, &rhs_lines).then_some(out)
            }
            BinaryOp::Modulo => {
                let out = self.clean_vector(n as u32)?;
                gadgets::modulo(&mut self.builder, &out, &lhs_lines, &rhs_lines).then_some(out)
            }
            BinaryOp::BitwiseAnd => {
                let out = self.clean_vector(n as u32)?;
                gadgets::bitwise_and(&mut self.builder, &out, &lhs_lines, &rhs_lines).then_some(out)
            }
            BinaryOp::BitwiseOr => {
                let out = self.clean_vector(n as u32)?;
                gadgets::bitwise_or(&mut self.builder, &out, &lhs_lines, &rhs_lines).then_some(out)
            }
            BinaryOp::LogicalAnd => {
                let l = self.truthiness(&lhs_lines)?;
                let r = self.truthiness(&rhs_lines)?;
                let dest = self.constants.get_constant_line(&mut self.builder, false)?;
                gadgets::conjunction(&mut self.builder, dest, l, r).then_some(vec![dest])
            }
            BinaryOp::LogicalOr => {
                let l = self.truthiness(&lhs_lines)?;
                let r = self.truthiness(&rhs_lines)?;
                let dest = self.constants.get_constant_line(&mut self.builder, false)?;
                gadgets::disjunction(&mut self.builder, dest, l, r).then_some(vec![dest])
            }
            BinaryOp::LessThan => self.relational(|b, d, a, c| gadgets::less_than(b, d, a, c), &lhs_lines, &rhs_lines),
            BinaryOp::GreaterThan => self.relational(|b, d, a, c| gadgets::greater_than(b, d, a, c), &lhs_lines, &rhs_lines),
            BinaryOp::Equals => self.relational(|b, d, a, c| gadgets::equals(b, d, a, c), &lhs_lines, &rhs_lines),
            BinaryOp::NotEquals => self.relational(|b, d, a, c| gadgets::not_equals(b, d, a, c), &lhs_lines, &rhs_lines),
            BinaryOp::LessEquals => self.relational(|b, d, a, c| gadgets::less_equals(b, d, a, c), &lhs_lines, &rhs_lines),
            BinaryOp::GreaterEquals => self.relational(|b, d, a, c| gadgets::greater_equals(b, d, a, c), &lhs_lines, &rhs_lines),
        }
    }

    fn relational(
        &mut self,
        f: impl FnOnce(&mut CircuitBuilder, QubitId, &[QubitId], &[QubitId]) -> bool,
        lhs: &[QubitId],
        rhs: &[QubitId],
    ) -> Option<Vec<QubitId>> {
        let dest = self.constants.get_constant_line(&mut self.builder, false)?;
        f(&mut self.builder, dest, lhs, rhs).then_some(vec![dest])
    }

    fn clean_vector(&mut self, bitwidth: u32) -> Option<Vec<QubitId>> {
        let mut out = Vec::new();
        self.constants.get_constant_lines(&mut self.builder, bitwidth, 0, &mut out).then_some(out)
    }

    /// Cost-aware `expAdd`: allocate a clean `out`, XOR `a` in, then apply
    /// `b` via the arithmetic gadget. Line-aware instead reuses `b` as the
    /// accumulator directly, never allocating a fresh result vector.
    fn exp_add(&mut self, a: &[QubitId], b: &[QubitId]) -> Option<Vec<QubitId>> {
        match self.strategy {
            Strategy::CostAware => {
                let out = self.clean_vector(a.len().max(b.len()) as u32)?;
                gadgets::bitwise_cnot(&mut self.builder, &out, a).then_some(())?;
                gadgets::increase(&mut self.builder, &out, b).then_some(out)
            }
            Strategy::LineAware => {
                gadgets::increase(&mut self.builder, b, a).then_some(b.to_vec())
            }
        }
    }

    fn exp_subtract(&mut self, a: &[QubitId], b: &[QubitId]) -> Option<Vec<QubitId>> {
        match self.strategy {
            Strategy::CostAware => {
                let out = self.clean_vector(a.len().max(b.len()) as u32)?;
                gadgets::bitwise_cnot(&mut self.builder, &out, a).then_some(())?;
                gadgets::decrease(&mut self.builder, &out, b).then_some(out)
            }
            Strategy::LineAware => {
                // b := a - b, via the two's-complement identity
                // a - b = a + (~b + 1).
                gadgets::bitwise_negation(&mut self.builder, b).then_some(())?;
                gadgets::increment(&mut self.builder, b).then_some(())?;
                gadgets::increase(&mut self.builder, b, a).then_some(b.to_vec())
            }
        }
    }

    fn exp_exor(&mut self, a: &[QubitId], b: &[QubitId]) -> Option<Vec<QubitId>> {
        match self.strategy {
            Strategy::CostAware => {
                let out = self.clean_vector(a.len().max(b.len()) as u32)?;
                gadgets::bitwise_cnot(&mut self.builder, &out, a).then_some(())?;
                gadgets::bitwise_cnot(&mut self.builder, &out, b).then_some(out)
            }
            Strategy::LineAware => {
                gadgets::bitwise_cnot(&mut self.builder, b, a).then_some(b.to_vec())
            }
        }
    }

    fn synth_shift_expr(&mut self, op: ShiftOp, inner: &Expression, amount: &NumericExpr) -> Option<Vec<QubitId>> {
        let lines = self.synth_expression(inner)?;
        let k = amount.evaluate(&self.loop_map) as usize;
        let out = self.clean_vector(lines.len() as u32)?;
        let ok = match op {
            ShiftOp::Left => gadgets::left_shift(&mut self.builder, &out, &lines, k),
            ShiftOp::Right => gadgets::right_shift(&mut self.builder, &out, &lines, k),
        };
        ok.then_some(out)
    }
}

fn unflatten_index(mut flat: u32, dimensions: &[u32]) -> Vec<u32> {
    let mut result = vec![0u32; dimensions.len()];
    for i in (0..dimensions.len()).rev() {
        result[i] = flat % dimensions[i];
        flat /= dimensions[i];
    }
    result
}

/// Semantic inverse of a statement block, reversed order: each statement's
/// own inverse, walked back to front. Used by `Uncall` (spec §4.6).
fn invert_block(stmts: &[Statement]) -> Vec<Statement> {
    stmts.iter().rev().map(invert_statement).collect()
}

fn invert_statement(stmt: &Statement) -> Statement {
    match stmt {
        Statement::Skip => Statement::Skip,
        Statement::Swap(l, r) => Statement::Swap(l.clone(), r.clone()),
        Statement::Unary(op, v) => {
            let inv = match op {
                UnaryStmtOp::Invert => UnaryStmtOp::Invert,
                UnaryStmtOp::Increment => UnaryStmtOp::Decrement,
                UnaryStmtOp::Decrement => UnaryStmtOp::Increment,
            };
            Statement::Unary(inv, v.clone())
        }
        Statement::Assign(op, lhs, rhs) => {
            let inv = match op {
                AssignOp::Add => AssignOp::Subtract,
                AssignOp::Subtract => AssignOp::Add,
                AssignOp::Exor => AssignOp::Exor,
            };
            Statement::Assign(inv, lhs.clone(), rhs.clone())
        }
        Statement::If { cond, then_branch, else_branch } => Statement::If {
            cond: cond.clone(),
            then_branch: invert_block(then_branch),
            else_branch: invert_block(else_branch),
        },
        Statement::For { loop_var, from, to, step, body } => Statement::For {
            loop_var: loop_var.clone(),
            from: to.clone(),
            to: from.clone(),
            step: step.clone(),
            body: invert_block(body),
        },
        Statement::Call { target, args } => Statement::Uncall { target: target.clone(), args: args.clone() },
        Statement::Uncall { target, args } => Statement::Call { target: target.clone(), args: args.clone() },
    }
}
