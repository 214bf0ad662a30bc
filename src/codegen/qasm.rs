//! OpenQASM 2 text emission — a surface concern over a finished
//! [`CircuitBuilder`] (spec §6: "a conversion to OpenQASM-2 text ... when
//! used it must mention the full control set of each operation").
//!
//! OpenQASM 2 has no native n-controlled gate and no native Fredkin, so:
//! - 0 controls: `x q[t];`
//! - 1 control: `cx q[c], q[t];`
//! - 2 controls: `ccx q[c1], q[c2], q[t];`
//! - 3+ controls, or any SWAP: an `opaque` gate declaration listing every
//!   control plus target(s) as formal qubit arguments, since decomposing a
//!   wide MCX/Fredkin into the 1-/2-control basis is an optimization pass
//!   and optimization passes over emitted circuits are a named non-goal.
//!
//! Qubit classification and labels are not expressible in OpenQASM 2 and
//! are emitted as a trailing comment block instead, mirroring the labels
//! the qubit register already tracks.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::circuit::{CircuitBuilder, Operation, OperationKind, QubitClass, QubitId};

/// Renders `builder`'s circuit as OpenQASM 2 text.
pub fn to_qasm2(builder: &CircuitBuilder) -> String {
    let n = builder.registry().len();
    let mut out = String::new();
    let _ = writeln!(out, "OPENQASM 2.0;");
    let _ = writeln!(out, "include \"qelib1.inc\";");
    let _ = writeln!(out);
    let _ = writeln!(out, "qreg q[{n}];");
    let _ = writeln!(out);

    let mut declared_opaque: BTreeSet<usize> = BTreeSet::new();

    for op in builder.operations() {
        let total_controls = op.controls.len() + usize::from(op.kind == OperationKind::Swap);
        if total_controls >= 3 || op.kind == OperationKind::Swap {
            let arity = op.controls.len() + op.targets.len();
            if declared_opaque.insert(arity) {
                declare_opaque(&mut out, arity);
            }
            emit_opaque_call(&mut out, op);
        } else {
            emit_native_gate(&mut out, op);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "// qubit classification");
    for i in 0..n {
        let q = QubitId::new(i);
        let class = builder.registry().class(q).expect("dense register");
        let label = builder.registry().label(q).unwrap_or("");
        let class_str = match class {
            QubitClass::NonAncillary { garbage: false } => "output",
            QubitClass::NonAncillary { garbage: true } => "garbage",
            QubitClass::PreliminaryAncillary => "ancillary(preliminary)",
            QubitClass::DefinitiveAncillary => "ancillary",
        };
        let _ = writeln!(out, "// q[{i}] {label} {class_str}");
    }

    out
}

fn emit_native_gate(out: &mut String, op: &Operation) {
    let mut controls: Vec<QubitId> = op.controls.iter().copied().collect();
    controls.sort();
    let t = op.target();
    match controls.len() {
        0 => {
            let _ = writeln!(out, "x q[{}];", t.index());
        }
        1 => {
            let _ = writeln!(out, "cx q[{}], q[{}];", controls[0].index(), t.index());
        }
        2 => {
            let _ = writeln!(
                out,
                "ccx q[{}], q[{}], q[{}];",
                controls[0].index(),
                controls[1].index(),
                t.index()
            );
        }
        _ => unreachable!("3+ controls routed through the opaque path"),
    }
}

fn opaque_name(arity: usize) -> String {
    format!("mcx{arity}")
}

fn declare_opaque(out: &mut String, arity: usize) {
    let args: Vec<String> = (0..arity).map(|i| format!("a{i}")).collect();
    let _ = writeln!(out, "opaque {}({});", opaque_name(arity), args.join(", "));
}

fn emit_opaque_call(out: &mut String, op: &Operation) {
    let mut controls: Vec<QubitId> = op.controls.iter().copied().collect();
    controls.sort();
    let mut qubits: Vec<String> = controls.iter().map(|c| format!("q[{}]", c.index())).collect();
    qubits.extend(op.targets.iter().map(|t| format!("q[{}]", t.index())));
    let _ = writeln!(out, "{} {};", opaque_name(qubits.len()), qubits.join(", "));
}
