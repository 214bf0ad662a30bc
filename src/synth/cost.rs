//! Closed-form quantum-cost and transistor-cost metrics, computed as an
//! out-of-band analysis over a finished circuit. Neither metric feeds back
//! into synthesis; both are pure functions of the operation log and qubit
//! count.

use crate::circuit::CircuitBuilder;

/// Per-operation quantum cost given its (clipped) control count `c` and the
/// number of qubits `n` uninvolved in the operation (`empty lines`, `e`).
fn per_op_cost(c: usize, e: usize) -> u64 {
    match c {
        0 | 1 => 1,
        2 => 5,
        3 => 13,
        4 => {
            if e >= 2 {
                26
            } else {
                29
            }
        }
        5 => {
            if e >= 3 {
                38
            } else if e >= 1 {
                52
            } else {
                61
            }
        }
        6 => {
            if e >= 4 {
                50
            } else if e >= 1 {
                80
            } else {
                125
            }
        }
        7 => {
            if e >= 5 {
                62
            } else if e >= 1 {
                100
            } else {
                253
            }
        }
        _ => {
            let c = c as u64;
            if e >= c as usize - 2 {
                12 * c - 22
            } else if e >= 1 {
                24 * c - 87
            } else {
                2u64.pow(c as u32 + 1) - 3
            }
        }
    }
}

/// Sum of `per_op_cost` over every operation in the circuit. Each
/// operation's control count is clipped to `n - 1` (a SWAP counts as one
/// extra control, per [`crate::circuit::Operation::cost_control_count`]),
/// and `e = n - c - 1` is the number of qubits touched by neither a control
/// nor a target.
pub fn quantum_cost(builder: &CircuitBuilder) -> u64 {
    let n = builder.registry().len();
    builder
        .operations()
        .iter()
        .map(|op| {
            let c = op.cost_control_count().min(n.saturating_sub(1));
            let e = n.saturating_sub(c + 1);
            per_op_cost(c, e)
        })
        .sum()
}

/// `Σ 8 * controls` over every operation (SWAP's implicit control included).
pub fn transistor_cost(builder: &CircuitBuilder) -> u64 {
    builder
        .operations()
        .iter()
        .map(|op| 8 * op.cost_control_count() as u64)
        .sum()
}
