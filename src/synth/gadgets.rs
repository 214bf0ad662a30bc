//! Reversible implementations of arithmetic/logical/relational/shift
//! operators over qubit-vectors. Every gadget takes little-endian
//! qubit-vectors (index 0 = LSB) and appends operations to a
//! [`CircuitBuilder`]. Gate sequences for `increase`/`increase_with_carry`
//! are reproduced bit-exactly; reordering them changes the emitted circuit
//! even though the boolean function computed is unchanged.

use crate::circuit::{CircuitBuilder, QubitId};

/// `CNOT(src[i], dst[i])` for each `i`. Requires `dst.len() >= src.len()`.
pub fn bitwise_cnot(builder: &mut CircuitBuilder, dst: &[QubitId], src: &[QubitId]) -> bool {
    if dst.len() < src.len() {
        return false;
    }
    for i in 0..src.len() {
        builder.add_cnot(src[i], dst[i]);
    }
    true
}

/// `NOT` on every bit of `dst`.
pub fn bitwise_negation(builder: &mut CircuitBuilder, dst: &[QubitId]) -> bool {
    for &q in dst {
        builder.add_not(q);
    }
    true
}

/// Adds 1 in place. Under a fresh propagation scope, registers all bits,
/// then flips MSB-to-LSB, deregistering each bit just before flipping it so
/// the flip of bit `i` is conditioned on all less-significant bits being 1.
pub fn increment(builder: &mut CircuitBuilder, dst: &[QubitId]) -> bool {
    builder.with_propagation_scope(|b| {
        for &q in dst {
            b.register_control(q);
        }
        for &q in dst.iter().rev() {
            b.deregister_control(q);
            b.add_not(q);
        }
        true
    })
}

/// Subtracts 1 in place: NOT then register, LSB-to-MSB (a permanent
/// carry-in chain).
pub fn decrement(builder: &mut CircuitBuilder, dst: &[QubitId]) -> bool {
    builder.with_propagation_scope(|b| {
        for &q in dst {
            b.add_not(q);
            b.register_control(q);
        }
        true
    })
}

/// `dest := dest ⊕ (src1 ∧ src2)`, bitwise. Requires `dest` clean.
pub fn bitwise_and(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], src2: &[QubitId]) -> bool {
    if src1.len() < dest.len() || src2.len() < dest.len() {
        return false;
    }
    for i in 0..dest.len() {
        if !conjunction(builder, dest[i], src1[i], src2[i]) {
            return false;
        }
    }
    true
}

/// `dest := dest ⊕ (src1 ∨ src2)`, bitwise. Requires `dest` clean.
pub fn bitwise_or(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], src2: &[QubitId]) -> bool {
    if src1.len() < dest.len() || src2.len() < dest.len() {
        return false;
    }
    for i in 0..dest.len() {
        if !disjunction(builder, dest[i], src1[i], src2[i]) {
            return false;
        }
    }
    true
}

/// `Toffoli(src1, src2; dest)`. Requires `dest` clean.
pub fn conjunction(builder: &mut CircuitBuilder, dest: QubitId, src1: QubitId, src2: QubitId) -> bool {
    builder.add_toffoli(src1, src2, dest);
    true
}

/// `CNOT(src1,dest); CNOT(src2,dest); Toffoli(src1,src2;dest)` realizes
/// `dest ⊕ (src1 ∨ src2)` with `dest` clean.
pub fn disjunction(builder: &mut CircuitBuilder, dest: QubitId, src1: QubitId, src2: QubitId) -> bool {
    builder.add_cnot(src1, dest);
    builder.add_cnot(src2, dest);
    builder.add_toffoli(src1, src2, dest);
    true
}

/// `rhs := rhs + lhs`, ripple-carry over `n = rhs.len() = lhs.len()`. The
/// gate sequence below must be reproduced bit-exactly.
pub fn increase(builder: &mut CircuitBuilder, rhs: &[QubitId], lhs: &[QubitId]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    if rhs.is_empty() {
        return true;
    }
    if rhs.len() == 1 {
        builder.add_cnot(lhs[0], rhs[0]);
        return true;
    }

    let n = rhs.len();
    for i in 1..n {
        builder.add_cnot(lhs[i], rhs[i]);
    }
    for i in (1..=n - 2).rev() {
        builder.add_cnot(lhs[i], rhs[i]);
    }
    for i in 0..=n - 2 {
        builder.add_toffoli(rhs[i], lhs[i], lhs[i + 1]);
    }
    builder.add_cnot(lhs[n - 1], rhs[n - 1]);
    for i in (1..=n - 2).rev() {
        builder.add_toffoli(lhs[i], rhs[i], lhs[i + 1]);
        builder.add_cnot(lhs[i], rhs[i]);
    }
    builder.add_toffoli(lhs[0], rhs[0], lhs[1]);
    builder.add_cnot(lhs[0], rhs[0]);
    for i in 1..=n - 2 {
        builder.add_cnot(lhs[i], rhs[i + 1]);
    }
    for i in 1..n {
        builder.add_cnot(lhs[i], rhs[i]);
    }
    true
}

/// `rhs := rhs - lhs`: NOT all bits of `rhs`, `increase`, NOT all bits again.
pub fn decrease(builder: &mut CircuitBuilder, rhs: &[QubitId], lhs: &[QubitId]) -> bool {
    for &q in rhs {
        builder.add_not(q);
    }
    if !increase(builder, rhs, lhs) {
        return false;
    }
    for &q in rhs {
        builder.add_not(q);
    }
    true
}

/// Full adder: `dest := dest + src`, producing an outgoing carry into `carry`.
pub fn increase_with_carry(builder: &mut CircuitBuilder, dest: &[QubitId], src: &[QubitId], carry: QubitId) -> bool {
    let bitwidth = src.len();
    if bitwidth == 0 {
        return true;
    }
    if src.len() != dest.len() {
        return false;
    }

    for i in 1..bitwidth {
        builder.add_cnot(src[i], dest[i]);
    }
    if bitwidth > 1 {
        builder.add_cnot(src[bitwidth - 1], carry);
    }
    if let Some(top) = bitwidth.checked_sub(2) {
        for i in (1..=top).rev() {
            builder.add_cnot(src[i], src[i + 1]);
        }
    }
    for i in 0..bitwidth - 1 {
        builder.add_toffoli(src[i], dest[i], src[i + 1]);
    }
    builder.add_toffoli(src[bitwidth - 1], dest[bitwidth - 1], carry);

    for i in (1..bitwidth).rev() {
        builder.add_cnot(src[i], dest[i]);
        builder.add_toffoli(dest[i - 1], src[i - 1], src[i]);
    }
    if let Some(top) = bitwidth.checked_sub(2) {
        for i in 1..=top {
            builder.add_cnot(src[i], src[i + 1]);
        }
    }
    for i in 0..bitwidth {
        builder.add_cnot(src[i], dest[i]);
    }
    true
}

/// Full subtractor: NOT `dest`, `increase_with_carry`, NOT `dest` again.
pub fn decrease_with_carry(builder: &mut CircuitBuilder, dest: &[QubitId], src: &[QubitId], carry: QubitId) -> bool {
    if dest.len() < src.len() {
        return false;
    }
    for &q in dest {
        builder.add_not(q);
    }
    if !increase_with_carry(builder, dest, src, carry) {
        return false;
    }
    for &q in dest {
        builder.add_not(q);
    }
    true
}

/// `dest = (src1 == src2)`. XOR `src2` into `src1` componentwise, NOT each
/// bit, MCX over all of `src1` into `dest`, then uncompute.
pub fn equals(builder: &mut CircuitBuilder, dest: QubitId, src1: &[QubitId], src2: &[QubitId]) -> bool {
    if src2.len() < src1.len() {
        return false;
    }
    for i in 0..src1.len() {
        builder.add_cnot(src2[i], src1[i]);
        builder.add_not(src1[i]);
    }
    builder.add_mcx(src1, dest);
    for i in 0..src1.len() {
        builder.add_cnot(src2[i], src1[i]);
        builder.add_not(src1[i]);
    }
    true
}

pub fn not_equals(builder: &mut CircuitBuilder, dest: QubitId, src1: &[QubitId], src2: &[QubitId]) -> bool {
    if !equals(builder, dest, src1, src2) {
        return false;
    }
    builder.add_not(dest);
    true
}

/// `dest = (src1 < src2)`: borrow into `dest` via `decrease_with_carry`,
/// then restore `src1` via `increase`.
pub fn less_than(builder: &mut CircuitBuilder, dest: QubitId, src1: &[QubitId], src2: &[QubitId]) -> bool {
    decrease_with_carry(builder, src1, src2, dest) && increase(builder, src1, src2)
}

pub fn greater_than(builder: &mut CircuitBuilder, dest: QubitId, src2: &[QubitId], src1: &[QubitId]) -> bool {
    less_than(builder, dest, src1, src2)
}

pub fn less_equals(builder: &mut CircuitBuilder, dest: QubitId, src2: &[QubitId], src1: &[QubitId]) -> bool {
    if !less_than(builder, dest, src1, src2) {
        return false;
    }
    builder.add_not(dest);
    true
}

pub fn greater_equals(builder: &mut CircuitBuilder, dest: QubitId, src_two: &[QubitId], src_one: &[QubitId]) -> bool {
    if !greater_than(builder, dest, src_one, src_two) {
        return false;
    }
    builder.add_not(dest);
    true
}

/// `dest := dest + src1 * src2`: controlled shift-and-add. For each bit of
/// `src1`, register it as a control, add a progressively narrower slice of
/// `src2` into a shrinking window of `dest`, then deregister.
pub fn multiplication(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], src2: &[QubitId]) -> bool {
    if src1.is_empty() || dest.is_empty() {
        return true;
    }
    if src1.len() < dest.len() || src2.len() < dest.len() {
        return false;
    }

    let mut sum: Vec<QubitId> = dest.to_vec();
    let mut partial: Vec<QubitId> = src2.to_vec();

    let mut ok = true;
    builder.with_propagation_scope(|b| {
        b.register_control(src1[0]);
        ok = bitwise_cnot(b, &sum, &partial);
        b.deregister_control(src1[0]);

        let mut i = 1;
        while i < dest.len() && ok {
            sum.remove(0);
            partial.pop();
            b.register_control(src1[i]);
            ok = increase(b, &sum, &partial);
            b.deregister_control(src1[i]);
            i += 1;
        }
    });
    ok
}

/// Long division: `dest := src1 / src2`. Shares its core loop with
/// [`modulo`], additionally restoring the quotient bits into `dest`.
pub fn division(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], src2: &[QubitId]) -> bool {
    if !modulo(builder, dest, src1, src2) {
        return false;
    }
    if src2.len() < src1.len() || dest.len() < src1.len() {
        return false;
    }

    for i in 1..src1.len() {
        builder.add_not(src2[i]);
    }

    let mut ok = true;
    builder.with_propagation_scope(|b| {
        for i in 1..src1.len() {
            b.register_control(src2[i]);
        }

        let mut helper_index = 0usize;
        let mut sum: Vec<QubitId> = Vec::new();
        let mut partial: Vec<QubitId> = Vec::new();
        let n = src1.len();
        for i in (0..n).rev() {
            if !ok {
                break;
            }
            partial.push(src2[helper_index]);
            helper_index += 1;
            sum.insert(0, src1[i]);
            b.register_control(dest[i]);
            ok = increase(b, &sum, &partial);
            b.deregister_control(dest[i]);
            if i == 0 {
                continue;
            }
            for j in 1..n {
                if !ok {
                    break;
                }
                b.deregister_control(src2[j]);
            }
            b.add_not(src2[helper_index]);
            for j in 2..n {
                if !ok {
                    break;
                }
                b.register_control(src2[j]);
            }
        }
    });
    ok
}

/// Long division's modulo half: drives `dest` to the remainder of
/// `src1 / src2` using controlled `decrease_with_carry`/`increase` steps.
pub fn modulo(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], src2: &[QubitId]) -> bool {
    if src2.len() < src1.len() || dest.len() < src1.len() {
        return false;
    }

    for i in 1..src1.len() {
        builder.add_not(src2[i]);
    }

    let mut ok = true;
    builder.with_propagation_scope(|b| {
        for i in 1..src1.len() {
            b.register_control(src2[i]);
        }

        let mut helper_index = 0usize;
        let mut sum: Vec<QubitId> = Vec::new();
        let mut partial: Vec<QubitId> = Vec::new();
        let n = src1.len();
        for i in (0..n).rev() {
            if !ok {
                break;
            }
            partial.push(src2[helper_index]);
            helper_index += 1;
            sum.insert(0, src1[i]);
            ok = decrease_with_carry(b, &sum, &partial, dest[i]);

            b.register_control(dest[i]);
            ok = ok && increase(b, &sum, &partial);
            b.deregister_control(dest[i]);

            b.add_not(dest[i]);
            if i == 0 {
                continue;
            }
            for j in 1..n {
                if !ok {
                    break;
                }
                b.deregister_control(src2[j]);
            }
            b.add_not(src2[helper_index]);
            for j in 2..n {
                if !ok {
                    break;
                }
                b.register_control(src2[j]);
            }
        }
    });
    ok
}

/// Per-bit Fredkin swap of two equal-width qubit vectors.
pub fn swap(builder: &mut CircuitBuilder, dest1: &[QubitId], dest2: &[QubitId]) -> bool {
    if dest2.len() < dest1.len() {
        return false;
    }
    for i in 0..dest1.len() {
        builder.add_fredkin(dest1[i], dest2[i]);
    }
    true
}

/// Copies `src1[0..n-k-1]` into `dest[k..n-1]` via CNOTs. `dest` must be
/// clean; `k > dest.len()` fails.
pub fn left_shift(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], k: usize) -> bool {
    if k > dest.len() {
        return false;
    }
    let shifted = dest.len() - k;
    if src1.len() < shifted {
        return false;
    }
    for i in 0..shifted {
        builder.add_cnot(src1[i], dest[k + i]);
    }
    true
}

pub fn right_shift(builder: &mut CircuitBuilder, dest: &[QubitId], src1: &[QubitId], k: usize) -> bool {
    if dest.len() < k {
        return false;
    }
    let shifted = dest.len() - k;
    if src1.len() < shifted {
        return false;
    }
    for i in 0..shifted {
        builder.add_cnot(src1[i], dest[i]);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::BitVectorSimulator;

    fn alloc(b: &mut CircuitBuilder, n: usize, prefix: &str) -> Vec<QubitId> {
        (0..n).map(|i| b.add_non_ancillary(format!("{prefix}{i}"), false).unwrap()).collect()
    }

    #[test]
    fn ripple_carry_adder_width3_matches_wrapping_addition() {
        let mut b = CircuitBuilder::new();
        let y = alloc(&mut b, 3, "y"); // rhs
        let x = alloc(&mut b, 3, "x"); // lhs
        assert!(increase(&mut b, &y, &x));

        let mut state = vec![false; b.registry().len()];
        // x = 3 = 011, y = 5 = 101 (LSB first)
        for (i, &bit) in [true, true, false].iter().enumerate() {
            state[x[i].index()] = bit;
        }
        for (i, &bit) in [true, false, true].iter().enumerate() {
            state[y[i].index()] = bit;
        }
        let sim = BitVectorSimulator::new();
        sim.run(b.operations(), &mut state);
        let y_val: u32 = (0..3).map(|i| (state[y[i].index()] as u32) << i).sum();
        assert_eq!(y_val, 0); // (3 + 5) mod 8 = 0
        let x_val: u32 = (0..3).map(|i| (state[x[i].index()] as u32) << i).sum();
        assert_eq!(x_val, 3);
    }

    #[test]
    fn increment_then_decrement_restores_value() {
        let mut b = CircuitBuilder::new();
        let v = alloc(&mut b, 4, "v");
        assert!(increment(&mut b, &v));
        assert!(decrement(&mut b, &v));

        let mut state = vec![false; b.registry().len()];
        state[v[0].index()] = true;
        state[v[2].index()] = true; // v = 0b0101 = 5
        let sim = BitVectorSimulator::new();
        sim.run(b.operations(), &mut state);
        let val: u32 = (0..4).map(|i| (state[v[i].index()] as u32) << i).sum();
        assert_eq!(val, 5);
    }

    fn read_value(state: &[bool], lines: &[QubitId]) -> u32 {
        lines.iter().enumerate().map(|(i, q)| (state[q.index()] as u32) << i).sum()
    }

    fn set_value(state: &mut [bool], lines: &[QubitId], value: u32) {
        for (i, &q) in lines.iter().enumerate() {
            state[q.index()] = (value >> i) & 1 == 1;
        }
    }

    #[test]
    fn bitwise_and_or_match_boolean_operators() {
        for &(a_val, b_val) in &[(0b01u32, 0b11u32), (0b10, 0b10), (0b00, 0b11)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 2, "a");
            let bb = alloc(&mut b, 2, "b");
            let and_dest = alloc(&mut b, 2, "and");
            let or_dest = alloc(&mut b, 2, "or");
            assert!(bitwise_and(&mut b, &and_dest, &a, &bb));
            assert!(bitwise_or(&mut b, &or_dest, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(read_value(&state, &and_dest), a_val & b_val, "a={a_val:02b} b={b_val:02b}");
            assert_eq!(read_value(&state, &or_dest), a_val | b_val, "a={a_val:02b} b={b_val:02b}");
            // Operands are untouched by a bitwise gadget writing into a
            // disjoint clean destination.
            assert_eq!(read_value(&state, &a), a_val);
            assert_eq!(read_value(&state, &bb), b_val);
        }
    }

    #[test]
    fn equals_restores_both_operands() {
        for &(a_val, b_val) in &[(2u32, 2u32), (1, 3), (3, 1), (0, 0)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 2, "a");
            let bb = alloc(&mut b, 2, "b");
            let eq = b.add_non_ancillary("eq", false).unwrap();
            assert!(equals(&mut b, eq, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(state[eq.index()], a_val == b_val, "a={a_val} b={b_val}");
            assert_eq!(read_value(&state, &a), a_val, "a restored, a={a_val} b={b_val}");
            assert_eq!(read_value(&state, &bb), b_val, "b restored, a={a_val} b={b_val}");
        }
    }

    #[test]
    fn less_than_computes_borrow_and_restores_lhs() {
        for &(a_val, b_val) in &[(2u32, 2u32), (1, 3), (3, 1), (0, 0)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 2, "a");
            let bb = alloc(&mut b, 2, "b");
            let lt = b.add_non_ancillary("lt", false).unwrap();
            assert!(less_than(&mut b, lt, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(state[lt.index()], a_val < b_val, "a={a_val} b={b_val}");
            assert_eq!(read_value(&state, &a), a_val, "lhs restored, a={a_val} b={b_val}");
        }
    }

    #[test]
    fn multiplication_onto_clean_destination_matches_wrapping_product() {
        for &(a_val, b_val) in &[(3u32, 3u32), (1, 2), (2, 2), (0, 3), (3, 0)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 2, "a");
            let bb = alloc(&mut b, 2, "b");
            let dest = alloc(&mut b, 2, "p");
            assert!(multiplication(&mut b, &dest, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(read_value(&state, &dest), (a_val * b_val) % 4, "a={a_val} b={b_val}");
        }
    }

    #[test]
    fn left_and_right_shift_copy_into_a_clean_destination() {
        let mut b = CircuitBuilder::new();
        let src = alloc(&mut b, 4, "s");
        let left = alloc(&mut b, 4, "l");
        let right = alloc(&mut b, 4, "r");
        assert!(left_shift(&mut b, &left, &src, 1));
        assert!(right_shift(&mut b, &right, &src, 1));

        let mut state = vec![false; b.registry().len()];
        set_value(&mut state, &src, 0b0110);
        BitVectorSimulator::new().run(b.operations(), &mut state);

        assert_eq!(read_value(&state, &left), (0b0110 << 1) & 0b1111);
        assert_eq!(read_value(&state, &right), 0b0110 >> 1);
    }

    #[test]
    fn left_shift_rejects_amount_wider_than_destination() {
        let mut b = CircuitBuilder::new();
        let src = alloc(&mut b, 2, "s");
        let dest = alloc(&mut b, 2, "d");
        assert!(!left_shift(&mut b, &dest, &src, 3));
    }

    #[test]
    fn fredkin_swap_gadget_exchanges_equal_width_vectors() {
        let mut b = CircuitBuilder::new();
        let p = alloc(&mut b, 3, "p");
        let q = alloc(&mut b, 3, "q");
        assert!(swap(&mut b, &p, &q));

        let mut state = vec![false; b.registry().len()];
        set_value(&mut state, &p, 0b101);
        set_value(&mut state, &q, 0b010);
        BitVectorSimulator::new().run(b.operations(), &mut state);

        assert_eq!(read_value(&state, &p), 0b010);
        assert_eq!(read_value(&state, &q), 0b101);
    }

    #[test]
    fn remaining_comparators_match_their_boolean_relations() {
        for &(a_val, b_val) in &[(2u32, 2u32), (1, 3), (3, 1), (0, 3)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 2, "a");
            let bb = alloc(&mut b, 2, "b");
            let ne = b.add_non_ancillary("ne", false).unwrap();
            let gt = b.add_non_ancillary("gt", false).unwrap();
            let le = b.add_non_ancillary("le", false).unwrap();
            let ge = b.add_non_ancillary("ge", false).unwrap();
            assert!(not_equals(&mut b, ne, &a, &bb));
            assert!(greater_than(&mut b, gt, &bb, &a));
            assert!(less_equals(&mut b, le, &bb, &a));
            assert!(greater_equals(&mut b, ge, &bb, &a));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(state[ne.index()], a_val != b_val, "a={a_val} b={b_val}");
            assert_eq!(state[gt.index()], a_val > b_val, "a={a_val} b={b_val}");
            assert_eq!(state[le.index()], a_val <= b_val, "a={a_val} b={b_val}");
            assert_eq!(state[ge.index()], a_val >= b_val, "a={a_val} b={b_val}");
            assert_eq!(read_value(&state, &a), a_val, "lhs restored, a={a_val} b={b_val}");
        }
    }

    #[test]
    fn increase_with_carry_matches_wrapping_addition_and_reports_overflow() {
        for &(a_val, b_val) in &[(3u32, 5u32), (0, 0), (2, 2), (3, 3)] {
            let mut b = CircuitBuilder::new();
            let dest = alloc(&mut b, 2, "d");
            let src = alloc(&mut b, 2, "s");
            let carry = b.add_non_ancillary("carry", false).unwrap();
            assert!(increase_with_carry(&mut b, &dest, &src, carry));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &dest, a_val);
            set_value(&mut state, &src, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            let sum = a_val + b_val;
            assert_eq!(read_value(&state, &dest), sum % 4, "a={a_val} b={b_val}");
            assert_eq!(state[carry.index()], sum >= 4, "a={a_val} b={b_val}");
            assert_eq!(read_value(&state, &src), b_val, "src restored, a={a_val} b={b_val}");
        }
    }

    #[test]
    fn division_and_modulo_match_integer_semantics() {
        for &(a_val, b_val) in &[(7u32, 2u32), (5, 1), (3, 3), (0, 2), (6, 5)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 3, "a");
            let bb = alloc(&mut b, 3, "b");
            let quot = alloc(&mut b, 3, "q");
            assert!(division(&mut b, &quot, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(read_value(&state, &quot), a_val / b_val, "a={a_val} b={b_val}");
        }

        for &(a_val, b_val) in &[(7u32, 2u32), (5, 1), (3, 3), (0, 2), (6, 5)] {
            let mut b = CircuitBuilder::new();
            let a = alloc(&mut b, 3, "a");
            let bb = alloc(&mut b, 3, "b");
            let rem = alloc(&mut b, 3, "r");
            assert!(modulo(&mut b, &rem, &a, &bb));

            let mut state = vec![false; b.registry().len()];
            set_value(&mut state, &a, a_val);
            set_value(&mut state, &bb, b_val);
            BitVectorSimulator::new().run(b.operations(), &mut state);

            assert_eq!(read_value(&state, &rem), a_val % b_val, "a={a_val} b={b_val}");
        }
    }

    #[test]
    fn disjunction_realizes_dest_xor_or_on_a_clean_destination() {
        let mut b = CircuitBuilder::new();
        let a = b.add_non_ancillary("a", false).unwrap();
        let c = b.add_non_ancillary("b", false).unwrap();
        let dest = b.add_non_ancillary("dest", false).unwrap();
        assert!(disjunction(&mut b, dest, a, c));

        for &(a_val, b_val) in &[(false, false), (false, true), (true, false), (true, true)] {
            let mut state = vec![false; b.registry().len()];
            state[a.index()] = a_val;
            state[c.index()] = b_val;
            BitVectorSimulator::new().run(b.operations(), &mut state);
            assert_eq!(state[dest.index()], a_val || b_val, "a={a_val} b={b_val}");
        }
    }
}
