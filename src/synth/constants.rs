use crate::circuit::{CircuitBuilder, QubitId};

/// Free-list of previously allocated ancillas known to hold a definite 0/1
/// value, reused as scratch instead of allocating a fresh qubit each time.
#[derive(Debug, Default)]
pub struct ConstantLinePool {
    free_zero: Vec<QubitId>,
    free_one: Vec<QubitId>,
    next_index: usize,
}

impl ConstantLinePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a line known to hold `value`: pop from the matching free list;
    /// else pop from the opposite list and flip it with a NOT; else
    /// allocate a fresh preliminary ancillary `const_<value>_qubit_<k>`.
    pub fn get_constant_line(&mut self, builder: &mut CircuitBuilder, value: bool) -> Option<QubitId> {
        let (matching, opposite) = if value {
            (&mut self.free_one, &mut self.free_zero)
        } else {
            (&mut self.free_zero, &mut self.free_one)
        };
        if let Some(q) = matching.pop() {
            return Some(q);
        }
        if let Some(q) = opposite.pop() {
            if !builder.add_not(q) {
                return None;
            }
            return Some(q);
        }

        let index = self.next_index;
        self.next_index += 1;
        let label = format!("const_{}_qubit_{index}", value as u8);
        builder.add_preliminary_ancillary(label, value)
    }

    /// Appends `bitwidth` constant lines bit-by-bit (LSB first) encoding `value`.
    pub fn get_constant_lines(&mut self, builder: &mut CircuitBuilder, bitwidth: u32, value: u64, out: &mut Vec<QubitId>) -> bool {
        for i in 0..bitwidth {
            let bit = (value >> i) & 1 == 1;
            match self.get_constant_line(builder, bit) {
                Some(q) => out.push(q),
                None => return false,
            }
        }
        true
    }

    /// Returns `qubit` to the free list for `value`. Only meant to be
    /// called by gadgets that know their scratch is restored to a known
    /// value; never called automatically.
    pub fn release_constant_line(&mut self, qubit: QubitId, value: bool) {
        if value {
            self.free_one.push(qubit);
        } else {
            self.free_zero.push(qubit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_line_before_allocating() {
        let mut builder = CircuitBuilder::new();
        let mut pool = ConstantLinePool::new();
        let q0 = pool.get_constant_line(&mut builder, false).unwrap();
        pool.release_constant_line(q0, false);
        let before = builder.registry().len();
        let q1 = pool.get_constant_line(&mut builder, false).unwrap();
        assert_eq!(q0, q1);
        assert_eq!(builder.registry().len(), before);
    }

    #[test]
    fn flips_opposite_value_line_when_reused() {
        let mut builder = CircuitBuilder::new();
        let mut pool = ConstantLinePool::new();
        let q0 = pool.get_constant_line(&mut builder, false).unwrap();
        pool.release_constant_line(q0, false);
        let ops_before = builder.len();
        let q1 = pool.get_constant_line(&mut builder, true).unwrap();
        assert_eq!(q0, q1);
        assert_eq!(builder.len(), ops_before + 1);
    }
}
