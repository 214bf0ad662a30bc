//! Classical bit-vector simulator — the external collaborator described in
//! the system overview as consuming the emitted circuit. Executes each
//! [`Operation`] against a flat `bool` state vector: an `X` flips its target
//! iff every control is set; a `Swap` exchanges its two targets under the
//! same condition. No quantum amplitudes are modeled; this is a classical,
//! deterministic operation-by-operation replay, not a state-vector engine.

use crate::circuit::{Operation, OperationKind};

/// Runs a circuit's operations, one at a time, over a classical bit state.
#[derive(Debug, Default)]
pub struct BitVectorSimulator;

impl BitVectorSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Replays `ops` against `state` in log order. `state` must be at least
    /// as long as the highest qubit index referenced by `ops`.
    pub fn run(&self, ops: &[Operation], state: &mut [bool]) {
        for op in ops {
            let controls_set = op.controls.iter().all(|c| state[c.index()]);
            if !controls_set {
                continue;
            }
            match op.kind {
                OperationKind::X => {
                    let t = op.target().index();
                    state[t] = !state[t];
                }
                OperationKind::Swap => {
                    let (a, b) = op.swap_targets();
                    state.swap(a.index(), b.index());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitBuilder;

    #[test]
    fn fredkin_swaps_only_when_controlled() {
        let mut b = CircuitBuilder::new();
        let c = b.add_non_ancillary("c", false).unwrap();
        let t1 = b.add_non_ancillary("t1", false).unwrap();
        let t2 = b.add_non_ancillary("t2", false).unwrap();
        b.activate_scope();
        b.register_control(c);
        assert!(b.add_fredkin(t1, t2));
        b.deactivate_scope();

        let mut state = vec![false; b.registry().len()];
        state[t1.index()] = true;
        let sim = BitVectorSimulator::new();
        sim.run(b.operations(), &mut state);
        assert!(state[t1.index()]); // control was 0, swap did not fire

        state[c.index()] = true;
        state[t1.index()] = true;
        state[t2.index()] = false;
        sim.run(b.operations(), &mut state);
        assert!(!state[t1.index()]);
        assert!(state[t2.index()]);
    }
}
