use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::QubitId;

/// The gate family of an emitted [`Operation`].
///
/// `X` covers NOT / CNOT / Toffoli / MCX uniformly — they differ only in the
/// size of `controls`, never in kind. `Swap` is a Fredkin (controlled-SWAP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    X,
    Swap,
}

/// A single frozen entry in the circuit's append log.
///
/// `index` is the operation's position in the log and never changes once
/// appended; `controls` is the resolved control set at emission time
/// (propagated active controls unioned with any caller-supplied ones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub controls: BTreeSet<QubitId>,
    pub targets: Vec<QubitId>,
    pub index: u64,
}

impl Operation {
    pub fn target(&self) -> QubitId {
        self.targets[0]
    }

    pub fn swap_targets(&self) -> (QubitId, QubitId) {
        (self.targets[0], self.targets[1])
    }

    /// Control count used by cost metrics, with the SWAP-as-extra-control
    /// convention from the original cost formula.
    pub fn cost_control_count(&self) -> usize {
        self.controls.len() + usize::from(self.kind == OperationKind::Swap)
    }
}
