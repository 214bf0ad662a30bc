use std::collections::BTreeSet;

use super::annotation::AnnotationStore;
use super::ids::QubitId;
use super::operation::{Operation, OperationKind};
use super::registry::{QubitClass, QubitRegister};
use super::scope::ControlScopeStack;

/// Ordered, append-only log of quantum operations, together with the
/// qubit register, control-propagation scope stack, and annotation store
/// that feed every emission.
///
/// `CircuitBuilder` is the single owner of all mutable synthesis state; no
/// aliasing of the register/scope/annotation state happens outside it, and
/// callers must not share one builder across independent synthesis runs.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    registry: QubitRegister,
    scopes: ControlScopeStack,
    annotations: AnnotationStore,
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // --- qubit registry passthrough ---------------------------------

    pub fn registry(&self) -> &QubitRegister {
        &self.registry
    }

    pub fn add_non_ancillary(&mut self, label: impl Into<String>, is_garbage: bool) -> Option<QubitId> {
        self.registry.add_non_ancillary(label, is_garbage)
    }

    /// Adds a preliminary ancillary qubit. If `initial_value` is `true`, an
    /// immediate NOT is emitted so the qubit's observable initial state is 1.
    pub fn add_preliminary_ancillary(&mut self, label: impl Into<String>, initial_value: bool) -> Option<QubitId> {
        let qubit = self.registry.add_preliminary_ancillary(label)?;
        if initial_value && !self.add_not(qubit) {
            return None;
        }
        Some(qubit)
    }

    pub fn promote(&mut self, qubit: QubitId) -> bool {
        self.registry.promote(qubit)
    }

    // --- control-propagation scope passthrough ----------------------

    pub fn activate_scope(&mut self) {
        self.scopes.activate();
    }

    pub fn deactivate_scope(&mut self) {
        self.scopes.deactivate();
    }

    /// Registers `qubit` for propagation in the current (and any nested)
    /// scope. Returns `false` if the qubit is unknown.
    pub fn register_control(&mut self, qubit: QubitId) -> bool {
        if !self.registry.contains(qubit) {
            return false;
        }
        self.scopes.register(qubit);
        true
    }

    pub fn deregister_control(&mut self, qubit: QubitId) -> bool {
        self.scopes.deregister(qubit)
    }

    pub fn active_controls(&self) -> &BTreeSet<QubitId> {
        self.scopes.active_snapshot()
    }

    /// Runs `f` inside a freshly activated propagation scope, guaranteeing
    /// the scope is deactivated once `f` returns however it returns.
    pub fn with_propagation_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.activate_scope();
        let result = f(self);
        self.deactivate_scope();
        result
    }

    // --- annotations passthrough -------------------------------------

    pub fn set_global_annotation(&mut self, key: &str, value: impl Into<String>) -> bool {
        self.annotations.set_global(key, value)
    }

    pub fn remove_global_annotation(&mut self, key: &str) -> bool {
        self.annotations.remove_global(key)
    }

    pub fn set_operation_annotation(&mut self, op_index: usize, key: &str, value: impl Into<String>) -> bool {
        self.annotations.set_local(op_index, key, value)
    }

    pub fn annotations_of(&self, op_index: usize) -> Option<&std::collections::HashMap<String, String>> {
        self.annotations.annotations_of(op_index)
    }

    // --- operation log -------------------------------------------------

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn non_ancillary_labels_in_order(&self) -> Vec<(QubitId, String)> {
        (0..self.registry.len())
            .map(QubitId::new)
            .filter(|q| matches!(self.registry.class(*q), Some(QubitClass::NonAncillary { .. })))
            .map(|q| (q, self.registry.label(q).unwrap_or_default().to_string()))
            .collect()
    }

    fn qubits_known(&self, qubits: impl IntoIterator<Item = QubitId>) -> bool {
        qubits.into_iter().all(|q| self.registry.contains(q))
    }

    fn emit(&mut self, kind: OperationKind, controls: BTreeSet<QubitId>, targets: Vec<QubitId>) -> bool {
        let index = self.operations.len() as u64;
        self.operations.push(Operation { kind, controls, targets, index });
        let slot = self.annotations.alloc_slot();
        debug_assert_eq!(slot as u64, index);
        true
    }

    /// `NOT(target)`. Controls are exactly the currently active propagated
    /// qubits (I4).
    pub fn add_not(&mut self, target: QubitId) -> bool {
        if !self.registry.contains(target) {
            return false;
        }
        let active = self.active_controls().clone();
        if active.contains(&target) {
            return false;
        }
        self.emit(OperationKind::X, active, vec![target])
    }

    /// `CNOT(control, target)`. Controls are `active ∪ {control}`.
    pub fn add_cnot(&mut self, control: QubitId, target: QubitId) -> bool {
        if !self.qubits_known([control, target]) || control == target {
            return false;
        }
        let mut controls = self.active_controls().clone();
        if controls.contains(&target) {
            return false;
        }
        controls.insert(control);
        self.emit(OperationKind::X, controls, vec![target])
    }

    /// `Toffoli(c1, c2, target)`. Controls are `active ∪ {c1, c2}`.
    pub fn add_toffoli(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> bool {
        if !self.qubits_known([c1, c2, target]) || c1 == target || c2 == target {
            return false;
        }
        let mut controls = self.active_controls().clone();
        if controls.contains(&target) {
            return false;
        }
        controls.insert(c1);
        controls.insert(c2);
        self.emit(OperationKind::X, controls, vec![target])
    }

    /// `MCX(controls, target)`. The merged control set (`active ∪
    /// controls`) must be non-empty.
    pub fn add_mcx(&mut self, supplied_controls: &[QubitId], target: QubitId) -> bool {
        if !self.registry.contains(target) || !self.qubits_known(supplied_controls.iter().copied()) {
            return false;
        }
        if supplied_controls.contains(&target) {
            return false;
        }
        let mut controls = self.active_controls().clone();
        if controls.contains(&target) {
            return false;
        }
        controls.extend(supplied_controls.iter().copied());
        if controls.is_empty() {
            return false;
        }
        self.emit(OperationKind::X, controls, vec![target])
    }

    /// `Fredkin(t1, t2)`. No caller-supplied controls; `gateControls =
    /// active` only.
    pub fn add_fredkin(&mut self, t1: QubitId, t2: QubitId) -> bool {
        if t1 == t2 || !self.qubits_known([t1, t2]) {
            return false;
        }
        let controls = self.active_controls().clone();
        if controls.contains(&t1) || controls.contains(&t2) {
            return false;
        }
        self.emit(OperationKind::Swap, controls, vec![t1, t2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_scope_control_is_propagated_then_restored() {
        let mut b = CircuitBuilder::new();
        let q0 = b.add_non_ancillary("q0", false).unwrap();
        let q1 = b.add_non_ancillary("q1", false).unwrap();
        b.activate_scope();
        b.register_control(q0);
        assert!(b.add_not(q1));
        let op = &b.operations()[0];
        assert_eq!(op.controls, BTreeSet::from([q0]));
        assert_eq!(op.target(), q1);
        b.deactivate_scope();
        assert!(b.add_not(q1));
        assert!(b.operations()[1].controls.is_empty());
    }

    #[test]
    fn target_control_collision_rejected() {
        let mut b = CircuitBuilder::new();
        let q0 = b.add_non_ancillary("q0", false).unwrap();
        let _q1 = b.add_non_ancillary("q1", false).unwrap();
        b.activate_scope();
        b.register_control(q0);
        assert!(!b.add_not(q0));
        assert!(b.is_empty());
    }

    #[test]
    fn mcx_rejects_empty_merged_controls() {
        let mut b = CircuitBuilder::new();
        let t = b.add_non_ancillary("t", false).unwrap();
        assert!(!b.add_mcx(&[], t));
    }

    #[test]
    fn fredkin_rejects_equal_targets() {
        let mut b = CircuitBuilder::new();
        let t = b.add_non_ancillary("t", false).unwrap();
        assert!(!b.add_fredkin(t, t));
    }
}
