use std::collections::{BTreeSet, HashMap};

use super::ids::QubitId;

/// LIFO stack of control-qubit propagation scopes.
///
/// `active` is the aggregate of all currently propagated control qubits.
/// Each scope records, for every qubit it registered, whether that qubit was
/// already active in the parent scope — deactivation restores `active` to
/// exactly its value on entry to the scope, regardless of how registrations
/// and deregistrations were interleaved inside it. A `BTreeSet` keeps the
/// set ordered, matching `Operation::controls` and giving the merged
/// control set a deterministic iteration order at emit time.
#[derive(Debug, Default)]
pub struct ControlScopeStack {
    active: BTreeSet<QubitId>,
    scopes: Vec<HashMap<QubitId, bool>>,
}

impl ControlScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn deactivate(&mut self) {
        let Some(top) = self.scopes.pop() else {
            return;
        };
        for (qubit, was_active_in_parent) in top {
            if was_active_in_parent {
                self.active.insert(qubit);
            } else {
                self.active.remove(&qubit);
            }
        }
    }

    /// Registers `qubit` in the top scope, activating one first if none is
    /// live. Idempotent for re-registration within the same scope: the
    /// recorded `wasActiveInParent` flag is set only on first registration.
    pub fn register(&mut self, qubit: QubitId) {
        if self.scopes.is_empty() {
            self.activate();
        }
        let was_active = self.active.contains(&qubit);
        let top = self.scopes.last_mut().expect("scope just ensured");
        top.entry(qubit).or_insert(was_active);
        self.active.insert(qubit);
    }

    /// Removes `qubit` from `active`, but only if the top scope registered
    /// it. The `locals` entry is left in place so deactivation still
    /// restores based on `wasActiveInParent`.
    pub fn deregister(&mut self, qubit: QubitId) -> bool {
        let Some(top) = self.scopes.last() else {
            return false;
        };
        if !top.contains_key(&qubit) {
            return false;
        }
        self.active.remove(&qubit);
        true
    }

    pub fn active_snapshot(&self) -> &BTreeSet<QubitId> {
        &self.active
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deactivating_a_scope_restores_the_prior_active_set() {
        let mut stack = ControlScopeStack::new();
        stack.register(QubitId(1));
        stack.register(QubitId(2));
        stack.register(QubitId(3));
        let before = stack.active_snapshot().clone();

        stack.activate();
        stack.register(QubitId(3));
        stack.register(QubitId(4));
        assert!(stack.active_snapshot().contains(&QubitId(4)));
        stack.deactivate();

        assert_eq!(*stack.active_snapshot(), before);
    }

    #[test]
    fn deregister_then_deactivate_restores_parent_value() {
        let mut stack = ControlScopeStack::new();
        stack.register(QubitId(0));
        stack.activate();
        stack.register(QubitId(0)); // was active in parent -> true
        assert!(stack.deregister(QubitId(0)));
        assert!(!stack.active_snapshot().contains(&QubitId(0)));
        stack.deactivate();
        assert!(stack.active_snapshot().contains(&QubitId(0)));
    }

    #[test]
    fn deregister_fails_outside_top_scope() {
        let mut stack = ControlScopeStack::new();
        stack.register(QubitId(0));
        stack.activate();
        assert!(!stack.deregister(QubitId(0)));
    }
}
