use std::collections::HashMap;

/// Per-operation key/value metadata plus a global-annotation overlay.
///
/// The overlay is folded into a new operation's local map *at emit time*
/// only: [`Self::alloc_slot`] bakes a snapshot of the current globals into
/// the freshly allocated slot. Later calls to [`Self::set_global`] never
/// retroactively touch already-emitted operations, and a subsequent
/// [`Self::set_local`] on the same key simply overwrites the baked-in value,
/// giving locals precedence on collision.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    global: HashMap<String, String>,
    per_operation: Vec<HashMap<String, String>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global(&mut self, key: &str, value: impl Into<String>) -> bool {
        self.global.insert(key.to_string(), value.into()).is_some()
    }

    pub fn remove_global(&mut self, key: &str) -> bool {
        self.global.remove(key).is_some()
    }

    /// Bakes the current globals into a new slot, returning its index.
    pub fn alloc_slot(&mut self) -> usize {
        let index = self.per_operation.len();
        self.per_operation.push(self.global.clone());
        index
    }

    pub fn set_local(&mut self, op_index: usize, key: &str, value: impl Into<String>) -> bool {
        match self.per_operation.get_mut(op_index) {
            Some(slot) => {
                slot.insert(key.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn annotations_of(&self, op_index: usize) -> Option<&HashMap<String, String>> {
        self.per_operation.get(op_index)
    }

    /// Bulk-annotates every operation in `[from, to)` with `entries`,
    /// leaving already-baked-in globals untouched for keys not present in
    /// `entries`.
    pub fn annotate_range(&mut self, from: usize, to: usize, entries: &HashMap<String, String>) -> bool {
        if from > to || to > self.per_operation.len() {
            return false;
        }
        for slot in &mut self.per_operation[from..to] {
            for (key, value) in entries {
                slot.insert(key.clone(), value.clone());
            }
        }
        true
    }
}
