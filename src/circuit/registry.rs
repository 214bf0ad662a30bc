use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::QubitId;

/// Classification of a qubit. Monotone: the only post-creation transition is
/// `PreliminaryAncillary -> DefinitiveAncillary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QubitClass {
    /// Carries an externally observable input/output. `garbage` marks an
    /// output qubit whose final value is unconstrained.
    NonAncillary { garbage: bool },
    /// Internally allocated, not yet committed.
    PreliminaryAncillary,
    /// Committed internally allocated; forbids any further qubit creation.
    DefinitiveAncillary,
}

/// Append-only qubit table. Assigns dense indices and tracks each qubit's
/// classification and optional unique label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QubitRegister {
    classes: Vec<QubitClass>,
    labels: Vec<String>,
    label_index: HashMap<String, QubitId>,
    adds_closed: bool,
}

impl QubitRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, qubit: QubitId) -> bool {
        qubit.index() < self.classes.len()
    }

    pub fn class(&self, qubit: QubitId) -> Option<QubitClass> {
        self.classes.get(qubit.index()).copied()
    }

    pub fn label(&self, qubit: QubitId) -> Option<&str> {
        self.labels.get(qubit.index()).map(String::as_str)
    }

    pub fn find_by_label(&self, label: &str) -> Option<QubitId> {
        self.label_index.get(label).copied()
    }

    pub fn adds_closed(&self) -> bool {
        self.adds_closed
    }

    fn insert(&mut self, label: String, class: QubitClass) -> Option<QubitId> {
        if self.adds_closed || label.is_empty() || self.label_index.contains_key(&label) {
            return None;
        }
        let id = QubitId::new(self.classes.len());
        self.classes.push(class);
        self.labels.push(label.clone());
        self.label_index.insert(label, id);
        Some(id)
    }

    /// Registers a new non-ancillary qubit. Fails if the label is empty,
    /// already taken, or qubit creation has been closed by a promotion.
    pub fn add_non_ancillary(&mut self, label: impl Into<String>, is_garbage: bool) -> Option<QubitId> {
        self.insert(label.into(), QubitClass::NonAncillary { garbage: is_garbage })
    }

    /// Registers a new preliminary ancillary qubit. Same failure conditions
    /// as [`Self::add_non_ancillary`].
    pub fn add_preliminary_ancillary(&mut self, label: impl Into<String>) -> Option<QubitId> {
        self.insert(label.into(), QubitClass::PreliminaryAncillary)
    }

    /// Promotes a preliminary ancillary to definitive. On first success,
    /// closes the register against further additions.
    pub fn promote(&mut self, qubit: QubitId) -> bool {
        match self.classes.get_mut(qubit.index()) {
            Some(class @ QubitClass::PreliminaryAncillary) => {
                *class = QubitClass::DefinitiveAncillary;
                self.adds_closed = true;
                true
            }
            _ => false,
        }
    }

    pub fn count_by_class(&self, predicate: impl Fn(QubitClass) -> bool) -> usize {
        self.classes.iter().copied().filter(|c| predicate(*c)).count()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
