//! Sections: named, weighted groups of influences.

use crate::slots::SparseSlots;

/// Default mass given to a freshly created section.
pub const DEFAULT_SECTION_MASS: f64 = 1.0;

/// A named group of influences contributing one local center.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Unique (per node) section name.
    pub name: String,

    /// Weight/mass of this section.
    pub mass: f64,

    /// Whether the section takes part in the center-of-mass calculation.
    pub considered: bool,

    /// Transform names feeding the local center, in sparse slots.
    pub influences: SparseSlots<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: DEFAULT_SECTION_MASS,
            considered: true,
            influences: SparseSlots::new(),
        }
    }

    /// Influence names in slot order.
    pub fn influence_names(&self) -> Vec<String> {
        self.influences.values().cloned().collect()
    }

    /// Whether this section contributes to the aggregate at all.
    pub fn contributes(&self) -> bool {
        self.considered && self.mass > 0.0
    }
}
