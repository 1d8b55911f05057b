//! Mass nodes and their settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::section::Section;
use crate::slots::SparseSlots;

/// Stable identity of a mass node within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scalar settings carried by every mass node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSettings {
    /// Whether the center of mass is computed at all.
    pub calculate: bool,

    /// Draw per-section debug lines toward the center of mass.
    pub draw_debugging_lines: bool,

    /// Draw a sphere at the center of mass.
    pub draw_sphere: bool,

    /// Draw a vertical guide line through the center of mass.
    pub draw_vertical_line: bool,

    /// Sphere radius in scene units.
    pub sphere_size: f64,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            calculate: true,
            draw_debugging_lines: true,
            draw_sphere: true,
            draw_vertical_line: true,
            sphere_size: 10.0,
        }
    }
}

/// A center-of-mass node owning a set of sections.
#[derive(Debug, Clone)]
pub struct MassNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub settings: NodeSettings,
    pub(crate) sections: SparseSlots<Section>,
}

impl MassNode {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            settings: NodeSettings::default(),
            sections: SparseSlots::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sections in slot order, with their slot index.
    pub fn sections(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections.iter()
    }

    pub fn section_at(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn influence_count(&self) -> usize {
        self.sections.values().map(|s| s.influences.len()).sum()
    }
}
