//! Section and influence bookkeeping across mass nodes.
//!
//! Every operation addresses a node by [`NodeId`] and a section by name.
//! Name lookups scan the node's occupied section slots; the list of those
//! slots is cached per node and dropped whenever sections are added or
//! removed.
//!
//! Queries never fail loudly: an unknown node or section yields `None`,
//! an empty list, or `0.0`, and logs a warning. Mutations return a
//! [`RegistryError`] and leave the node untouched when they are rejected.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::node::{MassNode, NodeId, NodeSettings};
use crate::scene::TransformSource;
use crate::section::Section;

/// Cache of occupied section indices, keyed by node identity.
#[derive(Debug, Default)]
pub struct SectionCache {
    indices: RefCell<HashMap<NodeId, Vec<usize>>>,
}

impl SectionCache {
    fn get_or_scan(&self, node: &MassNode) -> Vec<usize> {
        if let Some(cached) = self.indices.borrow().get(&node.id) {
            return cached.clone();
        }

        let scanned: Vec<usize> = node.sections.indices().collect();
        tracing::trace!(node = %node.id, sections = scanned.len(), "Rebuilt section cache");
        self.indices.borrow_mut().insert(node.id, scanned.clone());
        scanned
    }

    /// Drop the cached indices for one node.
    pub fn invalidate(&self, node: NodeId) {
        self.indices.borrow_mut().remove(&node);
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.indices.borrow_mut().clear();
    }

    pub fn is_cached(&self, node: NodeId) -> bool {
        self.indices.borrow().contains_key(&node)
    }
}

/// Owner of every mass node and the section cache.
#[derive(Debug, Default)]
pub struct MassRegistry {
    nodes: BTreeMap<NodeId, MassNode>,
    next_id: u32,
    cache: SectionCache,
}

impl MassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Create a node. The requested name is made unique by appending the
    /// smallest free numeric suffix (`rig`, `rig1`, `rig2`, ...).
    pub fn create_node(&mut self, name: &str) -> NodeId {
        let base = if name.trim().is_empty() {
            "centerOfMass"
        } else {
            name
        };
        let unique = self.unique_node_name(base);

        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, MassNode::new(id, unique.clone()));

        tracing::debug!(node = %id, name = %unique, "Created mass node");
        id
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<MassNode> {
        self.cache.invalidate(id);
        self.nodes.remove(&id)
    }

    /// Every node, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &MassNode> {
        self.nodes.values()
    }

    pub fn node(&self, id: NodeId) -> Option<&MassNode> {
        self.nodes.get(&id)
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.values().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn settings(&self, id: NodeId) -> Option<&NodeSettings> {
        self.nodes.get(&id).map(|n| &n.settings)
    }

    pub fn settings_mut(&mut self, id: NodeId) -> Option<&mut NodeSettings> {
        self.nodes.get_mut(&id).map(|n| &mut n.settings)
    }

    fn unique_node_name(&self, base: &str) -> String {
        let taken = |candidate: &str| self.nodes.values().any(|n| n.name == candidate);
        if !taken(base) {
            return base.to_string();
        }

        let mut suffix = 1;
        loop {
            let candidate = format!("{base}{suffix}");
            if !taken(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn node_or_warn(&self, id: NodeId) -> Option<&MassNode> {
        let node = self.nodes.get(&id);
        if node.is_none() {
            tracing::warn!(node = %id, "Could not resolve mass node");
        }
        node
    }

    // ------------------------------------------------------------------
    // Section lookup
    // ------------------------------------------------------------------

    /// Occupied section slot indices of `id`, in ascending order.
    pub fn section_indices(&self, id: NodeId) -> Vec<usize> {
        match self.node_or_warn(id) {
            Some(node) => self.cache.get_or_scan(node),
            None => Vec::new(),
        }
    }

    /// Slot index of the section called `name`.
    pub fn section_index(&self, id: NodeId, name: &str) -> Option<usize> {
        let node = self.nodes.get(&id)?;
        self.cache
            .get_or_scan(node)
            .into_iter()
            .find(|idx| node.sections.get(*idx).is_some_and(|s| s.name == name))
    }

    /// Name of the section stored in slot `index`.
    pub fn section_name_at(&self, id: NodeId, index: usize) -> Option<String> {
        let node = self.nodes.get(&id)?;
        if !self.cache.get_or_scan(node).contains(&index) {
            return None;
        }
        node.sections.get(index).map(|s| s.name.clone())
    }

    /// Section names in slot order.
    pub fn section_names(&self, id: NodeId) -> Vec<String> {
        let Some(node) = self.node_or_warn(id) else {
            return Vec::new();
        };
        self.cache
            .get_or_scan(node)
            .into_iter()
            .filter_map(|idx| node.sections.get(idx).map(|s| s.name.clone()))
            .collect()
    }

    pub fn section(&self, id: NodeId, name: &str) -> Option<&Section> {
        let idx = self.section_index(id, name)?;
        self.nodes.get(&id)?.sections.get(idx)
    }

    fn section_mut(&mut self, id: NodeId, name: &str) -> Result<&mut Section, RegistryError> {
        if !self.nodes.contains_key(&id) {
            return Err(RegistryError::UnknownNode { node: id });
        }
        let idx = self
            .section_index(id, name)
            .ok_or_else(|| RegistryError::UnknownSection {
                section: name.to_string(),
            })?;
        self.nodes
            .get_mut(&id)
            .and_then(|n| n.sections.get_mut(idx))
            .ok_or_else(|| RegistryError::UnknownSection {
                section: name.to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Section mutation
    // ------------------------------------------------------------------

    /// Add a section in the first unused slot and return that slot index.
    pub fn add_section(&mut self, id: NodeId, name: &str) -> Result<usize, RegistryError> {
        if name.trim().is_empty() {
            return Err(log_rejection(RegistryError::EmptyName));
        }
        if self.section_index(id, name).is_some() {
            return Err(log_rejection(RegistryError::DuplicateSection {
                section: name.to_string(),
            }));
        }

        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| log_rejection(RegistryError::UnknownNode { node: id }))?;
        let idx = node.sections.insert_first_free(Section::new(name));
        self.cache.invalidate(id);

        tracing::debug!(node = %id, section = name, slot = idx, "Added section");
        Ok(idx)
    }

    /// Rename a section. Rejected without change if `new_name` is taken.
    pub fn rename_section(
        &mut self,
        id: NodeId,
        name: &str,
        new_name: &str,
    ) -> Result<(), RegistryError> {
        if new_name.trim().is_empty() {
            return Err(log_rejection(RegistryError::EmptyName));
        }
        if self.section_names(id).iter().any(|n| n == new_name) {
            return Err(log_rejection(RegistryError::DuplicateSection {
                section: new_name.to_string(),
            }));
        }

        let section = self.section_mut(id, name).map_err(log_rejection)?;
        section.name = new_name.to_string();

        tracing::debug!(node = %id, from = name, to = new_name, "Renamed section");
        Ok(())
    }

    /// Remove a section, freeing its slot and disconnecting its influences.
    pub fn remove_section(&mut self, id: NodeId, name: &str) -> Result<Section, RegistryError> {
        let idx = match self.section_index(id, name) {
            Some(idx) => idx,
            None if !self.nodes.contains_key(&id) => {
                return Err(log_rejection(RegistryError::UnknownNode { node: id }))
            }
            None => {
                return Err(log_rejection(RegistryError::UnknownSection {
                    section: name.to_string(),
                }))
            }
        };

        let removed = self
            .nodes
            .get_mut(&id)
            .and_then(|n| n.sections.remove(idx))
            .ok_or_else(|| RegistryError::UnknownSection {
                section: name.to_string(),
            })?;
        self.cache.invalidate(id);

        tracing::debug!(
            node = %id,
            section = name,
            influences = removed.influences.len(),
            "Removed section"
        );
        Ok(removed)
    }

    pub fn set_section_weight(
        &mut self,
        id: NodeId,
        name: &str,
        weight: f64,
    ) -> Result<(), RegistryError> {
        let section = self.section_mut(id, name).map_err(log_rejection)?;
        section.mass = weight;
        Ok(())
    }

    /// Weight of the named section, or `0.0` if it cannot be resolved.
    pub fn section_weight(&self, id: NodeId, name: &str) -> f64 {
        match self.section(id, name) {
            Some(section) => section.mass,
            None => {
                tracing::warn!(node = %id, section = name, "Could not resolve section");
                0.0
            }
        }
    }

    pub fn set_section_considered(
        &mut self,
        id: NodeId,
        name: &str,
        considered: bool,
    ) -> Result<(), RegistryError> {
        let section = self.section_mut(id, name).map_err(log_rejection)?;
        section.considered = considered;
        Ok(())
    }

    /// Whether the named section takes part in the calculation. Unknown
    /// sections report `false`.
    pub fn section_considered(&self, id: NodeId, name: &str) -> bool {
        match self.section(id, name) {
            Some(section) => section.considered,
            None => {
                tracing::warn!(node = %id, section = name, "Could not resolve section");
                false
            }
        }
    }

    /// Section weights divided by their sum, in slot order.
    ///
    /// When the weights sum to zero every entry is reported as `0.0`.
    pub fn normalized_weights(&self, id: NodeId) -> Vec<(String, f64)> {
        let Some(node) = self.node_or_warn(id) else {
            return Vec::new();
        };

        let weights: Vec<(String, f64)> = self
            .cache
            .get_or_scan(node)
            .into_iter()
            .filter_map(|idx| node.sections.get(idx))
            .map(|s| (s.name.clone(), s.mass))
            .collect();

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total == 0.0 {
            if !weights.is_empty() {
                tracing::warn!(node = %id, "Section weights sum to zero; cannot normalise");
            }
            return weights.into_iter().map(|(name, _)| (name, 0.0)).collect();
        }

        weights
            .into_iter()
            .map(|(name, w)| (name, w / total))
            .collect()
    }

    // ------------------------------------------------------------------
    // Influences
    // ------------------------------------------------------------------

    /// Connect `transform` into the first free influence slot of a section.
    ///
    /// The transform must exist in `source`.
    pub fn add_influence(
        &mut self,
        id: NodeId,
        section: &str,
        transform: &str,
        source: &impl TransformSource,
    ) -> Result<usize, RegistryError> {
        if !source.contains(transform) {
            return Err(log_rejection(RegistryError::UnknownTransform {
                transform: transform.to_string(),
            }));
        }

        let target = self.section_mut(id, section).map_err(log_rejection)?;
        let slot = target.influences.insert_first_free(transform.to_string());

        tracing::debug!(node = %id, section, transform, slot, "Added influence");
        Ok(slot)
    }

    /// Disconnect every slot of a section bound to `transform`. Returns how
    /// many slots were freed.
    pub fn remove_influence(
        &mut self,
        id: NodeId,
        section: &str,
        transform: &str,
    ) -> Result<usize, RegistryError> {
        let target = self.section_mut(id, section).map_err(log_rejection)?;
        let removed = target.influences.retain(|_, name| name != transform);

        if removed == 0 {
            tracing::warn!(node = %id, section, transform, "Influence was not connected");
        } else {
            tracing::debug!(node = %id, section, transform, removed, "Removed influence");
        }
        Ok(removed)
    }

    /// Influence names of a section in slot order.
    pub fn section_influences(&self, id: NodeId, section: &str) -> Vec<String> {
        match self.section(id, section) {
            Some(s) => s.influence_names(),
            None => {
                tracing::warn!(node = %id, section, "Could not resolve section");
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------

    /// Forget every cached section index list.
    pub fn invalidate_section_cache(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache(&self) -> &SectionCache {
        &self.cache
    }
}

fn log_rejection(err: RegistryError) -> RegistryError {
    tracing::warn!("{err}");
    err
}

/// Errors returned by rejected registry mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("Could not resolve mass node {node}")]
    UnknownNode { node: NodeId },

    #[error("Could not resolve section with name '{section}'")]
    UnknownSection { section: String },

    #[error("Section name '{section}' is already in use")]
    DuplicateSection { section: String },

    #[error("Transform '{transform}' does not exist")]
    UnknownTransform { transform: String },

    #[error("Section names cannot be empty")]
    EmptyName,
}
