//! The `.mass` JSON document format.
//!
//! ```json
//! {
//!     "name": "hero",
//!     "sections": [
//!         {"influences": ["hero:hips", "hero:spine"], "name": "torso", "weight": 8.6}
//!     ],
//!     "settings": {
//!         "calculate": true,
//!         "drawDebuggingLines": true,
//!         "drawSphere": true,
//!         "drawVerticalLine": true,
//!         "sphereSize": 10.0
//!     }
//! }
//! ```
//!
//! Influence identifiers are stored as plain transform names and resolved
//! again on load, so a rig referenced under a different namespace still
//! finds its transforms.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::node::{NodeId, NodeSettings};
use crate::registry::MassRegistry;
use crate::scene::TransformSource;

/// Conventional file extension for mass documents.
pub const MASS_FILE_EXTENSION: &str = "mass";

/// Serialized form of a mass node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassDocument {
    /// Node name at the time of saving.
    pub name: String,

    /// Node settings. Older files may omit them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<NodeSettings>,

    /// Sections in slot order.
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

/// One serialized section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub name: String,

    pub weight: f64,

    /// Transform identifiers, in slot order.
    #[serde(default)]
    pub influences: Vec<String>,

    /// Only written when the section is excluded from the calculation.
    #[serde(default = "default_considered", skip_serializing_if = "is_considered")]
    pub considered: bool,
}

fn default_considered() -> bool {
    true
}

fn is_considered(considered: &bool) -> bool {
    *considered
}

impl MassDocument {
    /// Capture the current state of a node. `None` if the node is unknown.
    pub fn from_node(registry: &MassRegistry, id: NodeId) -> Option<Self> {
        let node = registry.node(id)?;

        let sections = registry
            .section_names(id)
            .into_iter()
            .filter_map(|name| registry.section(id, &name))
            .map(|section| SectionRecord {
                name: section.name.clone(),
                weight: section.mass,
                influences: section.influence_names(),
                considered: section.considered,
            })
            .collect();

        Some(Self {
            name: node.name().to_string(),
            settings: Some(node.settings),
            sections,
        })
    }

    /// Build a new node in `registry` from this document.
    ///
    /// Influence identifiers are resolved against `source`; the ones that
    /// cannot be found are skipped. Returns the id of the new node.
    pub fn instantiate(
        &self,
        registry: &mut MassRegistry,
        source: &impl TransformSource,
    ) -> NodeId {
        let id = registry.create_node(&self.name);

        if let (Some(settings), Some(target)) = (self.settings, registry.settings_mut(id)) {
            *target = settings;
        }

        for record in &self.sections {
            if let Err(e) = registry.add_section(id, &record.name) {
                tracing::warn!(section = %record.name, "Skipping section: {e}");
                continue;
            }
            // The section was just created, so these cannot fail.
            registry
                .set_section_weight(id, &record.name, record.weight)
                .ok();
            registry
                .set_section_considered(id, &record.name, record.considered)
                .ok();

            for identifier in &record.influences {
                let Some(resolved) = source.resolve(identifier) else {
                    tracing::warn!(
                        section = %record.name,
                        influence = %identifier,
                        "Could not resolve influence; skipping"
                    );
                    continue;
                };
                if resolved != *identifier {
                    tracing::info!(from = %identifier, to = %resolved, "Remapped influence");
                }
                registry
                    .add_influence(id, &record.name, &resolved, source)
                    .ok();
            }
        }

        tracing::info!(
            node = %id,
            name = registry.node(id).map(|n| n.name()).unwrap_or_default(),
            sections = self.sections.len(),
            "Instantiated mass document"
        );
        id
    }

    /// Pretty JSON with sorted keys and four-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        // Going through `Value` sorts object keys.
        let value = serde_json::to_value(self)?;
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DocumentError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = self.to_json().map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Saved mass document");
        Ok(())
    }

    /// Problems that would make this document load incompletely.
    pub fn validate(&self, source: Option<&dyn TransformSource>) -> Vec<String> {
        let mut issues = vec![];

        let mut seen = std::collections::HashSet::new();
        for section in &self.sections {
            if section.name.trim().is_empty() {
                issues.push("Section with an empty name".to_string());
            } else if !seen.insert(section.name.as_str()) {
                issues.push(format!("Duplicate section name: {}", section.name));
            }

            if section.weight <= 0.0 {
                issues.push(format!(
                    "Section '{}' has non-positive weight {} and will be ignored",
                    section.name, section.weight
                ));
            }

            if let Some(source) = source {
                for influence in &section.influences {
                    if source.resolve(influence).is_none() {
                        issues.push(format!(
                            "Section '{}' influence not found in scene: {influence}",
                            section.name
                        ));
                    }
                }
            }
        }

        if let Some(settings) = &self.settings {
            if settings.sphere_size < 0.0 {
                issues.push(format!("Negative sphere size: {}", settings.sphere_size));
            }
        }

        issues
    }
}

/// Errors that can occur when reading or writing documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use glam::DVec3;

    fn rig_scene(namespace: &str) -> Scene {
        let ns = |n: &str| {
            if namespace.is_empty() {
                n.to_string()
            } else {
                format!("{namespace}:{n}")
            }
        };
        Scene::default()
            .with_transform(ns("hips"), DVec3::new(0.0, 100.0, 0.0))
            .with_transform(ns("spine"), DVec3::new(0.0, 125.0, 2.0))
            .with_transform(ns("head"), DVec3::new(0.0, 170.0, 4.0))
            .with_transform(ns("hand_l"), DVec3::new(40.0, 110.0, 10.0))
    }

    fn build_rig(registry: &mut MassRegistry, scene: &Scene, prefix: &str) -> NodeId {
        let node = registry.create_node("hero");
        registry.add_section(node, "torso").unwrap();
        registry.set_section_weight(node, "torso", 8.6).unwrap();
        registry
            .add_influence(node, "torso", &format!("{prefix}hips"), scene)
            .unwrap();
        registry
            .add_influence(node, "torso", &format!("{prefix}spine"), scene)
            .unwrap();

        registry.add_section(node, "head").unwrap();
        registry.set_section_weight(node, "head", 3.9).unwrap();
        registry
            .add_influence(node, "head", &format!("{prefix}head"), scene)
            .unwrap();

        registry.add_section(node, "hand").unwrap();
        registry.set_section_weight(node, "hand", 0.2).unwrap();
        registry.set_section_considered(node, "hand", false).unwrap();
        registry
            .add_influence(node, "hand", &format!("{prefix}hand_l"), scene)
            .unwrap();
        node
    }

    #[test]
    fn test_serialize_shape() {
        let scene = rig_scene("");
        let mut registry = MassRegistry::new();
        let node = build_rig(&mut registry, &scene, "");
        registry.settings_mut(node).unwrap().sphere_size = 4.0;

        let doc = MassDocument::from_node(&registry, node).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(value["name"], "hero");
        assert_eq!(value["settings"]["sphereSize"], 4.0);
        assert_eq!(value["settings"]["drawDebuggingLines"], true);
        assert_eq!(value["settings"]["drawVerticalLine"], true);
        assert_eq!(value["sections"][0]["name"], "torso");
        assert_eq!(value["sections"][0]["weight"], 8.6);
        assert_eq!(
            value["sections"][0]["influences"],
            serde_json::json!(["hips", "spine"])
        );
        assert!(value["sections"][0].get("considered").is_none());
        assert_eq!(value["sections"][2]["considered"], false);
    }

    #[test]
    fn test_json_keys_sorted_and_indented() {
        let doc = MassDocument {
            name: "n".to_string(),
            settings: Some(NodeSettings::default()),
            sections: vec![],
        };
        let json = doc.to_json().unwrap();
        let name_pos = json.find("\"name\"").unwrap();
        let sections_pos = json.find("\"sections\"").unwrap();
        let settings_pos = json.find("\"settings\"").unwrap();
        assert!(name_pos < sections_pos && sections_pos < settings_pos);
        assert!(json.contains("\n    \"name\""));
    }

    #[test]
    fn test_round_trip_preserves_sections() {
        let scene = rig_scene("");
        let mut registry = MassRegistry::new();
        let node = build_rig(&mut registry, &scene, "");

        let first = MassDocument::from_node(&registry, node).unwrap();
        let reparsed = MassDocument::from_json(&first.to_json().unwrap()).unwrap();

        let copy = reparsed.instantiate(&mut registry, &scene);
        let second = MassDocument::from_node(&registry, copy).unwrap();

        assert_eq!(second.name, "hero1");
        assert_eq!(second.sections, first.sections);
        assert_eq!(second.settings, first.settings);
    }

    #[test]
    fn test_round_trip_remaps_namespace() {
        let saved_scene = rig_scene("old");
        let mut registry = MassRegistry::new();
        let node = build_rig(&mut registry, &saved_scene, "old:");
        let doc = MassDocument::from_node(&registry, node).unwrap();

        let new_scene = rig_scene("new");
        let mut fresh = MassRegistry::new();
        let copy = doc.instantiate(&mut fresh, &new_scene);

        assert_eq!(
            fresh.section_influences(copy, "torso"),
            vec!["new:hips".to_string(), "new:spine".to_string()]
        );
        assert_eq!(fresh.section_weight(copy, "head"), 3.9);
        assert!(!fresh.section_considered(copy, "hand"));
    }

    #[test]
    fn test_unresolvable_influences_are_skipped() {
        let json = r#"{
            "name": "partial",
            "sections": [
                {"name": "torso", "weight": 8.6, "influences": ["hips", "ghost", "rig:spine"]}
            ]
        }"#;
        let doc = MassDocument::from_json(json).unwrap();
        assert!(doc.settings.is_none());

        let scene = rig_scene("");
        let mut registry = MassRegistry::new();
        let node = doc.instantiate(&mut registry, &scene);

        assert_eq!(
            registry.section_influences(node, "torso"),
            vec!["hips".to_string(), "spine".to_string()]
        );
        assert_eq!(*registry.settings(node).unwrap(), NodeSettings::default());
    }

    #[test]
    fn test_duplicate_sections_in_file_keep_first() {
        let json = r#"{
            "name": "dupes",
            "sections": [
                {"name": "torso", "weight": 2.0, "influences": []},
                {"name": "torso", "weight": 5.0, "influences": []}
            ]
        }"#;
        let doc = MassDocument::from_json(json).unwrap();
        assert_eq!(doc.validate(None).len(), 1);

        let mut registry = MassRegistry::new();
        let node = doc.instantiate(&mut registry, &Scene::default());
        assert_eq!(registry.section_names(node), vec!["torso".to_string()]);
        assert_eq!(registry.section_weight(node, "torso"), 2.0);
    }

    #[test]
    fn test_validate_reports_missing_influences() {
        let scene = rig_scene("");
        let doc = MassDocument {
            name: "v".to_string(),
            settings: None,
            sections: vec![SectionRecord {
                name: "legs".to_string(),
                weight: 0.0,
                influences: vec!["hips".to_string(), "knee".to_string()],
                considered: true,
            }],
        };
        let issues = doc.validate(Some(&scene));
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.contains("non-positive weight")));
        assert!(issues.iter().any(|i| i.contains("knee")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("centermass_test_document");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("hero.mass");

        let scene = rig_scene("");
        let mut registry = MassRegistry::new();
        let node = build_rig(&mut registry, &scene, "");
        let doc = MassDocument::from_node(&registry, node).unwrap();

        doc.save(&path).unwrap();
        let loaded = MassDocument::load(&path).unwrap();
        assert_eq!(loaded, doc);

        assert!(matches!(
            MassDocument::load(dir.join("missing.mass")),
            Err(DocumentError::IoError { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
