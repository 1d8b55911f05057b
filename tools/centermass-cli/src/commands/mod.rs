//! Subcommand implementations.

use std::path::{Path, PathBuf};

use centermass_common::{CentermassError, CentermassResult};
use centermass_model::{
    DVec3, MassDocument, MassRegistry, NodeId, RegistryError, Scene, SceneTransform,
    TransformSource,
};

pub mod evaluate;
pub mod influence;
pub mod info;
pub mod new;
pub mod section;
pub mod settings;
pub mod validate;
pub mod weights;

/// A document loaded into a registry for editing.
///
/// Stored influences are instantiated against their own identifiers, so a
/// save writes them back exactly as they were read. A scene, when given, is
/// only used to resolve transforms that are being connected.
pub struct Session {
    pub path: PathBuf,
    pub registry: MassRegistry,
    pub node: NodeId,
    scene: Option<Scene>,
    known: Scene,
}

impl Session {
    /// Load `path` for editing without a scene.
    pub fn open(path: &Path) -> CentermassResult<Self> {
        Self::load(path, None)
    }

    /// Load `path` for editing; new influences resolve against `scene`.
    pub fn open_with_scene(path: &Path, scene: &Path) -> CentermassResult<Self> {
        let scene = load_scene(scene)?;
        Self::load(path, Some(scene))
    }

    fn load(path: &Path, scene: Option<Scene>) -> CentermassResult<Self> {
        let document = load_document(path)?;
        let known = placeholder_scene(&document);

        let mut registry = MassRegistry::new();
        let node = document.instantiate(&mut registry, &known);

        Ok(Self {
            path: path.to_path_buf(),
            registry,
            node,
            scene,
            known,
        })
    }

    /// Connect `transform` to `section`.
    ///
    /// Returns the slot and the resolved transform name, or `None` when the
    /// session's scene has no such transform.
    pub fn connect(
        &mut self,
        section: &str,
        transform: &str,
    ) -> Result<Option<(usize, String)>, RegistryError> {
        let lookup = self.scene.as_ref().unwrap_or(&self.known);
        let Some(resolved) = lookup.resolve(transform) else {
            return Ok(None);
        };
        let matrix = lookup.world_matrix(&resolved);
        if let Some(matrix) = matrix {
            self.known.insert(SceneTransform::new(resolved.as_str(), matrix));
        }

        let slot = self
            .registry
            .add_influence(self.node, section, &resolved, &self.known)?;
        Ok(Some((slot, resolved)))
    }

    /// Write the node back to the file it came from.
    pub fn save(&self) -> CentermassResult<()> {
        let document = MassDocument::from_node(&self.registry, self.node)
            .ok_or_else(|| CentermassError::registry("mass node is gone"))?;
        document
            .save(&self.path)
            .map_err(|e| CentermassError::document(e.to_string()))
    }
}

pub fn load_document(path: &Path) -> CentermassResult<MassDocument> {
    if !path.exists() {
        return Err(CentermassError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    MassDocument::load(path).map_err(|e| CentermassError::document(e.to_string()))
}

pub fn load_scene(path: &Path) -> CentermassResult<Scene> {
    if !path.exists() {
        return Err(CentermassError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Scene::load(path).map_err(|e| CentermassError::scene(e.to_string()))
}

/// A scene holding every identifier the document references, at the origin.
fn placeholder_scene(document: &MassDocument) -> Scene {
    let mut scene = Scene::default();
    for identifier in document.sections.iter().flat_map(|s| &s.influences) {
        scene.insert(SceneTransform::at(identifier.as_str(), DVec3::ZERO));
    }
    scene
}
