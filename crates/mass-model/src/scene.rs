//! Transform sources: where influence positions come from.
//!
//! Influences reference transforms by name. A [`TransformSource`] answers
//! "what is the world matrix of X" and resolves stored identifiers that may
//! carry a namespace prefix (`rig:hips`). [`Scene`] is the JSON-backed
//! implementation used by the tools and tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Separator between namespace and name in transform identifiers.
pub const NAMESPACE_SEPARATOR: char = ':';

/// The name with every namespace prefix removed.
pub fn short_name(identifier: &str) -> &str {
    identifier
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(identifier)
}

/// Anything that can report world matrices for named transforms.
pub trait TransformSource {
    /// World matrix of the transform called `name`, if it exists.
    fn world_matrix(&self, name: &str) -> Option<DMat4>;

    /// Every transform name, in scene order.
    fn transform_names(&self) -> Vec<&str>;

    fn contains(&self, name: &str) -> bool {
        self.world_matrix(name).is_some()
    }

    /// World-space position (translation component) of `name`.
    fn position(&self, name: &str) -> Option<DVec3> {
        self.world_matrix(name).map(|m| m.w_axis.truncate())
    }

    /// Resolve a stored identifier to a transform in this source.
    ///
    /// Exact names win. Otherwise the identifier's short name is matched
    /// against the short name of every transform and the first hit in scene
    /// order is returned.
    fn resolve(&self, identifier: &str) -> Option<String> {
        if self.contains(identifier) {
            return Some(identifier.to_string());
        }

        let wanted = short_name(identifier);
        if wanted.is_empty() {
            return None;
        }

        self.transform_names()
            .into_iter()
            .find(|name| short_name(name) == wanted)
            .map(str::to_string)
    }
}

/// World up axis, used for ground projection of the center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    #[default]
    Y,
    Z,
}

impl UpAxis {
    /// Component of `v` along this axis.
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            UpAxis::Y => v.y,
            UpAxis::Z => v.z,
        }
    }

    /// `v` with its up component replaced.
    pub fn with_component(self, v: DVec3, value: f64) -> DVec3 {
        match self {
            UpAxis::Y => DVec3::new(v.x, value, v.z),
            UpAxis::Z => DVec3::new(v.x, v.y, value),
        }
    }
}

impl FromStr for UpAxis {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(SceneError::InvalidUpAxis {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UpAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpAxis::Y => write!(f, "y"),
            UpAxis::Z => write!(f, "z"),
        }
    }
}

/// A named transform with its world matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSceneTransform", into = "RawSceneTransform")]
pub struct SceneTransform {
    pub name: String,
    pub matrix: DMat4,
}

impl SceneTransform {
    pub fn new(name: impl Into<String>, matrix: DMat4) -> Self {
        Self {
            name: name.into(),
            matrix,
        }
    }

    /// A transform carrying only a translation.
    pub fn at(name: impl Into<String>, position: DVec3) -> Self {
        Self::new(name, DMat4::from_translation(position))
    }
}

/// On-disk form: either a full 16-element matrix (column-major, translation
/// in elements 12..15) or a bare translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSceneTransform {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matrix: Option<[f64; 16]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    translation: Option<[f64; 3]>,
}

impl TryFrom<RawSceneTransform> for SceneTransform {
    type Error = String;

    fn try_from(raw: RawSceneTransform) -> Result<Self, Self::Error> {
        match (raw.matrix, raw.translation) {
            (Some(m), _) => Ok(SceneTransform::new(raw.name, DMat4::from_cols_array(&m))),
            (None, Some(t)) => Ok(SceneTransform::at(raw.name, DVec3::from_array(t))),
            (None, None) => Err(format!(
                "transform '{}' needs either a matrix or a translation",
                raw.name
            )),
        }
    }
}

impl From<SceneTransform> for RawSceneTransform {
    fn from(t: SceneTransform) -> Self {
        Self {
            name: t.name,
            matrix: Some(t.matrix.to_cols_array()),
            translation: None,
        }
    }
}

/// In-memory scene of named transforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub up_axis: UpAxis,

    #[serde(default)]
    pub transforms: Vec<SceneTransform>,
}

impl Scene {
    pub fn new(up_axis: UpAxis) -> Self {
        Self {
            up_axis,
            transforms: Vec::new(),
        }
    }

    /// Add or replace a transform.
    pub fn insert(&mut self, transform: SceneTransform) {
        match self.transforms.iter_mut().find(|t| t.name == transform.name) {
            Some(existing) => existing.matrix = transform.matrix,
            None => self.transforms.push(transform),
        }
    }

    /// Builder-style [`Scene::insert`] of a translation-only transform.
    pub fn with_transform(mut self, name: impl Into<String>, position: DVec3) -> Self {
        self.insert(SceneTransform::at(name, position));
        self
    }

    /// Move an existing transform. Returns false if it does not exist.
    pub fn set_translation(&mut self, name: &str, position: DVec3) -> bool {
        match self.transforms.iter_mut().find(|t| t.name == name) {
            Some(t) => {
                t.matrix.w_axis = position.extend(1.0);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<SceneTransform> {
        let idx = self.transforms.iter().position(|t| t.name == name)?;
        Some(self.transforms.remove(idx))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a scene description from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SceneError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let scene = Self::from_json(&json).map_err(|e| SceneError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(
            path = %path.display(),
            transforms = scene.transforms.len(),
            "Loaded scene"
        );
        Ok(scene)
    }
}

impl TransformSource for Scene {
    fn world_matrix(&self, name: &str) -> Option<DMat4> {
        self.transforms
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.matrix)
    }

    fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Errors that can occur when loading scenes.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
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

    #[error("Invalid up axis '{value}' (expected 'y' or 'z')")]
    InvalidUpAxis { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaced_scene() -> Scene {
        Scene::new(UpAxis::Y)
            .with_transform("hero:hips", DVec3::new(0.0, 90.0, 0.0))
            .with_transform("villain:hips", DVec3::new(50.0, 95.0, 0.0))
            .with_transform("head", DVec3::new(0.0, 160.0, 0.0))
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("hips"), "hips");
        assert_eq!(short_name("rig:hips"), "hips");
        assert_eq!(short_name("a:b:hips"), "hips");
        assert_eq!(short_name("rig:"), "");
    }

    #[test]
    fn test_position_is_translation() {
        let scene = namespaced_scene();
        assert_eq!(
            scene.position("head"),
            Some(DVec3::new(0.0, 160.0, 0.0))
        );
        assert_eq!(scene.position("tail"), None);
    }

    #[test]
    fn test_resolve_prefers_exact_match() {
        let scene = namespaced_scene();
        assert_eq!(scene.resolve("villain:hips").as_deref(), Some("villain:hips"));
        assert_eq!(scene.resolve("head").as_deref(), Some("head"));
    }

    #[test]
    fn test_resolve_falls_back_to_short_name() {
        let scene = namespaced_scene();
        // First match in scene order.
        assert_eq!(scene.resolve("hips").as_deref(), Some("hero:hips"));
        assert_eq!(scene.resolve("old_ns:hips").as_deref(), Some("hero:hips"));
        assert_eq!(scene.resolve("other:head").as_deref(), Some("head"));
        assert_eq!(scene.resolve("other:tail"), None);
        assert_eq!(scene.resolve("other:"), None);
    }

    #[test]
    fn test_scene_json_accepts_matrix_or_translation() {
        let json = r#"{
            "upAxis": "z",
            "transforms": [
                {"name": "root", "translation": [1.0, 2.0, 3.0]},
                {"name": "spine", "matrix": [
                    1, 0, 0, 0,
                    0, 1, 0, 0,
                    0, 0, 1, 0,
                    4, 5, 6, 1
                ]}
            ]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.up_axis, UpAxis::Z);
        assert_eq!(scene.position("root"), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(scene.position("spine"), Some(DVec3::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn test_scene_json_rejects_transform_without_placement() {
        let json = r#"{"transforms": [{"name": "floating"}]}"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(err.to_string().contains("floating"));
    }

    #[test]
    fn test_set_translation_and_insert_replace() {
        let mut scene = namespaced_scene();
        assert!(scene.set_translation("head", DVec3::new(1.0, 1.0, 1.0)));
        assert!(!scene.set_translation("tail", DVec3::ZERO));
        assert_eq!(scene.position("head"), Some(DVec3::ONE));

        scene.insert(SceneTransform::at("head", DVec3::new(2.0, 2.0, 2.0)));
        assert_eq!(scene.transforms.len(), 3);
        assert_eq!(scene.position("head"), Some(DVec3::splat(2.0)));
    }

    #[test]
    fn test_up_axis_parse() {
        assert_eq!("Y".parse::<UpAxis>().unwrap(), UpAxis::Y);
        assert_eq!(" z ".parse::<UpAxis>().unwrap(), UpAxis::Z);
        assert!("x".parse::<UpAxis>().is_err());
        assert_eq!(
            UpAxis::Z.with_component(DVec3::new(1.0, 2.0, 3.0), 0.0),
            DVec3::new(1.0, 2.0, 0.0)
        );
    }
}
