//! Error types shared across Centermass crates.

use std::path::PathBuf;

/// Top-level error type for Centermass operations.
#[derive(Debug, thiserror::Error)]
pub enum CentermassError {
    #[error("Registry error: {message}")]
    Registry { message: String },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using CentermassError.
pub type CentermassResult<T> = Result<T, CentermassError>;

impl CentermassError {
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry {
            message: msg.into(),
        }
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document {
            message: msg.into(),
        }
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_messages() {
        let err = CentermassError::registry("section 'spine' already exists");
        assert_eq!(
            err.to_string(),
            "Registry error: section 'spine' already exists"
        );

        let err = CentermassError::FileNotFound {
            path: PathBuf::from("rig.mass"),
        };
        assert_eq!(err.to_string(), "File not found: rig.mass");
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> CentermassResult<()> {
            std::fs::read("/nonexistent/centermass/rig.mass")?;
            Ok(())
        }
        assert!(matches!(fails(), Err(CentermassError::Io(_))));
    }
}
