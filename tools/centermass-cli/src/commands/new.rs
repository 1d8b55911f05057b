//! Create a new mass document.

use std::path::PathBuf;

use centermass_common::AppConfig;
use centermass_model::{MassDocument, MassRegistry, MASS_FILE_EXTENSION};

pub fn run(
    config: &AppConfig,
    name: String,
    output: Option<PathBuf>,
    sphere_size: Option<f64>,
) -> anyhow::Result<()> {
    let dir = output.unwrap_or_else(|| config.documents_dir.clone());
    let path = dir.join(format!("{name}.{MASS_FILE_EXTENSION}"));

    if path.exists() {
        anyhow::bail!("Refusing to overwrite existing document {}", path.display());
    }

    let mut registry = MassRegistry::new();
    let node = registry.create_node(&name);
    if let Some(settings) = registry.settings_mut(node) {
        settings.sphere_size = sphere_size.unwrap_or(config.editor.sphere_size);
    }

    let document = MassDocument::from_node(&registry, node)
        .ok_or_else(|| anyhow::anyhow!("Failed to capture new node"))?;
    document
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to create document: {e}"))?;

    println!("Created mass node '{}' at {}", document.name, path.display());
    println!();
    println!("Next steps:");
    println!("  centermass section add {} <NAME>", path.display());
    println!(
        "  centermass influence add {} <SECTION> --scene <SCENE> <TRANSFORM>...",
        path.display()
    );

    Ok(())
}
