//! Validate a mass document.

use std::path::PathBuf;

use centermass_model::TransformSource;

use super::{load_document, load_scene};

pub fn run(path: PathBuf, scene: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Validating mass document at: {}", path.display());

    let document = load_document(&path)?;
    let scene = scene.as_deref().map(load_scene).transpose()?;

    println!("  Name: {}", document.name);
    println!("  Sections: {}", document.sections.len());
    println!(
        "  Influences: {}",
        document
            .sections
            .iter()
            .map(|s| s.influences.len())
            .sum::<usize>()
    );
    if document.settings.is_none() {
        println!("  Settings: missing (defaults will be used)");
    }

    let issues = document.validate(scene.as_ref().map(|s| s as &dyn TransformSource));
    if issues.is_empty() {
        println!("\nDocument is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Document may not load completely.",
            issues.len()
        );
    }

    Ok(())
}
