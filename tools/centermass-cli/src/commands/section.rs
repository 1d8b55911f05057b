//! Section editing.

use std::path::PathBuf;

use centermass_common::AppConfig;
use centermass_model::{default_weight, DEFAULT_SECTION_MASS};

use super::Session;

pub fn add(
    config: &AppConfig,
    path: PathBuf,
    name: String,
    weight: Option<f64>,
    scene: Option<PathBuf>,
    influences: Vec<String>,
) -> anyhow::Result<()> {
    let mut session = match scene.as_deref() {
        Some(scene) => Session::open_with_scene(&path, scene)?,
        None => Session::open(&path)?,
    };
    let node = session.node;

    let slot = session.registry.add_section(node, &name)?;

    let weight = match weight {
        Some(w) => w,
        None if config.editor.body_part_weights => default_weight(&name),
        None => DEFAULT_SECTION_MASS,
    };
    session.registry.set_section_weight(node, &name, weight)?;

    let mut connected = 0;
    for transform in &influences {
        match session.connect(&name, transform)? {
            Some(_) => connected += 1,
            None => eprintln!("  Skipped '{transform}': not found in the scene"),
        }
    }

    session.save()?;
    println!("Added section '{name}' in slot {slot} with weight {weight}");
    if !influences.is_empty() {
        println!("  Connected {connected} of {} influence(s)", influences.len());
    }
    Ok(())
}

pub fn rename(path: PathBuf, name: String, new_name: String) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;
    session
        .registry
        .rename_section(session.node, &name, &new_name)?;
    session.save()?;
    println!("Renamed section '{name}' to '{new_name}'");
    Ok(())
}

pub fn remove(path: PathBuf, name: String) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;
    let removed = session.registry.remove_section(session.node, &name)?;
    session.save()?;
    println!(
        "Removed section '{name}' ({} influence(s) disconnected)",
        removed.influences.len()
    );
    Ok(())
}

pub fn weight(path: PathBuf, name: String, weight: f64) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;
    let previous = session.registry.section_weight(session.node, &name);
    session
        .registry
        .set_section_weight(session.node, &name, weight)?;
    session.save()?;
    println!("Section '{name}' weight: {previous} -> {weight}");
    if weight <= 0.0 {
        println!("  Note: sections with non-positive weight are left out of the calculation");
    }
    Ok(())
}

pub fn consider(path: PathBuf, name: String, enabled: bool) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;
    session
        .registry
        .set_section_considered(session.node, &name, enabled)?;
    session.save()?;
    let state = if enabled { "included in" } else { "excluded from" };
    println!("Section '{name}' is now {state} the calculation");
    Ok(())
}
