//! Influence editing.

use std::path::PathBuf;

use super::Session;

pub fn add(
    path: PathBuf,
    section: String,
    scene: PathBuf,
    transforms: Vec<String>,
) -> anyhow::Result<()> {
    let mut session = Session::open_with_scene(&path, &scene)?;

    let mut connected = 0;
    for transform in &transforms {
        // Namespace-less names resolve the same way documents are loaded.
        let Some((slot, resolved)) = session.connect(&section, transform)? else {
            eprintln!("  Skipped '{transform}': not found in {}", scene.display());
            continue;
        };
        println!("  [{slot}] {resolved}");
        connected += 1;
    }

    session.save()?;
    println!(
        "Connected {connected} of {} transform(s) to '{section}'",
        transforms.len()
    );
    Ok(())
}

pub fn remove(path: PathBuf, section: String, transforms: Vec<String>) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;

    let mut removed = 0;
    for transform in &transforms {
        removed += session
            .registry
            .remove_influence(session.node, &section, transform)?;
    }

    session.save()?;
    println!("Disconnected {removed} influence slot(s) from '{section}'");
    Ok(())
}
