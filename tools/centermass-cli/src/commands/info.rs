//! Show document information.

use std::path::PathBuf;

use super::Session;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let session = Session::open(&path)?;
    let registry = &session.registry;
    let node = registry
        .node(session.node)
        .ok_or_else(|| anyhow::anyhow!("Document did not produce a node"))?;

    println!("Mass node: {}", node.name());
    println!("  File: {}", path.display());
    println!();

    let s = &node.settings;
    println!("Settings:");
    println!("  Calculate: {}", s.calculate);
    println!("  Draw sphere: {} (size {})", s.draw_sphere, s.sphere_size);
    println!("  Draw vertical line: {}", s.draw_vertical_line);
    println!("  Draw debugging lines: {}", s.draw_debugging_lines);
    println!();

    let shares = registry.normalized_weights(session.node);
    println!("Sections ({}):", node.section_count());
    for (slot, section) in node.sections() {
        let share = shares
            .iter()
            .find(|(name, _)| *name == section.name)
            .map(|(_, w)| *w)
            .unwrap_or(0.0);
        let flag = if section.considered { "" } else { " [ignored]" };
        println!(
            "  [{slot}] {}: weight {} ({:.1}%){flag}",
            section.name,
            section.mass,
            share * 100.0
        );
        for (influence_slot, influence) in section.influences.iter() {
            println!("      [{influence_slot}] {influence}");
        }
    }
    println!();
    println!("Influences: {}", node.influence_count());

    Ok(())
}
