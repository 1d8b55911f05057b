//! Compute the center of mass of a document against a scene.

use std::path::PathBuf;

use centermass_core::{evaluate, Guide};
use centermass_model::{MassRegistry, UpAxis};
use serde::Serialize;

use super::{load_document, load_scene};

#[derive(Serialize)]
struct Report<'a> {
    node: &'a str,
    evaluation: &'a centermass_core::Evaluation,
    guide: &'a Guide,
}

pub fn run(
    path: PathBuf,
    scene: PathBuf,
    up_axis: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let document = load_document(&path)?;
    let scene = load_scene(&scene)?;
    let up = match up_axis {
        Some(axis) => axis.parse::<UpAxis>()?,
        None => scene.up_axis,
    };

    // Read-only: stored identifiers may be remapped into the scene's namespace.
    let mut registry = MassRegistry::new();
    let id = document.instantiate(&mut registry, &scene);
    let node = registry
        .node(id)
        .ok_or_else(|| anyhow::anyhow!("Document did not produce a node"))?;

    let Some(evaluation) = evaluate(node, &scene) else {
        println!("Calculation is disabled for '{}'.", node.name());
        return Ok(());
    };
    let guide = Guide::build(&node.settings, &evaluation, up);

    if json {
        let report = Report {
            node: node.name(),
            evaluation: &evaluation,
            guide: &guide,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let c = evaluation.center;
    println!("Center of mass for '{}':", node.name());
    println!("  Position: ({:.4}, {:.4}, {:.4})", c.x, c.y, c.z);
    println!("  Up axis: {up}");
    println!();

    println!("Contributing sections:");
    for (contribution, (_, share)) in evaluation
        .contributions
        .iter()
        .zip(evaluation.mass_shares())
    {
        let p = contribution.center;
        println!(
            "  {}: mass {} ({:.1}%), center ({:.3}, {:.3}, {:.3}) from {} influence(s)",
            contribution.section,
            contribution.mass,
            share * 100.0,
            p.x,
            p.y,
            p.z,
            contribution.influences
        );
        for missing in &contribution.missing {
            println!("      missing: {missing}");
        }
    }

    if let Some(line) = guide.vertical_line {
        println!();
        println!(
            "Vertical line: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
            line.start.x, line.start.y, line.start.z, line.end.x, line.end.y, line.end.z
        );
    }

    Ok(())
}
