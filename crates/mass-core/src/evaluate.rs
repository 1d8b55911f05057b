//! Evaluate a mass node against a transform source.

use centermass_model::{MassNode, TransformSource};
use glam::DVec3;
use serde::Serialize;

use crate::centroid::{aggregate, local_center, MassSample};

/// What one section fed into the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionContribution {
    pub section: String,
    pub slot: usize,
    pub mass: f64,
    /// Mean of the live influence positions.
    pub center: DVec3,
    /// Influences that resolved to a position.
    pub influences: usize,
    /// Influences whose transform is no longer in the source.
    pub missing: Vec<String>,
}

/// Result of evaluating a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// The blended center of mass.
    pub center: DVec3,

    /// Contributing sections in slot order.
    pub contributions: Vec<SectionContribution>,
}

impl Evaluation {
    /// Each contribution's mass as a share of the total contributing mass.
    pub fn mass_shares(&self) -> Vec<(String, f64)> {
        let total: f64 = self.contributions.iter().map(|c| c.mass).sum();
        self.contributions
            .iter()
            .map(|c| {
                let share = if total > 0.0 { c.mass / total } else { 0.0 };
                (c.section.clone(), share)
            })
            .collect()
    }
}

/// Compute the center of mass of `node`.
///
/// Returns `None` when the node has calculation switched off. Sections with
/// non-positive mass or excluded from the calculation are skipped. A
/// section whose influences are all gone still contributes at the origin.
pub fn evaluate<S>(node: &MassNode, source: &S) -> Option<Evaluation>
where
    S: TransformSource + ?Sized,
{
    if !node.settings.calculate {
        tracing::debug!(node = node.name(), "Calculation disabled; skipping");
        return None;
    }

    let mut contributions = Vec::new();

    for (slot, section) in node.sections() {
        if !section.contributes() {
            tracing::trace!(
                node = node.name(),
                section = %section.name,
                mass = section.mass,
                considered = section.considered,
                "Section excluded"
            );
            continue;
        }

        let mut positions = Vec::with_capacity(section.influences.len());
        let mut missing = Vec::new();
        for influence in section.influences.values() {
            match source.position(influence) {
                Some(p) => positions.push(p),
                None => missing.push(influence.clone()),
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                node = node.name(),
                section = %section.name,
                missing = ?missing,
                "Influences missing from scene"
            );
        }

        contributions.push(SectionContribution {
            section: section.name.clone(),
            slot,
            mass: section.mass,
            center: local_center(&positions),
            influences: positions.len(),
            missing,
        });
    }

    let samples: Vec<MassSample> = contributions
        .iter()
        .map(|c| MassSample::new(c.mass, c.center))
        .collect();
    let center = aggregate(&samples);

    tracing::debug!(
        node = node.name(),
        sections = contributions.len(),
        x = center.x,
        y = center.y,
        z = center.z,
        "Evaluated center of mass"
    );

    Some(Evaluation {
        center,
        contributions,
    })
}
