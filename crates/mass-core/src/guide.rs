//! Display geometry for a center of mass.
//!
//! Nothing here draws. A viewport integration reads a [`Guide`] and renders
//! whichever pieces the node's settings enabled.

use centermass_model::{NodeSettings, UpAxis};
use glam::DVec3;
use serde::Serialize;

use crate::evaluate::Evaluation;

/// A line segment with an optional emphasis weight in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideLine {
    pub start: DVec3,
    pub end: DVec3,
    pub weight: f64,
}

/// Sphere marking the center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideSphere {
    pub center: DVec3,
    pub radius: f64,
}

/// Everything a viewport needs to visualise one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub center: DVec3,
    pub sphere: Option<GuideSphere>,
    /// From the ground projection up to twice the center's height.
    pub vertical_line: Option<GuideLine>,
    /// Section center to center of mass, weighted by mass share.
    pub debug_lines: Vec<GuideLine>,
}

impl Guide {
    pub fn build(settings: &NodeSettings, evaluation: &Evaluation, up: UpAxis) -> Self {
        let center = evaluation.center;

        let sphere = settings.draw_sphere.then_some(GuideSphere {
            center,
            radius: settings.sphere_size,
        });

        let vertical_line = settings.draw_vertical_line.then(|| {
            let height = up.component(center);
            GuideLine {
                start: up.with_component(center, 0.0),
                end: up.with_component(center, height * 2.0),
                weight: 1.0,
            }
        });

        let debug_lines = if settings.draw_debugging_lines {
            evaluation
                .contributions
                .iter()
                .zip(evaluation.mass_shares())
                .map(|(c, (_, share))| GuideLine {
                    start: c.center,
                    end: center,
                    weight: share,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            center,
            sphere,
            vertical_line,
            debug_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::SectionContribution;

    fn evaluation() -> Evaluation {
        let contribution = |name: &str, mass: f64, center: DVec3| SectionContribution {
            section: name.to_string(),
            slot: 0,
            mass,
            center,
            influences: 1,
            missing: vec![],
        };
        Evaluation {
            center: DVec3::new(1.0, 50.0, 2.0),
            contributions: vec![
                contribution("torso", 3.0, DVec3::new(0.0, 60.0, 0.0)),
                contribution("legs", 1.0, DVec3::new(4.0, 20.0, 8.0)),
            ],
        }
    }

    #[test]
    fn test_vertical_line_y_up() {
        let guide = Guide::build(&NodeSettings::default(), &evaluation(), UpAxis::Y);
        let line = guide.vertical_line.unwrap();
        assert_eq!(line.start, DVec3::new(1.0, 0.0, 2.0));
        assert_eq!(line.end, DVec3::new(1.0, 100.0, 2.0));
    }

    #[test]
    fn test_vertical_line_z_up() {
        let guide = Guide::build(&NodeSettings::default(), &evaluation(), UpAxis::Z);
        let line = guide.vertical_line.unwrap();
        assert_eq!(line.start, DVec3::new(1.0, 50.0, 0.0));
        assert_eq!(line.end, DVec3::new(1.0, 50.0, 4.0));
    }

    #[test]
    fn test_sphere_uses_size() {
        let settings = NodeSettings {
            sphere_size: 3.5,
            ..NodeSettings::default()
        };
        let guide = Guide::build(&settings, &evaluation(), UpAxis::Y);
        assert_eq!(
            guide.sphere,
            Some(GuideSphere {
                center: DVec3::new(1.0, 50.0, 2.0),
                radius: 3.5
            })
        );
    }

    #[test]
    fn test_debug_lines_weighted_by_share() {
        let guide = Guide::build(&NodeSettings::default(), &evaluation(), UpAxis::Y);
        assert_eq!(guide.debug_lines.len(), 2);
        assert_eq!(guide.debug_lines[0].weight, 0.75);
        assert_eq!(guide.debug_lines[1].weight, 0.25);
        assert_eq!(guide.debug_lines[1].end, guide.center);
    }

    #[test]
    fn test_disabled_pieces_are_absent() {
        let settings = NodeSettings {
            draw_sphere: false,
            draw_vertical_line: false,
            draw_debugging_lines: false,
            ..NodeSettings::default()
        };
        let guide = Guide::build(&settings, &evaluation(), UpAxis::Y);
        assert!(guide.sphere.is_none());
        assert!(guide.vertical_line.is_none());
        assert!(guide.debug_lines.is_empty());

        let json = serde_json::to_value(&guide).unwrap();
        assert_eq!(json["center"], serde_json::json!([1.0, 50.0, 2.0]));
    }
}
