//! Show or change node settings.

use std::path::PathBuf;

use super::Session;

/// Requested setting changes; `None` leaves a value alone.
#[derive(Debug, Default)]
pub struct SettingsChange {
    pub calculate: Option<bool>,
    pub draw_sphere: Option<bool>,
    pub draw_vertical_line: Option<bool>,
    pub draw_debugging_lines: Option<bool>,
    pub sphere_size: Option<f64>,
}

impl SettingsChange {
    fn is_empty(&self) -> bool {
        self.calculate.is_none()
            && self.draw_sphere.is_none()
            && self.draw_vertical_line.is_none()
            && self.draw_debugging_lines.is_none()
            && self.sphere_size.is_none()
    }
}

pub fn run(path: PathBuf, change: SettingsChange) -> anyhow::Result<()> {
    let mut session = Session::open(&path)?;

    if !change.is_empty() {
        if let Some(size) = change.sphere_size {
            if size < 0.0 {
                anyhow::bail!("Sphere size cannot be negative (got {size})");
            }
        }

        let settings = session
            .registry
            .settings_mut(session.node)
            .ok_or_else(|| anyhow::anyhow!("Document did not produce a node"))?;
        if let Some(v) = change.calculate {
            settings.calculate = v;
        }
        if let Some(v) = change.draw_sphere {
            settings.draw_sphere = v;
        }
        if let Some(v) = change.draw_vertical_line {
            settings.draw_vertical_line = v;
        }
        if let Some(v) = change.draw_debugging_lines {
            settings.draw_debugging_lines = v;
        }
        if let Some(v) = change.sphere_size {
            settings.sphere_size = v;
        }
        session.save()?;
        tracing::info!(path = %path.display(), "Updated settings");
    }

    let settings = session
        .registry
        .settings(session.node)
        .ok_or_else(|| anyhow::anyhow!("Document did not produce a node"))?;
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
