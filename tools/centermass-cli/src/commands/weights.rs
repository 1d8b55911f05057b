//! Show normalized section weights.

use std::path::PathBuf;

use super::Session;

const BAR_WIDTH: f64 = 40.0;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let session = Session::open(&path)?;
    let weights = session.registry.normalized_weights(session.node);

    if weights.is_empty() {
        println!("No sections.");
        return Ok(());
    }

    let width = weights.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (name, share) in &weights {
        let bar = share_bar(*share);
        println!("  {name:<width$}  {share:>6.3}  {bar}");
    }
    Ok(())
}

/// Negative weights can push a share outside `[0, 1]`.
fn share_bar(share: f64) -> String {
    let share = if share.is_finite() { share.clamp(0.0, 1.0) } else { 0.0 };
    "#".repeat((share * BAR_WIDTH).round() as usize)
}
