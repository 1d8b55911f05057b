//! Centermass Core
//!
//! Turns mass nodes into a single world-space point:
//! - **Centroid:** Local section centers and the mass-ordered lerp aggregate
//! - **Evaluate:** Gather live influence positions from a transform source
//! - **Guide:** Sphere, ground line, and debug segment geometry for display
//!
//! This crate is pure computation: no I/O and no host dependencies.
//! All inputs are data; all outputs are data.

pub mod centroid;
pub mod evaluate;
pub mod guide;

pub use centroid::{aggregate, local_center, MassSample};
pub use evaluate::{evaluate, Evaluation, SectionContribution};
pub use guide::{Guide, GuideLine, GuideSphere};
