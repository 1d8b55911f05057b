//! Centermass Model
//!
//! Defines the core data contracts for center-of-mass rigs:
//! - **Node:** A mass node with its draw/calculate settings
//! - **Section:** A named, weighted group of influences stored in sparse slots
//! - **Registry:** Name-based section and influence bookkeeping across nodes
//! - **Scene:** The transform source influences are resolved against
//! - **Document:** The `.mass` JSON persistence format
//!
//! Sections and influences are addressed by name at the API surface; the
//! sparse slot indices underneath are stable for the life of a node.

pub mod defaults;
pub mod document;
pub mod node;
pub mod registry;
pub mod scene;
pub mod section;
pub mod slots;

pub use defaults::*;
pub use document::*;
pub use node::*;
pub use registry::*;
pub use scene::*;
pub use section::*;
pub use slots::*;

pub use glam::{DMat4, DVec3};
