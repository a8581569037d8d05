//! Headless accordion section-management core.
//!
//! The crate tracks which panels of a collapsible list are open, enforces the single-open or
//! multiple-open policy, keeps panels ordered by document position, and reacts to panels being
//! mounted, removed, or rearranged at runtime. Rendering is left to the caller: every mutating
//! call reports whether the open set changed, and each [`Section`] exposes its `is_open` flag.

pub mod config;
pub mod controller;
pub mod model;
pub mod policy;
pub mod reducer;
pub mod registry;

pub use config::{AccordionConfig, AccordionSnapshot, ACCORDION_SNAPSHOT_SCHEMA_VERSION};
pub use controller::{AccordionController, FocusMove, MountOutcome};
pub use model::*;
pub use reducer::{reduce_accordion, AccordionAction, AccordionEffect};
pub use registry::{AccordionError, SectionRegistry};
