//! Shared accordion primitives for the component catalog.
//!
//! The crate binds the headless [`accordion_core`] state machine to Leptos: [`Accordion`] owns
//! the controller and drains reducer effects, [`AccordionSection`] registers itself on mount,
//! deregisters on cleanup, and renders its open/closed state through the stable `data-ui-*` DOM
//! contract consumed by the shell CSS layers.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod accordion;

pub use accordion::{use_accordion, Accordion, AccordionContext, AccordionSection};

/// Convenience imports for application crates consuming the accordion primitives.
pub mod prelude {
    pub use crate::{use_accordion, Accordion, AccordionContext, AccordionSection};
    pub use accordion_core::{DomPosition, OpenNames, OpenPolicy, SectionId};
}
