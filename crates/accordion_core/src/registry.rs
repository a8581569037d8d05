//! Live section set with identity/name lookup and a derived document-order view.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DomPosition, Section, SectionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Caller-misuse failures surfaced by the accordion core.
pub enum AccordionError {
    /// A section with this id is already registered.
    #[error("section {0} is already registered")]
    DuplicateSection(SectionId),
    /// Accordion configuration payload could not be parsed.
    #[error("invalid accordion config: {0}")]
    InvalidConfig(String),
}

/// Registered sections in registration order.
///
/// The registry owns lookup and ordering only; open/closed semantics belong to
/// [`crate::policy`]. Section counts are bounded by UI layout, so every query is a linear scan and
/// the sorted view is recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `section`.
    ///
    /// # Errors
    ///
    /// Returns [`AccordionError::DuplicateSection`] when the id is already registered.
    pub fn insert(&mut self, section: Section) -> Result<(), AccordionError> {
        if self.contains(section.id) {
            return Err(AccordionError::DuplicateSection(section.id));
        }
        self.sections.push(section);
        Ok(())
    }

    pub fn remove(&mut self, id: SectionId) -> Option<Section> {
        let index = self.sections.iter().position(|s| s.id == id)?;
        Some(self.sections.remove(index))
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    pub fn get_by_id(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn get_by_id_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// First section registered under `name`. Duplicate names are allowed; the earliest
    /// registration wins.
    pub fn get_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Updates the ordering key of a rearranged section. Returns `false` for unknown ids.
    pub fn set_position(&mut self, id: SectionId, position: DomPosition) -> bool {
        match self.get_by_id_mut(id) {
            Some(section) => {
                section.position = position;
                true
            }
            None => false,
        }
    }

    /// All sections in document order, ties broken by registration order.
    pub fn sorted_view(&self) -> Vec<&Section> {
        let mut view: Vec<&Section> = self.sections.iter().collect();
        view.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.registered_at.cmp(&b.registered_at))
        });
        view
    }

    /// Section adjacent to `id` in document order, wrapping at both ends.
    ///
    /// Returns `None` when `id` is not registered. A lone section wraps onto itself.
    pub fn next_section_from(&self, id: SectionId, reverse: bool) -> Option<&Section> {
        let view = self.sorted_view();
        let index = view.iter().position(|s| s.id == id)?;
        let len = view.len();
        let next = if reverse {
            (index + len - 1) % len
        } else {
            (index + 1) % len
        };
        view.get(next).copied()
    }

    pub fn first_in_order(&self) -> Option<&Section> {
        self.sorted_view().first().copied()
    }

    pub fn last_in_order(&self) -> Option<&Section> {
        self.sorted_view().last().copied()
    }

    /// Names of open sections in document order.
    pub fn open_names(&self) -> Vec<String> {
        self.sorted_view()
            .into_iter()
            .filter(|s| s.is_open)
            .map(|s| s.name.clone())
            .collect()
    }

    pub(crate) fn open_flags(&self) -> Vec<(SectionId, bool)> {
        self.sections.iter().map(|s| (s.id, s.is_open)).collect()
    }
}
