//! Accordion controller: owns the registry and routes mount, select, and unmount events into the
//! active open policy.

use serde::{Deserialize, Serialize};

use crate::config::{AccordionConfig, AccordionSnapshot, ACCORDION_SNAPSHOT_SCHEMA_VERSION};
use crate::model::{DomPosition, MountRequest, OpenNames, OpenPolicy, Section, SectionId};
use crate::registry::{AccordionError, SectionRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Header focus movement requested by keyboard navigation.
pub enum FocusMove {
    /// Following section in document order, wrapping to the first.
    Next,
    /// Preceding section in document order, wrapping to the last.
    Previous,
    /// First section in document order.
    First,
    /// Last section in document order.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of registering a section.
pub struct MountOutcome {
    /// Id under which the section was registered.
    pub section_id: SectionId,
    /// Whether the open set changed as part of the mount.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Sole owner of the sections of one accordion widget.
///
/// Every mutating call reports whether the open set changed so the caller can re-render and emit
/// a toggle notification.
pub struct AccordionController {
    registry: SectionRegistry,
    policy: OpenPolicy,
    open_names: Option<OpenNames>,
    next_section_id: u64,
    next_registration: u64,
    has_mounted: bool,
}

impl Default for AccordionController {
    fn default() -> Self {
        Self::new(OpenPolicy::default())
    }
}

impl AccordionController {
    pub fn new(policy: OpenPolicy) -> Self {
        Self {
            registry: SectionRegistry::new(),
            policy,
            open_names: None,
            next_section_id: 1,
            next_registration: 0,
            has_mounted: false,
        }
    }

    /// Configures names to open as sections mount.
    pub fn with_open_names(mut self, names: impl Into<OpenNames>) -> Self {
        self.open_names = Some(names.into());
        self
    }

    pub fn from_config(config: &AccordionConfig) -> Self {
        Self {
            open_names: config.active_section_name.clone(),
            ..Self::new(config.policy())
        }
    }

    pub fn policy(&self) -> OpenPolicy {
        self.policy
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.registry.get_by_id(id)
    }

    /// Whether section `id` is open. Unknown ids read as closed.
    pub fn is_open(&self, id: SectionId) -> bool {
        self.registry.get_by_id(id).map(|s| s.is_open).unwrap_or(false)
    }

    /// Names of open sections in document order.
    pub fn open_section_names(&self) -> Vec<String> {
        self.registry.open_names()
    }

    /// Open names shaped by the active policy: a single name under [`OpenPolicy::Single`], a
    /// list under [`OpenPolicy::Multiple`], `None` when nothing is open.
    pub fn active_section_names(&self) -> Option<OpenNames> {
        let mut names = self.registry.open_names();
        if names.is_empty() {
            return None;
        }
        match self.policy {
            OpenPolicy::Single => Some(OpenNames::One(names.swap_remove(0))),
            OpenPolicy::Multiple => Some(OpenNames::Many(names)),
        }
    }

    /// Registers a mounted panel.
    ///
    /// Configured open names are applied on every mount until the user selects a section. Without
    /// configured names the very first mount asks the policy to open its default section.
    ///
    /// # Errors
    ///
    /// Returns [`AccordionError::DuplicateSection`] when the request carries an id that is
    /// already registered.
    pub fn register(&mut self, request: MountRequest) -> Result<MountOutcome, AccordionError> {
        let section_id = match request.id {
            Some(id) if self.registry.contains(id) => {
                return Err(AccordionError::DuplicateSection(id));
            }
            Some(id) => id,
            None => self.allocate_section_id(),
        };
        let label = request.label.unwrap_or_else(|| request.name.clone());
        self.registry.insert(Section {
            id: section_id,
            name: request.name,
            label,
            position: request.position,
            is_open: false,
            registered_at: self.next_registration,
        })?;
        self.next_registration = self.next_registration.saturating_add(1);

        let first_mount = !self.has_mounted;
        self.has_mounted = true;

        let changed = match &self.open_names {
            Some(names) => self.policy.open_by_name(&mut self.registry, names),
            None if first_mount => self.policy.open_first(&mut self.registry),
            None => false,
        };
        Ok(MountOutcome {
            section_id,
            changed,
        })
    }

    /// Removes a panel, giving the policy a chance to open a replacement first.
    ///
    /// Returns `true` when the policy signalled a compensating transition. Unknown ids are
    /// ignored.
    pub fn deregister(&mut self, id: SectionId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        let compensated = self.policy.handle_deregister(&mut self.registry, id);
        self.registry.remove(id);
        compensated
    }

    /// Applies a header click.
    pub fn select(&mut self, id: SectionId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        // An explicit choice supersedes the configured names for later mounts.
        self.open_names = None;
        self.policy.handle_select(&mut self.registry, id)
    }

    /// Replaces the configured open names and applies them immediately.
    pub fn set_open_names(&mut self, names: impl Into<OpenNames>) -> bool {
        let names = names.into();
        let changed = self.policy.open_by_name(&mut self.registry, &names);
        self.open_names = Some(names);
        changed
    }

    /// Switches policy for subsequent operations.
    ///
    /// Sections left open under [`OpenPolicy::Multiple`] stay open after switching to
    /// [`OpenPolicy::Single`]; callers that need the single-open invariant restored must
    /// select or set names afterwards.
    pub fn set_policy(&mut self, policy: OpenPolicy) {
        self.policy = policy;
    }

    /// Moves a section to a new document position. Returns `false` for unknown ids.
    pub fn reposition(&mut self, id: SectionId, position: DomPosition) -> bool {
        self.registry.set_position(id, position)
    }

    /// Resolves the section whose header should receive focus.
    ///
    /// Without a starting section, [`FocusMove::Next`] lands on the first section and
    /// [`FocusMove::Previous`] on the last.
    pub fn focus_target(&self, from: Option<SectionId>, motion: FocusMove) -> Option<SectionId> {
        let target = match (motion, from) {
            (FocusMove::Next, Some(from)) => self.registry.next_section_from(from, false),
            (FocusMove::Previous, Some(from)) => self.registry.next_section_from(from, true),
            (FocusMove::First, _) | (FocusMove::Next, None) => self.registry.first_in_order(),
            (FocusMove::Last, _) | (FocusMove::Previous, None) => self.registry.last_in_order(),
        };
        target.map(|s| s.id)
    }

    pub fn snapshot(&self) -> AccordionSnapshot {
        AccordionSnapshot {
            schema_version: ACCORDION_SNAPSHOT_SCHEMA_VERSION,
            policy: self.policy,
            open_sections: self.open_section_names(),
        }
    }

    /// Restores policy and open names from a snapshot.
    pub fn restore(&mut self, snapshot: AccordionSnapshot) -> bool {
        self.set_policy(snapshot.policy);
        self.set_open_names(OpenNames::Many(snapshot.open_sections))
    }

    fn allocate_section_id(&mut self) -> SectionId {
        loop {
            let id = SectionId(self.next_section_id);
            self.next_section_id = self.next_section_id.saturating_add(1);
            if !self.registry.contains(id) {
                return id;
            }
        }
    }
}
