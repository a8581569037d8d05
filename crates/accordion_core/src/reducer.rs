//! Reducer actions, side-effect intents, and transition logic for one accordion widget.

use crate::config::AccordionSnapshot;
use crate::controller::{AccordionController, FocusMove};
use crate::model::{DomPosition, MountRequest, OpenNames, OpenPolicy, SectionId};
use crate::registry::AccordionError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_accordion`] to mutate an [`AccordionController`].
pub enum AccordionAction {
    /// Register a newly mounted section.
    Mount(MountRequest),
    /// Remove a section that is unmounting.
    Unmount {
        /// Section being removed.
        section_id: SectionId,
    },
    /// Header click on a section.
    Select {
        /// Section whose header was clicked.
        section_id: SectionId,
    },
    /// Replace the configured open names and apply them.
    SetOpenNames {
        /// Name or ordered names to open.
        names: OpenNames,
    },
    /// Switch between single- and multiple-open behavior.
    SetPolicy {
        /// Policy for subsequent operations.
        policy: OpenPolicy,
    },
    /// Record a new document position for a rearranged section.
    Reposition {
        /// Section that moved.
        section_id: SectionId,
        /// New document-order key.
        position: DomPosition,
    },
    /// Move header focus in response to keyboard navigation.
    Focus {
        /// Section whose header currently has focus, if any.
        from: Option<SectionId>,
        /// Requested movement.
        motion: FocusMove,
    },
    /// Restore policy and open sections from a persisted snapshot.
    Restore {
        /// Snapshot payload to restore.
        snapshot: AccordionSnapshot,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_accordion`] for the rendering layer to execute.
pub enum AccordionEffect {
    /// The open set changed; notify listeners with the open section names in document order.
    ///
    /// Unmounting an open section under [`OpenPolicy::Multiple`] emits no toggle, so listeners
    /// must not treat the last list as authoritative after sections unmount. Read
    /// [`AccordionController::open_section_names`] instead.
    SectionToggle {
        /// Names of open sections after the transition.
        open_sections: Vec<String>,
    },
    /// Move keyboard focus to a section header.
    FocusSection(SectionId),
}

/// Applies an [`AccordionAction`] to the controller and collects resulting side effects.
///
/// Actions naming sections that are no longer registered are accepted and produce no effects,
/// since stale events are expected while panels unmount.
///
/// # Errors
///
/// Returns [`AccordionError::DuplicateSection`] when a mount reuses a registered id.
pub fn reduce_accordion(
    controller: &mut AccordionController,
    action: AccordionAction,
) -> Result<Vec<AccordionEffect>, AccordionError> {
    let mut effects = Vec::new();
    let changed = match action {
        AccordionAction::Mount(request) => controller.register(request)?.changed,
        AccordionAction::Unmount { section_id } => controller.deregister(section_id),
        AccordionAction::Select { section_id } => controller.select(section_id),
        AccordionAction::SetOpenNames { names } => controller.set_open_names(names),
        AccordionAction::SetPolicy { policy } => {
            controller.set_policy(policy);
            false
        }
        AccordionAction::Reposition {
            section_id,
            position,
        } => {
            controller.reposition(section_id, position);
            false
        }
        AccordionAction::Focus { from, motion } => {
            if let Some(target) = controller.focus_target(from, motion) {
                effects.push(AccordionEffect::FocusSection(target));
            }
            false
        }
        AccordionAction::Restore { snapshot } => controller.restore(snapshot),
    };

    if changed {
        effects.push(AccordionEffect::SectionToggle {
            open_sections: controller.open_section_names(),
        });
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mount(controller: &mut AccordionController, name: &str, position: u32) -> SectionId {
        let id = SectionId(u64::from(position) + 100);
        reduce_accordion(
            controller,
            AccordionAction::Mount(
                MountRequest::new(name, DomPosition::at(position)).with_id(id),
            ),
        )
        .expect("mount section");
        id
    }

    fn toggle(names: &[&str]) -> AccordionEffect {
        AccordionEffect::SectionToggle {
            open_sections: names.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[test]
    fn first_mount_emits_toggle_and_later_mounts_are_quiet() {
        let mut controller = AccordionController::new(OpenPolicy::Single);

        let first = reduce_accordion(
            &mut controller,
            AccordionAction::Mount(MountRequest::new("one", DomPosition::at(0))),
        )
        .expect("first mount");
        let second = reduce_accordion(
            &mut controller,
            AccordionAction::Mount(MountRequest::new("two", DomPosition::at(1))),
        )
        .expect("second mount");

        assert_eq!(first, vec![toggle(&["one"])]);
        assert!(second.is_empty());
    }

    #[test]
    fn select_emits_toggle_only_when_open_set_changes() {
        let mut controller = AccordionController::new(OpenPolicy::Single);
        mount(&mut controller, "one", 0);
        let two = mount(&mut controller, "two", 1);

        let effects = reduce_accordion(
            &mut controller,
            AccordionAction::Select { section_id: two },
        )
        .expect("select two");
        let repeat = reduce_accordion(
            &mut controller,
            AccordionAction::Select { section_id: two },
        )
        .expect("reselect two");

        assert_eq!(effects, vec![toggle(&["two"])]);
        assert!(repeat.is_empty());
    }

    #[test]
    fn stale_section_events_are_accepted_without_effects() {
        let mut controller = AccordionController::new(OpenPolicy::Single);
        mount(&mut controller, "one", 0);

        for action in [
            AccordionAction::Select {
                section_id: SectionId(9),
            },
            AccordionAction::Unmount {
                section_id: SectionId(9),
            },
            AccordionAction::Reposition {
                section_id: SectionId(9),
                position: DomPosition::at(3),
            },
        ] {
            let effects = reduce_accordion(&mut controller, action).expect("stale event");
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn unmounting_open_section_reports_compensating_open() {
        let mut controller = AccordionController::new(OpenPolicy::Single);
        let a = mount(&mut controller, "a", 0);
        mount(&mut controller, "b", 1);

        let effects = reduce_accordion(&mut controller, AccordionAction::Unmount { section_id: a })
            .expect("unmount a");

        assert_eq!(effects, vec![toggle(&["b"])]);
    }

    #[test]
    fn unmounting_open_section_under_multiple_policy_emits_no_toggle() {
        let mut controller = AccordionController::new(OpenPolicy::Multiple);
        let a = mount(&mut controller, "a", 0);
        let b = mount(&mut controller, "b", 1);
        controller.select(a);
        controller.select(b);

        let effects = reduce_accordion(&mut controller, AccordionAction::Unmount { section_id: a })
            .expect("unmount a");

        assert!(effects.is_empty());
        assert_eq!(controller.open_section_names(), vec!["b".to_string()]);
    }

    #[test]
    fn duplicate_mount_surfaces_error() {
        let mut controller = AccordionController::default();
        mount(&mut controller, "a", 0);

        let err = reduce_accordion(
            &mut controller,
            AccordionAction::Mount(
                MountRequest::new("again", DomPosition::at(5)).with_id(SectionId(100)),
            ),
        )
        .expect_err("duplicate id");

        assert_eq!(err, AccordionError::DuplicateSection(SectionId(100)));
    }

    #[test]
    fn multiple_policy_set_open_names_replaces_open_set() {
        let mut controller = AccordionController::new(OpenPolicy::Multiple);
        mount(&mut controller, "a", 0);
        mount(&mut controller, "b", 1);

        let both = reduce_accordion(
            &mut controller,
            AccordionAction::SetOpenNames {
                names: OpenNames::from(&["a", "b"][..]),
            },
        )
        .expect("open both");
        let only_a = reduce_accordion(
            &mut controller,
            AccordionAction::SetOpenNames {
                names: OpenNames::from(&["a"][..]),
            },
        )
        .expect("open a");

        assert_eq!(both, vec![toggle(&["a", "b"])]);
        assert_eq!(only_a, vec![toggle(&["a"])]);
    }

    #[test]
    fn focus_action_emits_focus_effect_with_wraparound() {
        let mut controller = AccordionController::new(OpenPolicy::Multiple);
        let a = mount(&mut controller, "a", 0);
        let b = mount(&mut controller, "b", 1);

        let effects = reduce_accordion(
            &mut controller,
            AccordionAction::Focus {
                from: Some(b),
                motion: FocusMove::Next,
            },
        )
        .expect("focus next");

        assert_eq!(effects, vec![AccordionEffect::FocusSection(a)]);
    }

    #[test]
    fn set_policy_emits_nothing_and_keeps_open_sections() {
        let mut controller = AccordionController::new(OpenPolicy::Multiple);
        let a = mount(&mut controller, "a", 0);
        let b = mount(&mut controller, "b", 1);
        controller.select(a);
        controller.select(b);

        let effects = reduce_accordion(
            &mut controller,
            AccordionAction::SetPolicy {
                policy: OpenPolicy::Single,
            },
        )
        .expect("switch policy");

        assert!(effects.is_empty());
        assert_eq!(
            controller.open_section_names(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn restore_action_reopens_snapshot_sections() {
        let mut controller = AccordionController::new(OpenPolicy::Multiple);
        mount(&mut controller, "a", 0);
        mount(&mut controller, "b", 1);
        let snapshot = AccordionSnapshot {
            schema_version: crate::config::ACCORDION_SNAPSHOT_SCHEMA_VERSION,
            policy: OpenPolicy::Multiple,
            open_sections: vec!["b".to_string()],
        };

        let effects = reduce_accordion(&mut controller, AccordionAction::Restore { snapshot })
            .expect("restore");

        assert_eq!(effects, vec![toggle(&["b"])]);
    }
}
