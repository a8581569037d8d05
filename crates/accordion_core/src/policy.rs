//! Open-policy strategies: how selection, name-based opening, and removal affect openness.
//!
//! Both policies share one contract and operate on a [`SectionRegistry`] without holding any
//! section state themselves. Every operation returns whether any section's `is_open` flag differs
//! from its value before the call, except [`OpenPolicy::handle_deregister`], whose result tells
//! the controller that a compensating transition took place.

use std::collections::HashSet;

use crate::model::{OpenNames, OpenPolicy, SectionId};
use crate::registry::SectionRegistry;

impl OpenPolicy {
    /// Opens the first section in document order.
    ///
    /// Under [`OpenPolicy::Multiple`] there is no default-open behavior and this always returns
    /// `false`.
    pub fn open_first(self, registry: &mut SectionRegistry) -> bool {
        match self {
            Self::Single => {
                let Some(first) = registry.first_in_order().map(|s| s.id) else {
                    return false;
                };
                open_exclusive(registry, first)
            }
            Self::Multiple => false,
        }
    }

    /// Opens sections by name.
    ///
    /// [`OpenPolicy::Single`] only honors the first name and closes every other section.
    /// [`OpenPolicy::Multiple`] replaces the open set with exactly the resolvable names;
    /// unknown names are ignored.
    pub fn open_by_name(self, registry: &mut SectionRegistry, names: &OpenNames) -> bool {
        match self {
            Self::Single => {
                let target = names
                    .first()
                    .and_then(|name| registry.get_by_name(name))
                    .map(|s| s.id);
                match target {
                    Some(target) => open_exclusive(registry, target),
                    None => false,
                }
            }
            Self::Multiple => {
                let targets: HashSet<SectionId> = names
                    .to_vec()
                    .iter()
                    .filter_map(|name| registry.get_by_name(name))
                    .map(|s| s.id)
                    .collect();
                let before = registry.open_flags();
                for section in registry.iter_mut() {
                    section.is_open = targets.contains(&section.id);
                }
                registry.open_flags() != before
            }
        }
    }

    /// Applies a header click on section `id`.
    ///
    /// Selecting the already-open section under [`OpenPolicy::Single`] keeps it open and reports
    /// no change. Under [`OpenPolicy::Multiple`] the section toggles independently.
    pub fn handle_select(self, registry: &mut SectionRegistry, id: SectionId) -> bool {
        match self {
            Self::Single => {
                if !registry.contains(id) {
                    return false;
                }
                open_exclusive(registry, id)
            }
            Self::Multiple => match registry.get_by_id_mut(id) {
                Some(section) => {
                    section.is_open = !section.is_open;
                    true
                }
                None => false,
            },
        }
    }

    /// Prepares for the removal of section `id`; must run while the section is still registered.
    ///
    /// Under [`OpenPolicy::Single`], removing the open section opens the next section in
    /// document order (if one other than the departing section exists) and returns `true`.
    /// Removing a closed section, or any section under [`OpenPolicy::Multiple`], returns `false`.
    pub fn handle_deregister(self, registry: &mut SectionRegistry, id: SectionId) -> bool {
        match self {
            Self::Single => {
                let was_open = registry.get_by_id(id).map(|s| s.is_open).unwrap_or(false);
                if !was_open {
                    return false;
                }
                let replacement = registry
                    .next_section_from(id, false)
                    .map(|s| s.id)
                    .filter(|next| *next != id);
                if let Some(section) = replacement.and_then(|next| registry.get_by_id_mut(next)) {
                    section.is_open = true;
                }
                true
            }
            Self::Multiple => false,
        }
    }
}

fn open_exclusive(registry: &mut SectionRegistry, target: SectionId) -> bool {
    let before = registry.open_flags();
    for section in registry.iter_mut() {
        section.is_open = section.id == target;
    }
    registry.open_flags() != before
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DomPosition, Section};

    fn registry(names: &[&str]) -> SectionRegistry {
        let mut registry = SectionRegistry::new();
        for (index, name) in names.iter().enumerate() {
            registry
                .insert(Section {
                    id: SectionId(index as u64 + 1),
                    name: name.to_string(),
                    label: name.to_string(),
                    position: DomPosition::at(index as u32),
                    is_open: false,
                    registered_at: index as u64,
                })
                .expect("insert section");
        }
        registry
    }

    fn id_of(registry: &SectionRegistry, name: &str) -> SectionId {
        registry.get_by_name(name).expect("named section").id
    }

    fn open_count(registry: &SectionRegistry) -> usize {
        registry.iter().filter(|s| s.is_open).count()
    }

    #[test]
    fn single_open_first_opens_leading_section_only() {
        let mut registry = registry(&["one", "two", "three"]);

        assert!(OpenPolicy::Single.open_first(&mut registry));
        assert_eq!(registry.open_names(), vec!["one".to_string()]);
        assert!(!OpenPolicy::Single.open_first(&mut registry));
    }

    #[test]
    fn open_first_on_empty_registry_is_noop() {
        let mut registry = SectionRegistry::new();

        assert!(!OpenPolicy::Single.open_first(&mut registry));
        assert!(!OpenPolicy::Multiple.open_first(&mut registry));
    }

    #[test]
    fn multiple_open_first_never_opens_anything() {
        let mut registry = registry(&["a", "b"]);

        assert!(!OpenPolicy::Multiple.open_first(&mut registry));
        assert_eq!(open_count(&registry), 0);
    }

    #[test]
    fn single_open_by_name_truncates_to_first_name() {
        let mut truncated = registry(&["a", "b", "c"]);
        let mut scalar = registry(&["a", "b", "c"]);

        let list_changed = OpenPolicy::Single.open_by_name(
            &mut truncated,
            &OpenNames::from(&["b", "c"][..]),
        );
        let scalar_changed = OpenPolicy::Single.open_by_name(&mut scalar, &OpenNames::from("b"));

        assert_eq!(list_changed, scalar_changed);
        assert_eq!(truncated, scalar);
        assert_eq!(truncated.open_names(), vec!["b".to_string()]);
    }

    #[test]
    fn single_open_by_unknown_name_changes_nothing() {
        let mut registry = registry(&["a", "b"]);
        OpenPolicy::Single.open_first(&mut registry);

        assert!(!OpenPolicy::Single.open_by_name(&mut registry, &OpenNames::from("zzz")));
        assert!(!OpenPolicy::Single.open_by_name(&mut registry, &OpenNames::Many(Vec::new())));
        assert_eq!(registry.open_names(), vec!["a".to_string()]);
    }

    #[test]
    fn single_select_switches_open_section_and_reselect_is_stable() {
        let mut registry = registry(&["one", "two", "three"]);
        OpenPolicy::Single.open_first(&mut registry);
        let two = id_of(&registry, "two");

        assert!(OpenPolicy::Single.handle_select(&mut registry, two));
        assert_eq!(registry.open_names(), vec!["two".to_string()]);
        assert!(!OpenPolicy::Single.handle_select(&mut registry, two));
        assert_eq!(registry.open_names(), vec!["two".to_string()]);
    }

    #[test]
    fn select_of_unknown_id_reports_no_change() {
        let mut registry = registry(&["a"]);

        assert!(!OpenPolicy::Single.handle_select(&mut registry, SectionId(404)));
        assert!(!OpenPolicy::Multiple.handle_select(&mut registry, SectionId(404)));
    }

    #[test]
    fn single_deregister_of_open_section_opens_next_in_document_order() {
        let mut registry = registry(&["a", "b", "c"]);
        OpenPolicy::Single.open_first(&mut registry);
        let a = id_of(&registry, "a");

        assert!(OpenPolicy::Single.handle_deregister(&mut registry, a));
        registry.remove(a);

        assert_eq!(registry.open_names(), vec!["b".to_string()]);
    }

    #[test]
    fn single_deregister_of_closed_section_keeps_current_open() {
        let mut registry = registry(&["a", "b", "c"]);
        OpenPolicy::Single.open_first(&mut registry);
        let b = id_of(&registry, "b");

        assert!(!OpenPolicy::Single.handle_deregister(&mut registry, b));
        registry.remove(b);

        assert_eq!(registry.open_names(), vec!["a".to_string()]);
    }

    #[test]
    fn single_deregister_of_last_open_section_wraps_to_first() {
        let mut registry = registry(&["a", "b", "c"]);
        let c = id_of(&registry, "c");
        OpenPolicy::Single.handle_select(&mut registry, c);

        assert!(OpenPolicy::Single.handle_deregister(&mut registry, c));
        registry.remove(c);

        assert_eq!(registry.open_names(), vec!["a".to_string()]);
    }

    #[test]
    fn single_deregister_of_lone_open_section_reports_change_without_replacement() {
        let mut registry = registry(&["only"]);
        OpenPolicy::Single.open_first(&mut registry);
        let only = id_of(&registry, "only");

        assert!(OpenPolicy::Single.handle_deregister(&mut registry, only));
        registry.remove(only);

        assert!(registry.is_empty());
    }

    #[test]
    fn multiple_open_by_name_replaces_open_set() {
        let mut registry = registry(&["a", "b"]);
        let both = OpenNames::from(&["a", "b"][..]);

        assert!(OpenPolicy::Multiple.open_by_name(&mut registry, &both));
        assert_eq!(open_count(&registry), 2);
        assert!(OpenPolicy::Multiple.open_by_name(&mut registry, &OpenNames::from(&["a"][..])));
        assert_eq!(registry.open_names(), vec!["a".to_string()]);
    }

    #[test]
    fn multiple_open_by_name_is_idempotent_and_ignores_unknown_names() {
        let mut registry = registry(&["a", "b", "c"]);
        let names = OpenNames::from(&["c", "ghost", "a"][..]);

        assert!(OpenPolicy::Multiple.open_by_name(&mut registry, &names));
        assert!(!OpenPolicy::Multiple.open_by_name(&mut registry, &names));
        assert_eq!(
            registry.open_names(),
            vec!["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn multiple_select_toggles_sections_independently() {
        let mut registry = registry(&["a", "b"]);
        let a = id_of(&registry, "a");
        let b = id_of(&registry, "b");

        assert!(OpenPolicy::Multiple.handle_select(&mut registry, a));
        assert!(OpenPolicy::Multiple.handle_select(&mut registry, b));
        assert_eq!(open_count(&registry), 2);
        assert!(OpenPolicy::Multiple.handle_select(&mut registry, a));
        assert_eq!(registry.open_names(), vec!["b".to_string()]);
    }

    #[test]
    fn multiple_deregister_never_compensates() {
        let mut registry = registry(&["a", "b"]);
        let a = id_of(&registry, "a");
        OpenPolicy::Multiple.handle_select(&mut registry, a);

        assert!(!OpenPolicy::Multiple.handle_deregister(&mut registry, a));
        registry.remove(a);

        assert_eq!(open_count(&registry), 0);
    }
}
