//! Plain data types shared by the registry, the open policies, and the controller.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Process-unique section identity, stable for the lifetime of a mounted panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub u64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document-order key: the child index of the panel at each level of the surrounding tree.
///
/// Lexicographic comparison of two paths matches their order in the document, with an ancestor
/// sorting before its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DomPosition(pub Vec<u32>);

impl DomPosition {
    /// Position of a direct child at `index` under the accordion root.
    pub fn at(index: u32) -> Self {
        Self(vec![index])
    }

    /// Position of a child at `index` below `self`.
    pub fn child(&self, index: u32) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }
}

impl PartialOrd for DomPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DomPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// A single collapsible panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub label: String,
    pub position: DomPosition,
    pub is_open: bool,
    pub registered_at: u64,
}

/// Rule set governing how many sections may be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenPolicy {
    /// At most one section is open at any time.
    #[default]
    Single,
    /// Any subset of sections may be open.
    Multiple,
}

impl OpenPolicy {
    /// Maps the `allowMultipleSectionsOpen` flag onto a policy.
    pub fn from_allow_multiple(allow_multiple: bool) -> Self {
        if allow_multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    /// Whether this policy lets more than one section be open.
    pub fn allows_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

/// One section name or an ordered list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenNames {
    /// A single name.
    One(String),
    /// An ordered list of names.
    Many(Vec<String>),
}

impl OpenNames {
    /// First name, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(name) => Some(name.as_str()),
            Self::Many(names) => names.first().map(String::as_str),
        }
    }

    /// All names in order; a single name becomes a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name.clone()],
            Self::Many(names) => names.clone(),
        }
    }
}

impl From<&str> for OpenNames {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for OpenNames {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for OpenNames {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<&[&str]> for OpenNames {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Registration payload raised when a panel mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRequest {
    pub id: Option<SectionId>,
    pub name: String,
    pub label: Option<String>,
    pub position: DomPosition,
}

impl MountRequest {
    /// Request with a controller-allocated id and the name doubling as the header label.
    pub fn new(name: impl Into<String>, position: DomPosition) -> Self {
        Self {
            id: None,
            name: name.into(),
            label: None,
            position,
        }
    }

    pub fn with_id(mut self, id: SectionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
