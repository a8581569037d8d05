//! Accordion configuration and persisted open-state snapshots.

use serde::{Deserialize, Serialize};

use crate::model::{OpenNames, OpenPolicy};
use crate::registry::AccordionError;

pub const ACCORDION_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Construction-time accordion configuration.
///
/// Deserializes from `{"allowMultipleSectionsOpen": bool, "activeSectionName": "a" | ["a", "b"]}`
/// with both keys optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionConfig {
    pub allow_multiple_sections_open: bool,
    pub active_section_name: Option<OpenNames>,
}

impl AccordionConfig {
    /// Parses a JSON configuration payload.
    ///
    /// # Errors
    ///
    /// Returns [`AccordionError::InvalidConfig`] when the payload is not valid configuration JSON.
    pub fn from_json(raw: &str) -> Result<Self, AccordionError> {
        serde_json::from_str(raw).map_err(|err| AccordionError::InvalidConfig(err.to_string()))
    }

    pub fn policy(&self) -> OpenPolicy {
        OpenPolicy::from_allow_multiple(self.allow_multiple_sections_open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionSnapshot {
    #[serde(default = "snapshot_schema_version")]
    pub schema_version: u32,
    pub policy: OpenPolicy,
    pub open_sections: Vec<String>,
}

fn snapshot_schema_version() -> u32 {
    ACCORDION_SNAPSHOT_SCHEMA_VERSION
}
