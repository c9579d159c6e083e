use ordo_util::errors::{OrdoError, OrdoResult};
use serde::{Deserialize, Serialize};

use crate::priority::MissingPriority;

/// Options that configure a sort.
///
/// Deserializes from TOML such as:
///
/// ```toml
/// missing-priority = "first"
/// max-steps = 100000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortOptions {
    /// Where nodes without a priority key land among ready nodes.
    #[serde(default, rename = "missing-priority")]
    pub missing_priority: MissingPriority,

    /// Ceiling on placed nodes plus consumed edges. `None` means unbounded.
    #[serde(default, rename = "max-steps")]
    pub max_steps: Option<u64>,
}

impl SortOptions {
    /// Parse options from a TOML document held in memory.
    pub fn from_toml_str(content: &str) -> OrdoResult<Self> {
        toml::from_str(content).map_err(|e| {
            OrdoError::Options {
                message: format!("Failed to parse sort options: {e}"),
            }
            .into()
        })
    }

    pub fn with_missing_priority(mut self, policy: MissingPriority) -> Self {
        self.missing_priority = policy;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}
