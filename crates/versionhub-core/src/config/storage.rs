//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
///
/// All user trees, version histories, and stored previews live below
/// `data_root`:
///
/// ```text
/// <data_root>/<user>/files/<path>
/// <data_root>/<user>/files_versions/<path>.v<timestamp>
/// <data_root>/appdata/previews/<content id>/...
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}
