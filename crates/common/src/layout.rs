//! SDK checkout layout configuration
//!
//! Describes where services, entry files and declaration directories live
//! inside an origin SDK checkout. The defaults match the OCI TypeScript SDK;
//! other checkouts can override any key from a YAML file.
//!
//! ```yaml
//! services_dir: lib
//! excluded_dirs: [common, node_modules]
//! priorities:
//!   core: 1
//!   audit: 2
//! ```

use crate::{BindgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Lowest priority tier, used for services missing from the table
pub const DEFAULT_PRIORITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkLayout {
    /// Directory under the SDK root holding one subdirectory per service
    pub services_dir: String,
    /// Subdirectories of `services_dir` that are shared code, not services
    pub excluded_dirs: Vec<String>,
    /// File whose presence marks a directory as a service module
    pub entry_file: String,
    /// Suffix of exported client entry points (e.g. "ComputeClient")
    pub client_suffix: String,
    /// Structure declarations, relative to the service root
    pub structures_dir: String,
    /// Request declarations, relative to the service root
    pub requests_dir: String,
    /// Response declarations, relative to the service root
    pub responses_dir: String,
    /// Declaration file extension, without the dot
    pub source_extension: String,
    /// Re-export file skipped when listing declaration directories
    pub barrel_file: String,
    /// Namespace qualifiers stripped from type expressions (e.g. "model.")
    pub container_qualifiers: Vec<String>,
    /// Service name to priority tier (1 = highest)
    pub priorities: BTreeMap<String, u8>,
}

impl Default for SdkLayout {
    fn default() -> Self {
        let priorities = [
            ("core", 1),
            ("identity", 1),
            ("objectstorage", 1),
            ("database", 1),
            ("containerengine", 1),
            ("audit", 2),
            ("monitoring", 2),
            ("logging", 2),
        ]
        .into_iter()
        .map(|(name, tier)| (name.to_string(), tier))
        .collect();

        Self {
            services_dir: "lib".to_string(),
            excluded_dirs: vec!["common".to_string(), "node_modules".to_string()],
            entry_file: "index.ts".to_string(),
            client_suffix: "Client".to_string(),
            structures_dir: "lib/model".to_string(),
            requests_dir: "lib/request".to_string(),
            responses_dir: "lib/response".to_string(),
            source_extension: "ts".to_string(),
            barrel_file: "index.ts".to_string(),
            container_qualifiers: vec!["model".to_string()],
            priorities,
        }
    }
}

impl SdkLayout {
    /// Load a layout from a YAML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BindgenError::Config(format!("Failed to read layout file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            BindgenError::Config(format!("Failed to parse layout YAML from {:?}: {}", path, e))
        })
    }

    /// Parse a layout from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let layout: SdkLayout = serde_yaml::from_str(yaml)?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<()> {
        if let Some((name, tier)) = self
            .priorities
            .iter()
            .find(|(_, tier)| !(1..=DEFAULT_PRIORITY).contains(*tier))
        {
            return Err(BindgenError::Config(format!(
                "Priority for '{name}' must be between 1 and {DEFAULT_PRIORITY}, got {tier}"
            )));
        }
        if self.client_suffix.is_empty() {
            return Err(BindgenError::Config(
                "client_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Priority tier for a service, defaulting to the lowest tier
    pub fn priority_of(&self, service: &str) -> u8 {
        self.priorities
            .get(service)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }

    /// Absolute directory holding all services
    pub fn services_root(&self, sdk_root: &Path) -> PathBuf {
        sdk_root.join(&self.services_dir)
    }

    /// Service root as reported in the manifest (`lib/<service>`)
    pub fn service_relative_path(&self, service: &str) -> String {
        if self.services_dir.is_empty() {
            service.to_string()
        } else {
            format!("{}/{}", self.services_dir.trim_end_matches('/'), service)
        }
    }

    /// Absolute structures directory of a service
    pub fn structures_path(&self, sdk_root: &Path, service: &str) -> PathBuf {
        self.services_root(sdk_root)
            .join(service)
            .join(&self.structures_dir)
    }

    /// Whether a file name is a declaration file (right extension, not the barrel)
    pub fn is_declaration_file(&self, file_name: &str) -> bool {
        file_name != self.barrel_file
            && Path::new(file_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.source_extension)
    }
}
