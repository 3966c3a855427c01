//! Detect client entry points in a service entry file
//!
//! Entry files re-export their clients with a fixed, simple grammar:
//!
//! ```text
//! export import ComputeClient = compute.ComputeClient;
//! ```
//!
//! so a lexical scan is enough here; full parsing is reserved for model files.

use regex::Regex;
use sdk_bindgen_common::{BindgenError, Result};

/// Scans entry file text for re-exported client identifiers
#[derive(Debug, Clone)]
pub struct ClientDetector {
    pattern: Regex,
}

impl ClientDetector {
    /// Build a detector for identifiers ending in `suffix` (e.g. "Client")
    pub fn new(suffix: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"export\s+import\s+(\w+{})\s*=",
            regex::escape(suffix)
        ))
        .map_err(|e| BindgenError::Config(format!("Invalid client suffix '{suffix}': {e}")))?;

        Ok(Self { pattern })
    }

    /// Client names in order of first appearance
    pub fn detect(&self, source: &str) -> Vec<String> {
        let mut clients: Vec<String> = Vec::new();

        for captures in self.pattern.captures_iter(source) {
            let name = &captures[1];
            if !clients.iter().any(|c| c == name) {
                clients.push(name.to_string());
            }
        }

        clients
    }
}
