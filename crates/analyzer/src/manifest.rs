//! Ordered service manifest

use sdk_bindgen_common::{to_pretty_json, Result, ServiceMetadata};

/// Services of one SDK checkout, ordered by `(priority, name)`
///
/// The order is a scheduling hint for generation (high-value services
/// first) and is deterministic for an unchanged checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceManifest {
    services: Vec<ServiceMetadata>,
}

impl ServiceManifest {
    /// Build a manifest, sorting services by priority tier then name
    pub fn new(mut services: Vec<ServiceMetadata>) -> Self {
        services.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        Self { services }
    }

    pub fn services(&self) -> &[ServiceMetadata] {
        &self.services
    }

    pub fn into_services(self) -> Vec<ServiceMetadata> {
        self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ServiceMetadata> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Number of services in a priority tier
    pub fn count_by_priority(&self, priority: u8) -> usize {
        self.services
            .iter()
            .filter(|s| s.priority == priority)
            .count()
    }

    /// Keep only the named services, preserving manifest order
    pub fn retain_names(&mut self, names: &[String]) {
        self.services.retain(|s| names.iter().any(|n| n == &s.name));
    }

    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(&self.services)
    }
}
