//! Service discovery for sdk-bindgen
//!
//! Scans the top-level service directories of an SDK checkout and produces the
//! ordered service manifest that drives per-service model parsing.
//!
//! # Examples
//!
//! ```no_run
//! use sdk_bindgen_analyzer::ServiceDiscoverer;
//!
//! let manifest = ServiceDiscoverer::new("./oci-typescript-sdk")
//!     .verbose(true)
//!     .discover()
//!     .expect("Discovery failed");
//!
//! for service in manifest.services() {
//!     println!("{} (priority {})", service.name, service.priority);
//! }
//! ```

mod client_detector;
mod discoverer;
mod manifest;

pub use client_detector::ClientDetector;
pub use discoverer::{ServiceDiscoverer, SkipReason};
pub use manifest::ServiceManifest;

use sdk_bindgen_common::{Result, ServiceMetadata};
use std::path::Path;

/// Discover services of an SDK checkout with the default layout
pub fn discover_services(sdk_root: &Path) -> Result<Vec<ServiceMetadata>> {
    Ok(ServiceDiscoverer::new(sdk_root).discover()?.into_services())
}
