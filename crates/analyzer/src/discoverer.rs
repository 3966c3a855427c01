//! Service discovery orchestration

use crate::{client_detector::ClientDetector, manifest::ServiceManifest};
use sdk_bindgen_common::{BindgenError, Result, SdkLayout, ServiceMetadata};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Service discoverer - main entry point
pub struct ServiceDiscoverer {
    sdk_root: PathBuf,
    layout: SdkLayout,
    verbose: bool,
}

/// Why a candidate directory was not included in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Excluded,
    NoEntryFile,
    UnreadableEntryFile(String),
}

impl ServiceDiscoverer {
    /// Create a discoverer for an SDK checkout using the default layout
    pub fn new(sdk_root: impl Into<PathBuf>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
            layout: SdkLayout::default(),
            verbose: false,
        }
    }

    /// Use a custom SDK layout
    pub fn with_layout(mut self, layout: SdkLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Scan the checkout and build the ordered manifest
    ///
    /// A missing or unreadable services directory is fatal; individual
    /// directories that do not look like services are skipped and logged.
    pub fn discover(&self) -> Result<ServiceManifest> {
        let services_root = self.layout.services_root(&self.sdk_root);
        if !services_root.is_dir() {
            return Err(BindgenError::SdkRootNotFound(services_root));
        }

        let detector = ClientDetector::new(&self.layout.client_suffix)?;
        let candidates = self.list_candidate_dirs(&services_root)?;
        eprintln!("Found {} services", candidates.len());

        let mut services = Vec::new();
        for (name, path) in candidates {
            match self.inspect_service(&detector, &name, &path) {
                Ok(service) => {
                    eprintln!(
                        "  {}: {} clients, {} models (priority {})",
                        service.name,
                        service.clients.len(),
                        service.model_count,
                        service.priority
                    );
                    services.push(service);
                },
                Err(reason) => self.report_skip(&name, &reason),
            }
        }

        Ok(ServiceManifest::new(services))
    }

    /// Immediate subdirectories of the services root, sorted by name
    fn list_candidate_dirs(&self, services_root: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut candidates = Vec::new();

        for entry in WalkDir::new(services_root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
                Err(e) => {
                    eprintln!("  Skipping unreadable entry: {e}");
                    continue;
                },
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                self.log(&format!(
                    "  Skipping non UTF-8 directory name: {}",
                    entry.path().display()
                ));
                continue;
            };

            if self.layout.is_excluded(&name) {
                self.report_skip(&name, &SkipReason::Excluded);
                continue;
            }

            candidates.push((name, entry.into_path()));
        }

        Ok(candidates)
    }

    /// Build metadata for one candidate directory
    fn inspect_service(
        &self,
        detector: &ClientDetector,
        name: &str,
        service_path: &Path,
    ) -> std::result::Result<ServiceMetadata, SkipReason> {
        let entry_path = service_path.join(&self.layout.entry_file);
        if !entry_path.is_file() {
            return Err(SkipReason::NoEntryFile);
        }

        let entry_source = fs::read_to_string(&entry_path)
            .map_err(|e| SkipReason::UnreadableEntryFile(e.to_string()))?;
        let clients = detector.detect(&entry_source);

        let model_count = self.count_declarations(&service_path.join(&self.layout.structures_dir));
        let request_count = self.count_declarations(&service_path.join(&self.layout.requests_dir));
        let response_count =
            self.count_declarations(&service_path.join(&self.layout.responses_dir));

        self.log(&format!(
            "    {}: {} requests, {} responses",
            service_path.display(),
            request_count,
            response_count
        ));

        Ok(ServiceMetadata {
            name: name.to_string(),
            path: self.layout.service_relative_path(name),
            clients,
            model_count,
            request_count,
            response_count,
            priority: self.layout.priority_of(name),
        })
    }

    /// Count declaration files directly inside `dir`; absent directories count zero
    fn count_declarations(&self, dir: &Path) -> usize {
        if !dir.is_dir() {
            return 0;
        }

        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|f| self.layout.is_declaration_file(f))
            })
            .count()
    }

    fn report_skip(&self, name: &str, reason: &SkipReason) {
        match reason {
            SkipReason::Excluded => self.log(&format!("  Skipping {name} - shared code")),
            SkipReason::NoEntryFile => {
                eprintln!("  Skipping {name} - no {}", self.layout.entry_file)
            },
            SkipReason::UnreadableEntryFile(e) => {
                eprintln!("  Skipping {name} - cannot read {}: {e}", self.layout.entry_file)
            },
        }
    }

    /// Log message if verbose
    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{message}");
        }
    }
}
