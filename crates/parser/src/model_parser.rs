//! Per-service model parsing entry point

use crate::extract::extract_models;
use crate::project::SourceProject;
use sdk_bindgen_common::{BindgenError, ModelKind, ParsedModel, Result, SdkLayout};
use std::fmt;
use std::path::PathBuf;

/// Parses the structure declarations of one service into normalized models
pub struct ModelParser {
    sdk_root: PathBuf,
    service: String,
    layout: SdkLayout,
    verbose: bool,
}

impl ModelParser {
    /// Create a parser for `service` in the SDK checkout at `sdk_root`
    pub fn new(sdk_root: impl Into<PathBuf>, service: impl Into<String>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
            service: service.into(),
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

    /// Directory the service's structure declarations are read from
    pub fn model_dir(&self) -> PathBuf {
        self.layout.structures_path(&self.sdk_root, &self.service)
    }

    /// Load, parse and extract all models of the service
    pub fn parse(&self) -> Result<Vec<ParsedModel>> {
        let model_dir = self.model_dir();
        if !model_dir.is_dir() {
            return Err(BindgenError::ModelDirectoryNotFound {
                service: self.service.clone(),
                path: model_dir,
            });
        }

        eprintln!("Parsing models from {}", model_dir.display());
        let project = SourceProject::load_dir(&model_dir, &self.layout)?;
        self.log(&format!("  Loaded {} source files", project.len()));

        for source in project.sources() {
            self.log(&format!(
                "    {}: {} top-level items",
                source.path.display(),
                source.source.items().len()
            ));
        }

        let models = extract_models(&project, &self.layout)?;
        self.log(&format!("  {}", ModelSummary::from_models(&models)));
        Ok(models)
    }

    /// Log message if verbose
    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{message}");
        }
    }
}

/// Model counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub structures: usize,
    pub enumerations: usize,
    pub type_aliases: usize,
    /// Structures acting as a polymorphic family root
    pub polymorphic_bases: usize,
    /// Structures extending a base
    pub polymorphic_variants: usize,
}

impl ModelSummary {
    pub fn from_models(models: &[ParsedModel]) -> Self {
        let mut summary = Self::default();
        for model in models {
            match model.kind() {
                ModelKind::Structure => summary.structures += 1,
                ModelKind::Enumeration => summary.enumerations += 1,
                ModelKind::TypeAlias => summary.type_aliases += 1,
            }
            if model.discriminator().is_some() {
                summary.polymorphic_bases += 1;
            }
            if model.base_type().is_some() {
                summary.polymorphic_variants += 1;
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.structures + self.enumerations + self.type_aliases
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} models ({} structures, {} enumerations, {} type aliases)",
            self.total(),
            self.structures,
            self.enumerations,
            self.type_aliases
        )
    }
}
