//! In-memory set of parsed declaration files for one service

use crate::typescript::{parse_source, TsSource};
use sdk_bindgen_common::{BindgenError, Result, SdkLayout};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One parsed file and where it came from
#[derive(Debug)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub source: TsSource,
}

/// Frozen snapshot of a service's declaration files, in file-name order
#[derive(Debug, Default)]
pub struct SourceProject {
    sources: Vec<ParsedSource>,
}

impl SourceProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every declaration file directly inside `dir`
    ///
    /// Files are visited in file-name order. The barrel file and files with
    /// other extensions are ignored. Any file that cannot be read or parsed
    /// fails the whole load.
    pub fn load_dir(dir: &Path, layout: &SdkLayout) -> Result<Self> {
        let mut project = Self::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| match e.path().map(Path::to_path_buf) {
                Some(path) => BindgenError::SourceRead {
                    path,
                    source: e.into(),
                },
                None => BindgenError::Io(e.into()),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let is_declaration = entry
                .file_name()
                .to_str()
                .is_some_and(|name| layout.is_declaration_file(name));
            if !is_declaration {
                continue;
            }

            let path = entry.into_path();
            let source = fs::read_to_string(&path).map_err(|source| BindgenError::SourceRead {
                path: path.clone(),
                source,
            })?;
            project.add_source(path, &source)?;
        }

        Ok(project)
    }

    /// Parse `source` and append it under `path`
    pub fn add_source(&mut self, path: impl Into<PathBuf>, source: &str) -> Result<()> {
        let path = path.into();
        let source = parse_source(source).map_err(|e| BindgenError::Syntax {
            path: path.clone(),
            line: e.line,
            column: e.column,
            message: e.message,
        })?;

        self.sources.push(ParsedSource { path, source });
        Ok(())
    }

    pub fn sources(&self) -> &[ParsedSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
