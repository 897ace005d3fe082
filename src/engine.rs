//! Diff engine dispatch by file suffix
//!
//! Each schema language gets its own [`DiffEngine`]. The registry picks one
//! from the old file's extension and falls back to the OpenAPI engine.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::compatibility::diff_documents;
use crate::document::Document;
use crate::error::{Result, SpecError};
use crate::finding::Finding;

/// Something that can compare two schema files
pub trait DiffEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn diff_files(&self, old: &Path, new: &Path) -> Result<Vec<Finding>>;
}

/// Structural differ over OpenAPI-shaped JSON/YAML documents
#[derive(Debug, Default)]
pub struct OpenApiEngine;

impl DiffEngine for OpenApiEngine {
    fn name(&self) -> &'static str {
        "openapi"
    }

    fn diff_files(&self, old: &Path, new: &Path) -> Result<Vec<Finding>> {
        let old = Document::from_path(old)?;
        let new = Document::from_path(new)?;
        Ok(diff_documents(&old, &new))
    }
}

/// Placeholder for schema languages without a differ
#[derive(Debug)]
pub struct UnsupportedEngine {
    pub format: &'static str,
}

impl DiffEngine for UnsupportedEngine {
    fn name(&self) -> &'static str {
        self.format
    }

    fn diff_files(&self, old: &Path, _new: &Path) -> Result<Vec<Finding>> {
        Err(SpecError::UnsupportedFormat(format!(
            "{} ({})",
            self.format,
            old.display()
        )))
    }
}

/// Suffix to engine table
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn DiffEngine>>,
    fallback: Arc<dyn DiffEngine>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        let openapi: Arc<dyn DiffEngine> = Arc::new(OpenApiEngine);
        let graphql: Arc<dyn DiffEngine> = Arc::new(UnsupportedEngine { format: "graphql" });

        let mut registry = Self::new(openapi.clone());
        for suffix in ["json", "yaml", "yml"] {
            registry.register(suffix, openapi.clone());
        }
        for suffix in ["graphql", "gql"] {
            registry.register(suffix, graphql.clone());
        }
        registry
    }
}

impl EngineRegistry {
    /// An empty table that sends everything to `fallback`
    pub fn new(fallback: Arc<dyn DiffEngine>) -> Self {
        Self {
            engines: HashMap::new(),
            fallback,
        }
    }

    /// Add or replace the engine for a suffix (without the dot, any case)
    pub fn register(&mut self, suffix: &str, engine: Arc<dyn DiffEngine>) {
        self.engines.insert(suffix.to_ascii_lowercase(), engine);
    }

    pub fn engine_for(&self, path: &Path) -> &dyn DiffEngine {
        path.extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .and_then(|suffix| self.engines.get(&suffix))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Diff two files with the engine chosen by the old file's suffix
    pub fn diff_files(&self, old: &Path, new: &Path) -> Result<Vec<Finding>> {
        let engine = self.engine_for(old);
        info!(engine = engine.name(), old = %old.display(), new = %new.display(), "diffing");
        engine.diff_files(old, new)
    }
}

/// Diff two files using the default engine table
pub fn diff_files(old: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<Vec<Finding>> {
    EngineRegistry::default().diff_files(old.as_ref(), new.as_ref())
}
