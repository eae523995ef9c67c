//! Document generation and output
//!
//! The [`Generator`] runs the agent for every section present in a
//! [`GeneratorConfig`], in the fixed order given by [`DocumentKind::ALL`].
//! Every document is built in memory before anything is written, so a
//! validation failure in any section leaves the output directory untouched.
//!
//! # Example
//!
//! ```ignore
//! use skyfall::config::loader::load_config;
//! use skyfall::generate::{write_documents, Generator};
//!
//! let config = load_config(None)?;
//! let documents = Generator::from_config(&config).generate(&config)?;
//! write_documents(&documents, &config.output.dir)?;
//! ```

use log::{debug, info};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::agents::{
    Agent, AssetPackAgent, ExporterAgent, ForceFieldAgent, ObstacleAgent, PresetAgent,
    SequenceAgent, TimekeeperAgent, UiHintsAgent,
};
use crate::config::{ConstraintsConfig, GeneratorConfig};
use crate::schema::{DocumentKind, RuntimeDocument};
use crate::validate::ValidationError;

/// Errors raised while generating or writing documents
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An agent rejected its section
    #[error("invalid {kind} section: {source}")]
    Validation {
        kind: DocumentKind,
        #[source]
        source: ValidationError,
    },
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A validated document, already lowered to JSON
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    kind: DocumentKind,
    value: Value,
}

impl GeneratedDocument {
    /// Serialize a runtime document
    pub fn from_document<D: RuntimeDocument>(document: &D) -> Result<Self, GenerateError> {
        Ok(Self { kind: D::KIND, value: document.to_value()? })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_json_string(&self) -> Result<String, GenerateError> {
        let mut json = serde_json::to_string_pretty(&self.value)?;
        json.push('\n');
        Ok(json)
    }
}

/// Runs the agents for a configuration
#[derive(Debug, Clone, Default)]
pub struct Generator {
    preset: PresetAgent,
    forcefield: ForceFieldAgent,
    only: Vec<DocumentKind>,
}

impl Generator {
    pub fn new(constraints: &ConstraintsConfig) -> Self {
        Self {
            preset: PresetAgent::new(constraints.preset.clone()),
            forcefield: ForceFieldAgent::new(constraints.forcefield.clone()),
            only: Vec::new(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(&config.constraints)
    }

    /// Restrict generation to `kinds`; an empty list means every kind
    pub fn with_only(mut self, kinds: impl IntoIterator<Item = DocumentKind>) -> Self {
        self.only = kinds.into_iter().collect();
        self
    }

    fn wants(&self, kind: DocumentKind) -> bool {
        self.only.is_empty() || self.only.contains(&kind)
    }

    /// Generate a document for every present, selected section.
    ///
    /// Fails on the first invalid section; nothing is returned in that case.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<Vec<GeneratedDocument>, GenerateError> {
        let mut documents = Vec::new();
        for kind in DocumentKind::ALL {
            if !self.wants(kind) {
                continue;
            }
            if let Some(document) = self.generate_kind(kind, config)? {
                match document.value().get("name").and_then(Value::as_str) {
                    Some(name) => debug!("generated {} document '{}'", kind, name),
                    None => debug!("generated {} document", kind),
                }
                documents.push(document);
            }
        }
        Ok(documents)
    }

    /// Generate the document for one section, or `None` if the section is absent
    pub fn generate_kind(
        &self,
        kind: DocumentKind,
        config: &GeneratorConfig,
    ) -> Result<Option<GeneratedDocument>, GenerateError> {
        match kind {
            DocumentKind::Preset => run(&self.preset, config.preset.clone()),
            DocumentKind::Forcefield => run(&self.forcefield, config.forcefield.clone()),
            DocumentKind::Obstacles => run(&ObstacleAgent, config.obstacles.clone()),
            DocumentKind::Sequence => run(&SequenceAgent, config.sequence.clone()),
            DocumentKind::Timefx => run(&TimekeeperAgent, config.timefx.clone()),
            DocumentKind::Uihints => run(&UiHintsAgent, config.uihints.clone()),
            DocumentKind::Exporter => run(&ExporterAgent, config.exporter.clone()),
            DocumentKind::Assets => run(&AssetPackAgent, config.assets.clone()),
        }
    }
}

fn run<A: Agent>(
    agent: &A,
    request: Option<A::Request>,
) -> Result<Option<GeneratedDocument>, GenerateError> {
    let Some(request) = request else {
        return Ok(None);
    };
    let kind = <A::Output as RuntimeDocument>::KIND;
    let document =
        agent.generate(request).map_err(|source| GenerateError::Validation { kind, source })?;
    GeneratedDocument::from_document(&document).map(Some)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let io_err = |source| GenerateError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(contents.as_bytes()).map_err(io_err)?;
    Ok(())
}

/// Write every document into `dir` under its fixed file name, creating the
/// directory as needed
pub fn write_documents(
    documents: &[GeneratedDocument],
    dir: &Path,
) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = dir.join(document.file_name());
        write_file(&path, &document.to_json_string()?)?;
        info!("wrote {}: {}", document.kind(), path.display());
        written.push(path);
    }
    Ok(written)
}
