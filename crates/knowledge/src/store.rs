//! Loading the knowledge base, either from the embedded defaults or an override directory.
//!
//! An override directory must contain all four table files (`symptoms.yaml`, `clinical.yaml`,
//! `research.yaml`, `samples.yaml`). Partial overrides are rejected.

use crate::qa::{QaAudience, QaTable};
use crate::samples::{SamplePrompt, Samples};
use crate::symptoms::{SymptomEntry, Symptoms};
use crate::{KnowledgeError, KnowledgeResult, TableKind};
use std::fs;
use std::io::Write;
use std::path::Path;

const EMBEDDED_SYMPTOMS: &str = include_str!("../data/symptoms.yaml");
const EMBEDDED_CLINICAL: &str = include_str!("../data/clinical.yaml");
const EMBEDDED_RESEARCH: &str = include_str!("../data/research.yaml");
const EMBEDDED_SAMPLES: &str = include_str!("../data/samples.yaml");

/// Immutable set of knowledge tables.
///
/// Build it once at startup and share it behind an `Arc`. Nothing in the workspace mutates a
/// loaded knowledge base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    symptoms: Vec<SymptomEntry>,
    clinical: QaTable,
    research: QaTable,
    samples: Vec<SamplePrompt>,
}

impl KnowledgeBase {
    /// Builds the knowledge base from the tables compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded YAML is malformed.
    pub fn embedded() -> KnowledgeResult<Self> {
        Self::from_yaml(
            EMBEDDED_SYMPTOMS,
            EMBEDDED_CLINICAL,
            EMBEDDED_RESEARCH,
            EMBEDDED_SAMPLES,
        )
    }

    /// Builds the knowledge base from four YAML documents.
    pub fn from_yaml(
        symptoms_yaml: &str,
        clinical_yaml: &str,
        research_yaml: &str,
        samples_yaml: &str,
    ) -> KnowledgeResult<Self> {
        Ok(Self {
            symptoms: Symptoms::parse(symptoms_yaml)?,
            clinical: QaTable::parse(QaAudience::Clinical, clinical_yaml)?,
            research: QaTable::parse(QaAudience::Research, research_yaml)?,
            samples: Samples::parse(samples_yaml)?,
        })
    }

    /// Loads all four tables from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::InvalidInput`] if `dir` is not a directory or a table file is
    /// missing, [`KnowledgeError::Io`] if a file cannot be read, and any parse error from the
    /// individual tables.
    pub fn load_dir(dir: &Path) -> KnowledgeResult<Self> {
        if !dir.is_dir() {
            return Err(KnowledgeError::InvalidInput(format!(
                "knowledge directory does not exist: {}",
                dir.display()
            )));
        }

        let read = |kind: TableKind| -> KnowledgeResult<String> {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                return Err(KnowledgeError::InvalidInput(format!(
                    "knowledge directory {} is missing {}",
                    dir.display(),
                    kind.file_name()
                )));
            }
            fs::read_to_string(&path).map_err(|source| KnowledgeError::Io { path, source })
        };

        let kb = Self::from_yaml(
            &read(TableKind::Symptoms)?,
            &read(TableKind::Clinical)?,
            &read(TableKind::Research)?,
            &read(TableKind::Samples)?,
        )?;

        tracing::info!(
            "loaded knowledge tables from {} ({} symptoms, {} clinical, {} research)",
            dir.display(),
            kb.symptoms.len(),
            kb.clinical.len(),
            kb.research.len()
        );

        Ok(kb)
    }

    /// Loads from `override_dir` when given, otherwise from the embedded defaults.
    pub fn load(override_dir: Option<&Path>) -> KnowledgeResult<Self> {
        match override_dir {
            Some(dir) => Self::load_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Writes the embedded table files into `dir` as a starting point for an override.
    ///
    /// Existing files are never overwritten.
    pub fn write_defaults(dir: &Path) -> KnowledgeResult<()> {
        fs::create_dir_all(dir).map_err(|source| KnowledgeError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for kind in TableKind::ALL {
            let path = dir.join(kind.file_name());
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|source| KnowledgeError::Io {
                    path: path.clone(),
                    source,
                })?;
            file.write_all(embedded_text(kind).as_bytes())
                .map_err(|source| KnowledgeError::Io { path, source })?;
        }

        Ok(())
    }

    /// Patient symptom entries in declaration order.
    pub fn symptoms(&self) -> &[SymptomEntry] {
        &self.symptoms
    }

    pub fn clinical(&self) -> &QaTable {
        &self.clinical
    }

    pub fn research(&self) -> &QaTable {
        &self.research
    }

    pub fn qa(&self, audience: QaAudience) -> &QaTable {
        match audience {
            QaAudience::Clinical => &self.clinical,
            QaAudience::Research => &self.research,
        }
    }

    pub fn samples(&self) -> &[SamplePrompt] {
        &self.samples
    }
}

fn embedded_text(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Symptoms => EMBEDDED_SYMPTOMS,
        TableKind::Clinical => EMBEDDED_CLINICAL,
        TableKind::Research => EMBEDDED_RESEARCH,
        TableKind::Samples => EMBEDDED_SAMPLES,
    }
}
