//! Static knowledge tables for the assistant.
//!
//! This crate provides **wire models** and **translation helpers** for the YAML files that hold
//! the assistant's canned answers:
//! - patient symptom guidance (`symptoms.yaml`)
//! - doctor-facing clinical Q&A (`clinical.yaml`)
//! - researcher-facing Q&A (`research.yaml`)
//! - doctor suggested prompts (`samples.yaml`)
//!
//! Default tables are embedded in the binary. An override directory can replace them at startup.
//! Once loaded, a [`KnowledgeBase`] is immutable and is shared read-only for the process
//! lifetime.
//!
//! Matching and formatting live in `assist-core`; this crate only guarantees that every table is
//! well-formed.

pub mod qa;
pub mod samples;
pub mod store;
pub mod symptoms;
mod wire;

use std::path::PathBuf;

pub use qa::{QaAudience, QaItem, QaTable};
pub use samples::{SamplePrompt, Samples};
pub use store::KnowledgeBase;
pub use symptoms::{Medication, SymptomEntry, Symptoms};

pub use assist_types::{Keyword, NonEmptyText};

/// Errors returned by the `knowledge` crate.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("translation error: {0}")]
    Translation(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("expected table '{expected}', got '{found}'")]
    TableMismatch {
        expected: &'static str,
        found: String,
    },
}

/// Type alias for Results that can fail with a [`KnowledgeError`].
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// An entry that can be selected by keyword containment.
pub trait Keyed {
    /// The entry's trigger keywords, already lower-cased.
    fn keywords(&self) -> &[Keyword];

    /// Short label used in logs.
    fn label(&self) -> &str;
}

/// The table files understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Symptoms,
    Clinical,
    Research,
    Samples,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Symptoms,
        TableKind::Clinical,
        TableKind::Research,
        TableKind::Samples,
    ];

    /// Value of the `table:` header in the YAML file.
    pub fn wire_name(self) -> &'static str {
        match self {
            TableKind::Symptoms => "symptoms",
            TableKind::Clinical => "clinical",
            TableKind::Research => "research",
            TableKind::Samples => "samples",
        }
    }

    /// File name inside an override directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Symptoms => "symptoms.yaml",
            TableKind::Clinical => "clinical.yaml",
            TableKind::Research => "research.yaml",
            TableKind::Samples => "samples.yaml",
        }
    }
}
