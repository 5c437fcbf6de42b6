//! Caller personas and the tables each one consults.

use crate::{AssistError, AssistResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The persona a query is asked as.
///
/// The mode decides which local tables are consulted and in what order. Patient is the default
/// when the caller does not say.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Patient,
    Doctor,
    Researcher,
}

/// A local table the responder can consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalTable {
    /// Doctor suggested prompts, matched on the whole question.
    Sample,
    Symptom,
    Clinical,
    Research,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Patient, Mode::Doctor, Mode::Researcher];

    /// Tables to consult, in order, before escalating to the remote service.
    ///
    /// - Patient: symptoms only.
    /// - Doctor: suggested prompts, then clinical Q&A, then falls through to symptoms.
    /// - Researcher: research Q&A only, never patient content.
    pub fn tables(self) -> &'static [LocalTable] {
        match self {
            Mode::Patient => &[LocalTable::Symptom],
            Mode::Doctor => &[LocalTable::Sample, LocalTable::Clinical, LocalTable::Symptom],
            Mode::Researcher => &[LocalTable::Research],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Patient => "patient",
            Mode::Doctor => "doctor",
            Mode::Researcher => "researcher",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AssistError;

    fn from_str(s: &str) -> AssistResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Mode::Patient),
            "doctor" => Ok(Mode::Doctor),
            "researcher" => Ok(Mode::Researcher),
            other => Err(AssistError::InvalidInput(format!(
                "unknown mode '{other}' (expected patient, doctor or researcher)"
            ))),
        }
    }
}
