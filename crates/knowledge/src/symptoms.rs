//! Patient symptom table: wire model and translation.
//!
//! Responsibilities:
//! - Define the public domain type [`SymptomEntry`] consumed by the matcher and formatter
//! - Define a strict wire model for the `symptoms.yaml` file
//! - Validate required labels and normalise keywords
//!
//! Notes:
//! - Entry order is significant. The first entry whose keyword occurs in the query wins, so the
//!   translation never reorders entries or list fields.

use crate::wire::{keywords, parse_table, required_text};
use crate::{Keyed, KnowledgeResult, TableKind};
use assist_types::{Keyword, NonEmptyText};
use serde::Deserialize;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Guidance for one minor-ailment category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomEntry {
    /// Display label, e.g. "Fever (Mild)".
    pub name: NonEmptyText,

    /// Lower-cased trigger substrings.
    pub keywords: Vec<Keyword>,

    /// One-line etiology.
    pub cause: NonEmptyText,

    /// Ordered home-care advice.
    pub home_care: Vec<String>,

    /// Ordered over-the-counter medication suggestions.
    pub medication: Vec<Medication>,

    /// Ordered escalation triggers.
    pub see_doctor_if: Vec<String>,
}

/// An over-the-counter medication suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Medication {
    pub name: NonEmptyText,
    pub dosage: NonEmptyText,
    pub note: Option<String>,
}

impl Keyed for SymptomEntry {
    fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    fn label(&self) -> &str {
        self.name.as_str()
    }
}

// ============================================================================
// Public operations
// ============================================================================

/// Symptom table operations.
///
/// This is a zero-sized type used for namespacing. All methods are associated functions.
pub struct Symptoms;

impl Symptoms {
    /// Parse the symptom table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KnowledgeError`] if:
    /// - the YAML does not match the wire schema (unknown keys, wrong types),
    /// - the `table:` header is not `symptoms`,
    /// - an entry has an empty label or no keywords.
    pub fn parse(yaml_text: &str) -> KnowledgeResult<Vec<SymptomEntry>> {
        parse_table::<SymptomWire>(TableKind::Symptoms, yaml_text)?
            .into_iter()
            .enumerate()
            .map(|(i, wire)| wire_to_domain(i, wire))
            .collect()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SymptomWire {
    name: String,
    keywords: Vec<String>,
    cause: String,
    #[serde(default)]
    home_care: Vec<String>,
    #[serde(default)]
    medication: Vec<MedicationWire>,
    #[serde(default)]
    see_doctor_if: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MedicationWire {
    name: String,
    dosage: String,
    #[serde(default)]
    note: Option<String>,
}

fn wire_to_domain(index: usize, wire: SymptomWire) -> KnowledgeResult<SymptomEntry> {
    let context = format!("symptoms entry {index}");
    let name = required_text(&context, "name", wire.name)?;
    let context = format!("symptoms entry {index} ('{name}')");

    let medication = wire
        .medication
        .into_iter()
        .enumerate()
        .map(|(m, med)| {
            let med_context = format!("{context} medication {m}");
            Ok(Medication {
                name: required_text(&med_context, "name", med.name)?,
                dosage: required_text(&med_context, "dosage", med.dosage)?,
                note: med
                    .note
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
            })
        })
        .collect::<KnowledgeResult<Vec<_>>>()?;

    Ok(SymptomEntry {
        keywords: keywords(&context, wire.keywords)?,
        cause: required_text(&context, "cause", wire.cause)?,
        name,
        home_care: wire.home_care,
        medication,
        see_doctor_if: wire.see_doctor_if,
    })
}
