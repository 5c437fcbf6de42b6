//! Suggested prompts shown to doctors alongside the assistant.

use crate::wire::{parse_table, required_text};
use crate::{KnowledgeResult, TableKind};
use assist_types::NonEmptyText;
use serde::Deserialize;

/// A curated question with its prepared answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePrompt {
    pub question: NonEmptyText,
    pub answer: NonEmptyText,
}

/// Sample prompt table operations.
pub struct Samples;

impl Samples {
    /// Parse the sample prompt table from YAML text.
    pub fn parse(yaml_text: &str) -> KnowledgeResult<Vec<SamplePrompt>> {
        parse_table::<SampleWire>(TableKind::Samples, yaml_text)?
            .into_iter()
            .enumerate()
            .map(|(i, wire)| {
                let context = format!("samples entry {i}");
                Ok(SamplePrompt {
                    question: required_text(&context, "question", wire.question)?,
                    answer: required_text(&context, "answer", wire.answer)?,
                })
            })
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SampleWire {
    question: String,
    answer: String,
}
