//! Clinical and research Q&A tables.
//!
//! Both tables share one entry shape but are kept apart: doctors consult the clinical table and
//! researchers the research table. Keywords may repeat across the two tables (for example
//! `fever`); which table is consulted is decided by the caller's mode, not here.

use crate::wire::{keywords, parse_table, required_text};
use crate::{Keyed, KnowledgeResult, TableKind};
use assist_types::{Keyword, NonEmptyText};
use serde::Deserialize;

/// Audience a Q&A table is written for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QaAudience {
    Clinical,
    Research,
}

impl QaAudience {
    fn table_kind(self) -> TableKind {
        match self {
            QaAudience::Clinical => TableKind::Clinical,
            QaAudience::Research => TableKind::Research,
        }
    }
}

/// One canned question and its answer bullets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QaItem {
    /// Grouping label, e.g. "Study Design & Methodology".
    pub category: NonEmptyText,

    /// Lower-cased trigger substrings.
    pub keywords: Vec<Keyword>,

    /// The canonical question this entry answers.
    pub question: NonEmptyText,

    /// Ordered answer bullets. Blank lines are kept here and skipped when formatting.
    pub answer: Vec<String>,
}

impl Keyed for QaItem {
    fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    fn label(&self) -> &str {
        self.question.as_str()
    }
}

/// A Q&A table tagged with its audience.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QaTable {
    audience: QaAudience,
    items: Vec<QaItem>,
}

impl QaTable {
    /// Parse a Q&A table from YAML text.
    ///
    /// The file's `table:` header must match `audience` (`clinical` or `research`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::KnowledgeError`] on schema mismatch, a wrong table header, an empty label
    /// or an entry without keywords.
    pub fn parse(audience: QaAudience, yaml_text: &str) -> KnowledgeResult<Self> {
        let kind = audience.table_kind();
        let items = parse_table::<QaWire>(kind, yaml_text)?
            .into_iter()
            .enumerate()
            .map(|(i, wire)| wire_to_domain(kind, i, wire))
            .collect::<KnowledgeResult<Vec<_>>>()?;

        Ok(Self { audience, items })
    }

    pub fn audience(&self) -> QaAudience {
        self.audience
    }

    /// Entries in declaration order.
    pub fn items(&self) -> &[QaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QaWire {
    category: String,
    keywords: Vec<String>,
    question: String,
    answer: Vec<String>,
}

fn wire_to_domain(kind: TableKind, index: usize, wire: QaWire) -> KnowledgeResult<QaItem> {
    let context = format!("{} entry {index}", kind.wire_name());
    let question = required_text(&context, "question", wire.question)?;
    let context = format!("{context} ('{question}')");

    Ok(QaItem {
        category: required_text(&context, "category", wire.category)?,
        keywords: keywords(&context, wire.keywords)?,
        question,
        answer: wire.answer,
    })
}
