//! Keyword containment matching.
//!
//! A query matches an entry when any of the entry's keywords occurs as a substring of the
//! lower-cased query. Tables are scanned in declaration order and the first hit wins; there is
//! no scoring, tokenisation, stemming or typo tolerance.
//!
//! Suggested prompts are the exception: they are selected only when the whole query equals the
//! prompt's question, ignoring case and surrounding whitespace.

use knowledge::{Keyed, SamplePrompt};

/// Lower-cases `query` for matching.
///
/// Returns `None` for empty or whitespace-only input, which never matches anything.
pub fn normalise_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        return None;
    }
    Some(query.to_lowercase())
}

/// Returns the first entry in `table` with a keyword contained in `normalised_query`.
///
/// `normalised_query` must already be lower-cased (see [`normalise_query`]).
pub fn first_match<'a, T: Keyed>(normalised_query: &str, table: &'a [T]) -> Option<&'a T> {
    table.iter().find(|entry| {
        entry
            .keywords()
            .iter()
            .any(|kw| kw.occurs_in(normalised_query))
    })
}

/// Returns the suggested prompt whose question equals `normalised_query`.
pub fn exact_question<'a>(
    normalised_query: &str,
    samples: &'a [SamplePrompt],
) -> Option<&'a SamplePrompt> {
    let wanted = normalised_query.trim();
    samples
        .iter()
        .find(|sample| sample.question.as_str().to_lowercase() == wanted)
}

/// Normalises `query` and scans `table`.
pub fn match_query<'a, T: Keyed>(query: &str, table: &'a [T]) -> Option<&'a T> {
    let normalised = normalise_query(query)?;
    first_match(&normalised, table)
}
