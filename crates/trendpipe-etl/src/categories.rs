//! Category reference parsing.
//!
//! The reference input is a nested JSON document: a top-level `items` array
//! whose entries carry an `id` and a nested `snippet.title`. Only those two
//! fields matter here; everything else in the feed is ignored.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::EtlError;

/// Top-level category feed: `{ "items": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct CategoryFeed {
    pub items: Vec<CategoryItem>,
}

/// One category entry: an identifier plus a nested title.
#[derive(Debug, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub snippet: CategorySnippet,
}

#[derive(Debug, Deserialize)]
pub struct CategorySnippet {
    pub title: String,
}

/// Parse the raw reference bytes into an id → title lookup table.
///
/// Identifiers are normalized with [`normalize_category_id`] so they join
/// against the tabular side's textual ids.
///
/// # Errors
///
/// Returns [`EtlError::CategoryParse`] if the document is not valid JSON or
/// does not match the expected `items[].{id, snippet.title}` shape. This is
/// fatal for the whole run.
pub fn parse_category_lookup(raw: &[u8]) -> Result<HashMap<String, String>, EtlError> {
    let feed: CategoryFeed = serde_json::from_slice(raw)
        .map_err(|e| EtlError::CategoryParse(e.to_string()))?;

    Ok(feed
        .items
        .into_iter()
        .map(|item| (normalize_category_id(&item.id), item.snippet.title))
        .collect())
}

/// Normalize a category identifier to the common textual join key.
///
/// Both sides of the join arrive as numeric text; surrounding whitespace is
/// the only variation seen in practice.
#[must_use]
pub fn normalize_category_id(raw: &str) -> String {
    raw.trim().to_string()
}
