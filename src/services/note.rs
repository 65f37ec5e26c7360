//! Internal research note (IRN) editor: drafts, attribute generation, save.
//!
//! DESIGN
//! ======
//! The editor holds rich-text HTML. Attribute generation works on the text
//! with markup stripped: a title from the first sentence, tags from the most
//! frequent non-stop-word tokens, and tickers by plain substring match
//! against the tickers the catalog already knows about.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::catalog::{FileCategory, FileItem};
use super::upload::add_tag;

pub const NOTE_TAG: &str = "irn";
pub const NOTE_MIME: &str = "text/html";
const FALLBACK_TITLE: &str = "Generated IRN";
const TITLE_WORDS: usize = 6;
const GENERATED_TAG_COUNT: usize = 3;
const MIN_KEYWORD_CHARS: usize = 4;

const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are", "was", "were", "be",
    "been", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "can",
    "this", "that", "these", "those", "a", "an",
];

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("please enter some content for your IRN")]
    EmptyContent,
    #[error("please enter a title for your IRN")]
    MissingTitle,
}

impl crate::error::ErrorCode for NoteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyContent => "E_NOTE_EMPTY",
            Self::MissingTitle => "E_NOTE_MISSING_TITLE",
        }
    }
}

/// Editor state for a note that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    /// Rich-text body as HTML.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub primary_ticker: Option<String>,
    #[serde(default)]
    pub secondary_ticker: Option<String>,
}

impl NoteDraft {
    pub fn add_tag(&mut self, tag: &str) -> bool {
        add_tag(&mut self.tags, tag)
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Overwrite title, tags and tickers with generated values.
    pub fn apply(&mut self, generated: GeneratedAttributes) {
        self.title = generated.title;
        self.tags = generated.tags;
        if generated.primary_ticker.is_some() {
            self.primary_ticker = generated.primary_ticker;
            self.secondary_ticker = generated.secondary_ticker;
        }
    }
}

/// Attributes suggested from note content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedAttributes {
    pub title: String,
    pub tags: Vec<String>,
    pub primary_ticker: Option<String>,
    pub secondary_ticker: Option<String>,
}

/// Remove HTML tags and surrounding whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    HTML_TAG.replace_all(html, "").trim().to_string()
}

/// Suggest a title, tags and tickers for the given HTML content.
///
/// # Errors
///
/// Returns `EmptyContent` if the content has no text once markup is removed.
pub fn generate_attributes(content: &str, available_tickers: &[String]) -> Result<GeneratedAttributes, NoteError> {
    let text = strip_html(content);
    if text.is_empty() {
        return Err(NoteError::EmptyContent);
    }

    let title = generate_title(&text);
    let mut tags = top_keywords(&text, GENERATED_TAG_COUNT);
    add_tag(&mut tags, NOTE_TAG);

    let (primary_ticker, secondary_ticker) = match_tickers(&text, available_tickers);

    Ok(GeneratedAttributes { title, tags, primary_ticker, secondary_ticker })
}

fn generate_title(text: &str) -> String {
    let first_sentence = text
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default();
    let title = first_sentence
        .split(' ')
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = title.chars();
    let title = match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => first.to_uppercase().chain(chars).collect(),
        _ => title,
    };
    if title.trim().is_empty() { FALLBACK_TITLE.to_string() } else { title }
}

/// Most frequent non-stop-word tokens. Ties keep first-seen order.
fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for word in text.to_lowercase().split_whitespace() {
        if word.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&word) {
            continue;
        }
        let count = counts.entry(word.to_string()).or_insert(0);
        if *count == 0 {
            order.push(word.to_string());
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(limit);
    order
}

/// Tickers mentioned in the text, in availability order.
fn match_tickers(text: &str, available: &[String]) -> (Option<String>, Option<String>) {
    if available.is_empty() {
        return (None, None);
    }
    let upper = text.to_uppercase();
    let mut mentioned = available
        .iter()
        .filter(|ticker| upper.contains(&ticker.to_uppercase()));

    match mentioned.next() {
        Some(first) => (Some(first.clone()), mentioned.next().cloned()),
        None => (available.first().cloned(), None),
    }
}

/// Validate a draft and build the catalog record for it.
///
/// # Errors
///
/// Returns `MissingTitle` for a blank title and `EmptyContent` when the body
/// has no text once markup is removed.
pub fn save_note(draft: &NoteDraft, author: &str, id: String, now_ms: i64) -> Result<FileItem, NoteError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(NoteError::MissingTitle);
    }
    if strip_html(&draft.content).is_empty() {
        return Err(NoteError::EmptyContent);
    }

    let tags = if draft.tags.is_empty() { vec![NOTE_TAG.to_string()] } else { draft.tags.clone() };
    let ticker = draft
        .primary_ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(FileItem {
        id,
        name: title.to_string(),
        author: author.to_string(),
        tags,
        category: FileCategory::Irn,
        uploaded_at: now_ms,
        size: draft.content.len() as u64,
        mime_type: NOTE_MIME.to_string(),
        ticker,
        team: None,
        url: None,
        content: Some(draft.content.trim().to_string()),
        data: None,
    })
}

#[cfg(test)]
#[path = "note_test.rs"]
mod tests;
