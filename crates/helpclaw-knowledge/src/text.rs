//! Text analysis primitives: keyword extraction, ticket-reference detection,
//! and pairwise similarity. Pure functions, no state.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Tokens shorter than this never become keywords.
const MIN_KEYWORD_LEN: usize = 3;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were",
        "been", "be", "have", "has", "had", "do", "does", "did", "will",
        "would", "should", "could", "may", "might", "must", "can", "this",
        "that", "these", "those",
    ]
    .into_iter()
    .collect()
});

/// Ticket reference: 2+ letter project key, hyphen, issue number.
/// Matched case-insensitively, normalized to uppercase by the caller.
static TICKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z]{2,}-[0-9]+\b").expect("ticket reference regex is valid")
});

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_keyword(token: &str) -> bool {
    token.chars().count() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(token)
}

/// Extract up to `max_keywords` keywords from `text`.
///
/// Lowercases, tokenizes on non-alphanumeric boundaries, drops stop words and
/// short tokens, deduplicates preserving first-seen order. Deterministic;
/// empty input yields an empty vec.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    if max_keywords == 0 {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for token in tokenize(text) {
        if !is_keyword(&token) {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(token);
            if keywords.len() == max_keywords {
                break;
            }
        }
    }
    keywords
}

/// Uncapped keyword set for `text`, same normalization as [`extract_keywords`].
pub fn keyword_set(text: &str) -> HashSet<String> {
    tokenize(text).filter(|t| is_keyword(t)).collect()
}

/// A ticket reference found in free text: the raw span as written plus the
/// normalized ticket id. Produced transiently, consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReferenceMatch {
    pub raw_text: String,
    pub ticket_id: String,
}

/// Find the first ticket reference (e.g. `PROJ-1001`) in reading order.
///
/// Matching is case-insensitive; the id is uppercased, so `proj-7` comes
/// back as `PROJ-7`. Bare numbers and bare letters never match.
pub fn find_ticket_reference(text: &str) -> Option<TicketReferenceMatch> {
    TICKET_RE.find(text).map(|m| TicketReferenceMatch {
        raw_text: m.as_str().to_string(),
        ticket_id: m.as_str().to_uppercase(),
    })
}

/// [`find_ticket_reference`], id only.
pub fn extract_ticket_reference(text: &str) -> Option<String> {
    find_ticket_reference(text).map(|m| m.ticket_id)
}

/// Word-set (Jaccard) similarity between two texts, in `[0, 1]`.
///
/// Both texts go through keyword normalization first; if either side
/// normalizes to an empty set the similarity is `0.0` by definition.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let words_a = keyword_set(a);
    let words_b = keyword_set(b);

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64
}

/// Collapse runs of whitespace and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaned excerpt of `text`, truncated to `max_chars` with an ellipsis.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let cleaned = clean_text(text);
    match cleaned.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &cleaned[..idx]),
        None => cleaned,
    }
}
