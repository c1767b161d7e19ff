//! Tokenization helpers and shared surface patterns.
//!
//! Every heuristic here is a literal pattern: numbers, entity-like
//! capitalized runs and attribution phrases. They are approximations and
//! will produce false positives and negatives on unusual prose.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Figures, currency amounts, percentages and magnitude words ("$50M",
/// "3.5%", "12 million").
pub(crate) static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\$?\b\d[\d,]*(?:\.\d+)?(?:\s?(?:%|percent\b|million\b|billion\b|trillion\b|thousand\b)|[kmbt]\b)?",
    )
    .unwrap()
});

/// Two or more adjacent capitalized words, optionally joined by a lowercase
/// connective ("Bank of England"), or an all-caps acronym.
pub(crate) static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][\w&'-]*(?:\s+(?:of|the|for|and|de|van|von)\s+[A-Z][\w&'-]*|\s+[A-Z][\w&'-]*)+|\b[A-Z]{2,}\b",
    )
    .unwrap()
});

static CAPITALIZED_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][\w&'-]*").unwrap());

static NAME_AFTER_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?i:said|says|told|announced|stated|confirmed|added|noted|explained|wrote|warned|according\s+to)",
        r"\s+(?P<name>[A-Z][\w.'-]*(?:\s+[A-Z][\w.'-]*)*)",
    ))
    .unwrap()
});

static NAME_BEFORE_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<name>\b[A-Z][\w.'-]*(?:\s+[A-Z][\w.'-]*)*)(?:,[^,]{1,60},)?",
        r"\s+(?i:said|says|told|announced|stated|confirmed|added|noted|explained|wrote|warned)\b",
    ))
    .unwrap()
});

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:ceo|cfo|cto|chief\s+\w+\s+officer|president|spokesperson|spokesman|spokeswoman",
        r"|director|minister|secretary|chairman|chairwoman|professor|dr\.|senator|governor|mayor",
        r"|analyst|economist|manager|founder|head\s+of)\b",
    ))
    .unwrap()
});

static REPORTING_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:said|says|told|announced|stated|confirmed|added|noted|explained|wrote|warned|according\s+to)\b",
    )
    .unwrap()
});

/// Attribution phrases counted for the detailed metrics, named or not.
pub(crate) static ATTRIBUTION_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:according\s+to|sources?\s+(?:say|said|claim|report)|officials?\s+(?:said|stated|confirmed)",
        r"|in\s+a\s+statement|told\s+reporters)\b",
    ))
    .unwrap()
});

// ---------------------------------------------------------------------------
// Lexicons
// ---------------------------------------------------------------------------

pub(crate) static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "is", "it",
        "that", "this", "with", "as", "by", "from", "was", "were", "are", "be", "been", "has",
        "have", "had", "not", "no", "do", "does", "did", "will", "would", "could", "should", "can",
        "may", "might", "if", "then", "than", "so", "up", "out", "about", "into", "over", "after",
        "before", "between", "through", "just", "also", "very", "more", "most", "some", "any",
        "each", "every", "all", "both", "few", "other", "such", "only", "own", "same", "too",
        "how", "what", "which", "who", "when", "where", "why", "its", "their", "his", "her",
    ]
    .into_iter()
    .collect()
});

/// Subjects that look like a name to the capitalization pattern but do not
/// identify anyone.
static VAGUE_SUBJECTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "sources", "source", "officials", "official", "people", "experts", "critics", "analysts",
        "observers", "insiders", "reports", "some", "many", "they", "he", "she", "it", "we", "i",
        "you", "one", "someone", "everyone", "this", "that", "a", "an",
    ]
    .into_iter()
    .collect()
});

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Whitespace tokens with surrounding punctuation stripped; empty tokens
/// (bare punctuation) are dropped.
pub(crate) fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
}

pub(crate) fn word_count(text: &str) -> usize {
    word_tokens(text).count()
}

/// Lowercased tokens that are not stopwords.
pub(crate) fn content_words(text: &str) -> BTreeSet<String> {
    word_tokens(text)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(w.as_str()))
        .collect()
}

/// Canonical form of a numeric token so "$50M" and "50 million" compare equal.
pub(crate) fn normalize_number(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut out: String = lower
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    for (word, short) in [
        ("percent", "%"),
        ("trillion", "t"),
        ("billion", "b"),
        ("million", "m"),
        ("thousand", "k"),
    ] {
        if out.ends_with(word) {
            out.truncate(out.len() - word.len());
            out.push_str(short);
            break;
        }
    }
    out
}

pub(crate) fn numbers_in(text: &str) -> BTreeSet<String> {
    NUMBER_RE
        .find_iter(text)
        .map(|m| normalize_number(m.as_str()))
        .collect()
}

pub(crate) fn capitalized_words(text: &str) -> Vec<&str> {
    CAPITALIZED_WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub(crate) fn has_number(text: &str) -> bool {
    NUMBER_RE.is_match(text)
}

pub(crate) fn has_entity(text: &str) -> bool {
    ENTITY_RE.is_match(text)
}

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

fn is_named(name: &str) -> bool {
    let name = name.trim();
    let name = name.strip_prefix("The ").unwrap_or(name);
    match name.split_whitespace().next() {
        Some(first) => !VAGUE_SUBJECTS.contains(first.to_lowercase().as_str()),
        None => false,
    }
}

/// True when `context` names who is speaking: a reporting verb next to a
/// capitalized, non-vague subject, or a job title alongside a reporting verb.
pub(crate) fn has_named_attribution(context: &str) -> bool {
    let named = |re: &Regex| {
        re.captures_iter(context)
            .filter_map(|c| c.name("name"))
            .any(|m| is_named(m.as_str()))
    };
    if named(&NAME_AFTER_VERB_RE) || named(&NAME_BEFORE_VERB_RE) {
        return true;
    }
    TITLE_RE.is_match(context) && REPORTING_VERB_RE.is_match(context)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn context_around(text: &str, start: usize, end: usize, width: usize) -> String {
    let mid = (start + end) / 2;
    let half = width / 2;
    let ctx_start = mid.saturating_sub(half);
    let ctx_end = std::cmp::min(text.len(), mid + half);

    let ctx_start = snap_to_char_boundary(text, ctx_start, false);
    let ctx_end = snap_to_char_boundary(text, ctx_end, true);

    let snippet = text[ctx_start..ctx_end].replace('\n', " ");
    let prefix = if ctx_start > 0 { "..." } else { "" };
    let suffix = if ctx_end < text.len() { "..." } else { "" };
    format!("{prefix}{snippet}{suffix}")
}

/// Snap a byte offset to a valid char boundary.
/// If `forward` is true, snap forward; otherwise snap backward.
pub(crate) fn snap_to_char_boundary(text: &str, pos: usize, forward: bool) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    if forward {
        while p < text.len() && !text.is_char_boundary(p) {
            p += 1;
        }
    } else {
        while p > 0 && !text.is_char_boundary(p) {
            p -= 1;
        }
    }
    p
}

/// Round to an integer score in [0, 100].
pub(crate) fn to_score(value: f64) -> i32 {
    (value.round() as i32).clamp(0, 100)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
