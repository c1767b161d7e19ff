//! Quote and statement extraction.
//!
//! Quotes are spans between matching double-quote delimiters (straight or
//! curly). Statements are sentences carrying a figure, an entity-like name
//! or a named attribution. Nothing here checks a claim against the world;
//! confidence only measures how closely a claim echoes the supplied facts
//! and sources.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::text::{content_words, has_entity, has_named_attribution, has_number};
use crate::text_stats::{paragraphs, sentences};
use crate::weights::WEIGHTS;
use crate::{SourceRef, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    Quote,
    Statement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub kind: ClaimKind,
    pub content: String,
    pub span: Span,
    pub verifiable: bool,
    pub confidence: Confidence,
}

/// Facts and source identities a claim is compared against.
#[derive(Debug, Clone, Default)]
pub struct Reference {
    text: String,
    facts: Vec<String>,
    tokens: BTreeSet<String>,
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '$' && c != '%')
        .to_string()
}

/// `needle` occurs in `haystack` with no letter or digit glued to either end.
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, m)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + m.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

impl Reference {
    pub fn new(facts: &[String], sources: &[SourceRef]) -> Self {
        let mut parts: Vec<String> = facts.iter().map(|f| normalize(f)).collect();
        for source in sources {
            parts.push(normalize(&source.identity()));
        }
        let text = parts.join("\n");
        Self {
            tokens: content_words(&text),
            facts: facts
                .iter()
                .map(|f| normalize(f))
                .filter(|f| !f.is_empty())
                .collect(),
            text,
        }
    }

    fn confidence(&self, content: &str) -> Confidence {
        let norm = normalize(content);
        if norm.is_empty() {
            return Confidence::Low;
        }
        if contains_phrase(&self.text, &norm)
            || self.facts.iter().any(|f| contains_phrase(&norm, f))
        {
            return Confidence::High;
        }
        let words = content_words(content);
        if words.is_empty() {
            return Confidence::Low;
        }
        let shared = words.iter().filter(|w| self.tokens.contains(*w)).count();
        if shared as f64 / words.len() as f64 >= WEIGHTS.claim_medium_overlap {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

// ---------------------------------------------------------------------------
// Quote scanning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct QuoteSpan {
    content: Span,
    well_formed: bool,
}

struct OpenQuote {
    start: usize,
    nested: bool,
}

fn scan_quotes(text: &str, para: Span, out: &mut Vec<QuoteSpan>) {
    let mut straight: Option<OpenQuote> = None;
    let mut curly: Option<OpenQuote> = None;
    let mut depth = 0usize;

    for (offset, c) in text[para.start..para.end].char_indices() {
        let pos = para.start + offset;
        match c {
            '"' if curly.is_some() => {
                if let Some(q) = curly.as_mut() {
                    q.nested = true;
                }
            }
            '"' => match straight.take() {
                Some(q) => out.push(QuoteSpan {
                    content: Span::new(q.start, pos),
                    well_formed: !q.nested,
                }),
                None => {
                    straight = Some(OpenQuote {
                        start: pos + 1,
                        nested: false,
                    })
                }
            },
            '\u{201C}' => {
                if let Some(q) = straight.as_mut() {
                    q.nested = true;
                } else if let Some(q) = curly.as_mut() {
                    q.nested = true;
                    depth += 1;
                } else {
                    curly = Some(OpenQuote {
                        start: pos + c.len_utf8(),
                        nested: false,
                    });
                    depth = 1;
                }
            }
            '\u{201D}' if curly.is_some() => {
                depth -= 1;
                if depth == 0 {
                    if let Some(q) = curly.take() {
                        out.push(QuoteSpan {
                            content: Span::new(q.start, pos),
                            well_formed: !q.nested,
                        });
                    }
                }
            }
            '\u{2018}' => {
                for q in [straight.as_mut(), curly.as_mut()].into_iter().flatten() {
                    q.nested = true;
                }
            }
            _ => {}
        }
    }

    // Unterminated quotes run to the end of the paragraph.
    for q in [straight, curly].into_iter().flatten() {
        out.push(QuoteSpan {
            content: Span::new(q.start, para.end),
            well_formed: false,
        });
    }
}

fn quotes(text: &str) -> Vec<QuoteSpan> {
    let mut out = Vec::new();
    for para in paragraphs(text) {
        scan_quotes(text, para, &mut out);
    }
    out.retain(|q| !q.content.slice(text).trim().is_empty());
    out
}

/// Content spans of every quotation, terminated or not.
pub(crate) fn quote_spans(text: &str) -> Vec<Span> {
    quotes(text).into_iter().map(|q| q.content).collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn is_verifiable(content: &str) -> bool {
    has_number(content) || has_entity(content)
}

/// Extract quote and statement claims in order of appearance.
pub fn extract(text: &str, reference: &Reference) -> Vec<Claim> {
    let mut claims: Vec<Claim> = Vec::new();

    for q in quotes(text) {
        let content = q.content.slice(text);
        let (verifiable, confidence) = if q.well_formed {
            (is_verifiable(content), reference.confidence(content))
        } else {
            (false, Confidence::Low)
        };
        claims.push(Claim {
            kind: ClaimKind::Quote,
            content: content.to_string(),
            span: q.content,
            verifiable,
            confidence,
        });
    }

    for span in sentences(text) {
        let content = span.slice(text);
        if has_number(content) || has_entity(content) || has_named_attribution(content) {
            claims.push(Claim {
                kind: ClaimKind::Statement,
                content: content.to_string(),
                span,
                verifiable: is_verifiable(content),
                confidence: reference.confidence(content),
            });
        }
    }

    claims.sort_by_key(|c| c.span.start);
    claims
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_reference() -> Reference {
        Reference::new(&[], &[])
    }

    #[test]
    fn extracts_quotes_and_statements_in_order() {
        let text = "Acme Corp reported 12% growth. \"We are pleased,\" said Jane Doe. The weather was mild.";
        let claims = extract(text, &no_reference());
        let kinds: Vec<ClaimKind> = claims.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ClaimKind::Statement, ClaimKind::Statement, ClaimKind::Quote]
        );
        assert_eq!(claims[2].content, "We are pleased,");
        for c in &claims {
            assert_eq!(c.span.slice(text), c.content);
        }
    }

    #[test]
    fn plain_sentences_are_not_claims() {
        let claims = extract("the weather was mild. nobody minded.", &no_reference());
        assert!(claims.is_empty());
    }

    #[test]
    fn unterminated_quote_is_low_and_unverifiable() {
        let text = "He said \"Acme will pay 40 million and then";
        let claims = extract(text, &no_reference());
        let quote = claims
            .iter()
            .find(|c| c.kind == ClaimKind::Quote)
            .expect("quote claim");
        assert!(!quote.verifiable);
        assert_eq!(quote.confidence, Confidence::Low);
        assert!(quote.span.end <= text.len());
    }

    #[test]
    fn nested_quote_is_low_and_unverifiable() {
        let text = "She wrote \u{201C}the board said \u{201C}Acme owes 5 million\u{201D} today\u{201D} in a memo.";
        let claims = extract(text, &no_reference());
        let quotes: Vec<&Claim> = claims.iter().filter(|c| c.kind == ClaimKind::Quote).collect();
        assert_eq!(quotes.len(), 1);
        assert!(!quotes[0].verifiable);
        assert_eq!(quotes[0].confidence, Confidence::Low);
    }

    #[test]
    fn confidence_tracks_reference_overlap() {
        let facts = vec!["Company X raised $50M".to_string()];
        let reference = Reference::new(&facts, &[]);
        let high = extract("Company X raised $50M on Tuesday.", &reference);
        assert_eq!(high[0].confidence, Confidence::High);
        assert!(high[0].verifiable);

        let medium = extract("Company X raised money from 3 investors.", &reference);
        assert_eq!(medium[0].confidence, Confidence::Medium);

        let low = extract("Rainfall reached 40 millimetres in Leeds.", &reference);
        assert_eq!(low[0].confidence, Confidence::Low);
    }

    #[test]
    fn fact_matching_respects_word_boundaries() {
        let facts = vec!["They met yesterday".to_string()];
        let reference = Reference::new(&facts, &[]);
        let text = "\"Yes,\" she replied.";
        let quote = extract(text, &reference)
            .into_iter()
            .find(|c| c.kind == ClaimKind::Quote)
            .expect("quote claim");
        assert_ne!(
            quote.confidence,
            Confidence::High,
            "\"Yes\" should not match inside \"yesterday\""
        );

        assert!(contains_phrase("they met yesterday", "met"));
        assert!(!contains_phrase("they met yesterday", "yes"));
        assert!(contains_phrase("raised $50m on tuesday", "$50m"));
    }
}
