//! Fact checking: attribution, consistency with supplied facts, objectivity
//! and source credibility.
//!
//! None of this verifies anything against the world. Every sub-score is a
//! surface proxy computed from the article text and the request's own facts
//! and sources.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::claims::{self, Claim, ClaimKind, Reference};
use crate::text::{
    capitalized_words, content_words, has_named_attribution, numbers_in, to_score, word_tokens,
    STOPWORDS,
};
use crate::text_stats::sentences;
use crate::weights::WEIGHTS;
use crate::{Article, Issue, Severity, SourceRef, Span};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    Medium,
    Unknown,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReliability {
    pub source: String,
    pub reliability: Reliability,
    pub score: i32,
    pub category: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactCheckReport {
    pub overall_score: i32,
    pub credibility_score: i32,
    pub objectivity_score: i32,
    pub source_attribution_score: i32,
    pub fact_consistency_score: i32,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub verified_claims: Vec<Claim>,
    pub flagged_content: Vec<Issue>,
    pub source_reliability: Vec<SourceReliability>,
}

// ---------------------------------------------------------------------------
// Lexicons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BiasKind {
    StronglyPositive,
    StronglyNegative,
    Loaded,
    Opinion,
    Emotional,
}

impl BiasKind {
    fn rule(&self) -> &'static str {
        match self {
            BiasKind::StronglyPositive => "bias.strongly_positive",
            BiasKind::StronglyNegative => "bias.strongly_negative",
            BiasKind::Loaded => "bias.loaded_language",
            BiasKind::Opinion => "bias.opinion_marker",
            BiasKind::Emotional => "bias.emotional_language",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BiasKind::StronglyPositive => "Strongly positive language",
            BiasKind::StronglyNegative => "Strongly negative language",
            BiasKind::Loaded => "Unsupported assertion",
            BiasKind::Opinion => "Opinion marker",
            BiasKind::Emotional => "Emotional language",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            BiasKind::StronglyPositive | BiasKind::StronglyNegative => Severity::Error,
            BiasKind::Loaded => Severity::Warning,
            BiasKind::Opinion | BiasKind::Emotional => Severity::Info,
        }
    }

    fn penalty(&self) -> i32 {
        match self {
            BiasKind::StronglyPositive | BiasKind::StronglyNegative => WEIGHTS.strong_bias_penalty,
            BiasKind::Loaded => WEIGHTS.loaded_language_penalty,
            BiasKind::Opinion => WEIGHTS.opinion_marker_penalty,
            BiasKind::Emotional => WEIGHTS.emotional_word_penalty,
        }
    }
}

fn lexicon_regex(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t).replace('\'', "(?:'|\u{2019})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

static BIAS_LEXICON: Lazy<Vec<(BiasKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            BiasKind::StronglyPositive,
            lexicon_regex(&[
                "amazing",
                "incredible",
                "fantastic",
                "outstanding",
                "revolutionary",
                "groundbreaking",
                "miraculous",
            ]),
        ),
        (
            BiasKind::StronglyNegative,
            lexicon_regex(&[
                "terrible",
                "awful",
                "disaster",
                "catastrophic",
                "devastating",
                "horrific",
                "appalling",
            ]),
        ),
        (
            BiasKind::Loaded,
            lexicon_regex(&[
                "obviously",
                "clearly",
                "undoubtedly",
                "everyone knows",
                "it's clear that",
                "without question",
                "without a doubt",
                "it's obvious",
            ]),
        ),
        (
            BiasKind::Opinion,
            lexicon_regex(&[
                "i think",
                "i believe",
                "in my opinion",
                "personally",
                "it seems",
                "appears to be",
                "might be",
                "could be",
            ]),
        ),
        (
            BiasKind::Emotional,
            lexicon_regex(&["shocking", "stunning", "unbelievable", "tragic", "wonderful"]),
        ),
    ]
});

fn neutral_alternative(term: &str) -> &'static str {
    match term.to_lowercase().as_str() {
        "amazing" => "'notable'",
        "incredible" => "'significant'",
        "terrible" => "'concerning'",
        "devastating" => "'substantial'",
        "obviously" => "'reportedly'",
        "clearly" => "'according to sources'",
        _ => "more neutral language",
    }
}

static VERIFICATION_PHRASES: &[&str] = &[
    "verified",
    "confirmed",
    "corroborated",
    "independently verified",
    "fact-checked",
];

static ANONYMOUS_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "",
        "anonymous",
        "unnamed",
        "unknown",
        "source",
        "sources",
        "a source",
        "an official",
        "officials",
        "insider",
        "an insider",
    ]
    .into_iter()
    .collect()
});

// ---------------------------------------------------------------------------
// Source reliability
// ---------------------------------------------------------------------------

static URL_DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://(?:www\.)?([^/\s:?#]+)").unwrap());

const HIGH_DOMAINS: &[&str] = &[
    "reuters.com",
    "ap.org",
    "bbc.com",
    "bbc.co.uk",
    "npr.org",
    "pbs.org",
    "cbc.ca",
    "abc.net.au",
];

const MEDIUM_DOMAINS: &[&str] = &[
    "cnn.com",
    "foxnews.com",
    "nbc.com",
    "cbs.com",
    "abcnews.go.com",
    "washingtonpost.com",
    "nytimes.com",
];

const HIGH_OUTLETS: &[&str] = &[
    "reuters",
    "associated press",
    "ap",
    "bbc",
    "npr",
    "pbs",
    "cbc",
    "abc australia",
];

const MEDIUM_OUTLETS: &[&str] = &[
    "cnn",
    "fox news",
    "nbc",
    "nbc news",
    "cbs",
    "cbs news",
    "abc news",
    "washington post",
    "the washington post",
    "new york times",
    "the new york times",
];

fn domain_matches(domain: &str, known: &str) -> bool {
    domain == known
        || domain
            .strip_suffix(known)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn classify_domain(domain: &str) -> (Reliability, i32, &'static str) {
    if HIGH_DOMAINS.iter().any(|d| domain_matches(domain, d)) {
        (Reliability::High, 90, "major_news_outlet")
    } else if MEDIUM_DOMAINS.iter().any(|d| domain_matches(domain, d)) {
        (Reliability::Medium, 70, "established_media")
    } else if domain.ends_with(".edu") {
        (Reliability::High, 85, "academic")
    } else if domain.ends_with(".gov") {
        (Reliability::High, 95, "government")
    } else if domain.ends_with(".org") {
        (Reliability::Medium, 60, "organization")
    } else {
        (Reliability::Unknown, 40, "unverified_source")
    }
}

fn classify_outlet(org: &str) -> (Reliability, i32, &'static str) {
    let org = org.trim().to_lowercase();
    if HIGH_OUTLETS.contains(&org.as_str()) {
        (Reliability::High, 90, "major_news_outlet")
    } else if MEDIUM_OUTLETS.contains(&org.as_str()) {
        (Reliability::Medium, 70, "established_media")
    } else {
        (Reliability::Unknown, 40, "unverified_source")
    }
}

/// Classify a source by its url's domain, falling back to its organization.
pub fn source_reliability(source: &SourceRef) -> SourceReliability {
    let url = source.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let org = source
        .organization
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty());

    let (reliability, score, category) = match (url, org) {
        (Some(url), _) => match URL_DOMAIN_RE.captures(url).and_then(|c| c.get(1)) {
            Some(domain) => classify_domain(&domain.as_str().to_lowercase()),
            None => (Reliability::Invalid, 0, "invalid_url"),
        },
        (None, Some(org)) => classify_outlet(org),
        (None, None) => (Reliability::Unknown, 50, "unverified"),
    };

    SourceReliability {
        source: source.identity(),
        reliability,
        score,
        category,
    }
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Attribution context for a quote: its own sentence with the quoted words
/// removed.
fn attribution_context(text: &str, sentence_spans: &[Span], quote: Span) -> String {
    let Some(sentence) = sentence_spans
        .iter()
        .find(|s| s.start <= quote.start && quote.start < s.end)
    else {
        return String::new();
    };
    let before = &text[sentence.start..quote.start];
    let after = &text[quote.end.min(sentence.end)..sentence.end];
    format!("{before} {after}")
}

struct Attribution {
    score: i32,
    unattributed: Vec<Span>,
}

fn score_attribution(text: &str, claims: &[Claim]) -> Attribution {
    let quotes: Vec<Span> = claims
        .iter()
        .filter(|c| c.kind == ClaimKind::Quote)
        .map(|c| c.span)
        .collect();
    if quotes.is_empty() {
        return Attribution {
            score: 100,
            unattributed: Vec::new(),
        };
    }

    let sentence_spans = sentences(text);
    let unattributed: Vec<Span> = quotes
        .iter()
        .copied()
        .filter(|q| !has_named_attribution(&attribution_context(text, &sentence_spans, *q)))
        .collect();

    let attributed = quotes.len() - unattributed.len();
    let floor = WEIGHTS.unattributed_quote_floor;
    let ratio = attributed as f64 / quotes.len() as f64;
    Attribution {
        score: to_score(floor + (100.0 - floor) * ratio),
        unattributed,
    }
}

fn salient_tokens(fact: &str) -> BTreeSet<String> {
    let mut tokens = numbers_in(fact);
    tokens.extend(
        capitalized_words(fact)
            .into_iter()
            .map(str::to_lowercase)
            .filter(|w| !STOPWORDS.contains(w.as_str())),
    );
    if tokens.is_empty() {
        tokens = content_words(fact);
    }
    tokens
}

fn score_consistency(text: &str, facts: &[String]) -> i32 {
    let facts: Vec<&str> = facts
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();
    if facts.is_empty() {
        return WEIGHTS.no_facts_default;
    }

    // Same tokenizers as salient_tokens, plus whole words.
    let mut present = numbers_in(text);
    present.extend(capitalized_words(text).into_iter().map(str::to_lowercase));
    present.extend(word_tokens(text).map(str::to_lowercase));

    let matched = facts
        .iter()
        .filter(|fact| {
            let tokens = salient_tokens(fact);
            if tokens.is_empty() {
                return false;
            }
            let hits = tokens.iter().filter(|t| present.contains(*t)).count();
            hits as f64 / tokens.len() as f64 >= WEIGHTS.fact_token_match_ratio
        })
        .count();
    to_score(100.0 * matched as f64 / facts.len() as f64)
}

fn score_objectivity(text: &str, flagged: &mut Vec<Issue>) -> i32 {
    let mut penalty = 0;
    for (kind, re) in BIAS_LEXICON.iter() {
        for m in re.find_iter(text) {
            penalty += kind.penalty();
            flagged.push(
                Issue::new(
                    kind.severity(),
                    kind.rule(),
                    format!(
                        "{} \"{}\"; consider {}",
                        kind.label(),
                        m.as_str(),
                        neutral_alternative(m.as_str())
                    ),
                )
                .at(Span::new(m.start(), m.end())),
            );
        }
    }
    (100 - penalty).clamp(0, 100)
}

fn is_anonymous(source: &SourceRef) -> bool {
    let name = source.name.trim().to_lowercase();
    ANONYMOUS_NAMES.contains(name.as_str()) || name.starts_with("anonymous")
}

fn source_credibility(source: &SourceRef, reliability: &SourceReliability) -> f64 {
    if is_anonymous(source) {
        return WEIGHTS.anonymous_source_credibility;
    }
    let present = |f: &Option<String>| f.as_deref().is_some_and(|v| !v.trim().is_empty());
    let mut score = WEIGHTS.named_source_credibility;
    if present(&source.title) {
        score += WEIGHTS.titled_source_bonus;
    }
    if present(&source.organization) || present(&source.url) {
        score += WEIGHTS.affiliated_source_bonus;
    }
    if reliability.reliability == Reliability::High {
        score += WEIGHTS.reliable_source_bonus;
    }
    score.min(100.0)
}

fn verification_bonus(text: &str) -> i32 {
    let lower = text.to_lowercase();
    let count = VERIFICATION_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .count() as i32;
    (count * WEIGHTS.verification_bonus_step).min(WEIGHTS.verification_bonus_cap)
}

fn score_credibility(
    text: &str,
    sources: &[SourceRef],
    reliability: &[SourceReliability],
    has_unattributed: bool,
) -> i32 {
    let base = if sources.is_empty() {
        WEIGHTS.missing_sources_credibility
    } else {
        let total: f64 = sources
            .iter()
            .zip(reliability)
            .map(|(s, r)| source_credibility(s, r))
            .sum();
        total / sources.len() as f64
    };
    let mut score = to_score(base) + verification_bonus(text);
    if has_unattributed {
        score = score.min(WEIGHTS.unattributed_credibility_cap);
    }
    score.clamp(0, 100)
}

// ---------------------------------------------------------------------------
// Issues and recommendations
// ---------------------------------------------------------------------------

fn sub_score_issues(scores: &[(&'static str, &'static str, i32)]) -> Vec<Issue> {
    scores
        .iter()
        .filter(|(_, _, score)| *score < WEIGHTS.fact_issue_threshold)
        .map(|&(rule, label, score)| {
            let severity = if score < WEIGHTS.fact_error_threshold {
                Severity::Error
            } else {
                Severity::Warning
            };
            Issue::new(severity, rule, format!("{label} score is low ({score}/100)"))
        })
        .collect()
}

fn category_advice(rule: &str) -> &'static str {
    match rule {
        "source_attribution" => {
            "Add more specific source attributions. Use names, titles, and organizations when possible."
        }
        "objectivity" => {
            "Remove emotional language and opinion markers. Stick to factual reporting."
        }
        "fact_consistency" => {
            "Ensure all provided facts are incorporated accurately in the article."
        }
        _ => "Include more references to credible sources and verification statements.",
    }
}

fn recommendations(
    scores: &[(&'static str, &'static str, i32)],
    flagged: usize,
    overall: i32,
) -> Vec<String> {
    let mut weak: Vec<&(&str, &str, i32)> = scores
        .iter()
        .filter(|(_, _, score)| *score < WEIGHTS.fact_recommendation_threshold)
        .collect();
    weak.sort_by_key(|(_, _, score)| *score);

    let mut out: Vec<String> = weak
        .into_iter()
        .map(|(rule, _, _)| category_advice(rule).to_string())
        .collect();
    if flagged > WEIGHTS.flagged_review_min {
        out.push(
            "Review flagged content for potential bias and replace with neutral language."
                .to_string(),
        );
    }
    if overall < WEIGHTS.fact_revision_threshold {
        out.push(
            "Consider major revision focusing on objectivity and source verification.".to_string(),
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check an article against its own facts and sources. Never fails; empty
/// inputs only lower the scores.
pub fn check(article: &Article) -> FactCheckReport {
    let text = article.text.as_str();
    let reference = Reference::new(&article.facts, &article.sources);
    let verified_claims = claims::extract(text, &reference);

    let mut flagged_content: Vec<Issue> = Vec::new();

    let attribution = score_attribution(text, &verified_claims);
    for span in &attribution.unattributed {
        flagged_content.push(
            Issue::new(
                Severity::Warning,
                "unattributed_quote",
                "Quote has no named speaker; attribute it to a person, title or organization",
            )
            .at(*span),
        );
    }

    let objectivity = score_objectivity(text, &mut flagged_content);
    flagged_content.sort_by_key(|issue| issue.location.map(|s| (s.start, s.end)));

    let consistency = score_consistency(text, &article.facts);

    let source_reliability: Vec<SourceReliability> =
        article.sources.iter().map(source_reliability).collect();
    let credibility = score_credibility(
        text,
        &article.sources,
        &source_reliability,
        !attribution.unattributed.is_empty(),
    );

    let w = WEIGHTS.fact;
    let overall = to_score(
        w.objectivity * objectivity as f64
            + w.source_attribution * attribution.score as f64
            + w.fact_consistency * consistency as f64
            + w.credibility * credibility as f64,
    );

    let scores = [
        ("source_attribution", "Source attribution", attribution.score),
        ("objectivity", "Objectivity", objectivity),
        ("fact_consistency", "Fact consistency", consistency),
        ("credibility", "Credibility", credibility),
    ];
    let issues = sub_score_issues(&scores);
    let recommendations = recommendations(&scores, flagged_content.len(), overall);

    tracing::debug!(
        overall,
        attribution = attribution.score,
        objectivity,
        consistency,
        credibility,
        claims = verified_claims.len(),
        flagged = flagged_content.len(),
        "fact check complete"
    );

    FactCheckReport {
        overall_score: overall,
        credibility_score: credibility,
        objectivity_score: objectivity,
        source_attribution_score: attribution.score,
        fact_consistency_score: consistency,
        issues,
        recommendations,
        verified_claims,
        flagged_content,
        source_reliability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleTag;

    fn article(text: &str) -> Article {
        Article::new(text, StyleTag::News)
    }

    fn source(name: &str) -> SourceRef {
        SourceRef {
            name: name.to_string(),
            ..SourceRef::default()
        }
    }

    #[test]
    fn no_quotes_scores_full_attribution() {
        let report = check(&article("The council met on Tuesday."));
        assert_eq!(report.source_attribution_score, 100);
    }

    #[test]
    fn unattributed_quote_hits_the_floor() {
        let report = check(&article("\"Prices will rise,\" he said."));
        assert_eq!(report.source_attribution_score, 50);
        assert!(report
            .flagged_content
            .iter()
            .any(|i| i.rule == "unattributed_quote"));
    }

    #[test]
    fn named_quote_is_attributed() {
        let report = check(&article(
            "\"Prices will rise,\" said Jane Doe, chief economist at Acme.",
        ));
        assert_eq!(report.source_attribution_score, 100);
    }

    #[test]
    fn attribution_must_share_the_quote_sentence() {
        let report = check(&article(
            "\"We will win.\" Jane Doe said the weather was fine.",
        ));
        assert_eq!(
            report.source_attribution_score, 50,
            "A name in the next sentence should not attribute the quote"
        );
    }

    #[test]
    fn mixed_quotes_scale_between_floor_and_full() {
        let text = "\"It is done,\" said Jane Doe. \"Maybe not,\" someone replied.";
        let report = check(&article(text));
        assert_eq!(report.source_attribution_score, 75);
    }

    #[test]
    fn consistency_matches_numbers_and_names() {
        let a = article("Company X raised $50M in its latest round.")
            .with_facts(vec!["Company X raised $50M".to_string()]);
        assert_eq!(check(&a).fact_consistency_score, 100);

        let b = article("The startup raised money.").with_facts(vec![
            "Company X raised $50M".to_string(),
            "   ".to_string(),
        ]);
        assert_eq!(check(&b).fact_consistency_score, 0);
    }

    #[test]
    fn consistency_matches_dotted_abbreviations_and_curly_possessives() {
        let us = article("Exports to the U.S. rose 5% in March.")
            .with_facts(vec!["Exports to the U.S. rose 5%".to_string()]);
        assert_eq!(
            check(&us).fact_consistency_score,
            100,
            "A fact quoted verbatim with \"U.S.\" should be found"
        );

        let acme = article("Acme\u{2019}s revenue hit $5M this year.")
            .with_facts(vec!["Acme\u{2019}s revenue hit $5M".to_string()]);
        assert_eq!(
            check(&acme).fact_consistency_score,
            100,
            "A curly-apostrophe possessive should match itself"
        );
    }

    #[test]
    fn missing_facts_use_default() {
        assert_eq!(check(&article("Anything.")).fact_consistency_score, 50);
    }

    #[test]
    fn bias_tokens_reduce_objectivity_per_occurrence() {
        let report = check(&article(
            "The amazing plan was obviously a terrible idea. It was amazing.",
        ));
        // 15 (amazing) * 2 + 15 (terrible) + 10 (obviously)
        assert_eq!(report.objectivity_score, 45);
        let flagged: Vec<&str> = report.flagged_content.iter().map(|i| i.rule.as_str()).collect();
        assert_eq!(
            flagged,
            vec![
                "bias.strongly_positive",
                "bias.loaded_language",
                "bias.strongly_negative",
                "bias.strongly_positive",
            ]
        );
        assert!(report.flagged_content[0].message.contains("'notable'"));
        assert_eq!(report.flagged_content[0].severity, Severity::Error);
    }

    #[test]
    fn objectivity_floors_at_zero() {
        let text = "terrible ".repeat(10);
        assert_eq!(check(&article(&text)).objectivity_score, 0);
    }

    #[test]
    fn credibility_reflects_source_completeness() {
        let none = check(&article("Plain text."));
        assert_eq!(none.credibility_score, 40);

        let anon = check(&article("Plain text.").with_sources(vec![source("Anonymous")]));
        assert_eq!(anon.credibility_score, 20);

        let full = SourceRef {
            name: "Jane Doe".to_string(),
            title: Some("CEO".to_string()),
            organization: Some("Reuters".to_string()),
            url: None,
        };
        let named = check(&article("Plain text.").with_sources(vec![full]));
        assert_eq!(named.credibility_score, 100);
    }

    #[test]
    fn verification_language_adds_capped_bonus() {
        let report = check(&article(
            "The figures were verified, confirmed, corroborated and fact-checked.",
        ));
        assert_eq!(report.credibility_score, 60);
    }

    #[test]
    fn unattributed_quote_caps_credibility() {
        let full = SourceRef {
            name: "Jane Doe".to_string(),
            title: Some("CEO".to_string()),
            organization: Some("Acme".to_string()),
            url: Some("https://www.reuters.com/a".to_string()),
        };
        let report = check(&article("\"Trust us,\" they said.").with_sources(vec![full]));
        assert_eq!(report.credibility_score, 80);
    }

    #[test]
    fn reliability_classifies_domains_and_outlets() {
        let by_url = |url: &str| {
            source_reliability(&SourceRef {
                url: Some(url.to_string()),
                ..source("x")
            })
        };
        assert_eq!(by_url("https://www.reuters.com/world").score, 90);
        assert_eq!(by_url("https://news.bbc.co.uk/x").reliability, Reliability::High);
        assert_eq!(by_url("http://cnn.com").score, 70);
        assert_eq!(by_url("https://data.census.gov/t").score, 95);
        assert_eq!(by_url("https://mit.edu").score, 85);
        assert_eq!(by_url("https://example.org").score, 60);
        assert_eq!(by_url("https://blog.example.com").score, 40);
        assert_eq!(by_url("not a url").reliability, Reliability::Invalid);
        assert_eq!(by_url("https://notreuters.com").score, 40);

        let org = source_reliability(&SourceRef {
            organization: Some("Associated Press".to_string()),
            ..source("x")
        });
        assert_eq!(org.reliability, Reliability::High);
        assert_eq!(source_reliability(&source("x")).score, 50);
    }

    #[test]
    fn overall_is_weighted_combination() {
        let report = check(&article("\"Maybe,\" he said. It was a terrible day."));
        let expected = (0.30 * report.objectivity_score as f64
            + 0.25 * report.source_attribution_score as f64
            + 0.25 * report.fact_consistency_score as f64
            + 0.20 * report.credibility_score as f64)
            .round() as i32;
        assert_eq!(report.overall_score, expected);
    }

    #[test]
    fn weakest_categories_are_recommended_first() {
        let text = "terrible awful disaster catastrophic devastating horrific. \"Hi,\" he said.";
        let report = check(&article(text));
        assert!(report.objectivity_score < report.source_attribution_score);
        assert!(report.recommendations[0].starts_with("Remove emotional language"));
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Review flagged content")));
    }

    #[test]
    fn empty_article_still_reports() {
        let report = check(&article(""));
        assert!(report.verified_claims.is_empty());
        for score in [
            report.overall_score,
            report.credibility_score,
            report.objectivity_score,
            report.source_attribution_score,
            report.fact_consistency_score,
        ] {
            assert!((0..=100).contains(&score));
        }
    }
}
