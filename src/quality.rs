//! Quality aggregation.
//!
//! Folds text statistics, the externally supplied sentiment, the fact-check
//! report and the style report into four weighted category scores, an
//! overall score and a professional rating tier.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::claims::{ClaimKind, Confidence};
use crate::fact_check::FactCheckReport;
use crate::style::{rules_for, ForbiddenPattern, StyleComplianceReport, Tone};
use crate::text::{
    has_named_attribution, has_number, round_to, to_score, word_count, word_tokens,
    ATTRIBUTION_PHRASE_RE, ENTITY_RE, NUMBER_RE,
};
use crate::text_stats::{paragraphs, population_std, sentences, TextStats};
use crate::weights::WEIGHTS;
use crate::{Article, Sentiment, SentimentLabel};

pub const WRITING_QUALITY: &str = "writing_quality";
pub const ACCURACY: &str = "accuracy";
pub const STRUCTURE: &str = "structure";
pub const VARIETY: &str = "variety";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ProfessionalRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ProfessionalRating {
    /// Tiers are inclusive at their lower bound.
    pub fn from_score(score: i32) -> Self {
        if score >= WEIGHTS.rating_excellent_min {
            ProfessionalRating::Excellent
        } else if score >= WEIGHTS.rating_good_min {
            ProfessionalRating::Good
        } else if score >= WEIGHTS.rating_fair_min {
            ProfessionalRating::Fair
        } else {
            ProfessionalRating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfessionalRating::Poor => "Poor - Major Overhaul Needed",
            ProfessionalRating::Fair => "Fair - Significant Revisions Required",
            ProfessionalRating::Good => "Good - Some Improvements Needed",
            ProfessionalRating::Excellent => "Excellent - Publication Ready",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryScore {
    pub score: i32,
    pub details: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub overall_score: i32,
    pub category_scores: BTreeMap<String, CategoryScore>,
    pub detailed_metrics: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub professional_rating: ProfessionalRating,
    pub rating_label: String,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Who / what / when / where / why cues for the lead paragraph.
static LEAD_ELEMENTS: Lazy<[Regex; 5]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\b(?:said|announced|stated|reported|confirmed)\b").unwrap(),
        Regex::new(r"(?i)\b(?:happened|occurred|took place|resulted)\b").unwrap(),
        Regex::new(concat!(
            r"(?i)\b(?:today|yesterday|tonight|this (?:week|month|year)|on \w+day|\d{1,2}/\d{1,2}",
            r"|(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2})\b",
        ))
        .unwrap(),
        Regex::new(r"\b(?i:in|at|from)\s+[A-Z][a-z]+").unwrap(),
        Regex::new(r"(?i)\b(?:because|due to|as a result|following)\b").unwrap(),
    ]
});

static TRANSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:however|furthermore|additionally|meanwhile|consequently|therefore|moreover",
        r"|nevertheless|in addition|on the other hand|as a result)\b",
    ))
    .unwrap()
});

static CONTRACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\w+(?:n['\u{2019}]t|['\u{2019}](?:re|ve|ll|d|m))\b|\b(?:it|that|there|he|she|what|let)['\u{2019}]s\b",
    )
    .unwrap()
});

// ---------------------------------------------------------------------------
// Shared counts
// ---------------------------------------------------------------------------

/// Sentences that name a speaker or use an attribution phrase.
fn attribution_count(text: &str) -> usize {
    sentences(text)
        .into_iter()
        .map(|s| s.slice(text))
        .filter(|s| has_named_attribution(s) || ATTRIBUTION_PHRASE_RE.is_match(s))
        .count()
}

fn weighted(parts: &[(f64, f64)]) -> i32 {
    to_score(parts.iter().map(|(w, v)| w * v).sum())
}

fn details(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// ---------------------------------------------------------------------------
// Writing quality
// ---------------------------------------------------------------------------

fn readability_score(grade: f64) -> f64 {
    if (6.0..=9.0).contains(&grade) {
        100.0
    } else if grade > 9.0 && grade <= 12.0 {
        80.0
    } else if grade > 12.0 && grade <= 16.0 {
        60.0
    } else if grade < 6.0 {
        80.0
    } else {
        40.0
    }
}

fn sentence_score(avg: f64, variety: f64) -> f64 {
    let base: f64 = if (15.0..=25.0).contains(&avg) {
        100.0
    } else if (10.0..15.0).contains(&avg) || (avg > 25.0 && avg <= 30.0) {
        80.0
    } else {
        60.0
    };
    if variety > 5.0 {
        (base + 10.0).min(100.0)
    } else {
        base
    }
}

fn grammar_score(text: &str, stats: &TextStats) -> f64 {
    let mut score = 100.0 * (1.0 - stats.passive_voice_ratio);
    let spans = sentences(text);
    let lowercase_start = spans.iter().any(|s| {
        s.slice(text)
            .chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(char::is_lowercase)
    });
    if lowercase_start {
        score -= 5.0;
    }
    let run_ons = spans
        .iter()
        .filter(|s| word_count(s.slice(text)) > WEIGHTS.run_on_sentence_words)
        .count();
    if run_ons as f64 > WEIGHTS.run_on_ratio * spans.len() as f64 {
        score -= 10.0;
    }
    score.clamp(0.0, 100.0)
}

fn sentiment_fit(sentiment: &Sentiment, tone: Tone) -> f64 {
    let confidence = sentiment.score.clamp(0.0, 1.0);
    let mismatch = 100.0 - WEIGHTS.tone_mismatch_penalty * confidence;
    match (tone, sentiment.label) {
        (Tone::Formal, SentimentLabel::Neutral) => 100.0,
        (Tone::Formal, _) => mismatch,
        (Tone::Casual, SentimentLabel::Positive) => 100.0,
        (Tone::Casual, SentimentLabel::Neutral) => 85.0,
        (Tone::Casual, SentimentLabel::Negative) => mismatch,
    }
}

/// Formal register: slang, first person outside quotes and contractions
/// each cost points.
fn register_score(text: &str, tone: Tone) -> f64 {
    if tone == Tone::Casual {
        return 100.0;
    }
    let mut score = 100.0;
    score -= 10.0 * ForbiddenPattern::InformalLanguage.find_all(text).len() as f64;
    if ForbiddenPattern::FirstPerson.find_all(text).len() > 2 {
        score -= 20.0;
    }
    score -= 5.0 * CONTRACTION_RE.find_iter(text).count() as f64;
    f64::max(score, 0.0)
}

fn evaluate_writing(
    article: &Article,
    stats: &TextStats,
    sentiment: &Sentiment,
    tone: Tone,
) -> CategoryScore {
    let text = article.text.as_str();
    let readability = readability_score(stats.grade_level);
    let sentence = sentence_score(stats.avg_sentence_length, stats.sentence_variety);
    let grammar = to_score(grammar_score(text, stats)) as f64;
    let tone_score =
        to_score(0.5 * sentiment_fit(sentiment, tone) + 0.5 * register_score(text, tone)) as f64;

    let w = WEIGHTS.writing;
    CategoryScore {
        score: weighted(&[
            (w.readability, readability),
            (w.sentence, sentence),
            (w.grammar, grammar),
            (w.tone, tone_score),
        ]),
        details: details(&[
            ("readability_score", readability),
            ("grade_level", stats.grade_level),
            ("flesch_reading_ease", stats.flesch_score),
            ("sentence_score", sentence),
            ("avg_sentence_length", stats.avg_sentence_length),
            ("sentence_variety", stats.sentence_variety),
            ("grammar_score", grammar),
            ("tone_score", tone_score),
            ("passive_voice_ratio", stats.passive_voice_ratio),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Accuracy
// ---------------------------------------------------------------------------

fn fact_incorporation(text: &str, facts: &[String]) -> i32 {
    let facts: Vec<&str> = facts
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();
    if facts.is_empty() {
        return WEIGHTS.no_facts_default;
    }
    let present: HashSet<String> = word_tokens(text).map(str::to_lowercase).collect();
    let incorporated = facts
        .iter()
        .filter(|fact| {
            let words: HashSet<String> = word_tokens(fact).map(str::to_lowercase).collect();
            if words.is_empty() {
                return false;
            }
            let found = words.iter().filter(|w| present.contains(*w)).count();
            found as f64 >= words.len() as f64 * WEIGHTS.fact_token_match_ratio
        })
        .count();
    to_score(100.0 * incorporated as f64 / facts.len() as f64)
}

fn evaluate_accuracy(article: &Article, fact_report: &FactCheckReport) -> CategoryScore {
    let incorporation = fact_incorporation(&article.text, &article.facts) as f64;
    let high = fact_report
        .verified_claims
        .iter()
        .filter(|c| c.confidence == Confidence::High)
        .count();
    let high_points = (high as i32 * WEIGHTS.high_confidence_claim_points).min(100) as f64;

    let w = WEIGHTS.accuracy;
    CategoryScore {
        score: weighted(&[
            (w.fact_check, fact_report.overall_score as f64),
            (w.fact_incorporation, incorporation),
            (w.high_confidence, high_points),
        ]),
        details: details(&[
            ("fact_check_score", fact_report.overall_score as f64),
            ("fact_incorporation", incorporation),
            ("high_confidence_claims", high as f64),
            ("high_confidence_score", high_points),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

fn lead_score(lead: &str) -> f64 {
    let words = word_count(lead);
    if words == 0 {
        return 0.0;
    }
    let found = LEAD_ELEMENTS.iter().filter(|re| re.is_match(lead)).count();
    let element_score = found as f64 / LEAD_ELEMENTS.len() as f64 * 100.0;
    let length_score = match words {
        25..=35 => 100.0,
        20..=40 => 85.0,
        15..=50 => 70.0,
        _ => 50.0,
    };
    (element_score * 0.6 + length_score * 0.4).round()
}

/// Share of adjacent paragraph pairs whose information density does not
/// rise. Density counts figures, entity names and attributions per word.
fn pyramid_score(paragraph_texts: &[&str]) -> f64 {
    if paragraph_texts.is_empty() {
        return 0.0;
    }
    if paragraph_texts.len() == 1 {
        return 100.0;
    }
    let importance: Vec<f64> = paragraph_texts
        .iter()
        .map(|p| {
            let words = word_count(p).max(1) as f64;
            let signals = NUMBER_RE.find_iter(p).count()
                + ENTITY_RE.find_iter(p).count()
                + attribution_count(p);
            signals as f64 / words
        })
        .collect();
    let pairs = importance.len() - 1;
    let holding = importance
        .windows(2)
        .filter(|w| w[1] <= w[0] + WEIGHTS.pyramid_tolerance)
        .count();
    (100.0 * holding as f64 / pairs as f64).round()
}

fn paragraph_score(paragraph_texts: &[&str]) -> f64 {
    if paragraph_texts.is_empty() {
        return 0.0;
    }
    let lengths: Vec<f64> = paragraph_texts
        .iter()
        .map(|p| word_count(p) as f64)
        .collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let length_score = if (50.0..=150.0).contains(&mean) {
        100.0
    } else if (30.0..=200.0).contains(&mean) {
        85.0
    } else {
        60.0
    };
    let cv = if mean > 0.0 {
        population_std(&lengths) / mean
    } else {
        0.0
    };
    let uniformity = 100.0 * (1.0 - cv.min(1.0));
    (length_score * 0.7 + uniformity * 0.3).round()
}

fn transition_score(paragraph_texts: &[&str]) -> f64 {
    if paragraph_texts.len() < 2 {
        return 100.0;
    }
    let opened = paragraph_texts[1..]
        .iter()
        .filter(|p| {
            let first = sentences(p)
                .first()
                .map(|s| s.slice(p))
                .unwrap_or_default();
            TRANSITION_RE.is_match(first)
        })
        .count();
    let rate = opened as f64 / (paragraph_texts.len() - 1) as f64;
    if rate >= 0.7 {
        100.0
    } else if rate >= 0.5 {
        85.0
    } else if rate >= 0.3 {
        70.0
    } else {
        50.0
    }
}

fn evaluate_structure(article: &Article) -> CategoryScore {
    let text = article.text.as_str();
    let paragraph_texts: Vec<&str> = paragraphs(text).into_iter().map(|p| p.slice(text)).collect();
    let lead = lead_score(paragraph_texts.first().copied().unwrap_or_default());
    let pyramid = pyramid_score(&paragraph_texts);
    let para = paragraph_score(&paragraph_texts);
    let transitions = transition_score(&paragraph_texts);

    let w = WEIGHTS.structure;
    CategoryScore {
        score: weighted(&[
            (w.lead, lead),
            (w.pyramid, pyramid),
            (w.paragraphs, para),
            (w.transitions, transitions),
        ]),
        details: details(&[
            ("lead_quality", lead),
            ("inverted_pyramid", pyramid),
            ("paragraph_structure", para),
            ("transitions", transitions),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Variety
// ---------------------------------------------------------------------------

fn vocabulary_score(diversity: f64) -> f64 {
    if diversity > 0.6 {
        100.0
    } else if diversity > 0.5 {
        85.0
    } else if diversity > 0.4 {
        70.0
    } else {
        50.0
    }
}

fn starter_variety(text: &str) -> f64 {
    let starters: Vec<String> = sentences(text)
        .into_iter()
        .filter_map(|s| word_tokens(s.slice(text)).next().map(str::to_lowercase))
        .collect();
    if starters.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&String> = starters.iter().collect();
    (100.0 * distinct.len() as f64 / starters.len() as f64).round()
}

fn evaluate_variety(
    article: &Article,
    stats: &TextStats,
    fact_report: &FactCheckReport,
) -> CategoryScore {
    let text = article.text.as_str();
    let vocabulary = vocabulary_score(stats.vocabulary_diversity);
    let structure = starter_variety(text);

    let has_quotes = fact_report
        .verified_claims
        .iter()
        .any(|c| c.kind == ClaimKind::Quote);
    let has_statistics = has_number(text);
    let has_sources = attribution_count(text) > 0;
    let present = [has_quotes, has_statistics, has_sources]
        .iter()
        .filter(|p| **p)
        .count();
    let content_types = (present as f64 * 100.0 / 3.0).round();

    let w = WEIGHTS.variety;
    CategoryScore {
        score: weighted(&[
            (w.vocabulary, vocabulary),
            (w.sentence_structure, structure),
            (w.content_types, content_types),
        ]),
        details: details(&[
            ("vocabulary_score", vocabulary),
            ("vocabulary_diversity", stats.vocabulary_diversity),
            ("sentence_structure_variety", structure),
            ("content_type_variety", content_types),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Advice
// ---------------------------------------------------------------------------

fn category_advice(category: &str) -> [&'static str; 2] {
    match category {
        WRITING_QUALITY => [
            "Improve readability by using shorter sentences and simpler vocabulary",
            "Vary sentence structure to maintain reader engagement",
        ],
        ACCURACY => [
            "Add more source attributions and fact verification",
            "Ensure all claims are properly substantiated",
        ],
        STRUCTURE => [
            "Strengthen the lead paragraph with all essential elements",
            "Better organize content using inverted pyramid structure",
        ],
        _ => [
            "Increase vocabulary diversity and sentence variety",
            "Include more diverse content types (quotes, statistics, analysis)",
        ],
    }
}

fn deduplicate_advice(advice: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for item in advice {
        if seen.insert(item.clone()) {
            unique.push(item);
        }
    }
    unique
}

fn detailed_metrics(
    text: &str,
    stats: &TextStats,
    fact_report: &FactCheckReport,
) -> BTreeMap<String, f64> {
    if stats.word_count == 0 {
        return BTreeMap::new();
    }
    let quotes = fact_report
        .verified_claims
        .iter()
        .filter(|c| c.kind == ClaimKind::Quote)
        .count();
    let high = fact_report
        .verified_claims
        .iter()
        .filter(|c| c.confidence == Confidence::High)
        .count();
    details(&[
        ("word_count", stats.word_count as f64),
        ("sentence_count", stats.sentence_count as f64),
        ("paragraph_count", stats.paragraph_count as f64),
        ("readability_grade", round_to(stats.grade_level, 1)),
        ("flesch_reading_ease", round_to(stats.flesch_score, 1)),
        ("avg_sentence_length", round_to(stats.avg_sentence_length, 1)),
        ("quote_count", quotes as f64),
        ("attribution_count", attribution_count(text) as f64),
        ("passive_voice_ratio", stats.passive_voice_ratio),
        ("vocabulary_diversity", stats.vocabulary_diversity),
        ("high_confidence_claims", high as f64),
    ])
}

fn metric_strengths(metrics: &BTreeMap<String, f64>) -> Vec<String> {
    let mut out = Vec::new();
    if metrics.is_empty() {
        return out;
    }
    let get = |k: &str| metrics.get(k).copied().unwrap_or_default();
    if get("readability_grade") <= 9.0 {
        out.push("Excellent readability for target audience".to_string());
    }
    if get("attribution_count") >= 3.0 {
        out.push("Good source attribution".to_string());
    }
    if get("passive_voice_ratio") <= 0.1 {
        out.push("Effective use of active voice".to_string());
    }
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Combine every component's output into the final quality report.
pub fn evaluate(
    article: &Article,
    stats: &TextStats,
    sentiment: &Sentiment,
    fact_report: &FactCheckReport,
    style_report: &StyleComplianceReport,
) -> QualityReport {
    let tone = rules_for(article.style).tone;

    let mut category_scores: BTreeMap<String, CategoryScore> = BTreeMap::new();
    if stats.word_count == 0 {
        for name in [WRITING_QUALITY, ACCURACY, STRUCTURE, VARIETY] {
            category_scores.insert(name.to_string(), CategoryScore::default());
        }
    } else {
        category_scores.insert(
            WRITING_QUALITY.to_string(),
            evaluate_writing(article, stats, sentiment, tone),
        );
        category_scores.insert(ACCURACY.to_string(), evaluate_accuracy(article, fact_report));
        category_scores.insert(STRUCTURE.to_string(), evaluate_structure(article));
        category_scores.insert(
            VARIETY.to_string(),
            evaluate_variety(article, stats, fact_report),
        );
    }

    let score_of = |name: &str| category_scores.get(name).map_or(0, |c| c.score) as f64;
    let c = WEIGHTS.categories;
    let overall_score = weighted(&[
        (c.writing_quality, score_of(WRITING_QUALITY)),
        (c.accuracy, score_of(ACCURACY)),
        (c.structure, score_of(STRUCTURE)),
        (c.variety, score_of(VARIETY)),
    ]);

    let mut recommendations: Vec<String> = Vec::new();
    let mut strengths: Vec<String> = Vec::new();
    let mut areas_for_improvement: Vec<String> = Vec::new();
    for name in [WRITING_QUALITY, ACCURACY, STRUCTURE, VARIETY] {
        let score = score_of(name) as i32;
        let label = name.replace('_', " ");
        if score < WEIGHTS.needs_improvement_threshold {
            recommendations.extend(category_advice(name).iter().map(|s| s.to_string()));
            areas_for_improvement.push(format!("Improve {label}"));
        } else if score >= WEIGHTS.strength_threshold {
            strengths.push(format!("Strong {label}"));
        }
    }

    let detailed_metrics = detailed_metrics(&article.text, stats, fact_report);
    strengths.extend(metric_strengths(&detailed_metrics));
    recommendations.extend(style_report.suggestions.iter().cloned());

    let professional_rating = ProfessionalRating::from_score(overall_score);
    tracing::debug!(
        overall_score,
        writing = score_of(WRITING_QUALITY),
        accuracy = score_of(ACCURACY),
        structure = score_of(STRUCTURE),
        variety = score_of(VARIETY),
        "quality evaluated"
    );

    QualityReport {
        overall_score,
        category_scores,
        detailed_metrics,
        recommendations: deduplicate_advice(recommendations),
        strengths: deduplicate_advice(strengths),
        areas_for_improvement,
        professional_rating,
        rating_label: professional_rating.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{self, StyleTag};
    use crate::{fact_check, text_stats};

    fn run(article: &Article, sentiment: &Sentiment) -> QualityReport {
        let stats = text_stats::analyze(&article.text);
        let facts = fact_check::check(article);
        let style_report = style::check(&article.text, article.style);
        evaluate(article, &stats, sentiment, &facts, &style_report)
    }

    const STORY: &str = "WASHINGTON - The city council approved a $12 million budget on Tuesday \
following a long debate, Mayor Ana Ruiz said in a statement. The plan funds road repairs \
and adds 40 new bus routes across the Northern District.\n\n\
Meanwhile, council member Tom Hale said the vote happened after weeks of talks. \
\"We listened to residents,\" said Tom Hale. The budget takes effect in July.\n\n\
However, some residents remain unconvinced. Local groups plan a public meeting next month \
to review the details.";

    #[test]
    fn rating_tiers_are_inclusive_low() {
        let cases = [
            (0, ProfessionalRating::Poor),
            (49, ProfessionalRating::Poor),
            (50, ProfessionalRating::Fair),
            (64, ProfessionalRating::Fair),
            (65, ProfessionalRating::Good),
            (79, ProfessionalRating::Good),
            (80, ProfessionalRating::Excellent),
            (100, ProfessionalRating::Excellent),
        ];
        for (score, tier) in cases {
            assert_eq!(ProfessionalRating::from_score(score), tier, "score {score}");
        }
    }

    #[test]
    fn empty_text_scores_zero_everywhere() {
        let report = run(&Article::new("", StyleTag::News), &Sentiment::default());
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.category_scores.len(), 4);
        assert!(report.category_scores.values().all(|c| c.score == 0));
        assert_eq!(report.professional_rating, ProfessionalRating::Poor);
        assert_eq!(report.rating_label, "Poor - Major Overhaul Needed");
        assert!(report.detailed_metrics.is_empty());
        assert_eq!(report.areas_for_improvement.len(), 4);
    }

    #[test]
    fn overall_is_exact_convex_combination() {
        let article = Article::new(STORY, StyleTag::News)
            .with_facts(vec!["The council approved a $12 million budget".to_string()]);
        let report = run(&article, &Sentiment::default());
        let s = |k: &str| report.category_scores[k].score as f64;
        let expected = (0.40 * s(WRITING_QUALITY)
            + 0.25 * s(ACCURACY)
            + 0.20 * s(STRUCTURE)
            + 0.15 * s(VARIETY))
        .round() as i32;
        assert_eq!(report.overall_score, expected);
        for c in report.category_scores.values() {
            assert!((0..=100).contains(&c.score));
        }
        assert_eq!(
            report.rating_label,
            ProfessionalRating::from_score(report.overall_score).label()
        );
    }

    #[test]
    fn style_suggestions_are_merged_without_duplicates() {
        let article = Article::new("short note", StyleTag::News);
        let report = run(&article, &Sentiment::default());
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("dateline")));
        let unique: HashSet<&String> = report.recommendations.iter().collect();
        assert_eq!(unique.len(), report.recommendations.len());
    }

    #[test]
    fn readability_and_sentence_bands() {
        assert_eq!(readability_score(7.5), 100.0);
        assert_eq!(readability_score(10.0), 80.0);
        assert_eq!(readability_score(14.0), 60.0);
        assert_eq!(readability_score(3.0), 80.0);
        assert_eq!(readability_score(18.0), 40.0);
        assert_eq!(sentence_score(20.0, 0.0), 100.0);
        assert_eq!(sentence_score(12.0, 6.0), 90.0);
        assert_eq!(sentence_score(40.0, 0.0), 60.0);
    }

    #[test]
    fn formal_tone_prefers_neutral_sentiment() {
        let neutral = Sentiment::default();
        let negative = Sentiment {
            label: SentimentLabel::Negative,
            score: 0.5,
        };
        assert_eq!(sentiment_fit(&neutral, Tone::Formal), 100.0);
        assert_eq!(sentiment_fit(&negative, Tone::Formal), 80.0);
        assert_eq!(sentiment_fit(&neutral, Tone::Casual), 85.0);
        assert_eq!(register_score("Yeah, we're gonna win.", Tone::Casual), 100.0);
        assert_eq!(register_score("Yeah, we're gonna win.", Tone::Formal), 75.0);
    }

    #[test]
    fn lead_rewards_five_ws_and_length() {
        assert_eq!(lead_score(""), 0.0);
        let lead = "The council approved the budget today in Springfield because costs rose, \
officials said, after the vote happened late on Tuesday evening with most members present and \
several residents watching closely.";
        assert_eq!(lead_score(lead), 100.0);
    }

    #[test]
    fn pyramid_and_transitions() {
        assert_eq!(pyramid_score(&["Only one paragraph."]), 100.0);
        let front_loaded = [
            "Acme Corp paid $40 million to Beta Labs in 2023.",
            "The deal was welcomed by staff who had waited a long time for news.",
        ];
        assert_eq!(pyramid_score(&front_loaded), 100.0);
        let back_loaded = [front_loaded[1], front_loaded[0]];
        assert_eq!(pyramid_score(&back_loaded), 0.0);

        assert_eq!(transition_score(&["One."]), 100.0);
        assert_eq!(transition_score(&["One.", "However, two."]), 100.0);
        assert_eq!(transition_score(&["One.", "Two."]), 50.0);
    }

    #[test]
    fn paragraph_uniformity_rewards_even_lengths() {
        let even = ["word ".repeat(60), "word ".repeat(60)];
        let even: Vec<&str> = even.iter().map(String::as_str).collect();
        assert_eq!(paragraph_score(&even), 100.0);
    }

    #[test]
    fn metric_strengths_only_for_real_text() {
        assert!(metric_strengths(&BTreeMap::new()).is_empty());
        let metrics = details(&[
            ("readability_grade", 8.0),
            ("attribution_count", 3.0),
            ("passive_voice_ratio", 0.0),
        ]);
        assert_eq!(metric_strengths(&metrics).len(), 3);
    }

    #[test]
    fn score_keys_stay_in_range_for_very_easy_text() {
        let article = Article::new("The cat sat.", StyleTag::News);
        let report = run(&article, &Sentiment::default());
        assert!(
            report.detailed_metrics["flesch_reading_ease"] > 100.0,
            "Short monosyllabic text should read above 100"
        );
        assert!(report.category_scores[WRITING_QUALITY]
            .details
            .contains_key("flesch_reading_ease"));
        for (name, category) in &report.category_scores {
            for (key, value) in &category.details {
                if key.ends_with("_score") {
                    assert!((0.0..=100.0).contains(value), "{name}.{key} = {value}");
                }
            }
        }
        for (key, value) in &report.detailed_metrics {
            if key.ends_with("_score") {
                assert!((0.0..=100.0).contains(value), "detailed {key} = {value}");
            }
        }
    }
}
