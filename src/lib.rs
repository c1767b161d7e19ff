//! Deterministic quality assessment for news-style articles.
//!
//! An [`AssessmentRequest`] (article text, style tag, supplied facts and
//! sources, externally computed sentiment) goes in; an [`AssessmentReport`]
//! with fact-check, style-compliance and quality sections comes out. Every
//! score is an explainable surface proxy, not semantic verification.

pub mod claims;
pub mod config;
pub mod error;
pub mod fact_check;
pub mod quality;
pub mod report;
pub mod style;
mod text;
pub mod text_stats;
pub mod weights;

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use claims::{Claim, ClaimKind, Confidence};
pub use config::Config;
pub use error::{AssessError, ConfigError};
pub use fact_check::{FactCheckReport, Reliability, SourceReliability};
pub use quality::{CategoryScore, ProfessionalRating, QualityReport};
pub use style::{StyleComplianceReport, StyleRuleSet, StyleTag, Tone};
pub use text_stats::TextStats;
pub use weights::{ScoringWeights, WEIGHTS};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Byte offsets into the article text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or_default()
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceRef {
    /// Name, title, organization and url joined for display and matching.
    pub fn identity(&self) -> String {
        [
            Some(self.name.as_str()),
            self.title.as_deref(),
            self.organization.as_deref(),
            self.url.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    #[serde(alias = "POSITIVE", alias = "Positive")]
    Positive,
    #[serde(alias = "NEUTRAL", alias = "Neutral")]
    Neutral,
    #[serde(alias = "NEGATIVE", alias = "Negative")]
    Negative,
}

/// Output of an external sentiment classifier: a label and its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub location: Option<Span>,
}

impl Issue {
    pub fn new(severity: Severity, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule: rule.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, span: Span) -> Self {
        self.location = Some(span);
        self
    }
}

/// The validated input to one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub headline: String,
    pub text: String,
    pub style: StyleTag,
    pub facts: Vec<String>,
    pub sources: Vec<SourceRef>,
}

impl Article {
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            headline: String::new(),
            text: text.into(),
            style,
            facts: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn with_facts(mut self, facts: Vec<String>) -> Self {
        self.facts = facts;
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }
}

/// Wire shape of a request, as produced by the generation layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub headline: String,
    pub article_text: String,
    pub style_tag: String,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub sentiment: Sentiment,
}

impl AssessmentRequest {
    /// Resolve the style tag. Unknown tags are rejected, never defaulted.
    pub fn to_article(&self) -> Result<Article, AssessError> {
        let style: StyleTag = self.style_tag.parse().inspect_err(|_| {
            tracing::warn!(style_tag = %self.style_tag, "rejecting request with unknown style tag");
        })?;
        Ok(Article::new(self.article_text.clone(), style)
            .with_headline(self.headline.clone())
            .with_facts(self.facts.clone())
            .with_sources(self.sources.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub headline: String,
    pub fact_check: FactCheckReport,
    pub quality_evaluation: QualityReport,
    pub style_compliance: StyleComplianceReport,
}

impl fmt::Display for AssessmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&report::render_text(self))
    }
}

/// One request object or an array of them.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBatch {
    Single(AssessmentRequest),
    Many(Vec<AssessmentRequest>),
}

impl RequestBatch {
    pub fn into_requests(self) -> Vec<AssessmentRequest> {
        match self {
            RequestBatch::Single(request) => vec![request],
            RequestBatch::Many(requests) => requests,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every component over an already validated article.
pub fn assess_article(article: &Article, sentiment: &Sentiment) -> AssessmentReport {
    let (stats, (fact_check, style_compliance)) = rayon::join(
        || text_stats::analyze(&article.text),
        || {
            rayon::join(
                || fact_check::check(article),
                || style::check(&article.text, article.style),
            )
        },
    );
    let quality_evaluation =
        quality::evaluate(article, &stats, sentiment, &fact_check, &style_compliance);

    tracing::info!(
        style = %article.style,
        words = stats.word_count,
        overall = quality_evaluation.overall_score,
        rating = ?quality_evaluation.professional_rating,
        "assessment complete"
    );

    AssessmentReport {
        headline: article.headline.clone(),
        fact_check,
        quality_evaluation,
        style_compliance,
    }
}

pub fn assess(request: &AssessmentRequest) -> Result<AssessmentReport, AssessError> {
    let article = request.to_article()?;
    Ok(assess_article(&article, &request.sentiment))
}

/// Parse one JSON request and assess it.
pub fn assess_json(input: &str) -> Result<AssessmentReport, AssessError> {
    let request: AssessmentRequest = serde_json::from_str(input)?;
    assess(&request)
}

/// Parse a JSON document holding one request object or an array of them.
pub fn parse_requests(input: &str) -> Result<RequestBatch, AssessError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if value.is_array() {
        Ok(RequestBatch::Many(serde_json::from_value(value)?))
    } else {
        Ok(RequestBatch::Single(serde_json::from_value(value)?))
    }
}

/// Assess requests in parallel. Results come back in input order, and a bad
/// request fails only its own slot.
pub fn assess_batch(requests: &[AssessmentRequest]) -> Vec<Result<AssessmentReport, AssessError>> {
    requests.par_iter().map(assess).collect()
}
