//! Plain-text rendering of an [`AssessmentReport`] for terminal reading.

use std::fmt::Write;

use crate::fact_check::FactCheckReport;
use crate::quality::QualityReport;
use crate::style::StyleComplianceReport;
use crate::{AssessmentReport, Issue, Severity};

const RULE: &str = "──────────────────────────────────────";

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[E]",
        Severity::Warning => "[W]",
        Severity::Info => "[I]",
    }
}

/// "writing_quality" -> "Writing Quality"
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{RULE}");
}

fn numbered(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}:");
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {item}", i + 1);
    }
}

fn issue_lines(out: &mut String, heading: &str, issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}:");
    for issue in issues {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            severity_tag(issue.severity),
            issue.rule,
            issue.message
        );
    }
}

fn render_fact_check(out: &mut String, fc: &FactCheckReport) {
    section(out, "FACT-CHECK REPORT");
    let _ = writeln!(out, "Overall Score: {}/100", fc.overall_score);
    let _ = writeln!(out, "  Source Attribution: {}/100", fc.source_attribution_score);
    let _ = writeln!(out, "  Objectivity: {}/100", fc.objectivity_score);
    let _ = writeln!(out, "  Fact Consistency: {}/100", fc.fact_consistency_score);
    let _ = writeln!(out, "  Credibility: {}/100", fc.credibility_score);
    let _ = writeln!(out, "Verified Claims: {}", fc.verified_claims.len());
    let _ = writeln!(out, "Flagged Content: {}", fc.flagged_content.len());

    if !fc.source_reliability.is_empty() {
        let _ = writeln!(out, "\nSources:");
        for s in &fc.source_reliability {
            let _ = writeln!(out, "  - {} ({}, {}/100)", s.source, s.category, s.score);
        }
    }
    issue_lines(out, "Issues", &fc.issues);
    issue_lines(out, "Flagged", &fc.flagged_content);
    numbered(out, "Recommendations", &fc.recommendations);
}

fn render_quality(out: &mut String, q: &QualityReport) {
    section(out, "QUALITY ASSESSMENT");
    let _ = writeln!(out, "Overall Score: {}/100", q.overall_score);
    let _ = writeln!(out, "Professional Rating: {}", q.rating_label);
    for (name, category) in &q.category_scores {
        let _ = writeln!(out, "  {}: {}/100", title_case(name), category.score);
    }

    if !q.detailed_metrics.is_empty() {
        let _ = writeln!(out, "\nDetailed Metrics:");
        for (metric, value) in &q.detailed_metrics {
            let _ = writeln!(out, "  {}: {value}", title_case(metric));
        }
    }
    if !q.strengths.is_empty() {
        let _ = writeln!(out, "\nStrengths:");
        for s in &q.strengths {
            let _ = writeln!(out, "  + {s}");
        }
    }
    if !q.areas_for_improvement.is_empty() {
        let _ = writeln!(out, "\nAreas for Improvement:");
        for a in &q.areas_for_improvement {
            let _ = writeln!(out, "  - {a}");
        }
    }
    numbered(out, "Recommendations", &q.recommendations);
}

fn render_style(out: &mut String, sc: &StyleComplianceReport) {
    section(out, "STYLE COMPLIANCE");
    let _ = writeln!(out, "Style: {}  Score: {}/100", sc.style, sc.score);
    issue_lines(out, "Issues", &sc.issues);
    numbered(out, "Suggestions", &sc.suggestions);
}

/// Render the three report sections as plain text.
pub fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    let headline = if report.headline.trim().is_empty() {
        "(untitled)"
    } else {
        report.headline.as_str()
    };
    let _ = writeln!(out, "Article: {headline}");
    render_fact_check(&mut out, &report.fact_check);
    render_quality(&mut out, &report.quality_evaluation);
    render_style(&mut out, &report.style_compliance);
    out
}
