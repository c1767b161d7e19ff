//! Style-guide compliance.
//!
//! Each [`StyleTag`] maps to exactly one static [`StyleRuleSet`]. A rule
//! category costs its penalty once no matter how many times it is violated.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::claims::quote_spans;
use crate::error::AssessError;
use crate::text::{context_around, word_count};
use crate::weights::WEIGHTS;
use crate::{Issue, Severity, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    News,
    Blog,
    Social,
    Newsletter,
}

impl StyleTag {
    pub const ALL: [StyleTag; 4] = [
        StyleTag::News,
        StyleTag::Blog,
        StyleTag::Social,
        StyleTag::Newsletter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::News => "news",
            StyleTag::Blog => "blog",
            StyleTag::Social => "social",
            StyleTag::Newsletter => "newsletter",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleTag {
    type Err = AssessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "news" | "news_wire" | "newswire" => Ok(StyleTag::News),
            "blog" => Ok(StyleTag::Blog),
            "social" | "social_media" => Ok(StyleTag::Social),
            "newsletter" => Ok(StyleTag::Newsletter),
            _ => Err(AssessError::unknown_style(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static DATELINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*[A-Z][A-Z .'-]{1,40}(?:,\s*[A-Z][A-Za-z. ]{1,20})?(?:\s*\([^)]{1,30}\))?\s*(?:--|-|\u{2013}|\u{2014})\s+\S",
    )
    .unwrap()
});

static SUBHEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{2,6}\s+\S").unwrap());

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)#[A-Za-z]\w*").unwrap());

static SUBJECT_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:(?:subject|re)\s*:\s*\S|\x{1F4F0}|\*\*[^*\n]+\*\*\s*$)").unwrap()
});

static ENGAGEMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?!]").unwrap());

static SECOND_PERSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:you|your|yours|yourself)\b").unwrap());

static FIRST_PERSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?i:i|me|my|mine|myself|we|our|ours|ourselves)\b|\bus\b").unwrap()
});

static SERIAL_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\w+, \w+, and \w+").unwrap());

static SMALL_NUMERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w$.,])([1-9])(?:[^\w%.,]|$)").unwrap());

static INFORMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:gonna|wanna|gotta|kinda|sorta|yeah|okay|wow|hey|lol|omg)\b").unwrap()
});

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\[insert [^\]]*\]|\[describe [^\]]*\]|\[url [^\]]*\]|\[your [^\]]*\]|\[todo[^\]]*\]",
    )
    .unwrap()
});

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredElement {
    /// "CITY (Agency) - " opening.
    Dateline,
    /// Markdown "##" headings.
    Subheadings,
    Hashtags,
    /// "Subject:" line, bold title line or newspaper emoji header.
    SubjectHeader,
    /// At least one question or exclamation.
    Engagement,
    /// Addresses the reader as "you".
    SecondPerson,
}

impl RequiredElement {
    pub fn name(&self) -> &'static str {
        match self {
            RequiredElement::Dateline => "dateline",
            RequiredElement::Subheadings => "subheadings",
            RequiredElement::Hashtags => "hashtags",
            RequiredElement::SubjectHeader => "subject_header",
            RequiredElement::Engagement => "engagement",
            RequiredElement::SecondPerson => "second_person",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            RequiredElement::Dateline => &*DATELINE_RE,
            RequiredElement::Subheadings => &*SUBHEADING_RE,
            RequiredElement::Hashtags => &*HASHTAG_RE,
            RequiredElement::SubjectHeader => &*SUBJECT_HEADER_RE,
            RequiredElement::Engagement => &*ENGAGEMENT_RE,
            RequiredElement::SecondPerson => &*SECOND_PERSON_RE,
        }
    }

    pub fn is_present(&self, text: &str) -> bool {
        self.pattern().is_match(text)
    }

    fn penalty(&self) -> i32 {
        let p = &WEIGHTS.style;
        match self {
            RequiredElement::Dateline => p.dateline,
            RequiredElement::Subheadings => p.subheadings,
            RequiredElement::Hashtags => p.hashtags,
            RequiredElement::SubjectHeader => p.subject_header,
            RequiredElement::Engagement => p.engagement,
            RequiredElement::SecondPerson => p.second_person,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            RequiredElement::Dateline => "Missing dateline opening",
            RequiredElement::Subheadings => "Blog should include subheadings",
            RequiredElement::Hashtags => "No hashtags found",
            RequiredElement::SubjectHeader => "Newsletter is missing a subject header",
            RequiredElement::Engagement => "Blog could be more engaging",
            RequiredElement::SecondPerson => "Newsletter could be more personal",
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            RequiredElement::Dateline => "Open with a dateline such as 'WASHINGTON - '",
            RequiredElement::Subheadings => "Add ## subheadings to break up content",
            RequiredElement::Hashtags => "Add relevant hashtags for better reach",
            RequiredElement::SubjectHeader => "Start with a 'Subject:' line or a bold headline",
            RequiredElement::Engagement => "Add questions or exclamations for engagement",
            RequiredElement::SecondPerson => "Use 'you' and 'your' for personal connection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenPattern {
    /// First-person pronouns outside quotations.
    FirstPerson,
    /// "a, b, and c" (AP style drops the serial comma).
    SerialComma,
    /// Figures one through nine, except with percentages and currency.
    SmallNumerals,
    InformalLanguage,
    /// Unfilled template text such as "[insert quote]".
    Placeholder,
}

impl ForbiddenPattern {
    pub fn name(&self) -> &'static str {
        match self {
            ForbiddenPattern::FirstPerson => "first_person",
            ForbiddenPattern::SerialComma => "serial_comma",
            ForbiddenPattern::SmallNumerals => "small_numerals",
            ForbiddenPattern::InformalLanguage => "informal_language",
            ForbiddenPattern::Placeholder => "placeholder",
        }
    }

    /// Every offending span, in order.
    pub fn find_all(&self, text: &str) -> Vec<Span> {
        match self {
            ForbiddenPattern::FirstPerson => {
                let quoted = quote_spans(text);
                FIRST_PERSON_RE
                    .find_iter(text)
                    .map(|m| Span::new(m.start(), m.end()))
                    .filter(|s| !quoted.iter().any(|q| q.contains(s)))
                    .collect()
            }
            ForbiddenPattern::SmallNumerals => SMALL_NUMERAL_RE
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .filter(|m| {
                    let rest = text[m.end()..].trim_start().to_lowercase();
                    !rest.starts_with("percent")
                })
                .map(|m| Span::new(m.start(), m.end()))
                .collect(),
            ForbiddenPattern::SerialComma => spans(&SERIAL_COMMA_RE, text),
            ForbiddenPattern::InformalLanguage => spans(&INFORMAL_RE, text),
            ForbiddenPattern::Placeholder => spans(&PLACEHOLDER_RE, text),
        }
    }

    fn penalty(&self) -> i32 {
        let p = &WEIGHTS.style;
        match self {
            ForbiddenPattern::FirstPerson => p.first_person,
            ForbiddenPattern::SerialComma => p.serial_comma,
            ForbiddenPattern::SmallNumerals => p.small_numerals,
            ForbiddenPattern::InformalLanguage => p.informal_language,
            ForbiddenPattern::Placeholder => p.placeholder,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            ForbiddenPattern::Placeholder => Severity::Error,
            _ => Severity::Warning,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ForbiddenPattern::FirstPerson => "First-person voice outside quotations",
            ForbiddenPattern::SerialComma => "Oxford comma usage detected (AP style avoids)",
            ForbiddenPattern::SmallNumerals => "Spell out numbers one through nine",
            ForbiddenPattern::InformalLanguage => "Informal language detected",
            ForbiddenPattern::Placeholder => "Unfilled placeholder text",
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            ForbiddenPattern::FirstPerson => "Report in the third person; keep 'I' and 'we' inside quotes",
            ForbiddenPattern::SerialComma => "Drop the comma before the final 'and' in a series",
            ForbiddenPattern::SmallNumerals => "Write one through nine as words",
            ForbiddenPattern::InformalLanguage => "Replace slang with standard wording",
            ForbiddenPattern::Placeholder => "Replace bracketed template text with real content",
        }
    }
}

fn spans(re: &Regex, text: &str) -> Vec<Span> {
    re.find_iter(text)
        .map(|m| Span::new(m.start(), m.end()))
        .collect()
}

#[derive(Debug)]
pub struct StyleRuleSet {
    pub style: StyleTag,
    pub min_words: usize,
    pub max_words: usize,
    pub max_chars: Option<usize>,
    pub required_elements: &'static [RequiredElement],
    pub forbidden_patterns: &'static [ForbiddenPattern],
    pub tone: Tone,
}

static NEWS_RULES: StyleRuleSet = StyleRuleSet {
    style: StyleTag::News,
    min_words: 100,
    max_words: 1500,
    max_chars: None,
    required_elements: &[RequiredElement::Dateline],
    forbidden_patterns: &[
        ForbiddenPattern::FirstPerson,
        ForbiddenPattern::SerialComma,
        ForbiddenPattern::SmallNumerals,
        ForbiddenPattern::InformalLanguage,
        ForbiddenPattern::Placeholder,
    ],
    tone: Tone::Formal,
};

static BLOG_RULES: StyleRuleSet = StyleRuleSet {
    style: StyleTag::Blog,
    min_words: 300,
    max_words: 2500,
    max_chars: None,
    required_elements: &[RequiredElement::Subheadings, RequiredElement::Engagement],
    forbidden_patterns: &[ForbiddenPattern::Placeholder],
    tone: Tone::Casual,
};

static SOCIAL_RULES: StyleRuleSet = StyleRuleSet {
    style: StyleTag::Social,
    min_words: 1,
    max_words: 60,
    max_chars: Some(280),
    required_elements: &[RequiredElement::Hashtags],
    forbidden_patterns: &[ForbiddenPattern::Placeholder],
    tone: Tone::Casual,
};

static NEWSLETTER_RULES: StyleRuleSet = StyleRuleSet {
    style: StyleTag::Newsletter,
    min_words: 150,
    max_words: 1200,
    max_chars: None,
    required_elements: &[RequiredElement::SubjectHeader, RequiredElement::SecondPerson],
    forbidden_patterns: &[ForbiddenPattern::Placeholder],
    tone: Tone::Casual,
};

pub fn rules_for(style: StyleTag) -> &'static StyleRuleSet {
    match style {
        StyleTag::News => &NEWS_RULES,
        StyleTag::Blog => &BLOG_RULES,
        StyleTag::Social => &SOCIAL_RULES,
        StyleTag::Newsletter => &NEWSLETTER_RULES,
    }
}

const CONTEXT_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleComplianceReport {
    pub style: StyleTag,
    pub score: i32,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<String>,
}

struct RuleViolation {
    issue: Issue,
    suggestion: String,
    penalty: i32,
}

fn rule_word_count(text: &str, rules: &StyleRuleSet) -> Option<RuleViolation> {
    let wc = word_count(text);
    let (message, suggestion) = if wc < rules.min_words {
        (
            format!(
                "Too short for {} style ({wc} words, minimum {})",
                rules.style, rules.min_words
            ),
            format!("Expand the piece to at least {} words", rules.min_words),
        )
    } else if wc > rules.max_words {
        (
            format!(
                "Too long for {} style ({wc} words, maximum {})",
                rules.style, rules.max_words
            ),
            format!("Trim the piece to at most {} words", rules.max_words),
        )
    } else {
        return None;
    };
    Some(RuleViolation {
        issue: Issue::new(Severity::Warning, "word_count", message),
        suggestion,
        penalty: WEIGHTS.style.word_count,
    })
}

fn rule_char_limit(text: &str, rules: &StyleRuleSet) -> Option<RuleViolation> {
    let limit = rules.max_chars?;
    let chars = text.trim().chars().count();
    if chars <= limit {
        return None;
    }
    Some(RuleViolation {
        issue: Issue::new(
            Severity::Warning,
            "char_limit",
            format!("Content too long for {} ({chars} chars, limit {limit})", rules.style),
        ),
        suggestion: format!("Reduce content to fit the {limit} character limit"),
        penalty: WEIGHTS.style.char_limit,
    })
}

fn rule_required(text: &str, element: RequiredElement) -> Option<RuleViolation> {
    if element.is_present(text) {
        return None;
    }
    Some(RuleViolation {
        issue: Issue::new(Severity::Warning, element.name(), element.message()),
        suggestion: element.suggestion().to_string(),
        penalty: element.penalty(),
    })
}

fn rule_forbidden(text: &str, pattern: ForbiddenPattern) -> Option<RuleViolation> {
    let found = pattern.find_all(text);
    let first = *found.first()?;
    let message = format!(
        "{} ({} found, first at \"{}\")",
        pattern.message(),
        found.len(),
        context_around(text, first.start, first.end, CONTEXT_WIDTH)
    );
    Some(RuleViolation {
        issue: Issue::new(pattern.severity(), pattern.name(), message).at(first),
        suggestion: pattern.suggestion().to_string(),
        penalty: pattern.penalty(),
    })
}

/// Check `text` against the rule set for `style`. Never fails.
pub fn check(text: &str, style: StyleTag) -> StyleComplianceReport {
    let rules = rules_for(style);

    let mut violations: Vec<RuleViolation> = Vec::new();
    violations.extend(rule_word_count(text, rules));
    violations.extend(rule_char_limit(text, rules));
    for &element in rules.required_elements {
        violations.extend(rule_required(text, element));
    }
    for &pattern in rules.forbidden_patterns {
        violations.extend(rule_forbidden(text, pattern));
    }

    let penalty: i32 = violations.iter().map(|v| v.penalty).sum();
    let score = (100 - penalty).clamp(0, 100);
    tracing::debug!(%style, score, violations = violations.len(), "style compliance checked");

    let mut issues = Vec::with_capacity(violations.len());
    let mut suggestions = Vec::with_capacity(violations.len());
    for v in violations {
        issues.push(v.issue);
        suggestions.push(v.suggestion);
    }

    StyleComplianceReport {
        style,
        score,
        issues,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_hit(report: &StyleComplianceReport) -> Vec<&str> {
        report.issues.iter().map(|i| i.rule.as_str()).collect()
    }

    fn news_body(words: usize) -> String {
        let mut body = String::from("WASHINGTON - The agency released its annual report on Monday.");
        while word_count(&body) < words {
            body.push_str(" The figures cover spending across federal programs.");
        }
        body
    }

    #[test]
    fn parses_known_tags_and_aliases() {
        assert_eq!("News".parse::<StyleTag>().unwrap(), StyleTag::News);
        assert_eq!("news_wire".parse::<StyleTag>().unwrap(), StyleTag::News);
        assert_eq!(" social_media ".parse::<StyleTag>().unwrap(), StyleTag::Social);
        assert_eq!("NEWSLETTER".parse::<StyleTag>().unwrap(), StyleTag::Newsletter);
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let err = "haiku".parse::<StyleTag>().unwrap_err();
        assert!(matches!(err, AssessError::UnknownStyle { ref tag } if tag == "haiku"));
    }

    #[test]
    fn every_style_has_rules() {
        for style in StyleTag::ALL {
            let rules = rules_for(style);
            assert_eq!(rules.style, style);
            assert!(rules.min_words <= rules.max_words);
        }
    }

    #[test]
    fn scores_stay_in_range_for_all_styles() {
        let samples = [
            "",
            "I think we gonna win, yeah. [insert quote here] 1 2 3",
            "#launch Big news today! You can read more.",
        ];
        for style in StyleTag::ALL {
            for text in samples {
                let report = check(text, style);
                assert!((0..=100).contains(&report.score), "{style}: {}", report.score);
                assert_eq!(report.issues.len(), report.suggestions.len());
            }
        }
    }

    #[test]
    fn empty_news_fails_length_and_dateline() {
        let report = check("", StyleTag::News);
        assert!(report.score < 100);
        let hit = rules_hit(&report);
        assert!(hit.contains(&"word_count"));
        assert!(hit.contains(&"dateline"));
    }

    #[test]
    fn compliant_news_scores_full() {
        let report = check(&news_body(120), StyleTag::News);
        assert_eq!(report.score, 100, "issues: {:?}", report.issues);
    }

    #[test]
    fn penalty_is_per_rule_not_per_occurrence() {
        let once = format!("{} I went there.", news_body(120));
        let many = format!("{} I went there. I saw it. I left.", news_body(120));
        let a = check(&once, StyleTag::News);
        let b = check(&many, StyleTag::News);
        assert_eq!(a.score, b.score);
        assert_eq!(rules_hit(&a), vec!["first_person"]);
    }

    #[test]
    fn first_person_inside_quotes_is_allowed() {
        let text = format!("{} \"We will rebuild,\" said Mayor Ana Ruiz.", news_body(120));
        let report = check(&text, StyleTag::News);
        assert!(!rules_hit(&report).contains(&"first_person"));
    }

    #[test]
    fn small_numerals_skip_percentages_and_money() {
        let p = ForbiddenPattern::SmallNumerals;
        assert!(p.find_all("Rates rose 5 percent and $3 bills, at 4% growth.").is_empty());
        assert_eq!(p.find_all("They hired 3 people.").len(), 1);
    }

    #[test]
    fn social_requires_hashtags_and_char_limit() {
        let long = "word ".repeat(58);
        let report = check(&long, StyleTag::Social);
        let hit = rules_hit(&report);
        assert!(hit.contains(&"hashtags"));
        assert!(hit.contains(&"char_limit"));
        let p = WEIGHTS.style;
        assert_eq!(report.score, 100 - p.hashtags - p.char_limit);
    }

    #[test]
    fn penalties_come_from_the_weights_table() {
        let p = WEIGHTS.style;
        let report = check("", StyleTag::News);
        assert_eq!(
            report.score,
            100 - p.word_count - p.dateline,
            "issues: {:?}",
            report.issues
        );
        let slang = format!("{} Yeah, it was okay.", news_body(120));
        assert_eq!(check(&slang, StyleTag::News).score, 100 - p.informal_language);
    }

    #[test]
    fn newsletter_checks_header_and_voice() {
        let report = check("Subject: Weekly digest\n\nHere is what you missed.", StyleTag::Newsletter);
        let hit = rules_hit(&report);
        assert!(!hit.contains(&"subject_header"));
        assert!(!hit.contains(&"second_person"));
        assert!(hit.contains(&"word_count"));
    }
}
