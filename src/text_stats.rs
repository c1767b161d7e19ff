//! Sentence/paragraph segmentation and surface statistics.
//!
//! Syllable counting and passive-voice detection are heuristics: syllables
//! are vowel groups with a silent trailing "e" suppressed, and a sentence is
//! "passive" when a form of "to be" precedes a past participle. Both miss
//! cases and over-count others.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::text::{round_to, word_count, word_tokens};
use crate::Span;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub syllable_count: usize,
    pub avg_sentence_length: f64,
    /// Population standard deviation of sentence lengths in words.
    pub sentence_variety: f64,
    pub flesch_score: f64,
    pub grade_level: f64,
    pub vocabulary_diversity: f64,
    /// Approximate; see module docs.
    pub passive_voice_ratio: f64,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+(?:\w+ly\s+)?",
        r"(?:\w+ed|known|given|taken|made|done|seen|written|held|built|found|told|sold|paid|led",
        r"|sent|shown|brought|thought|caught|begun|chosen|driven|spoken|stolen|hit|set|put|cut",
        r"|won|lost|kept|left|met|heard|born|hurt|beaten|broken|forgotten|hidden|frozen)\b",
    ))
    .unwrap()
});

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "no", "fig", "approx",
        "dept", "gov", "sen", "rep", "gen", "col", "lt", "sgt", "capt", "jan", "feb", "mar", "apr",
        "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

fn trimmed(text: &str, start: usize, end: usize) -> Option<Span> {
    let slice = &text[start..end];
    let lead = slice.len() - slice.trim_start().len();
    let trail = slice.len() - slice.trim_end().len();
    if lead == slice.len() {
        return None;
    }
    Some(Span::new(start + lead, end - trail))
}

/// Paragraphs are separated by one or more blank lines.
pub fn paragraphs(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in PARAGRAPH_BREAK_RE.find_iter(text) {
        out.extend(trimmed(text, last, m.start()));
        last = m.end();
    }
    out.extend(trimmed(text, last, text.len()));
    out
}

/// The word before a period looks like an abbreviation or an initial.
fn is_abbreviation(before: &str) -> bool {
    let token = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if token.is_empty() {
        return false;
    }
    if token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
        return true;
    }
    token.contains('.') || ABBREVIATIONS.contains(token.to_lowercase().as_str())
}

fn split_paragraph(text: &str, para: Span, out: &mut Vec<Span>) {
    let base = para.start;
    let s = &text[para.start..para.end];
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut start = 0usize;
    let mut in_straight = false;
    let mut curly_depth = 0usize;

    let push = |from: usize, to: usize, out: &mut Vec<Span>| {
        out.extend(trimmed(text, base + from, base + to));
    };

    let mut i = 0;
    while i < chars.len() {
        let (pos, c) = chars[i];
        let closes_quote = match c {
            '"' => {
                in_straight = !in_straight;
                !in_straight
            }
            '\u{201C}' => {
                curly_depth += 1;
                false
            }
            '\u{201D}' => {
                curly_depth = curly_depth.saturating_sub(1);
                curly_depth == 0
            }
            _ => false,
        };

        if closes_quote {
            // A quotation ending in terminal punctuation closes the sentence
            // when the next word starts a new one.
            let ended = i > 0 && matches!(chars[i - 1].1, '.' | '!' | '?');
            let next_upper = chars[i + 1..]
                .iter()
                .map(|&(_, ch)| ch)
                .find(|ch| !ch.is_whitespace())
                .is_some_and(char::is_uppercase);
            let spaced = chars.get(i + 1).is_some_and(|&(_, ch)| ch.is_whitespace());
            if ended && spaced && next_upper {
                let end = pos + c.len_utf8();
                push(start, end, out);
                start = end;
            }
        } else if matches!(c, '.' | '!' | '?') && !in_straight && curly_depth == 0 {
            let mut j = i + 1;
            while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?' | ')' | ']' | '\'' | '\u{2019}') {
                j += 1;
            }
            let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
            let abbreviated = c == '.' && j == i + 1 && is_abbreviation(&s[start..pos]);
            if at_boundary && !abbreviated {
                let end = if j == chars.len() { s.len() } else { chars[j].0 };
                push(start, end, out);
                start = end;
            }
            i = j;
            continue;
        }
        i += 1;
    }
    if start < s.len() {
        push(start, s.len(), out);
    }
}

/// Sentence spans in order of appearance. Never splits inside a quotation
/// and never crosses a paragraph break; an unterminated quote runs to the
/// end of its paragraph.
pub fn sentences(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    for para in paragraphs(text) {
        split_paragraph(text, para, &mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Measures
// ---------------------------------------------------------------------------

pub(crate) fn syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 1;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }
    let n = letters.len();
    let silent_e = n > 2
        && letters[n - 1] == 'e'
        && letters[n - 2] != 'l'
        && letters[n - 2] != 'e'
        && !is_vowel(letters[n - 2]);
    if silent_e && count > 1 {
        count -= 1;
    }
    count.max(1)
}

pub(crate) fn is_passive(sentence: &str) -> bool {
    PASSIVE_RE.is_match(sentence)
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, variance.sqrt())
}

pub(crate) fn population_std(values: &[f64]) -> f64 {
    mean_and_std(values).1
}

pub fn analyze(text: &str) -> TextStats {
    let words: Vec<&str> = word_tokens(text).collect();
    if words.is_empty() {
        return TextStats::default();
    }

    let sentence_texts: Vec<&str> = sentences(text)
        .into_iter()
        .map(|span| span.slice(text))
        .filter(|s| word_count(s) > 0)
        .collect();
    let lengths: Vec<f64> = sentence_texts.iter().map(|s| word_count(s) as f64).collect();
    let (avg, std) = mean_and_std(&lengths);

    let wc = words.len();
    let sc = sentence_texts.len().max(1);
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();
    let words_per_sentence = wc as f64 / sc as f64;
    let syllables_per_word = syllable_count as f64 / wc as f64;

    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let passive = sentence_texts.iter().filter(|s| is_passive(s)).count();

    TextStats {
        word_count: wc,
        sentence_count: sentence_texts.len(),
        paragraph_count: paragraphs(text).len(),
        syllable_count,
        avg_sentence_length: round_to(avg, 2),
        sentence_variety: round_to(std, 2),
        flesch_score: round_to(
            206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            2,
        ),
        grade_level: round_to(
            0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            2,
        ),
        vocabulary_diversity: round_to(unique.len() as f64 / wc as f64, 4),
        passive_voice_ratio: round_to(passive as f64 / sc as f64, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence_texts(text: &str) -> Vec<&str> {
        sentences(text).into_iter().map(|s| s.slice(text)).collect()
    }

    #[test]
    fn empty_text_is_all_zero() {
        assert_eq!(analyze(""), TextStats::default());
        assert_eq!(analyze("  \n\n\t "), TextStats::default());
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let s = sentence_texts("The vote passed. Turnout was low! Was it fair? Nobody knows.");
        assert_eq!(
            s,
            vec!["The vote passed.", "Turnout was low!", "Was it fair?", "Nobody knows."]
        );
    }

    #[test]
    fn abbreviations_and_decimals_do_not_split() {
        let s = sentence_texts("Dr. Smith met Mr. J. Jones at 3.5 p.m. on Monday. They talked.");
        assert_eq!(s.len(), 2, "got {s:?}");
        assert!(s[0].starts_with("Dr. Smith"));
    }

    #[test]
    fn quotations_are_never_split() {
        let text = "\"We tried. We failed. We will try again,\" said Ana Ruiz. The rest followed.";
        let s = sentence_texts(text);
        assert_eq!(s.len(), 2, "got {s:?}");
        assert!(s[0].ends_with("said Ana Ruiz."));
    }

    #[test]
    fn quote_ending_a_sentence_splits_before_capitalized_word() {
        let text = "She said \u{201C}It is done.\u{201D} The crowd cheered.";
        let s = sentence_texts(text);
        assert_eq!(s, vec!["She said \u{201C}It is done.\u{201D}", "The crowd cheered."]);
    }

    #[test]
    fn sentences_do_not_cross_paragraphs() {
        let text = "Heading without period\n\nBody text here. More text.";
        assert_eq!(sentence_texts(text).len(), 3);
        assert_eq!(paragraphs(text).len(), 2);
    }

    #[test]
    fn unterminated_quote_runs_to_paragraph_end() {
        let text = "He said \"this never ends. Really.\n\nNext paragraph.";
        let s = sentence_texts(text);
        assert_eq!(s.len(), 2, "got {s:?}");
    }

    #[test]
    fn syllable_heuristic() {
        assert_eq!(syllables("the"), 1);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("table"), 2);
        assert_eq!(syllables("reading"), 2);
        assert_eq!(syllables("2024"), 1);
        assert_eq!(syllables("agree"), 2);
    }

    #[test]
    fn passive_detection_is_surface_level() {
        assert!(is_passive("The bill was passed by the senate."));
        assert!(is_passive("Results were quickly released."));
        assert!(is_passive("The report was written last year."));
        assert!(!is_passive("The senate passed the bill."));
    }

    #[test]
    fn statistics_for_simple_text() {
        let stats = analyze("The cat sat. The cat ran far away.\n\nThe dog was fed.");
        assert_eq!(stats.word_count, 12);
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.paragraph_count, 2);
        assert!((stats.avg_sentence_length - 4.0).abs() < 1e-9);
        assert!(stats.sentence_variety > 0.0);
        assert!((stats.passive_voice_ratio - 0.333).abs() < 1e-9);
        // nine distinct words, "the" and "cat" repeat
        assert!((stats.vocabulary_diversity - 0.75).abs() < 1e-9);
        assert!(stats.flesch_score > 80.0);
    }
}
