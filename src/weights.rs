//! Scoring constants.
//!
//! All weights and thresholds the engine uses live in one versioned table.
//! Bump `version` whenever a value changes so stored reports stay comparable.

/// Weights for the four quality categories. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub writing_quality: f64,
    pub accuracy: f64,
    pub structure: f64,
    pub variety: f64,
}

/// Weights for the four fact-check sub-scores. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactWeights {
    pub objectivity: f64,
    pub source_attribution: f64,
    pub fact_consistency: f64,
    pub credibility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WritingWeights {
    pub readability: f64,
    pub sentence: f64,
    pub grammar: f64,
    pub tone: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyWeights {
    pub fact_check: f64,
    pub fact_incorporation: f64,
    pub high_confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureWeights {
    pub lead: f64,
    pub pyramid: f64,
    pub paragraphs: f64,
    pub transitions: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarietyWeights {
    pub vocabulary: f64,
    pub sentence_structure: f64,
    pub content_types: f64,
}

/// Points a style rule costs when violated, once per rule category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePenalties {
    pub word_count: i32,
    pub char_limit: i32,
    pub dateline: i32,
    pub subheadings: i32,
    pub hashtags: i32,
    pub subject_header: i32,
    pub engagement: i32,
    pub second_person: i32,
    pub first_person: i32,
    pub serial_comma: i32,
    pub small_numerals: i32,
    pub informal_language: i32,
    pub placeholder: i32,
}

#[derive(Debug)]
pub struct ScoringWeights {
    pub version: &'static str,
    pub categories: CategoryWeights,
    pub fact: FactWeights,
    pub writing: WritingWeights,
    pub accuracy: AccuracyWeights,
    pub structure: StructureWeights,
    pub variety: VarietyWeights,
    pub style: StylePenalties,

    // Fact checking
    pub unattributed_quote_floor: f64,
    pub no_facts_default: i32,
    pub fact_token_match_ratio: f64,
    pub missing_sources_credibility: f64,
    pub anonymous_source_credibility: f64,
    pub named_source_credibility: f64,
    pub titled_source_bonus: f64,
    pub affiliated_source_bonus: f64,
    pub reliable_source_bonus: f64,
    pub verification_bonus_step: i32,
    pub verification_bonus_cap: i32,
    pub unattributed_credibility_cap: i32,
    pub strong_bias_penalty: i32,
    pub loaded_language_penalty: i32,
    pub opinion_marker_penalty: i32,
    pub emotional_word_penalty: i32,
    pub fact_issue_threshold: i32,
    pub fact_error_threshold: i32,
    pub fact_recommendation_threshold: i32,
    pub flagged_review_min: usize,
    pub fact_revision_threshold: i32,
    pub claim_medium_overlap: f64,

    // Quality aggregation
    pub needs_improvement_threshold: i32,
    pub strength_threshold: i32,
    pub high_confidence_claim_points: i32,
    pub pyramid_tolerance: f64,
    pub run_on_sentence_words: usize,
    pub run_on_ratio: f64,
    pub tone_mismatch_penalty: f64,

    // Professional rating tiers (inclusive lower bounds)
    pub rating_fair_min: i32,
    pub rating_good_min: i32,
    pub rating_excellent_min: i32,
}

pub static WEIGHTS: ScoringWeights = ScoringWeights {
    version: "1",
    categories: CategoryWeights {
        writing_quality: 0.40,
        accuracy: 0.25,
        structure: 0.20,
        variety: 0.15,
    },
    fact: FactWeights {
        objectivity: 0.30,
        source_attribution: 0.25,
        fact_consistency: 0.25,
        credibility: 0.20,
    },
    writing: WritingWeights {
        readability: 0.30,
        sentence: 0.25,
        grammar: 0.25,
        tone: 0.20,
    },
    accuracy: AccuracyWeights {
        fact_check: 0.60,
        fact_incorporation: 0.25,
        high_confidence: 0.15,
    },
    structure: StructureWeights {
        lead: 0.35,
        pyramid: 0.25,
        paragraphs: 0.25,
        transitions: 0.15,
    },
    variety: VarietyWeights {
        vocabulary: 0.40,
        sentence_structure: 0.30,
        content_types: 0.30,
    },
    style: StylePenalties {
        word_count: 20,
        char_limit: 20,
        dateline: 15,
        subheadings: 10,
        hashtags: 10,
        subject_header: 10,
        engagement: 5,
        second_person: 5,
        first_person: 15,
        serial_comma: 5,
        small_numerals: 5,
        informal_language: 10,
        placeholder: 15,
    },

    unattributed_quote_floor: 50.0,
    no_facts_default: 50,
    fact_token_match_ratio: 0.6,
    missing_sources_credibility: 40.0,
    anonymous_source_credibility: 20.0,
    named_source_credibility: 60.0,
    titled_source_bonus: 20.0,
    affiliated_source_bonus: 20.0,
    reliable_source_bonus: 10.0,
    verification_bonus_step: 5,
    verification_bonus_cap: 20,
    unattributed_credibility_cap: 80,
    strong_bias_penalty: 15,
    loaded_language_penalty: 10,
    opinion_marker_penalty: 5,
    emotional_word_penalty: 3,
    fact_issue_threshold: 50,
    fact_error_threshold: 25,
    fact_recommendation_threshold: 70,
    flagged_review_min: 5,
    fact_revision_threshold: 60,
    claim_medium_overlap: 0.5,

    needs_improvement_threshold: 60,
    strength_threshold: 85,
    high_confidence_claim_points: 25,
    pyramid_tolerance: 0.02,
    run_on_sentence_words: 40,
    run_on_ratio: 0.2,
    tone_mismatch_penalty: 40.0,

    rating_fair_min: 50,
    rating_good_min: 65,
    rating_excellent_min: 80,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn category_weights_are_pinned() {
        let c = WEIGHTS.categories;
        assert_eq!(c.writing_quality, 0.40);
        assert_eq!(c.accuracy, 0.25);
        assert_eq!(c.structure, 0.20);
        assert_eq!(c.variety, 0.15);
        assert_eq!(WEIGHTS.version, "1");
    }

    #[test]
    fn every_weight_group_sums_to_one() {
        let c = WEIGHTS.categories;
        assert!(close(c.writing_quality + c.accuracy + c.structure + c.variety, 1.0));
        let f = WEIGHTS.fact;
        assert!(close(
            f.objectivity + f.source_attribution + f.fact_consistency + f.credibility,
            1.0
        ));
        let w = WEIGHTS.writing;
        assert!(close(w.readability + w.sentence + w.grammar + w.tone, 1.0));
        let a = WEIGHTS.accuracy;
        assert!(close(a.fact_check + a.fact_incorporation + a.high_confidence, 1.0));
        let s = WEIGHTS.structure;
        assert!(close(s.lead + s.pyramid + s.paragraphs + s.transitions, 1.0));
        let v = WEIGHTS.variety;
        assert!(close(v.vocabulary + v.sentence_structure + v.content_types, 1.0));
    }

    #[test]
    fn style_penalties_are_pinned() {
        let p = WEIGHTS.style;
        assert_eq!((p.word_count, p.char_limit), (20, 20));
        assert_eq!(
            [p.dateline, p.subheadings, p.hashtags, p.subject_header, p.engagement, p.second_person],
            [15, 10, 10, 10, 5, 5]
        );
        assert_eq!(
            [p.first_person, p.serial_comma, p.small_numerals, p.informal_language, p.placeholder],
            [15, 5, 5, 10, 15]
        );
    }

    #[test]
    fn rating_tiers_ascend() {
        assert!(WEIGHTS.rating_fair_min < WEIGHTS.rating_good_min);
        assert!(WEIGHTS.rating_good_min < WEIGHTS.rating_excellent_min);
        assert!(WEIGHTS.rating_excellent_min <= 100);
    }
}
