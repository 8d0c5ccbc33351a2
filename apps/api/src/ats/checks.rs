//! Document-level checks: parse rate, length, buzzwords.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const WORDS_PER_PAGE: f64 = 450.0;
const MIN_WORDS: usize = 350;
const MAX_WORDS: usize = 800;
const PARSE_RATE_CAP: u32 = 99;

static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{3,}").expect("static regex"));
static MID_LINE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s{3,}\S").expect("static regex"));

const BUZZWORDS: &[&str] = &[
    "results-driven",
    "team player",
    "detail-oriented",
    "go-getter",
    "synergy",
    "leverage",
    "proactive",
    "dynamic",
    "self-starter",
    "thought leader",
    "goal-oriented",
    "hardworking",
    "motivated",
    "passionate",
    "strategic thinker",
    "out-of-the-box",
    "think outside the box",
    "value add",
    "impactful",
    "excellent communication skills",
];

static BUZZWORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    BUZZWORDS
        .iter()
        .map(|&word| {
            let pattern = format!(r"\b{}\b", regex::escape(word));
            (word, Regex::new(&pattern).expect("escaped buzzword"))
        })
        .collect()
});

/// Estimated share of the document a simple ATS parser reads cleanly, 0 – 99.
///
/// Base rate is non-whitespace density. Penalties: tabs (−5), any run of 3+
/// whitespace (−5), more than 3 lines with a mid-line gap (−10). Capped below
/// 100: it is an estimate.
pub fn parse_rate(text: &str) -> u32 {
    let total = text.chars().count();
    if total == 0 {
        return 0;
    }
    let visible = text.chars().filter(|c| !c.is_whitespace()).count();

    let mut penalty = 0.0;
    if text.contains('\t') {
        penalty += 5.0;
    }
    if WIDE_GAP.is_match(text) {
        penalty += 5.0;
    }
    let gapped_lines = text.lines().filter(|l| MID_LINE_GAP.is_match(l)).count();
    if gapped_lines > 3 {
        penalty += 10.0;
    }

    let base = visible as f64 / total as f64 * 100.0;
    let rate = (base - penalty).round().max(0.0) as u32;
    rate.min(PARSE_RATE_CAP)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthVerdict {
    Empty,
    TooShort,
    TooLong,
    TwoPages,
    Optimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthReport {
    pub word_count: usize,
    pub page_estimate: u32,
    pub verdict: LengthVerdict,
    pub feedback: String,
}

pub fn check_length(text: &str) -> LengthReport {
    let word_count = text.split_whitespace().count();
    if word_count == 0 {
        return LengthReport {
            word_count: 0,
            page_estimate: 0,
            verdict: LengthVerdict::Empty,
            feedback: "Resume is empty.".to_string(),
        };
    }

    let page_estimate = ((word_count as f64 / WORDS_PER_PAGE).round_ties_even() as u32).max(1);

    let (verdict, feedback) = if word_count < MIN_WORDS {
        (
            LengthVerdict::TooShort,
            format!(
                "Resume is likely too short ({word_count} words). Consider adding more detail, especially quantifiable achievements."
            ),
        )
    } else if word_count > MAX_WORDS && page_estimate > 2 {
        (
            LengthVerdict::TooLong,
            format!(
                "Resume might be too long ({word_count} words, est. {page_estimate} pages). Aim for conciseness (1 page preferred, 2 max for extensive experience). Prioritize relevance."
            ),
        )
    } else if page_estimate == 2 {
        (
            LengthVerdict::TwoPages,
            format!(
                "Resume length is {word_count} words (est. {page_estimate} pages). Ensure all content is highly relevant and impactful."
            ),
        )
    } else {
        (
            LengthVerdict::Optimal,
            format!("Resume length ({word_count} words, est. 1 page) is within the optimal range."),
        )
    };

    LengthReport {
        word_count,
        page_estimate,
        verdict,
        feedback,
    }
}

/// Clichés found in the text, in list order.
pub fn find_buzzwords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    BUZZWORD_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(word, _)| word.to_string())
        .collect()
}
