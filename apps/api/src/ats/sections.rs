//! Essential résumé section detection.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

struct SectionRule {
    name: &'static str,
    missing_label: &'static str,
    pattern: Regex,
}

static SECTION_RULES: LazyLock<Vec<SectionRule>> = LazyLock::new(|| {
    [
        (
            "Skills",
            "Skills/Technologies",
            r"(?m)^\s*(skills?|technical skills?|proficiencies|technologies)\b",
        ),
        (
            "Experience",
            "Experience",
            r"(?m)^\s*(experience|work experience|professional experience|employment history|career)\b",
        ),
        (
            "Education",
            "Education",
            r"(?m)^\s*(education|academic background|qualifications)\b",
        ),
        (
            "Summary/Profile/Objective",
            "Summary/Profile/Objective",
            r"\b(summary|profile|objective|about me)\b",
        ),
        (
            "Projects",
            "Projects (Highly Recommended)",
            r"(?m)^\s*(projects?|personal projects?|portfolio)\b",
        ),
    ]
    .into_iter()
    .map(|(name, missing_label, pattern)| SectionRule {
        name,
        missing_label,
        pattern: Regex::new(pattern).expect("static regex"),
    })
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Every rule lands in exactly one of `found` / `missing`. Headings other than
/// the summary must start a line.
pub fn check_sections(text: &str) -> SectionReport {
    let lowered = text.to_lowercase();
    let mut report = SectionReport::default();
    for rule in SECTION_RULES.iter() {
        if rule.pattern.is_match(&lowered) {
            report.found.push(rule.name.to_string());
        } else {
            report.missing.push(rule.missing_label.to_string());
        }
    }
    report
}
