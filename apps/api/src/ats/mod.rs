// Standard ATS checks over plain résumé text. All checks are pure; the only
// clock read is `checked_at`.

pub mod bullets;
pub mod checks;
pub mod contact;
pub mod handlers;
pub mod sections;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::bullets::{check_bullets, BulletReport};
use crate::ats::checks::{check_length, find_buzzwords, parse_rate, LengthReport};
use crate::ats::contact::{extract_contact_info, ContactInfo};
use crate::ats::sections::{check_sections, SectionReport};

const FORMATTING_BASE: i32 = 70;
const FORMATTING_PENALTY_PER_SECTION: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub parse_rate: u32,
    pub length: LengthReport,
    pub buzzwords: Vec<String>,
    pub contact_information: ContactInfo,
    pub sections: SectionReport,
    pub bullets: BulletReport,
    /// Layout estimate from text alone: 70 minus 5 per missing section.
    pub formatting_score: u32,
    pub checked_at: DateTime<Utc>,
}

pub fn formatting_score(missing_sections: usize) -> u32 {
    let missing = i32::try_from(missing_sections).unwrap_or(i32::MAX / FORMATTING_PENALTY_PER_SECTION);
    (FORMATTING_BASE - FORMATTING_PENALTY_PER_SECTION * missing).max(0) as u32
}

pub fn run_ats_checks(resume_text: &str) -> AtsReport {
    let sections = check_sections(resume_text);
    let report = AtsReport {
        parse_rate: parse_rate(resume_text),
        length: check_length(resume_text),
        buzzwords: find_buzzwords(resume_text),
        contact_information: extract_contact_info(resume_text),
        formatting_score: formatting_score(sections.missing.len()),
        sections,
        bullets: check_bullets(resume_text),
        checked_at: Utc::now(),
    };

    info!(
        "ATS checks: parse_rate={} words={} buzzwords={} missing_sections={} unquantified_bullets={}",
        report.parse_rate,
        report.length.word_count,
        report.buzzwords.len(),
        report.sections.missing.len(),
        report.bullets.unquantified.len()
    );

    if report.contact_information.is_empty() {
        warn!("ATS checks: no contact information found");
    }

    report
}
