use serde::{Deserialize, Serialize};

const BULLET_MARKERS: &[char] = &['*', '-', '•'];
const LONG_BULLET_WORDS: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletFinding {
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletReport {
    pub total: usize,
    pub long: Vec<BulletFinding>,
    pub unquantified: Vec<BulletFinding>,
}

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
    "responsible for",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "great",
    "many",
    "numerous",
    "various",
    "several",
];

/// Lines starting with `*`, `-` or `•`, marker stripped. Empty bullets are dropped.
pub fn extract_bullets(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let rest = trimmed.strip_prefix(BULLET_MARKERS)?;
            let bullet = rest.trim();
            (!bullet.is_empty()).then(|| bullet.to_string())
        })
        .collect()
}

/// A bullet counts as quantified when it carries any figure: a digit, `%`,
/// a currency sign. `~N` estimates and `Nx` multipliers contain a digit.
pub fn is_quantified(bullet: &str) -> bool {
    bullet.chars().any(|c| c.is_ascii_digit())
        || bullet.contains('%')
        || bullet.contains('$')
        || bullet.contains('€')
        || bullet.contains('£')
}

fn quantification_gap(bullet: &str) -> BulletFinding {
    let lowered = bullet.to_lowercase();

    if let Some(&verb) = VAGUE_VERBS.iter().find(|v| lowered.contains(*v)) {
        return BulletFinding {
            bullet: bullet.to_string(),
            reason: format!("Contains vague verb '{verb}' without quantified impact"),
            suggestion: format!(
                "Quantify '{verb}': how much? Add a number, percentage, or time saved."
            ),
        };
    }

    if let Some(&scale) = VAGUE_SCALE_WORDS
        .iter()
        .find(|w| lowered.split(|c: char| !c.is_alphanumeric()).any(|t| t == **w))
    {
        return BulletFinding {
            bullet: bullet.to_string(),
            reason: format!("Uses vague scale word '{scale}' without a number"),
            suggestion: format!(
                "Replace '{scale}' with a specific number: e.g., '5x', '40%', '3 weeks'"
            ),
        };
    }

    BulletFinding {
        bullet: bullet.to_string(),
        reason: "No quantified outcome found".to_string(),
        suggestion: "Add a metric: a number, percentage, amount, or time frame.".to_string(),
    }
}

pub fn check_bullets(text: &str) -> BulletReport {
    let bullets = extract_bullets(text);
    let mut report = BulletReport {
        total: bullets.len(),
        ..BulletReport::default()
    };

    for bullet in &bullets {
        let words = bullet.split_whitespace().count();
        if words > LONG_BULLET_WORDS {
            report.long.push(BulletFinding {
                bullet: bullet.clone(),
                reason: format!("Bullet is {words} words long"),
                suggestion: format!(
                    "Keep bullets under {LONG_BULLET_WORDS} words: lead with the action, end with the result."
                ),
            });
        }
        if !is_quantified(bullet) {
            report.unquantified.push(quantification_gap(bullet));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bullets_markers() {
        let text = "Experience\n- Built the API\n  * Wrote tests\n• Shipped v2\n-\nPlain line";
        assert_eq!(
            extract_bullets(text),
            vec!["Built the API", "Wrote tests", "Shipped v2"]
        );
    }

    #[test]
    fn test_quantified_forms() {
        assert!(is_quantified("Reduced latency by 40% through caching"));
        assert!(is_quantified("Saved $50,000 annually by optimizing queries"));
        assert!(is_quantified("Reduced deployment time by ~2 hours"));
        assert!(is_quantified("Generated €200k in new revenue"));
        assert!(is_quantified("Made builds 3x faster"));
        assert!(is_quantified("Processed 100k+ records daily"));
    }

    #[test]
    fn test_unquantified_forms() {
        assert!(!is_quantified("Improved the user experience"));
        assert!(!is_quantified("Architected the authentication system"));
    }

    #[test]
    fn test_vague_verb_reason() {
        let gap = quantification_gap("Helped the team deliver projects");
        assert!(gap.reason.contains("vague verb 'helped'"));
    }

    #[test]
    fn test_vague_scale_reason() {
        let gap = quantification_gap("Led major changes to the codebase");
        assert!(gap.reason.contains("vague scale word 'major'"));
    }

    #[test]
    fn test_scale_word_needs_whole_word() {
        // "greater" contains "great" but is not the scale word
        let gap = quantification_gap("Architected greater observability");
        assert_eq!(gap.reason, "No quantified outcome found");
    }

    #[test]
    fn test_check_bullets_report() {
        let long = vec!["word"; 45].join(" ");
        let text = format!("- Reduced latency by 40%\n- Improved the user experience\n- {long}");
        let report = check_bullets(&text);
        assert_eq!(report.total, 3);
        assert_eq!(report.long.len(), 1);
        assert_eq!(report.unquantified.len(), 2);
        assert!(report.unquantified[0].reason.contains("improved"));
    }

    #[test]
    fn test_no_bullets() {
        let report = check_bullets("Just a paragraph of prose.");
        assert_eq!(report.total, 0);
        assert!(report.long.is_empty());
        assert!(report.unquantified.is_empty());
    }
}
