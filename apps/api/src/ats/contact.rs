//! Contact-block extraction from the top of a résumé.
//!
//! Phone and location only look at the header lines; email and profile links
//! are searched across the whole text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const PHONE_SCAN_LINES: usize = 5;
const HEADER_SCAN_LINES: usize = 10;

static KEYWORD_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:phone|mobile|tel\.?)\s*:?\s*([+()\d\s-]{10,})").expect("static regex")
});
static GENERAL_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("static regex")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").expect("static regex"));
static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[\w\-.]+/?").expect("static regex")
});
static GITHUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[\w\-.]+/?").expect("static regex")
});
static WEB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?[\w\-.]+\.(?:com|io|dev|me|net|org|ai|co|tech|app|page)/?[\w\-/.?=&%]*",
    )
    .expect("static regex")
});
static LOCATION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)address:|location:").expect("static regex"));
static CITY_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z.\- ]+?),\s*([A-Z][a-zA-Z.\- ]+)\b").expect("static regex")
});

const LEGACY_EMAIL_DOMAINS: &[&str] = &["aol.com", "yahoo.com", "hotmail.com", "ymail.com"];
const PORTFOLIO_KEYWORDS: &[&str] = &[
    "portfolio",
    "website",
    "blog",
    "behance",
    "dribbble",
    "medium",
    "gitlab",
];
const PORTFOLIO_DOMAINS: &[&str] = &[
    ".dev",
    ".me",
    ".io",
    ".ai",
    ".tech",
    ".app",
    ".page",
    "behance.net",
    "dribbble.com",
    "medium.com",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    let lines: Vec<&str> = text.lines().collect();
    let mut info = ContactInfo {
        phone_number: find_phone(&lines),
        ..ContactInfo::default()
    };

    if let Some(m) = EMAIL.find(text) {
        let email = m.as_str().to_string();
        let lowered = email.to_lowercase();
        if LEGACY_EMAIL_DOMAINS.iter().any(|d| lowered.contains(d)) {
            info.email_warning = Some(
                "Consider using a more standard/professional email provider (e.g., Gmail, Outlook, custom domain)."
                    .to_string(),
            );
        }
        info.email_address = Some(email);
    }

    info.linkedin_url = LINKEDIN.find(text).map(|m| m.as_str().to_string());
    info.github_url = GITHUB
        .find(text)
        .map(|m| m.as_str().to_string())
        .filter(|url| info.linkedin_url.as_deref() != Some(url.as_str()));
    info.portfolio_url = find_portfolio(text, &lines, &info);
    info.location = find_location(&lines);

    info
}

fn find_phone(lines: &[&str]) -> Option<String> {
    for line in lines.iter().take(PHONE_SCAN_LINES) {
        let candidate = KEYWORD_PHONE
            .captures(line)
            .and_then(|c| c.get(1))
            .or_else(|| GENERAL_PHONE.find(line))
            .map(|m| m.as_str().trim());

        if let Some(phone) = candidate {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if (10..=15).contains(&digits) {
                return Some(phone.to_string());
            }
        }
    }
    None
}

fn find_portfolio(text: &str, lines: &[&str], info: &ContactInfo) -> Option<String> {
    let header: Vec<String> = lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .map(|l| l.to_lowercase())
        .collect();

    for m in WEB_URL.find_iter(text) {
        let url = m.as_str();
        let url_lower = url.to_lowercase();

        let already_claimed = [&info.linkedin_url, &info.github_url]
            .into_iter()
            .flatten()
            .any(|known| url_lower.contains(&known.to_lowercase()))
            || info
                .email_address
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&url_lower));
        if already_claimed {
            continue;
        }

        let near_keyword = header.iter().any(|line| {
            line.contains(&url_lower) && PORTFOLIO_KEYWORDS.iter().any(|k| line.contains(k))
        });
        let plausible_domain = PORTFOLIO_DOMAINS.iter().any(|d| url_lower.contains(d));

        if near_keyword || plausible_domain {
            return Some(url.to_string());
        }
    }
    None
}

fn find_location(lines: &[&str]) -> Option<String> {
    let header = &lines[..lines.len().min(HEADER_SCAN_LINES)];

    // Labelled "Location:" / "Address:" lines win; the value may sit on the next line.
    for (i, line) in header.iter().enumerate() {
        if !LOCATION_LABEL.is_match(line) {
            continue;
        }
        let value = LOCATION_LABEL.split(line).last().unwrap_or_default().trim();
        if !value.is_empty() {
            return clean_location(value);
        }
        let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or_default();
        if !next.is_empty() && !next.contains(':') {
            return clean_location(next);
        }
    }

    // Otherwise a "City, Region" pair in the first few lines.
    for line in lines.iter().take(PHONE_SCAN_LINES) {
        let Some(m) = CITY_REGION.find(line) else {
            continue;
        };
        let candidate = m.as_str();
        if looks_like_heading(candidate)
            || candidate.len() <= 3
            || candidate.contains('@')
            || candidate.contains("http")
            || candidate.contains('(')
        {
            continue;
        }
        return clean_location(candidate);
    }
    None
}

fn looks_like_heading(s: &str) -> bool {
    let mut letters = s.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

fn clean_location(raw: &str) -> Option<String> {
    let cleaned = raw.trim_matches(|c: char| c == ' ' || c == '.' || c == ',');
    if cleaned.is_empty() {
        return None;
    }
    // Mostly digits and short: a phone or zip code, not a place.
    let digits = cleaned.chars().filter(char::is_ascii_digit).count();
    if digits > 6 && cleaned.len() < 25 {
        return None;
    }
    Some(cleaned.to_string())
}
