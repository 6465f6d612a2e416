//! Parses the model's labeled four-line response into structured fields
//!
//! Line-oriented and order-independent; the first line matching each prefix
//! wins. Anything the model does not supply falls back to a fixed default,
//! so the result is always fully populated.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const NO_PERCENTAGE: &str = "No percentage found";
pub const NO_REASON: &str = "No reason provided";
pub const NO_SKILLS: &str = "No skills analysis provided";
pub const NO_KEYWORDS: &str = "No matching keywords found";

const PERCENTAGE_PREFIX: &str = "Matched Percentage:";
const REASON_PREFIX: &str = "Reason:";
const SKILLS_PREFIX: &str = "Skills To Improve:";
const KEYWORDS_PREFIX: &str = "Keywords:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    /// Model-estimated overlap score, 0-100. Absent when no digit run was
    /// found on the percentage line.
    pub matched_percentage: Option<u8>,
    pub percentage_label: String,
    pub reason: String,
    pub skills_to_improve: String,
    pub keywords: String,
}

impl Default for MatchAnalysis {
    fn default() -> Self {
        Self {
            matched_percentage: None,
            percentage_label: NO_PERCENTAGE.to_string(),
            reason: NO_REASON.to_string(),
            skills_to_improve: NO_SKILLS.to_string(),
            keywords: NO_KEYWORDS.to_string(),
        }
    }
}

pub fn parse(raw: &str) -> MatchAnalysis {
    let mut percentage: Option<u8> = None;
    let mut reason: Option<String> = None;
    let mut skills: Option<String> = None;
    let mut keywords: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();

        if percentage.is_none() && line.starts_with(PERCENTAGE_PREFIX) {
            if let Some(run) = digit_run().find(line) {
                // Runs over 100 (or too long for u32) clamp to the contract.
                percentage = Some(run.as_str().parse::<u32>().map_or(100, |v| v.min(100)) as u8);
            }
        } else if reason.is_none() && line.starts_with(REASON_PREFIX) {
            reason = Some(after_colon(line));
        } else if skills.is_none() && line.starts_with(SKILLS_PREFIX) {
            skills = Some(after_colon(line));
        } else if keywords.is_none() && line.starts_with(KEYWORDS_PREFIX) {
            keywords = Some(after_colon(line));
        }
    }

    MatchAnalysis {
        percentage_label: percentage
            .map(|p| format!("Match Score: {}%", p))
            .unwrap_or_else(|| NO_PERCENTAGE.to_string()),
        matched_percentage: percentage,
        reason: reason.unwrap_or_else(|| NO_REASON.to_string()),
        skills_to_improve: skills.unwrap_or_else(|| NO_SKILLS.to_string()),
        keywords: keywords.unwrap_or_else(|| NO_KEYWORDS.to_string()),
    }
}

fn after_colon(line: &str) -> String {
    line.split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

fn digit_run() -> &'static Regex {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    DIGIT_RUN.get_or_init(|| Regex::new(r"\d+").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "Matched Percentage: 82%\nReason: Strong skills overlap\nSkills To Improve: Cloud certifications\nKeywords: Python, AWS, Docker";

    #[test]
    fn test_full_response() {
        let analysis = parse(FULL_RESPONSE);

        assert_eq!(analysis.matched_percentage, Some(82));
        assert_eq!(analysis.percentage_label, "Match Score: 82%");
        assert_eq!(analysis.reason, "Strong skills overlap");
        assert_eq!(analysis.skills_to_improve, "Cloud certifications");
        assert_eq!(analysis.keywords, "Python, AWS, Docker");
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(parse(FULL_RESPONSE), parse(FULL_RESPONSE));
    }

    #[test]
    fn test_defaults_when_nothing_matches() {
        let analysis = parse("The model rambled about something else entirely.\n\nNo labels.");

        assert_eq!(analysis.matched_percentage, None);
        assert_eq!(analysis.percentage_label, NO_PERCENTAGE);
        assert_eq!(analysis.reason, NO_REASON);
        assert_eq!(analysis.skills_to_improve, NO_SKILLS);
        assert_eq!(analysis.keywords, NO_KEYWORDS);
    }

    #[test]
    fn test_first_match_wins_per_field() {
        let raw = "Reason: first explanation\nReason: second explanation\nMatched Percentage: 40\nMatched Percentage: 90";
        let analysis = parse(raw);

        assert_eq!(analysis.reason, "first explanation");
        assert_eq!(analysis.matched_percentage, Some(40));
    }

    #[test]
    fn test_digit_run_found_anywhere_in_line() {
        let analysis = parse("Matched Percentage: roughly 75 percent");
        assert_eq!(analysis.matched_percentage, Some(75));
        assert_eq!(analysis.percentage_label, "Match Score: 75%");
    }

    #[test]
    fn test_percentage_line_without_digits() {
        let analysis = parse("Matched Percentage: unknown\nReason: insufficient data");
        assert_eq!(analysis.matched_percentage, None);
        assert_eq!(analysis.percentage_label, NO_PERCENTAGE);
        assert_eq!(analysis.reason, "insufficient data");
    }

    #[test]
    fn test_percentage_clamped_to_contract() {
        assert_eq!(parse("Matched Percentage: 1000").matched_percentage, Some(100));
        assert_eq!(
            parse("Matched Percentage: 99999999999999999999").matched_percentage,
            Some(100)
        );
    }

    #[test]
    fn test_leading_whitespace_and_unknown_lines_ignored() {
        let raw = "Here is my analysis:\n   Keywords: Rust, Tokio\nFooter text";
        let analysis = parse(raw);
        assert_eq!(analysis.keywords, "Rust, Tokio");
        assert_eq!(analysis.reason, NO_REASON);
    }
}
