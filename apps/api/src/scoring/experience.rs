//! Years-of-experience heuristic.
//!
//! Sums every integer that immediately precedes "year"/"yr" (optionally
//! pluralized) anywhere in the resume text. Known weakness: this counts
//! unrelated phrases too (a "3 year warranty" mention adds 3). The
//! over-counting is deliberate, matching behavior the product has always had.

use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::EXPERIENCE_NOT_SPECIFIED;

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:year|yr)s?").expect("years pattern is valid"));

/// Returns "`<sum> years`" over all matches, or "not specified" when the text
/// contains no year-count phrase at all.
pub fn summarize_experience(resume_text: &str) -> String {
    let mut found = false;
    let mut total: u64 = 0;
    for caps in YEARS_RE.captures_iter(resume_text) {
        // The capture is all digits; parse only fails on overflow.
        let years = caps[1].parse::<u64>().unwrap_or(u64::MAX);
        found = true;
        total = total.saturating_add(years);
    }

    if found {
        format!("{total} years")
    } else {
        EXPERIENCE_NOT_SPECIFIED.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_years_and_yrs() {
        assert_eq!(
            summarize_experience("5 years of experience and 2 yrs internship"),
            "7 years"
        );
    }

    #[test]
    fn test_no_pattern_reports_not_specified() {
        assert_eq!(
            summarize_experience("Seasoned engineer, shipped many products"),
            "not specified"
        );
    }

    #[test]
    fn test_case_insensitive_and_singular() {
        assert_eq!(summarize_experience("3 Year warranty included"), "3 years");
    }

    #[test]
    fn test_digits_with_no_space_before_unit() {
        assert_eq!(summarize_experience("10yrs at BigCo"), "10 years");
    }

    #[test]
    fn test_every_occurrence_counts_even_unrelated_ones() {
        // 4 (tenure) + 3 (warranty) + 1: the heuristic does not distinguish.
        assert_eq!(
            summarize_experience("4 years at Acme; 3 year warranty program; 1 yr sabbatical"),
            "8 years"
        );
    }

    #[test]
    fn test_zero_years_is_still_a_match() {
        assert_eq!(summarize_experience("0 years"), "0 years");
    }
}
