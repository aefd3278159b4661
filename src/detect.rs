//! Detection of cooking times in instruction text
//!
//! Each unit class (hours, minutes, seconds) is scanned over the whole text
//! in its own pass. Results come out pass by pass, so every hour match
//! precedes every minute match regardless of where they sit in the text.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

struct UnitPattern {
    regex: Regex,
    multiplier: u64,
}

fn unit_pattern(units: &str, multiplier: u64) -> UnitPattern {
    let regex = Regex::new(&format!(r"(?i)([0-9]+)\s*(?:{})\b", units))
        .expect("valid unit regex (verified by tests)");

    UnitPattern { regex, multiplier }
}

static UNIT_PATTERNS: LazyLock<[UnitPattern; 3]> = LazyLock::new(|| {
    [
        unit_pattern("hours?|hrs?|h", 3600),
        unit_pattern("minutes?|mins?|m", 60),
        unit_pattern("seconds?|secs?|s", 1),
    ]
});

/// A duration found in text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedTime {
    pub seconds: u64,
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset just past the match
    pub end: usize,
    /// The matched text, e.g. `25 minutes`
    pub text: String,
}

/// Find every time expression in `text`.
///
/// Zero-length matches such as "0 minutes" are skipped, as are numbers too
/// large to express in seconds. Two different phrases with the same value are
/// both kept.
pub fn detect_times(text: &str) -> Vec<DetectedTime> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for pattern in UNIT_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Ok(value) = number.as_str().parse::<u64>() else {
                continue;
            };
            let Some(seconds) = value.checked_mul(pattern.multiplier) else {
                continue;
            };

            if seconds == 0 || !seen.insert((whole.start(), value, pattern.multiplier)) {
                continue;
            }

            found.push(DetectedTime {
                seconds,
                start: whole.start(),
                end: whole.end(),
                text: whole.as_str().to_string(),
            });
        }
    }

    found
}

/// Durations in seconds found in `text`, see [`detect_times`]
pub fn detect(text: &str) -> Vec<u64> {
    detect_times(text).into_iter().map(|time| time.seconds).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert_eq!(UNIT_PATTERNS.len(), 3);
    }

    #[test]
    fn minutes_in_text_order() {
        assert_eq!(detect("Bake for 25 minutes, then let rest 10 minutes"), vec![1500, 600]);
    }

    #[test]
    fn passes_run_hours_then_minutes_then_seconds() {
        assert_eq!(
            detect("Simmer for 1 hour and 30 minutes, check after 10 seconds"),
            vec![3600, 1800, 10]
        );
        assert_eq!(detect("Rest 10 seconds, then bake 2 hours"), vec![7200, 10]);
    }

    #[test]
    fn zero_is_discarded() {
        assert!(detect("0 minutes").is_empty());
        assert_eq!(detect("0 hours and 5 minutes"), vec![300]);
    }

    #[test]
    fn equal_values_are_not_merged() {
        assert_eq!(detect("Stir for 60 seconds or about 1 minute"), vec![60, 60]);
    }

    #[test]
    fn abbreviations_and_case() {
        assert_eq!(detect("2 HRS"), vec![7200]);
        assert_eq!(detect("1h"), vec![3600]);
        assert_eq!(detect("5 mins"), vec![300]);
        assert_eq!(detect("10m"), vec![600]);
        assert_eq!(detect("3 Secs"), vec![3]);
        assert_eq!(detect("45s"), vec![45]);
    }

    #[test]
    fn unit_needs_word_boundary() {
        assert!(detect("Add 3 medium eggs").is_empty());
        assert!(detect("Serves 4 hungry people").is_empty());
    }

    #[test]
    fn no_numbers_no_times() {
        assert!(detect("Season to taste").is_empty());
        assert!(detect("").is_empty());
    }

    #[test]
    fn oversized_numbers_are_skipped() {
        assert!(detect("99999999999999999999 hours").is_empty());
    }

    #[test]
    fn spans_point_at_the_phrase() {
        let text = "Bake for 25 minutes";
        let found = detect_times(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "25 minutes");
        assert_eq!(&text[found[0].start..found[0].end], "25 minutes");
    }

    #[test]
    fn detection_is_deterministic() {
        let text = "Boil 8 minutes, drain, rest 30 seconds";
        assert_eq!(detect(text), detect(text));
        assert_eq!(detect(text), vec![480, 30]);
    }
}
