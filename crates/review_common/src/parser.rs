//! Decision extraction from raw model output.
//!
//! A raw completion may mention both words (reasoning text like "not the
//! same, they are different" ahead of the answer). The start-of-line scan is
//! the authoritative signal; substring position within the leading window is
//! only a fallback. Ambiguity always resolves to `Different` so the gateway
//! never merges on uncertain output.

use crate::review::Decision;

/// How far into the raw response the substring fallback looks.
const FALLBACK_WINDOW: usize = 100;

/// Extract a [`Decision`] from raw model text.
///
/// Total over all inputs, including the empty string.
pub fn parse_decision(response: &str) -> Decision {
    // Primary: first line that starts with either answer word.
    for line in response.trim().lines() {
        let upper = line.trim().to_uppercase();
        if upper.starts_with("SAME") {
            return Decision::Same;
        }
        if upper.starts_with("DIFFERENT") {
            return Decision::Different;
        }
    }

    // Fallback: whichever word appears first in the leading window of the
    // raw (untrimmed) input.
    let window = response
        .chars()
        .take(FALLBACK_WINDOW)
        .collect::<String>()
        .to_uppercase();
    let same_pos = window.find("SAME");
    let diff_pos = window.find("DIFFERENT");

    match (same_pos, diff_pos) {
        (Some(_), None) => Decision::Same,
        (Some(s), Some(d)) if s < d => Decision::Same,
        (_, Some(_)) => Decision::Different,
        // Neither word present: conservative default.
        (None, None) => Decision::Different,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_answers() {
        assert_eq!(parse_decision("SAME"), Decision::Same);
        assert_eq!(parse_decision("DIFFERENT"), Decision::Different);
        assert_eq!(parse_decision("same"), Decision::Same);
        assert_eq!(parse_decision("  different  "), Decision::Different);
    }

    #[test]
    fn test_explicit_line_wins_over_fallback() {
        // First matching line is authoritative even when the other word
        // appears later in the text.
        assert_eq!(
            parse_decision("SAME\nThese are different entities though"),
            Decision::Same
        );
    }

    #[test]
    fn test_answer_line_after_reasoning_line() {
        // Line 1 starts with neither word; line 2 is an explicit answer.
        assert_eq!(parse_decision("I think DIFFERENT\nSAME"), Decision::Same);
    }

    #[test]
    fn test_earlier_answer_line_wins() {
        assert_eq!(parse_decision("DIFFERENT\nSAME"), Decision::Different);
    }

    #[test]
    fn test_fallback_earlier_position_wins() {
        // No line starts with either word, both appear in the window:
        // earlier occurrence decides.
        assert_eq!(
            parse_decision("I think the DIFFERENT forms are actually SAME entities."),
            Decision::Different
        );
        assert_eq!(
            parse_decision("It says SAME though they look different at first."),
            Decision::Same
        );
    }

    #[test]
    fn test_fallback_single_word_in_window() {
        assert_eq!(parse_decision("They are the same entity."), Decision::Same);
        assert_eq!(
            parse_decision("Those records are clearly different."),
            Decision::Different
        );
    }

    #[test]
    fn test_ambiguous_input_defaults_to_different() {
        assert_eq!(parse_decision("I am not sure."), Decision::Different);
        assert_eq!(parse_decision(""), Decision::Different);
        assert_eq!(parse_decision("\n\n  \n"), Decision::Different);
    }

    #[test]
    fn test_word_beyond_window_is_not_seen() {
        // The fallback scans only the first 100 characters; a padded
        // preamble pushes the answer word out of sight and the parser
        // defaults to DIFFERENT.
        let padded = format!("{} the records are the same", "x".repeat(100));
        assert_eq!(parse_decision(&padded), Decision::Different);
    }

    #[test]
    fn test_window_is_counted_in_characters() {
        // Multi-byte text ahead of the answer word must not panic the
        // window slicing.
        let text = format!("{} same", "é".repeat(90));
        assert_eq!(parse_decision(&text), Decision::Same);
    }
}
