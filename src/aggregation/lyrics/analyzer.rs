//! Structural metrics derived from free-form lyrics text.
//!
//! Verse and chorus detection are heuristics. They give a rough shape of
//! the song, not a structural parse, and are not meant to be accurate.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Two or more consecutive blank lines (after line trimming)
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern is valid"));

/// Anything that is neither a word character nor whitespace
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern is valid"));

/// Section labels that usually mark a chorus
const CHORUS_MARKERS: [&str; 3] = ["chorus", "hook", "refrain"];

/// Lines must be longer than this to count as a repeated chorus line
const MIN_REPEATED_LINE_CHARS: usize = 10;

/// Lines per verse assumed by [`estimate_verses`]
const LINES_PER_VERSE: usize = 4;

/// Everything the analyzer derives from one lyrics text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsAnalysis {
    pub cleaned: String,
    pub lines: Vec<String>,
    pub word_count: usize,
    pub verse_count: usize,
    pub has_chorus: bool,
}

/// Run every metric over `raw`
pub fn analyze(raw: &str) -> LyricsAnalysis {
    let cleaned = normalize(raw);
    let lines = split_lines(&cleaned);

    LyricsAnalysis {
        word_count: count_words(&cleaned),
        verse_count: estimate_verses(lines.len()),
        has_chorus: detect_chorus(&cleaned),
        lines,
        cleaned,
    }
}

/// Normalize line endings and whitespace.
///
/// - `\r\n` and lone `\r` become `\n`
/// - every line is trimmed
/// - runs of blank lines collapse to a single blank line
/// - the whole text is trimmed
///
/// Applying this twice gives the same result as applying it once.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_RUN.replace_all(&trimmed, "\n\n").trim().to_string()
}

/// Non-empty trimmed lines, in order
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count whitespace-separated words once punctuation is stripped
pub fn count_words(text: &str) -> usize {
    NON_WORD.replace_all(text, " ").split_whitespace().count()
}

/// Rough verse count: one verse per four lines, rounded up past a boundary.
///
/// No lines means no verses.
pub fn estimate_verses(line_count: usize) -> usize {
    if line_count == 0 {
        0
    } else {
        line_count / LINES_PER_VERSE + 1
    }
}

/// Guess whether the song has a chorus.
///
/// True when the text mentions a chorus marker, or when any substantial
/// line occurs more than once. Stops at the first repeat.
pub fn detect_chorus(text: &str) -> bool {
    let lower = text.to_lowercase();
    if CHORUS_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }

    let mut seen = HashSet::new();
    text.split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_REPEATED_LINE_CHARS)
        .any(|line| !seen.insert(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize("one\r\ntwo\rthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize("Line one\n\n\n\nLine two"), "Line one\n\nLine two");
        // A single blank line is kept as-is
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_whitespace_only_lines_count_as_blank() {
        assert_eq!(normalize("a\n  \n\t\n \nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_trims_lines_and_text() {
        assert_eq!(normalize("\n\n  Hello  \n  world \n\n"), "Hello\nworld");
    }

    #[test]
    fn test_split_lines_drops_blanks() {
        assert_eq!(split_lines("a\n\nb\n  \nc"), vec!["a", "b", "c"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_count_words_strips_punctuation() {
        assert_eq!(count_words("Hello, world! It's me..."), 5);
        assert_eq!(count_words("rock-n-roll"), 3);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_estimate_verses() {
        assert_eq!(estimate_verses(0), 0);
        assert_eq!(estimate_verses(1), 1);
        assert_eq!(estimate_verses(3), 1);
        assert_eq!(estimate_verses(4), 2);
        assert_eq!(estimate_verses(9), 3);
    }

    #[test]
    fn test_chorus_keyword() {
        assert!(detect_chorus("[Chorus]\nla la"));
        assert!(detect_chorus("Here comes the HOOK"));
        assert!(detect_chorus("refrain"));
    }

    #[test]
    fn test_chorus_repeated_long_line() {
        let text = "We will we will rock you\nsomething else\nWe will we will rock you";
        assert!(detect_chorus(text));
    }

    #[test]
    fn test_no_chorus_for_unique_short_lines() {
        assert!(!detect_chorus("short one\nshort two\nshort one"));
        assert!(!detect_chorus("a\nb\nc"));
    }

    #[test]
    fn test_repeated_line_must_exceed_ten_chars() {
        // Exactly ten characters repeated does not count
        assert!(!detect_chorus("0123456789\n0123456789"));
        assert!(detect_chorus("0123456789a\n0123456789a"));
    }

    #[test]
    fn test_analyze() {
        let analysis = analyze("Line one\r\n\r\n\r\n\r\nLine two");
        assert_eq!(analysis.cleaned, "Line one\n\nLine two");
        assert_eq!(analysis.lines, vec!["Line one", "Line two"]);
        assert_eq!(analysis.word_count, 4);
        assert_eq!(analysis.verse_count, 1);
        assert!(!analysis.has_chorus);
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing twice is the same as normalizing once
        #[test]
        fn normalize_is_idempotent(input in "[a-z \t\r\n.,!']{0,80}") {
            let once = normalize(&input);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Normalized text never contains CR or more than one blank line in a row
        #[test]
        fn normalize_output_shape(input in "[a-z \r\n]{0,80}") {
            let out = normalize(&input);
            prop_assert!(!out.contains('\r'));
            prop_assert!(!out.contains("\n\n\n"));
        }

        /// Verse estimate follows floor(n / 4) + 1 for any non-empty line count
        #[test]
        fn verse_formula(n in 1usize..10_000) {
            prop_assert_eq!(estimate_verses(n), n / 4 + 1);
        }

        /// A long line repeated twice is always detected
        #[test]
        fn repeated_long_line_is_chorus(line in "[a-z]{11,30}", filler in "[a-z]{1,5}") {
            let text = format!("{line}\n{filler}\n{line}");
            prop_assert!(detect_chorus(&text));
        }
    }
}
