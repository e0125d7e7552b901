// src/extractors/references.rs
use once_cell::sync::Lazy;
use regex::Regex;

// "[12] ..." or "12. ..." at line start
static NUMBERED_REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\[\d+\]|\d+\.)").expect("Failed to compile NUMBERED_REFERENCE_RE"));

// "Smith, J. ..." (APA author prefix)
static AUTHOR_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+,\s[A-Z]\.").expect("Failed to compile AUTHOR_PREFIX_RE"));

/// Split the lines of a references section into individual citations.
///
/// A new entry starts at a numbered marker (`[3]`, `3.`) or, after the first
/// line, at an APA-style `Surname, I.` prefix. Any other line continues the
/// current entry and is joined with a single space. Blank lines are ignored.
pub fn split_references<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut references = Vec::new();
    let mut current = String::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let starts_entry = NUMBERED_REFERENCE_RE.is_match(line)
            || (index > 0 && AUTHOR_PREFIX_RE.is_match(line));

        if starts_entry && !current.is_empty() {
            references.push(current.trim().to_string());
            current.clear();
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }

    if !current.trim().is_empty() {
        references.push(current.trim().to_string());
    }

    tracing::trace!("Split references section into {} entries", references.len());
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_entries() {
        let refs = split_references(&["1. Smith, J. Title A.", "2. Doe, J. Title B."]);
        assert_eq!(refs, vec!["1. Smith, J. Title A.", "2. Doe, J. Title B."]);
    }

    #[test]
    fn test_bracketed_entries_with_continuation_lines() {
        let refs = split_references(&[
            "[1] A. Author and B. Author. A long title that",
            "wraps onto a second line. In Proc. X, 2020.",
            "",
            "[2] C. Author. Short. 2021.",
        ]);
        assert_eq!(
            refs,
            vec![
                "[1] A. Author and B. Author. A long title that wraps onto a second line. In Proc. X, 2020.",
                "[2] C. Author. Short. 2021.",
            ]
        );
    }

    #[test]
    fn test_apa_author_prefix_starts_entry_after_first_line() {
        let refs = split_references(&[
            "Smith, J. (2020). First work.",
            "Journal of Things, 4(2), 1-10.",
            "Doe, A. (2019). Second work.",
        ]);
        assert_eq!(
            refs,
            vec![
                "Smith, J. (2020). First work. Journal of Things, 4(2), 1-10.",
                "Doe, A. (2019). Second work.",
            ]
        );
    }

    #[test]
    fn test_unmarked_lines_form_single_entry() {
        let refs = split_references(&["some citation text", "continues here"]);
        assert_eq!(refs, vec!["some citation text continues here"]);
    }

    #[test]
    fn test_empty_input() {
        let refs = split_references::<&str>(&[]);
        assert!(refs.is_empty());
    }
}
