//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Word limit applied to synopses on listing cards.
const SYNOPSIS_WORD_LIMIT: usize = 40;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Truncates a synopsis to the card word limit.
///
/// Usage in templates: `{{ book.synopsis|truncate_synopsis }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn truncate_synopsis(
    value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(truncate_words(&value.to_string(), SYNOPSIS_WORD_LIMIT))
}

/// Truncate text to `limit` words, appending an ellipsis when shortened.
fn truncate_words(text: &str, limit: usize) -> String {
    let mut words = text.split_whitespace();
    let truncated: Vec<&str> = words.by_ref().take(limit).collect();
    if words.next().is_some() {
        format!("{}\u{2026}", truncated.join(" "))
    } else {
        truncated.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_words_short_text_untouched() {
        assert_eq!(truncate_words("a family saga", 40), "a family saga");
    }

    #[test]
    fn test_truncate_words_appends_ellipsis() {
        assert_eq!(truncate_words("one two three four", 2), "one two\u{2026}");
    }

    #[test]
    fn test_truncate_words_normalizes_whitespace() {
        assert_eq!(truncate_words("  one   two  ", 5), "one two");
    }

    #[test]
    fn test_truncate_words_empty() {
        assert_eq!(truncate_words("", 5), "");
    }
}
