use std::collections::BTreeSet;

use unicode_normalization::char::is_combining_mark;

use crate::config::Configuration;

/// Whether `c` can be part of a word: a letter or a combining mark.
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || is_combining_mark(c)
}

/// Replace every run of characters that are neither letters nor combining
/// marks with a single space.
///
/// Marks are kept wherever they occur, so `"cafe\u{301}"` stays one word
/// and a mark following a digit survives the digit's removal.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;

    for c in text.chars() {
        if is_word_char(c) {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }

    out
}

/// Extract the candidate keywords of a note.
///
/// A non-empty `selection` is used verbatim; otherwise `text` is
/// normalized first. Tokens are split on single spaces, stripped of any
/// remaining whitespace, and kept when they have more than
/// `config.min_letters` characters and are not stop words. Keywords are
/// lowercase.
///
/// # Examples
///
/// ```
/// use related_notes::{Configuration, tokenizer::extract_keywords};
///
/// let config = Configuration::default();
/// let keywords = extract_keywords("The Quick Brown Fox", None, &config);
/// let keywords: Vec<_> = keywords.into_iter().collect();
/// assert_eq!(keywords, vec!["brown", "quick"]);
/// ```
pub fn extract_keywords(
    text: &str,
    selection: Option<&str>,
    config: &Configuration,
) -> BTreeSet<String> {
    let source = match selection {
        Some(selected) if !selected.is_empty() => selected.to_string(),
        _ => normalize(text),
    };

    let tokens: BTreeSet<&str> = source.split(' ').collect();

    tokens
        .into_iter()
        .map(|token| {
            token
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
        })
        .filter(|token| {
            token.chars().count() > config.min_letters
                && !config.filter_words.contains(token)
        })
        .map(|token| token.to_lowercase())
        .collect()
}
