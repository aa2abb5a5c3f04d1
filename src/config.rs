use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::error::{Error, Result};

/// Stop words used when no `filter_words` setting has been stored.
pub const DEFAULT_FILTER_WORDS: &str = "the,and,but,not,then,they,will,not,your,from,them,was,with,what,who,why,where,this,over,than";

/// Words must be strictly longer than this to become keywords.
pub const DEFAULT_MIN_LETTERS: usize = 3;

/// A case-insensitive set of words that are never keywords.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Parse a comma-separated list such as `"the,and,but"`.
    ///
    /// Entries are trimmed and lowercased; empty entries are dropped.
    pub fn parse(list: &str) -> Self {
        let words = list
            .split(',')
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// User preferences consumed by the tokenizer, matcher and navigator.
///
/// Loaded once per process (see [`crate::ConfigDb::configuration`]) and
/// passed explicitly into each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Keywords must have strictly more characters than this.
    pub min_letters: usize,
    /// Parsed form of `filter_words`.
    pub filter_words: StopWords,
    /// The raw comma-separated stop-word string, as stored.
    pub filter_words_raw: String,
    /// Documents whose path contains this substring are never matched.
    /// Empty disables the exclusion.
    pub excluded_path: String,
    /// Append a `[[link]]` to the active note when a match is selected.
    pub append_link: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_letters: DEFAULT_MIN_LETTERS,
            filter_words: StopWords::parse(DEFAULT_FILTER_WORDS),
            filter_words_raw: DEFAULT_FILTER_WORDS.to_string(),
            excluded_path: String::new(),
            append_link: true,
        }
    }
}

impl Configuration {
    pub fn set_filter_words(&mut self, raw: &str) {
        self.filter_words = StopWords::parse(raw);
        self.filter_words_raw = raw.to_string();
    }

    /// Apply a validated string value to the field named by `key`.
    pub fn apply(&mut self, key: SettingKey, value: &str) -> Result<()> {
        match key {
            SettingKey::FilterWords => self.set_filter_words(value),
            SettingKey::Dailies => self.excluded_path = value.to_string(),
            SettingKey::MinLetters => self.min_letters = parse_min_letters(value)?,
            SettingKey::AppendLink => self.append_link = parse_bool(value)?,
            SettingKey::Vault => {}
        }
        Ok(())
    }

    /// Key/value pairs for display.
    pub fn entries(&self) -> Vec<(SettingKey, String)> {
        vec![
            (SettingKey::FilterWords, self.filter_words_raw.clone()),
            (SettingKey::Dailies, self.excluded_path.clone()),
            (SettingKey::MinLetters, self.min_letters.to_string()),
            (SettingKey::AppendLink, self.append_link.to_string()),
        ]
    }
}

/// Names of the persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SettingKey {
    /// Comma-separated stop words
    FilterWords,
    /// Path substring whose documents are ignored (e.g. a daily notes folder)
    Dailies,
    /// Words must be longer than this many letters
    MinLetters,
    /// Append a link to the active note when a match is selected
    AppendLink,
    /// Default vault directory
    Vault,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::FilterWords,
        SettingKey::Dailies,
        SettingKey::MinLetters,
        SettingKey::AppendLink,
        SettingKey::Vault,
    ];

    /// Key used in the settings table.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::FilterWords => "filter_words",
            SettingKey::Dailies => "dailies",
            SettingKey::MinLetters => "min_letters",
            SettingKey::AppendLink => "append_link",
            SettingKey::Vault => "vault",
        }
    }

    /// Check that `value` is acceptable for this key.
    pub fn validate(self, value: &str) -> Result<()> {
        match self {
            SettingKey::MinLetters => parse_min_letters(value).map(|_| ()),
            SettingKey::AppendLink => parse_bool(value).map(|_| ()),
            SettingKey::FilterWords | SettingKey::Dailies | SettingKey::Vault => {
                Ok(())
            }
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.as_str().replace('_', "-") == s)
            .ok_or_else(|| Error::Config(format!("unknown setting '{s}'")))
    }
}

pub fn parse_min_letters(value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        Error::Config(format!(
            "min_letters must be a non-negative integer, got '{value}'"
        ))
    })
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::Config(format!("expected a boolean, got '{value}'"))),
    }
}
