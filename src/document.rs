use std::path::Path;

use serde::Serialize;

/// Extension of the documents that can be linked to.
pub const NOTE_EXTENSION: &str = "md";

/// A file in the corpus.
///
/// Documents are identified by their vault-relative path. Content is
/// never held here; it is read on demand through a [`crate::Corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Document {
    /// Path relative to the vault root, using `/` separators.
    pub path: String,
    /// File name without its extension; the note's title.
    pub name: String,
    /// Extension without the leading dot, or empty.
    pub extension: String,
}

impl Document {
    /// Build a document from a vault-relative path.
    ///
    /// # Examples
    ///
    /// ```
    /// use related_notes::Document;
    ///
    /// let doc = Document::from_relative_path("notes/fox-hunting.md");
    /// assert_eq!(doc.name, "fox-hunting");
    /// assert_eq!(doc.extension, "md");
    /// assert!(doc.is_note());
    /// ```
    pub fn from_relative_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            path,
            name,
            extension,
        }
    }

    pub fn is_note(&self) -> bool {
        self.extension == NOTE_EXTENSION
    }

    /// The wiki-style reference inserted into other notes.
    pub fn wikilink(&self) -> String {
        format!("[[{}]]", self.name)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_path() {
        let doc = Document::from_relative_path("dailies/2023-01-01.md");
        assert_eq!(doc.path, "dailies/2023-01-01.md");
        assert_eq!(doc.name, "2023-01-01");
        assert_eq!(doc.extension, "md");
    }

    #[test]
    fn attachment_is_not_a_note() {
        let doc = Document::from_relative_path("assets/fox.png");
        assert!(!doc.is_note());
        assert_eq!(doc.name, "fox");
    }

    #[test]
    fn no_extension() {
        let doc = Document::from_relative_path("README");
        assert_eq!(doc.extension, "");
        assert!(!doc.is_note());
    }

    #[test]
    fn extension_is_case_sensitive() {
        assert!(!Document::from_relative_path("Loud.MD").is_note());
    }

    #[test]
    fn wikilink_uses_display_name() {
        let doc = Document::from_relative_path("notes/Fox Hunting.md");
        assert_eq!(doc.wikilink(), "[[Fox Hunting]]");
        assert_eq!(doc.to_string(), "notes/Fox Hunting.md");
    }
}
