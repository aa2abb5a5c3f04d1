//! Two-level browsing of a [`MatchSet`]: first the keywords, then the
//! notes matching one keyword.
//!
//! Screens are plain data (a list of labelled actions). Rendering them and
//! collecting the user's choice is left to the host; see the terminal
//! prompt in the CLI and the MCP tools for the two hosts shipped here.

use crate::{
    config::Configuration,
    corpus::Corpus,
    document::Document,
    error::Result,
    matcher::MatchSet,
    workspace::{Pane, Workspace},
};

pub const BACK_LABEL: &str = "< Back to Keywords";

/// What happens when an item is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the notes matching this keyword.
    ShowKeyword(String),
    /// Return to the keyword list.
    BackToKeywords,
    /// Open this note (and link to it, if enabled).
    OpenDocument(Document),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordList {
    pub title: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentList {
    pub keyword: String,
    pub back: Item,
    pub header: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Keywords(KeywordList),
    Documents(DocumentList),
    Closed,
}

/// Build the keyword screen, sorted case-insensitively.
pub fn keyword_list(match_set: &MatchSet) -> KeywordList {
    let mut entries: Vec<(&str, usize)> = match_set
        .iter()
        .map(|(keyword, docs)| (keyword, docs.len()))
        .collect();
    entries.sort_by(|a, b| {
        a.0.to_lowercase()
            .cmp(&b.0.to_lowercase())
            .then_with(|| a.0.cmp(b.0))
    });

    KeywordList {
        title: format!("{} keywords found", entries.len()),
        items: entries
            .into_iter()
            .map(|(keyword, count)| Item {
                label: format!("{keyword} - {count} notes found"),
                action: Action::ShowKeyword(keyword.to_string()),
            })
            .collect(),
    }
}

/// Build the screen listing the notes in one keyword's bucket.
pub fn document_list(keyword: &str, bucket: &[Document]) -> DocumentList {
    let header = if bucket.is_empty() {
        "0 Notes Found".to_string()
    } else {
        format!("{} notes found", bucket.len())
    };

    DocumentList {
        keyword: keyword.to_string(),
        back: Item {
            label: BACK_LABEL.to_string(),
            action: Action::BackToKeywords,
        },
        header,
        items: bucket
            .iter()
            .map(|doc| Item {
                label: doc.path.clone(),
                action: Action::OpenDocument(doc.clone()),
            })
            .collect(),
    }
}

/// Append a `[[link]]` to `linked` at the end of `target`.
///
/// Returns the confirmation message. The target is read first; a read
/// failure aborts without writing.
pub fn append_link<C: Corpus + ?Sized>(
    corpus: &C,
    target: &Document,
    linked: &Document,
) -> Result<String> {
    let content = corpus.read_document(target)?;
    corpus.write_document(target, &format!("{content}\n{}", linked.wikilink()))?;

    tracing::info!(note = %target, link = %linked, "appended link");
    Ok(format!(
        "Added link {} to end of '{}'",
        linked.wikilink(),
        target.name
    ))
}

/// One browsing session over a finished scan.
#[derive(Debug, Clone)]
pub struct Navigator {
    match_set: MatchSet,
    config: Configuration,
}

impl Navigator {
    pub fn new(match_set: MatchSet, config: Configuration) -> Self {
        Self { match_set, config }
    }

    pub fn match_set(&self) -> &MatchSet {
        &self.match_set
    }

    /// The first screen of a session.
    pub fn start(&self) -> Screen {
        Screen::Keywords(keyword_list(&self.match_set))
    }

    /// Carry out `action` and return the screen to show next.
    ///
    /// Opening a document links it from the note that was focused when the
    /// document was chosen, which stays the target even when the document
    /// opens in a new pane.
    pub fn dispatch<C, W>(
        &self,
        action: &Action,
        pane: Pane,
        corpus: &C,
        workspace: &mut W,
    ) -> Result<Screen>
    where
        C: Corpus + ?Sized,
        W: Workspace + ?Sized,
    {
        match action {
            Action::ShowKeyword(keyword) => {
                let bucket = self.match_set.get(keyword).unwrap_or_default();
                Ok(Screen::Documents(document_list(keyword, bucket)))
            }
            Action::BackToKeywords => Ok(self.start()),
            Action::OpenDocument(doc) => {
                self.open_document(doc, pane, corpus, workspace)?;
                Ok(Screen::Closed)
            }
        }
    }

    fn open_document<C, W>(
        &self,
        doc: &Document,
        pane: Pane,
        corpus: &C,
        workspace: &mut W,
    ) -> Result<()>
    where
        C: Corpus + ?Sized,
        W: Workspace + ?Sized,
    {
        let target = workspace.active_document();
        workspace.open(doc, pane);

        if !self.config.append_link {
            return Ok(());
        }
        match target {
            Some(target) => {
                let notice = append_link(corpus, &target, doc)?;
                workspace.notify(&notice);
            }
            None => tracing::debug!("no active note to link from"),
        }
        Ok(())
    }
}
