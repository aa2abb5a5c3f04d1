use crate::{
    config::Configuration,
    corpus::Corpus,
    document::Document,
    error::Result,
    matcher::{MatchSet, build_match_set},
    navigator::Navigator,
    tokenizer::extract_keywords,
    workspace::Workspace,
};

/// Text of `doc`, or empty text when it cannot be read.
pub fn read_note<C: Corpus + ?Sized>(corpus: &C, doc: &Document) -> String {
    corpus.read_document(doc).unwrap_or_else(|e| {
        tracing::warn!(note = %doc, "could not read note, scanning as empty: {e}");
        String::new()
    })
}

/// Scan the focused note and match its keywords against the corpus.
///
/// Returns `Ok(None)` when no note is focused. A note that cannot be read
/// is scanned as empty text.
pub fn possible_links<C, W>(
    workspace: &W,
    corpus: &C,
    config: &Configuration,
) -> Result<Option<MatchSet>>
where
    C: Corpus + ?Sized,
    W: Workspace + ?Sized,
{
    let Some(active) = workspace.active_document() else {
        tracing::debug!("no active note, nothing to scan");
        return Ok(None);
    };

    let text = read_note(corpus, &active);
    let selection = workspace.selection();

    let keywords = extract_keywords(&text, selection.as_deref(), config);
    let documents = corpus.list_documents()?;
    tracing::debug!(
        note = %active,
        keywords = keywords.len(),
        selection = selection.is_some(),
        "extracted keywords"
    );

    Ok(Some(build_match_set(&keywords, &documents, config)))
}

/// Run a scan and open a navigator session over its result.
pub fn show_possible_links<C, W>(
    workspace: &W,
    corpus: &C,
    config: &Configuration,
) -> Result<Option<Navigator>>
where
    C: Corpus + ?Sized,
    W: Workspace + ?Sized,
{
    Ok(possible_links(workspace, corpus, config)?
        .map(|set| Navigator::new(set, config.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        corpus::MemoryCorpus,
        navigator::Screen,
        workspace::PaneWorkspace,
    };

    fn corpus() -> MemoryCorpus {
        let mut corpus = MemoryCorpus::new();
        corpus.insert("inbox.md", "The quick brown fox jumps over the lazy hound.");
        corpus.insert("dailies/2023-01-01.md", "Saw a fox today");
        corpus.insert("notes/fox-hunting.md", "");
        corpus.insert("notes/Hound Breeds.md", "");
        corpus.insert("attachments/hound.png", "");
        corpus
    }

    #[test]
    fn no_active_note_is_a_no_op() {
        let ws = PaneWorkspace::default();
        let result = possible_links(&ws, &corpus(), &Configuration::default()).unwrap();
        assert_eq!(result, None);
        assert!(
            show_possible_links(&ws, &corpus(), &Configuration::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn scans_whole_note() {
        let corpus = corpus();
        let ws = PaneWorkspace::new(Some(Document::from_relative_path("inbox.md")));
        let config = Configuration {
            min_letters: 2,
            excluded_path: "dailies".into(),
            ..Configuration::default()
        };

        let set = possible_links(&ws, &corpus, &config).unwrap().unwrap();
        assert_eq!(set.keywords().collect::<Vec<_>>(), vec!["fox", "hound"]);
        let hounds: Vec<_> =
            set.get("hound").unwrap().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(hounds, vec!["notes/Hound Breeds.md"]);
    }

    #[test]
    fn selection_limits_the_scan() {
        let corpus = corpus();
        let ws = PaneWorkspace::new(Some(Document::from_relative_path("inbox.md")))
            .with_selection(Some("lazy hound".into()));
        let config = Configuration {
            min_letters: 2,
            ..Configuration::default()
        };

        let set = possible_links(&ws, &corpus, &config).unwrap().unwrap();
        assert_eq!(set.keywords().collect::<Vec<_>>(), vec!["hound"]);
    }

    #[test]
    fn unreadable_note_scans_as_empty() {
        let corpus = corpus();
        let ws = PaneWorkspace::new(Some(Document::from_relative_path("missing.md")));
        let set = possible_links(&ws, &corpus, &Configuration::default())
            .unwrap()
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn read_note_falls_back_to_empty_text() {
        let corpus = corpus();
        let missing = Document::from_relative_path("missing.md");
        assert_eq!(read_note(&corpus, &missing), "");
        let inbox = Document::from_relative_path("inbox.md");
        assert!(read_note(&corpus, &inbox).starts_with("The quick"));
    }

    #[test]
    fn navigator_starts_at_keyword_list() {
        let corpus = corpus();
        let ws = PaneWorkspace::new(Some(Document::from_relative_path("inbox.md")));
        let config = Configuration {
            min_letters: 2,
            ..Configuration::default()
        };

        let nav = show_possible_links(&ws, &corpus, &config).unwrap().unwrap();
        let Screen::Keywords(list) = nav.start() else {
            panic!("expected keyword list");
        };
        assert_eq!(list.title, "2 keywords found");
    }
}
