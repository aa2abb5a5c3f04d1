use crate::document::Document;

/// Where a selected document should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Replace the document in the focused pane.
    #[default]
    Current,
    /// Split the focused pane and open the document in the new one.
    Split,
}

/// The editing surface hosting the active note.
pub trait Workspace {
    /// The focused document, if any.
    fn active_document(&self) -> Option<Document>;

    /// Text the user selected in the focused document, if any.
    fn selection(&self) -> Option<String>;

    /// Open `doc`, focusing it.
    fn open(&mut self, doc: &Document, pane: Pane);

    /// Show a short message to the user.
    fn notify(&mut self, message: &str);
}

/// A workspace that tracks panes in memory and records notices.
///
/// Hosts without a real editor (the terminal CLI, the MCP server) use this
/// to give the navigator an active document to work against.
#[derive(Debug, Clone, Default)]
pub struct PaneWorkspace {
    panes: Vec<Document>,
    focused: usize,
    selection: Option<String>,
    notices: Vec<String>,
}

impl PaneWorkspace {
    pub fn new(active: Option<Document>) -> Self {
        Self {
            panes: active.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: Option<String>) -> Self {
        self.selection = selection;
        self
    }

    pub fn panes(&self) -> &[Document] {
        &self.panes
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Drain the notices recorded since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

impl Workspace for PaneWorkspace {
    fn active_document(&self) -> Option<Document> {
        self.panes.get(self.focused).cloned()
    }

    fn selection(&self) -> Option<String> {
        self.selection.clone()
    }

    fn open(&mut self, doc: &Document, pane: Pane) {
        if pane == Pane::Current && !self.panes.is_empty() {
            self.panes[self.focused] = doc.clone();
        } else {
            self.panes.push(doc.clone());
            self.focused = self.panes.len() - 1;
        }
        // A selection belongs to the document it was made in.
        self.selection = None;
    }

    fn notify(&mut self, message: &str) {
        tracing::debug!(message, "notice");
        self.notices.push(message.to_string());
    }
}
