use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
    sync::Mutex,
};

use crate::{
    document::Document,
    error::{Error, Result},
    walker,
};

/// Source of the documents that keywords are matched against.
pub trait Corpus {
    /// Every document in the corpus, in a stable order.
    fn list_documents(&self) -> Result<Vec<Document>>;

    fn read_document(&self, doc: &Document) -> Result<String>;

    /// Replace the contents of `doc`.
    fn write_document(&self, doc: &Document, text: &str) -> Result<()>;
}

/// A directory of notes on disk.
#[derive(Debug, Clone)]
pub struct VaultCorpus {
    root: PathBuf,
}

impl VaultCorpus {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Config(format!(
                "vault is not a directory: {}",
                root.display()
            )));
        }
        let root = root.canonicalize().map_err(|e| {
            Error::Config(format!("cannot resolve vault {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn full_path(&self, doc: &Document) -> PathBuf {
        self.root.join(&doc.path)
    }

    /// Resolve a user-supplied note reference to a document.
    ///
    /// Accepts a vault-relative path or an absolute path inside the vault.
    /// References that lead outside the vault (through `..` or a symlink)
    /// are reported as not found.
    pub fn resolve(&self, reference: &Path) -> Result<Document> {
        let candidate = if reference.is_absolute() {
            reference.to_path_buf()
        } else {
            self.root.join(reference)
        };
        let not_found = || Error::NotFound {
            kind: "note",
            name: reference.display().to_string(),
        };

        let absolute = candidate.canonicalize().map_err(|_| not_found())?;
        if !absolute.is_file() {
            return Err(not_found());
        }
        let relative = candidate
            .strip_prefix(&self.root)
            .ok()
            .filter(|rel| {
                rel.components().all(|c| matches!(c, Component::Normal(_)))
            })
            .or_else(|| absolute.strip_prefix(&self.root).ok())
            .ok_or_else(not_found)?;

        Ok(Document::from_relative_path(relative))
    }
}

impl Corpus for VaultCorpus {
    fn list_documents(&self) -> Result<Vec<Document>> {
        let files = walker::discover_files(&self.root)?;
        Ok(files
            .iter()
            .map(|f| Document::from_relative_path(&f.relative_path))
            .collect())
    }

    fn read_document(&self, doc: &Document) -> Result<String> {
        Ok(std::fs::read_to_string(self.full_path(doc))?)
    }

    fn write_document(&self, doc: &Document, text: &str) -> Result<()> {
        std::fs::write(self.full_path(doc), text)?;
        Ok(())
    }
}

/// A corpus held entirely in memory, listed in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    documents: Vec<Document>,
    contents: Mutex<BTreeMap<String, String>>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, text: &str) -> Document {
        let doc = Document::from_relative_path(path);
        self.documents.push(doc.clone());
        self.contents
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .insert(doc.path.clone(), text.to_string());
        doc
    }

    /// Current contents of the document at `path`.
    pub fn text(&self, path: &str) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }
}

impl Corpus for MemoryCorpus {
    fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn read_document(&self, doc: &Document) -> Result<String> {
        self.text(&doc.path).ok_or_else(|| Error::NotFound {
            kind: "document",
            name: doc.path.clone(),
        })
    }

    fn write_document(&self, doc: &Document, text: &str) -> Result<()> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(doc.path.clone(), text.to_string());
        Ok(())
    }
}
