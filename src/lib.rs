//! related-notes - find notes worth linking from the note you are writing.
//!
//! The note's text is split into keywords, and every keyword is matched
//! against the titles of the other notes in the vault. The result is
//! browsed in two steps: pick a keyword, then pick a note to open (and,
//! optionally, link to).
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use related_notes::{Configuration, PaneWorkspace, VaultCorpus, links};
//!
//! let corpus = VaultCorpus::open(Path::new("/home/me/vault")).unwrap();
//! let note = corpus.resolve(Path::new("inbox.md")).unwrap();
//! let workspace = PaneWorkspace::new(Some(note));
//!
//! let matches = links::possible_links(&workspace, &corpus, &Configuration::default())
//!     .unwrap()
//!     .unwrap_or_default();
//! for (keyword, notes) in matches.iter() {
//!     println!("{keyword}: {} notes", notes.len());
//! }
//! ```

pub mod config;
pub mod config_db;
pub mod corpus;
pub mod data_dir;
pub mod document;
pub mod error;
pub mod links;
pub mod matcher;
pub mod mcp;
pub mod navigator;
pub mod tokenizer;
pub mod walker;
pub mod workspace;

pub use config::Configuration;
pub use config_db::ConfigDb;
pub use corpus::{Corpus, MemoryCorpus, VaultCorpus};
pub use data_dir::DataDir;
pub use document::Document;
pub use error::{Error, Result};
pub use matcher::MatchSet;
pub use navigator::Navigator;
pub use workspace::{Pane, PaneWorkspace, Workspace};
