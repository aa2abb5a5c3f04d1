use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{config::Configuration, document::Document};

/// Keywords mapped to the notes whose titles contain them.
///
/// Built once per scan by [`build_match_set`] and never modified. Every
/// bucket holds at least one document, in corpus order; keywords without
/// matches have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    buckets: BTreeMap<String, Vec<Document>>,
}

impl MatchSet {
    pub fn get(&self, keyword: &str) -> Option<&[Document]> {
        self.buckets.get(keyword).map(Vec::as_slice)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.buckets.contains_key(keyword)
    }

    /// Number of keywords with at least one match.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Document])> {
        self.buckets
            .iter()
            .map(|(k, docs)| (k.as_str(), docs.as_slice()))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

/// Whether `doc` may be offered as a link for `keyword`.
pub fn is_candidate(doc: &Document, keyword: &str, config: &Configuration) -> bool {
    let excluded = !config.excluded_path.is_empty()
        && doc.path.contains(config.excluded_path.as_str());

    !excluded && doc.is_note() && doc.name.to_lowercase().contains(keyword)
}

/// Match every keyword against every document title in the corpus.
///
/// Documents are kept in corpus order and are not deduplicated, so a
/// corpus listing the same note twice yields it twice. This is a plain
/// keywords × documents scan; no index is built.
pub fn build_match_set(
    keywords: &BTreeSet<String>,
    corpus: &[Document],
    config: &Configuration,
) -> MatchSet {
    let mut buckets: BTreeMap<String, Vec<Document>> = BTreeMap::new();

    for keyword in keywords {
        for doc in corpus {
            if is_candidate(doc, keyword, config) {
                buckets
                    .entry(keyword.clone())
                    .or_default()
                    .push(doc.clone());
            }
        }
    }

    tracing::debug!(
        keywords = keywords.len(),
        documents = corpus.len(),
        matched = buckets.len(),
        "built match set"
    );

    MatchSet { buckets }
}
