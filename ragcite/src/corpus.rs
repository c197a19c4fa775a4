//! Data types for corpora, indexed records, and ranked candidates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extracted document text, keyed by segment id (page or row number).
///
/// Each segment holds its text chunks in reading order. Produced by an
/// external document-extraction collaborator and consumed once by
/// [`CorpusIndexer`](crate::CorpusIndexer); the `BTreeMap` keeps segment
/// iteration ascending.
pub type Corpus = BTreeMap<u32, Vec<String>>;

/// The kind of document a record was extracted from.
///
/// A closed set: answers over tabular sources (Excel/CSV) are listed
/// verbatim, while PDF sources go through the generative collaborator.
/// The `Display` form is the name used in citation lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// A PDF document; segments are pages.
    #[default]
    Pdf,
    /// An Excel workbook; segments are rows.
    Excel,
    /// A CSV file; segments are rows.
    Csv,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Pdf => "PDF",
            SourceKind::Excel => "Excel",
            SourceKind::Csv => "CSV",
        };
        f.write_str(name)
    }
}

/// One retrievable unit of text with its embedding and source metadata.
///
/// `(segment, position)` uniquely identifies a record within one
/// [`IndexedCollection`]. All embeddings in a collection share the
/// dimensionality of the provider that produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedRecord {
    /// Segment id the text came from (page or row number).
    pub segment: u32,
    /// 0-based order of the chunk within its segment.
    pub position: u32,
    /// The embedding vector for `text`.
    pub embedding: Vec<f32>,
    /// The chunk text.
    pub text: String,
    /// The kind of document the record was extracted from.
    pub source: SourceKind,
}

/// An indexed corpus: records ordered by segment, then position.
///
/// Created once per document by [`CorpusIndexer`](crate::CorpusIndexer)
/// and typically persisted through a
/// [`CollectionStore`](crate::CollectionStore) for reuse across queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexedCollection {
    records: Vec<IndexedRecord>,
}

impl IndexedCollection {
    /// Create a collection from pre-built records.
    pub fn new(records: Vec<IndexedRecord>) -> Self {
        Self { records }
    }

    /// The records, in segment-then-position order.
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrite the source kind of every record.
    ///
    /// The indexer defaults every record to [`SourceKind::Pdf`]; callers
    /// that extracted a tabular document apply the real kind afterward.
    pub fn with_source(mut self, source: SourceKind) -> Self {
        for record in &mut self.records {
            record.source = source;
        }
        self
    }
}

impl IntoIterator for IndexedCollection {
    type Item = IndexedRecord;
    type IntoIter = std::vec::IntoIter<IndexedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexedCollection {
    type Item = &'a IndexedRecord;
    type IntoIter = std::slice::Iter<'a, IndexedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// An [`IndexedRecord`] paired with its similarity to the query.
///
/// Ephemeral: recomputed per query and discarded once the answer is
/// composed.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    /// The retrieved record.
    pub record: IndexedRecord,
    /// Cosine similarity to the query embedding, in [-1, 1].
    pub similarity: f32,
}
