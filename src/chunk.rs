//! Chunk input and output types.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Caller-supplied key/value pairs attached to every chunk of a document.
pub type Metadata = BTreeMap<String, String>;

/// One emitted piece of a document.
///
/// `content` already carries the chunk header (if any) and, when the chunker
/// strips HTML, is plain text. `token_count` is the count the chunker
/// compared against the budget for this exact piece.
///
/// ## Metadata Sharing
///
/// All chunks of one document point at the same metadata map:
///
/// ```rust
/// use std::sync::Arc;
/// use midsplit::{CharCounter, Chunker, Document, Metadata};
///
/// let mut meta = Metadata::new();
/// meta.insert("source".into(), "notes.txt".into());
/// let meta = Arc::new(meta);
///
/// let chunker = Chunker::builder(6).token_counter(CharCounter).build().unwrap();
/// let doc = Document::new("AAAA\n\nBBBB").with_metadata(Arc::clone(&meta));
/// let chunks = chunker.chunk_document(doc).unwrap();
///
/// assert_eq!(chunks.len(), 2);
/// assert!(chunks.iter().all(|c| Arc::ptr_eq(c.metadata.as_ref().unwrap(), &meta)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentChunk {
    /// Zero-based position of this chunk in the document.
    pub index: usize,
    /// Header followed by the chunk text.
    pub content: String,
    /// Tokens counted for `content`.
    pub token_count: usize,
    /// Metadata shared by all chunks of the document.
    pub metadata: Option<Arc<Metadata>>,
}

impl DocumentChunk {
    /// Create a chunk.
    #[must_use]
    pub fn new(index: usize, content: impl Into<String>, token_count: usize) -> Self {
        Self {
            index,
            content: content.into(),
            token_count,
            metadata: None,
        }
    }

    /// Attach shared metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Option<Arc<Metadata>>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.as_deref()?.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for DocumentChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DocumentChunk {{ index: {}, tokens: {}, len: {} }}",
            self.index,
            self.token_count,
            self.len()
        )
    }
}

/// A document to chunk: text plus optional metadata and header.
#[derive(Debug, Clone, Default)]
pub struct Document<'a> {
    /// The document text.
    pub content: &'a str,
    /// Metadata to attach to every chunk.
    pub metadata: Option<Arc<Metadata>>,
    /// Text prepended to every chunk; overrides the chunker's default header.
    pub header: Option<&'a str>,
}

impl<'a> Document<'a> {
    /// Wrap document text.
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            metadata: None,
            header: None,
        }
    }

    /// Attach metadata to every chunk.
    #[must_use]
    pub fn with_metadata(mut self, metadata: impl Into<Arc<Metadata>>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Prepend `header` to every chunk.
    #[must_use]
    pub fn with_header(mut self, header: &'a str) -> Self {
        self.header = Some(header);
        self
    }
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(content: &'a str) -> Self {
        Self::new(content)
    }
}
