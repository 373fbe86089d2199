//! Headers, Metadata and HTML
//!
//! Prepend a context header to every chunk, tag chunks with their source,
//! and chunk HTML while emitting plain text.
//!
//! ```bash
//! cargo run --example headers_and_metadata
//! ```

use midsplit::{CharCounter, Chunker, Document, Metadata, SeparatorCatalog};

fn main() -> midsplit::Result<()> {
    let html = "<h1>Release notes</h1>\
        <p>Version 2 adds streaming &amp; batching.</p>\
        <p>The old synchronous API is deprecated and will be removed.</p>\
        <ul><li>Faster startup</li><li>Smaller binaries</li></ul>";

    let mut metadata = Metadata::new();
    metadata.insert("source".into(), "CHANGELOG.html".into());

    let chunker = Chunker::builder(80)
        .token_counter(CharCounter)
        .separators(SeparatorCatalog::html())
        .strip_html(true)
        .min_chunk_percent(20)
        .build()?;

    let doc = Document::new(html)
        .with_header("Changelog: ")
        .with_metadata(metadata);

    for chunk in chunker.chunk_document(doc)? {
        println!(
            "{} [{} chars, from {}]\n  {}",
            chunk.index,
            chunk.token_count,
            chunk.meta("source").unwrap_or("?"),
            chunk.content
        );
    }

    Ok(())
}
