//! Basic Token-Bounded Chunking
//!
//! The minimal example: chunk text so every piece fits an embedding model.
//!
//! ```bash
//! cargo run --example 01_basic_chunking
//! ```

use midsplit::Chunker;

fn main() -> midsplit::Result<()> {
    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions.\n\n\
        This is fundamentally different from traditional programming. \
        Deep learning extends this with multiple hidden layers.\n\n\
        Each layer learns increasingly abstract representations.";

    // At most 24 tokens (words and punctuation) per chunk
    let chunker = Chunker::builder(24).build()?;
    let chunks = chunker.chunk(document)?;

    println!("Document: {} chars", document.len());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!("[{}] {} tokens: {:?}", chunk.index, chunk.token_count, chunk.content);
    }

    Ok(())
}
