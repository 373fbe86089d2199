//! Benchmarks for token-bounded chunking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use midsplit::{CharCounter, Chunker, SeparatorCatalog, WordCounter};

fn sample_text(size: usize) -> String {
    // Realistic text with sentence and paragraph structure
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "The five boxing wizards jump quickly. ",
        "Sphinx of black quartz, judge my vow.\n\n",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

fn sample_html(size: usize) -> String {
    let mut html = String::with_capacity(size + 64);
    html.push_str("<article>");
    let mut i = 0;
    while html.len() < size {
        html.push_str("<p>Paragraph ");
        html.push_str(&i.to_string());
        html.push_str(" has <b>bold</b> words &amp; a <a href=\"#\">link</a>.</p>");
        i += 1;
    }
    html.push_str("</article>");
    html
}

fn bench_word_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_budget");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let chunker = Chunker::builder(128)
            .token_counter(WordCounter)
            .build()
            .expect("valid config");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("prose", size), &text, |b, text| {
            b.iter(|| chunker.chunk(black_box(text)))
        });
    }

    group.finish();
}

fn bench_char_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_budget");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let chunker = Chunker::builder(500)
            .token_counter(CharCounter)
            .header("Benchmark document\n")
            .build()
            .expect("valid config");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("prose", size), &text, |b, text| {
            b.iter(|| chunker.chunk(black_box(text)))
        });
    }

    group.finish();
}

fn bench_html_stripping(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_stripping");

    for size in [1_000, 10_000, 100_000] {
        let html = sample_html(size);
        let chunker = Chunker::builder(128)
            .separators(SeparatorCatalog::html())
            .strip_html(true)
            .build()
            .expect("valid config");

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("html", size), &html, |b, html| {
            b.iter(|| chunker.chunk(black_box(html)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_word_budget, bench_char_budget, bench_html_stripping);
criterion_main!(benches);
