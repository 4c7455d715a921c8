//! Criterion benchmarks for the Fabric engine.
//!
//! Covers text analysis, incremental indexing (fresh and replacing) and
//! ranked search over a synthetic corpus.

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use fabric::Engine;
use fabric::analysis::{Analyzer, StandardAnalyzer};
use std::hint::black_box;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "engine", "full", "text", "index", "query", "document", "term", "posting",
        "relevance", "score", "analysis", "tokenization", "normalization", "ranking", "memory",
        "retrieval", "frequency", "inverse", "buffer", "handle", "reader", "writer", "unicode",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            doc_words.push(words[word_idx]);
        }

        documents.push(doc_words.join(" "));
    }

    documents
}

fn populated_engine(documents: &[String]) -> Engine {
    let engine = Engine::default();
    engine.init().unwrap();
    for (i, doc) in documents.iter().enumerate() {
        engine.index(&format!("doc{i}"), doc.as_bytes()).unwrap();
    }
    engine
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("analyze_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let terms = analyzer.terms(black_box(text.as_bytes())).unwrap();
                black_box(terms);
            }
        })
    });

    group.finish();
}

/// Benchmark indexing.
fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    let documents = generate_test_documents(1000);

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("index_fresh_documents", |b| {
        b.iter_batched(
            || {
                let engine = Engine::default();
                engine.init().unwrap();
                engine
            },
            |engine| {
                for (i, doc) in documents.iter().enumerate() {
                    engine.index(&format!("doc{i}"), doc.as_bytes()).unwrap();
                }
                black_box(engine)
            },
            BatchSize::LargeInput,
        )
    });

    let engine = populated_engine(&documents);
    group.throughput(Throughput::Elements(100));
    group.bench_function("replace_documents", |b| {
        b.iter(|| {
            for i in 0..100 {
                let replacement = &documents[(i + 500) % documents.len()];
                engine
                    .index(black_box(&format!("doc{i}")), replacement.as_bytes())
                    .unwrap();
            }
        })
    });

    group.finish();
}

/// Benchmark search.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let engine = populated_engine(&generate_test_documents(1000));

    for query in ["search", "posting relevance", "unicode buffer handle reader"] {
        group.bench_function(format!("query_{}_terms", query.split(' ').count()), |b| {
            b.iter(|| black_box(engine.search(black_box(query)).unwrap()))
        });
    }

    group.bench_function("search_handle_and_free", |b| {
        b.iter(|| {
            let handle = engine.search_handle(black_box("index query")).unwrap();
            engine.free(handle).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_indexing, bench_search);
criterion_main!(benches);
