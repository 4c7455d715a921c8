use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use fabric::error::{FabricError, Result};
use fabric::search::ScoringKind;
use fabric::{Engine, EngineConfig, SearchResults};

fn ready_engine(config: EngineConfig) -> Result<Engine> {
    let engine = Engine::new(config)?;
    engine.init()?;
    Ok(engine)
}

#[test]
fn equal_matches_rank_by_key() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("doc1", b"the quick brown fox")?;
    engine.index("doc2", b"the lazy dog")?;

    let results = engine.search("quick dog")?;
    assert_eq!(results.total, 2);
    assert_eq!(results.keys(), vec!["doc1", "doc2"]);
    assert_eq!(results.hits[0].score, results.hits[1].score);
    Ok(())
}

#[test]
fn replacing_a_document_drops_its_old_terms() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("doc1", b"alpha")?;
    engine.index("doc1", b"beta")?;

    assert!(engine.search("alpha")?.is_empty());
    assert_eq!(engine.search("beta")?.keys(), vec!["doc1"]);

    let stats = engine.stats()?;
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.terms, 1);
    assert_eq!(stats.postings, 1);
    Ok(())
}

#[test]
fn reindexing_identical_content_is_idempotent() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("a", b"search engines rank documents")?;
    engine.index("b", b"documents hold terms")?;

    let before = engine.search("documents rank")?.to_json()?;
    let stats_before = engine.stats()?;

    engine.index("a", b"search engines rank documents")?;
    engine.index("a", b"search engines rank documents")?;

    assert_eq!(engine.search("documents rank")?.to_json()?, before);
    assert_eq!(engine.stats()?, stats_before);
    Ok(())
}

#[test]
fn queries_are_analyzed_like_documents() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("greeting", "Hello, World! Ünïcödé text...".as_bytes())?;

    assert_eq!(engine.search("HELLO")?.keys(), vec!["greeting"]);
    assert_eq!(engine.search("world?")?.keys(), vec!["greeting"]);
    assert_eq!(engine.search("ÜNÏCÖDÉ")?.keys(), vec!["greeting"]);
    assert!(engine.search("hell")?.is_empty());
    Ok(())
}

#[test]
fn results_do_not_depend_on_insertion_order() -> Result<()> {
    let docs: [(&str, &[u8]); 4] = [
        ("k1", b"red green blue"),
        ("k2", b"green blue yellow"),
        ("k3", b"blue yellow red red"),
        ("k4", b"purple"),
    ];

    let forward = ready_engine(EngineConfig::default())?;
    for (key, content) in docs {
        forward.index(key, content)?;
    }
    let backward = ready_engine(EngineConfig::default())?;
    for (key, content) in docs.iter().rev() {
        backward.index(key, content)?;
    }

    for query in ["red", "blue green", "yellow red purple"] {
        assert_eq!(
            forward.search(query)?.to_json()?,
            backward.search(query)?.to_json()?,
            "query {query:?}"
        );
    }
    Ok(())
}

#[test]
fn empty_queries_return_no_entries() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("doc1", b"something to find")?;

    for query in ["", "   ", "!!! ... ---"] {
        let results = engine.search(query)?;
        assert!(results.is_empty());
        assert_eq!(results.total, 0);
    }

    let handle = engine.search_handle("")?;
    let text = engine.resolve(&handle).unwrap_or_default();
    assert_eq!(SearchResults::from_json(&text)?, SearchResults::empty());
    engine.free(handle)?;
    Ok(())
}

#[test]
fn calls_before_init_fail_and_change_nothing() -> Result<()> {
    let engine = Engine::default();

    assert!(matches!(engine.index("doc1", b"alpha"), Err(FabricError::NotInitialized)));
    assert!(matches!(engine.search("alpha"), Err(FabricError::NotInitialized)));
    assert!(engine.search_handle("alpha").is_err());
    assert_eq!(engine.handles().outstanding(), 0);

    engine.init()?;
    assert_eq!(engine.stats()?.documents, 0);
    assert!(engine.search("alpha")?.is_empty());
    Ok(())
}

#[test]
fn binary_content_is_stored_verbatim() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    let content = b"\xff\xfealpha \x00 beta";
    engine.index("blob", content)?;

    assert_eq!(engine.get("blob")?.as_deref(), Some(&content[..]));
    assert_eq!(engine.search("alpha")?.keys(), vec!["blob"]);
    Ok(())
}

#[test]
fn raw_release_is_accepted_exactly_once() -> Result<()> {
    let engine = ready_engine(EngineConfig::default())?;
    engine.index("doc1", b"alpha")?;

    let ids: Vec<usize> = (0..8)
        .map(|_| engine.search_handle("alpha").map(|h| h.into_raw()))
        .collect::<Result<_>>()?;
    assert_eq!(engine.stats()?.outstanding_buffers, 8);

    for id in &ids {
        engine.release_raw(*id)?;
    }
    for id in &ids {
        assert!(matches!(
            engine.release_raw(*id),
            Err(FabricError::InvalidHandle(_))
        ));
    }
    assert_eq!(engine.stats()?.outstanding_buffers, 0);
    Ok(())
}

#[test]
fn concurrent_searches_never_see_partial_replacements() -> Result<()> {
    // Frequency scoring makes each version's score exact: 2.0 or 3.0.
    let config = EngineConfig::default().with_scoring(ScoringKind::Frequency);
    let engine = Arc::new(ready_engine(config)?);
    engine.index("shared", b"alpha alpha")?;
    engine.index("other", b"gamma")?;

    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let engine = Arc::clone(&engine);
        let done = Arc::clone(&done);
        thread::spawn(move || -> Result<()> {
            for i in 0..500 {
                let content: &[u8] = if i % 2 == 0 {
                    b"beta beta beta"
                } else {
                    b"alpha alpha"
                };
                engine.index("shared", content)?;
            }
            done.store(true, Ordering::SeqCst);
            Ok(())
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let done = Arc::clone(&done);
            thread::spawn(move || -> Result<usize> {
                let mut observed = 0;
                while !done.load(Ordering::SeqCst) || observed == 0 {
                    let results = engine.search("alpha beta")?;
                    assert_eq!(results.total, 1);
                    let score = results.score_of("shared");
                    assert!(
                        score == Some(2.0) || score == Some(3.0),
                        "mixed postings observed: {score:?}"
                    );
                    observed += 1;
                }
                Ok(observed)
            })
        })
        .collect();

    writer.join().expect("writer panicked")?;
    for reader in readers {
        assert!(reader.join().expect("reader panicked")? > 0);
    }

    let final_results = engine.search("alpha beta")?;
    assert_eq!(final_results.score_of("shared"), Some(2.0));
    assert!(engine.metrics().total_searches > 4);
    Ok(())
}

const VOCABULARY: [&str; 8] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
];

fn writer_document(writer: usize, doc: usize, version: usize) -> (String, String) {
    let words: Vec<&str> = (0..4 + doc % 5)
        .map(|i| VOCABULARY[(writer * 3 + doc * 5 + i * (version + 1)) % VOCABULARY.len()])
        .collect();
    (format!("w{writer}-d{doc:02}"), words.join(" "))
}

#[test]
fn concurrent_writers_on_distinct_keys_match_a_sequential_build() -> Result<()> {
    const WRITERS: usize = 4;
    const DOCS_PER_WRITER: usize = 25;

    let concurrent = Arc::new(ready_engine(EngineConfig::default())?);
    let writers: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let engine = Arc::clone(&concurrent);
            thread::spawn(move || -> Result<()> {
                for version in 0..2 {
                    for doc in 0..DOCS_PER_WRITER {
                        let (key, content) = writer_document(writer, doc, version);
                        engine.index(&key, content.as_bytes())?;
                    }
                }
                Ok(())
            })
        })
        .collect();
    for writer in writers {
        writer.join().expect("writer panicked")?;
    }

    let sequential = ready_engine(EngineConfig::default())?;
    for writer in 0..WRITERS {
        for doc in 0..DOCS_PER_WRITER {
            let (key, content) = writer_document(writer, doc, 1);
            sequential.index(&key, content.as_bytes())?;
        }
    }

    let expected = sequential.stats()?;
    let actual = concurrent.stats()?;
    assert_eq!(actual.documents, WRITERS * DOCS_PER_WRITER);
    assert_eq!(actual.documents, expected.documents);
    assert_eq!(actual.terms, expected.terms);
    assert_eq!(actual.postings, expected.postings);
    assert_eq!(concurrent.keys()?, sequential.keys()?);

    for term in VOCABULARY {
        // With no result cap, `total` is the term's document frequency.
        let expected = sequential.search(term)?;
        let actual = concurrent.search(term)?;
        assert_eq!(actual.total, expected.total, "document frequency of {term}");
        assert_eq!(actual.to_json()?, expected.to_json()?, "scores for {term}");
    }

    let everything = VOCABULARY.join(" ");
    let expected = sequential.search(&everything)?;
    let actual = concurrent.search(&everything)?;
    assert_eq!(actual.total, WRITERS * DOCS_PER_WRITER);
    for hit in &expected.hits {
        assert_eq!(actual.score_of(&hit.key), Some(hit.score), "score of {}", hit.key);
    }
    Ok(())
}
