//! End-to-end tests: catalog file to ranked recommendations

use std::fs;
use std::sync::Arc;
use std::thread;

use revsim_core::{
    load_catalog, Corpus, EngineConfig, RevsimError, SelfExclusion, Snapshot, SnapshotHandle,
};
use tempfile::tempdir;

const REVIEWS_CSV: &str = "\
item_reviewed,text,rating
Aurora Phone,\"Great battery life, the battery lasts two days\",5
Nimbus Phone,\"Battery life is great and charging is quick\",4
Volt Charger,\"Charging is quick, cable feels cheap\",3
Pixel Case,\"Cheap plastic case, cracked in a week\",1
Aurora Phone,\"Screen is too dim outdoors\",3
Ghost Item,,2
";

fn write_catalog(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn ids(recs: &[revsim_core::Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.item_id.as_str()).collect()
}

#[test]
fn test_csv_catalog_to_recommendations() {
    let (_dir, path) = write_catalog("reviews.csv", REVIEWS_CSV);
    let config = EngineConfig::default();
    let corpus = load_catalog(&path, &config.data).unwrap();
    assert_eq!(corpus.len(), 6);
    assert_eq!(
        corpus.product_list(),
        vec!["Aurora Phone", "Nimbus Phone", "Volt Charger", "Pixel Case", "Ghost Item"]
    );

    let snapshot = Snapshot::build(corpus, &config).unwrap();
    let recs = snapshot.recommend("Aurora Phone", 5).unwrap();

    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0].item_id, "Nimbus Phone");
    // The query's own row is excluded, not its second "Aurora Phone" row
    assert_eq!(recs.iter().filter(|r| r.position == 0).count(), 0);
    assert!(recs.iter().any(|r| r.position == 4));
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_missing_text_row_has_zero_similarity() {
    let (_dir, path) = write_catalog("reviews.csv", REVIEWS_CSV);
    let config = EngineConfig::default();
    let snapshot = Snapshot::build(load_catalog(&path, &config.data).unwrap(), &config).unwrap();

    let ghost = snapshot.index().resolve("Ghost Item").unwrap();
    assert_eq!(snapshot.similarity().get(ghost, ghost), Some(0.0));

    let recs = snapshot.recommend("Ghost Item", 10).unwrap();
    assert_eq!(recs.len(), 5);
    assert!(recs.iter().all(|r| r.score == 0.0));
    let positions: Vec<usize> = recs.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_schema_error_from_file() {
    let (_dir, path) = write_catalog("reviews.csv", "product,review\nA,good\n");
    let err = load_catalog(&path, &EngineConfig::default().data).unwrap_err();
    match err {
        RevsimError::DataSchema { missing, available } => {
            assert_eq!(missing, vec!["item_reviewed", "text"]);
            assert_eq!(available, vec!["product", "review"]);
        }
        other => panic!("expected DataSchema, got {:?}", other),
    }
}

#[test]
fn test_jsonl_catalog() {
    let (_dir, path) = write_catalog(
        "reviews.jsonl",
        "{\"item_reviewed\": \"A\", \"text\": \"great battery life\"}\n\
         {\"item_reviewed\": \"B\", \"text\": \"battery life is great\"}\n\
         {\"item_reviewed\": \"C\", \"text\": \"terrible screen quality\"}\n",
    );
    let config = EngineConfig::default();
    let snapshot = Snapshot::build(load_catalog(&path, &config.data).unwrap(), &config).unwrap();
    assert_eq!(ids(&snapshot.recommend("A", 2).unwrap()), vec!["B", "C"]);
}

#[test]
fn test_n_three_k_five_returns_two() {
    let corpus = Corpus::from_pairs([
        ("A", "great battery life"),
        ("B", "battery life is great"),
        ("C", "terrible screen quality"),
    ]);
    let snapshot = Snapshot::build(corpus, &EngineConfig::default()).unwrap();
    for item in ["A", "B", "C"] {
        assert_eq!(snapshot.recommend(item, 5).unwrap().len(), 2);
    }
}

#[test]
fn test_first_ranked_policy_reproduces_rank_zero_drop() {
    let corpus = Corpus::from_pairs([
        ("Original", "sturdy"),
        ("Reissue", "sturdy"),
        ("Other", "loud"),
    ]);

    let mut config = EngineConfig::default();
    config.engine.self_exclusion = SelfExclusion::FirstRanked;
    let legacy = Snapshot::build(corpus.clone(), &config).unwrap();
    // Twin at position 0 ties with the query and sorts first, so it is dropped
    assert_eq!(ids(&legacy.recommend("Reissue", 1).unwrap()), vec!["Reissue"]);

    let identity = Snapshot::build(corpus, &EngineConfig::default()).unwrap();
    assert_eq!(ids(&identity.recommend("Reissue", 1).unwrap()), vec!["Original"]);
}

#[test]
fn test_rebuild_is_bit_identical() {
    let (_dir, path) = write_catalog("reviews.csv", REVIEWS_CSV);
    let config = EngineConfig::default();
    let a = Snapshot::build(load_catalog(&path, &config.data).unwrap(), &config).unwrap();
    let b = Snapshot::build(load_catalog(&path, &config.data).unwrap(), &config).unwrap();

    assert_eq!(a.features(), b.features());
    assert_eq!(a.vocabulary(), b.vocabulary());
    let bits = |s: &Snapshot| -> Vec<u64> {
        s.similarity().rows().flatten().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.info().fingerprint, b.info().fingerprint);
}

#[test]
fn test_concurrent_readers_during_publish() {
    let corpus = Corpus::from_pairs([("A", "battery"), ("B", "battery screen")]);
    let handle = Arc::new(SnapshotHandle::build(corpus, EngineConfig::default()).unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for _ in 0..100 {
                    let snapshot = handle.current();
                    let n = snapshot.corpus().len();
                    // Every snapshot is internally consistent
                    assert_eq!(snapshot.similarity().len(), n);
                    let recs = snapshot.recommend("A", 5).unwrap();
                    assert_eq!(recs.len(), n - 1);
                }
            })
        })
        .collect();

    let bigger = Corpus::from_pairs([("A", "battery"), ("B", "screen"), ("C", "cable")]);
    handle.refresh(bigger).unwrap();

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(handle.current().corpus().len(), 3);
}
