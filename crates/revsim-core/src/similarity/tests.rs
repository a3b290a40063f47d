use super::*;
use crate::catalog::Corpus;
use crate::text::Tokenizer;
use crate::vectorize::vectorize;

fn similarity_of(pairs: &[(&str, &str)]) -> SimilarityMatrix {
    let corpus = Corpus::from_pairs(pairs.iter().copied());
    let (features, _) = vectorize(&corpus, &Tokenizer::new()).unwrap();
    build_similarity(&features)
}

fn review_corpus() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Phone A", "great battery life and a bright screen"),
        ("Phone B", "battery life is great, screen is dim"),
        ("Laptop", "keyboard feels cheap but the battery is great"),
        ("Cable", "stopped charging after two days"),
        ("Empty", ""),
    ]
}

#[test]
fn test_symmetry_is_exact() {
    let sim = similarity_of(&review_corpus());
    for i in 0..sim.len() {
        for j in 0..sim.len() {
            assert_eq!(
                sim.get(i, j).unwrap().to_bits(),
                sim.get(j, i).unwrap().to_bits(),
                "S[{}][{}] != S[{}][{}]",
                i,
                j,
                j,
                i
            );
        }
    }
}

#[test]
fn test_diagonal() {
    let sim = similarity_of(&review_corpus());
    for i in 0..4 {
        assert_eq!(sim.get(i, i), Some(1.0));
    }
    assert_eq!(sim.get(4, 4), Some(0.0));
}

#[test]
fn test_values_within_unit_interval() {
    let sim = similarity_of(&review_corpus());
    for row in sim.rows() {
        for &v in row {
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }
}

#[test]
fn test_empty_document_has_zero_similarity() {
    let sim = similarity_of(&review_corpus());
    let row = sim.row(4).unwrap();
    assert!(row.iter().all(|&v| v == 0.0));
}

#[test]
fn test_battery_reviews_scenario() {
    let sim = similarity_of(&[
        ("A", "great battery life"),
        ("B", "battery life is great"),
        ("C", "terrible screen quality"),
    ]);

    let ab = sim.get(0, 1).unwrap();
    assert!((ab - 1.0).abs() < 1e-9, "S[A][B] = {}", ab);
    assert_eq!(sim.get(0, 2), Some(0.0));
    assert_eq!(sim.get(1, 2), Some(0.0));
}

#[test]
fn test_partial_overlap_between_zero_and_one() {
    let sim = similarity_of(&review_corpus());
    let score = sim.get(0, 2).unwrap();
    assert!(score > 0.0 && score < 1.0, "got {}", score);
}

#[test]
fn test_idempotent_builds() {
    let first = similarity_of(&review_corpus());
    let second = similarity_of(&review_corpus());
    let bits = |m: &SimilarityMatrix| -> Vec<u64> {
        m.rows().flatten().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_out_of_range_access() {
    let sim = similarity_of(&[("A", "battery"), ("B", "screen")]);
    assert_eq!(sim.get(2, 0), None);
    assert!(sim.row(5).is_none());
}

#[test]
fn test_zeros_matrix() {
    let sim = SimilarityMatrix::zeros(2);
    assert_eq!(sim.len(), 2);
    assert_eq!(sim.get(1, 1), Some(0.0));
    assert!(SimilarityMatrix::zeros(0).rows().next().is_none());
}

#[test]
fn test_twin_documents_score_one() {
    let sim = similarity_of(&[
        ("Phone", "solid battery"),
        ("Phone Clone", "solid battery"),
        ("Case", "cheap plastic"),
    ]);
    let twins = sim.get(0, 1).unwrap();
    assert!((twins - 1.0).abs() < 1e-12);

    let pairs = sim.find_duplicates(0.85);
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].first, pairs[0].second), (0, 1));
}
