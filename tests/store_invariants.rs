//! Invariant tests for the flat vector store.
//!
//! The store's whole reason to exist is keeping the index and the identifier
//! list aligned; these tests exercise that contract plus the determinism
//! guarantees of exact search.

use ocular::simd::normalize;
use ocular::{SearchError, VectorStore};

const DIM: usize = 16;

fn vector_for(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[i % DIM] = 1.0;
    v[(i * 3 + 1) % DIM] = 0.4;
    normalize(&v)
}

// =============================================================================
// Alignment invariant
// =============================================================================

#[test]
fn alignment_holds_across_many_adds() {
    let mut store = VectorStore::new(DIM);
    for i in 0..200 {
        store.add(&vector_for(i), format!("image-{i}.png")).unwrap();
        assert_eq!(store.count(), store.identifiers().len());
        assert_eq!(store.count(), i + 1);
    }
    for i in 0..200 {
        assert_eq!(store.identifier(i), Some(format!("image-{i}.png").as_str()));
        let stored = store.vector(i).unwrap();
        let expected = vector_for(i);
        for (a, b) in stored.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}

#[test]
fn failed_add_leaves_no_partial_state() {
    let mut store = VectorStore::new(DIM);
    store.add(&vector_for(0), "ok").unwrap();

    let short = vec![1.0; DIM - 1];
    assert!(store.add(&short, "bad").is_err());

    assert_eq!(store.count(), 1);
    assert_eq!(store.identifiers(), &["ok".to_string()]);
    // Search still works over the one consistent slot.
    let results = store.search(&vector_for(0), 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, 0);
}

// =============================================================================
// Search determinism
// =============================================================================

#[test]
fn repeated_searches_are_identical() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    let mut store = VectorStore::new(DIM);
    for i in 0..50 {
        let v: Vec<f32> = (0..DIM).map(|_| rng.gen_range(-1.0..1.0)).collect();
        store.add(&normalize(&v), format!("img-{i}")).unwrap();
    }

    let query = vector_for(7);
    let first = store.search(&query, 10).unwrap();
    for _ in 0..5 {
        assert_eq!(store.search(&query, 10).unwrap(), first);
    }
}

#[test]
fn tied_scores_resolve_to_insertion_order() {
    let mut store = VectorStore::new(DIM);
    let duplicate = vector_for(3);
    // Interleave duplicates with distinct vectors.
    store.add(&duplicate, "dup-first").unwrap();
    store.add(&vector_for(9), "other").unwrap();
    store.add(&duplicate, "dup-second").unwrap();
    store.add(&duplicate, "dup-third").unwrap();

    let results = store.search(&duplicate, 4).unwrap();
    let tied: Vec<usize> = results
        .iter()
        .filter(|(_, score)| (score - results[0].1).abs() < 1e-7)
        .map(|(slot, _)| *slot)
        .collect();
    assert_eq!(tied, vec![0, 2, 3], "ties must come back first-inserted-first");
}

#[test]
fn results_sorted_by_descending_score() {
    let mut store = VectorStore::new(DIM);
    for i in 0..30 {
        store.add(&vector_for(i), format!("img-{i}")).unwrap();
    }
    let results = store.search(&vector_for(0), 30).unwrap();
    for pair in results.windows(2) {
        assert!(
            pair[0].1 >= pair[1].1,
            "scores out of order: {} then {}",
            pair[0].1,
            pair[1].1
        );
    }
}

// =============================================================================
// Boundary conditions
// =============================================================================

#[test]
fn empty_store_search_is_empty_store_error() {
    let store = VectorStore::new(DIM);
    assert_eq!(
        store.search(&vector_for(0), 5),
        Err(SearchError::EmptyStore)
    );
}

#[test]
fn k_larger_than_count_returns_all() {
    let mut store = VectorStore::new(DIM);
    for i in 0..3 {
        store.add(&vector_for(i), format!("img-{i}")).unwrap();
    }
    assert_eq!(store.search(&vector_for(0), 1000).unwrap().len(), 3);
}

#[test]
fn k_zero_returns_nothing() {
    let mut store = VectorStore::new(DIM);
    store.add(&vector_for(0), "img").unwrap();
    assert!(store.search(&vector_for(0), 0).unwrap().is_empty());
}

#[test]
fn dimension_mismatch_reports_both_sizes() {
    let mut store = VectorStore::new(DIM);
    let err = store.add(&[1.0, 2.0], "bad").unwrap_err();
    assert_eq!(
        err,
        SearchError::DimensionMismatch {
            expected: DIM,
            actual: 2
        }
    );
}
