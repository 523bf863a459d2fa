use super::*;

#[test]
fn test_k_fold_split_sizes() {
    let items: Vec<u32> = (0..10).collect();
    let folds = k_fold_split(&items, 5, Some(42)).unwrap();

    assert_eq!(folds.len(), 5);
    for fold in &folds {
        assert_eq!(fold.len(), 2);
    }
}

#[test]
fn test_k_fold_split_is_a_permutation() {
    let items: Vec<u32> = (0..20).collect();
    let folds = k_fold_split(&items, 4, Some(7)).unwrap();

    let mut all: Vec<u32> = folds.into_iter().flatten().collect();
    all.sort_unstable();
    assert_eq!(all, items);
}

#[test]
fn test_k_fold_split_drops_remainder() {
    let items: Vec<u32> = (0..13).collect();
    let folds = k_fold_split(&items, 5, Some(1)).unwrap();

    assert_eq!(folds.len(), 5);
    assert!(folds.iter().all(|fold| fold.len() == 2));

    // Assigned items are distinct and come from the input
    let mut assigned: Vec<u32> = folds.concat();
    assigned.sort_unstable();
    assigned.dedup();
    assert_eq!(assigned.len(), 10);
    assert!(assigned.iter().all(|item| items.contains(item)));
}

#[test]
fn test_k_fold_split_reproducible_with_seed() {
    let items: Vec<u32> = (0..50).collect();
    let first = k_fold_split(&items, 5, Some(123)).unwrap();
    let second = k_fold_split(&items, 5, Some(123)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_k_fold_split_without_seed() {
    let items: Vec<u32> = (0..9).collect();
    let folds = k_fold_split(&items, 3, None).unwrap();

    assert_eq!(folds.len(), 3);
    let mut all: Vec<u32> = folds.concat();
    all.sort_unstable();
    assert_eq!(all, items);
}

#[test]
fn test_k_fold_split_input_unchanged() {
    let items = vec!["a", "b", "c", "d"];
    let before = items.clone();
    k_fold_split(&items, 2, Some(0)).unwrap();
    assert_eq!(items, before);
}

#[test]
fn test_k_fold_split_n_equals_k() {
    let items = vec![1, 2, 3];
    let folds = k_fold_split(&items, 3, Some(5)).unwrap();
    assert!(folds.iter().all(|fold| fold.len() == 1));
}

#[test]
fn test_k_fold_split_invalid_k() {
    let items: Vec<u32> = (0..10).collect();

    assert!(matches!(
        k_fold_split(&items, 1, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        k_fold_split(&items, 0, None),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_k_fold_split_too_few_items() {
    let items = vec![1.0, 2.0];
    assert!(matches!(
        k_fold_split(&items, 3, Some(0)),
        Err(ModelError::InputValidationError(_))
    ));

    let empty: Vec<f64> = Vec::new();
    assert!(matches!(
        k_fold_split(&empty, 2, Some(0)),
        Err(ModelError::InputValidationError(_))
    ));
}
