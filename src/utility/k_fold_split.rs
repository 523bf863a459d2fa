use crate::error::ModelError;
use log::warn;
use rand::{SeedableRng, rng, rngs::StdRng, seq::SliceRandom};

/// Splits a dataset into `k` shuffled folds of equal size
///
/// The whole dataset is shuffled once, then sliced into `k` contiguous folds of
/// `floor(n / k)` items each. The `n mod k` items left after the last fold are
/// not assigned to any fold.
///
/// # Parameters
///
/// - `items` - The samples to partition
/// - `k` - Number of folds, at least 2
/// - `random_state` - Random seed, default is None (thread-local randomness)
///
/// # Returns
///
/// - `Result<Vec<Vec<T>>, ModelError>` - The `k` folds in order if processing successfully
///
/// # Errors
///
/// - Returns `ModelError::InputValidationError` if `k` is less than 2 or the dataset has fewer than `k` items
///
/// # Example
/// ```rust
/// use croptree::utility::k_fold_split::k_fold_split;
///
/// let items: Vec<u32> = (0..12).collect();
/// let folds = k_fold_split(&items, 5, Some(42)).unwrap();
/// assert_eq!(folds.len(), 5);
/// assert!(folds.iter().all(|fold| fold.len() == 2));
/// ```
pub fn k_fold_split<T>(
    items: &[T],
    k: usize,
    random_state: Option<u64>,
) -> Result<Vec<Vec<T>>, ModelError>
where
    T: Clone,
{
    if k < 2 {
        return Err(ModelError::InputValidationError(format!(
            "k must be at least 2, got {}",
            k
        )));
    }

    let n_samples = items.len();
    if n_samples < k {
        return Err(ModelError::InputValidationError(format!(
            "Cannot split {} samples into {} folds",
            n_samples, k
        )));
    }

    let mut shuffled = items.to_vec();

    match random_state {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            shuffled.shuffle(&mut rng);
        }
        None => {
            let mut rng = rng();
            shuffled.shuffle(&mut rng);
        }
    }

    let fold_size = n_samples / k;
    let dropped = n_samples - fold_size * k;
    if dropped > 0 {
        warn!(
            "{} of {} samples do not fit into {} folds of size {} and are left out",
            dropped, n_samples, k, fold_size
        );
    }

    let folds = (0..k)
        .map(|i| {
            let start = i * fold_size;
            let end = (start + fold_size).min(n_samples);
            shuffled[start..end].to_vec()
        })
        .collect();

    Ok(folds)
}
