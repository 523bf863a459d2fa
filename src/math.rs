use ahash::AHashMap;
use ndarray::{ArrayBase, Data, Ix1};
use std::hash::Hash;

/// Calculates the arithmetic mean of a set of values.
///
/// # Parameters
///
/// - `values` - Observed values stored in a 1D array
///
/// # Returns
///
/// - `Option<f64>` - The mean, or `None` when `values` is empty
///
/// # Examples
/// ```rust
/// use croptree::math::mean;
/// use ndarray::array;
///
/// let values = array![10.0, 90.0];
/// assert_eq!(mean(&values), Some(50.0));
/// ```
#[inline]
pub fn mean<S>(values: &ArrayBase<S, Ix1>) -> Option<f64>
where
    S: Data<Elem = f64>,
{
    if values.is_empty() {
        return None;
    }
    Some(values.sum() / values.len() as f64)
}

/// Calculates the base-2 Shannon entropy of a label set.
///
/// Entropy quantifies the impurity of the label distribution and is what the
/// ID3 builder tries to reduce with each split.
///
/// # Parameters
///
/// - `y` - Class labels stored in a 1D array
///
/// # Returns
///
/// - `f64` - Entropy value of the dataset (0.0 for homogeneous or empty data)
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use croptree::math::entropy;
///
/// let labels = array!["rice", "maize", "maize", "rice"];
/// let ent = entropy(&labels);
/// // For two classes with equal frequency, entropy = 1.0
/// assert!((ent - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn entropy<S, A>(y: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = A>,
    A: Eq + Hash,
{
    let total_samples = y.len() as f64;
    if total_samples == 0.0 {
        return 0.0;
    }

    let mut class_counts: AHashMap<&A, usize> = AHashMap::with_capacity(10);
    for label in y.iter() {
        *class_counts.entry(label).or_insert(0) += 1;
    }

    let mut entropy = 0.0;
    for &count in class_counts.values() {
        let p = count as f64 / total_samples;
        entropy -= p * p.log2();
    }

    entropy
}

/// Calculates the information gain of partitioning a dataset by a feature's values.
///
/// Samples are grouped by exact equality of their raw feature value (every
/// distinct value forms its own group), independently of any threshold used
/// later to split the node.
///
/// `gain = entropy(y) - Σ_v (|y_v| / |y|) * entropy(y_v)`
///
/// # Parameters
///
/// - `y` - Class labels of the samples
/// - `values` - Feature value of each sample, index-aligned with `y`
///
/// # Returns
///
/// - `f64` - Information gain of the value partition (0.0 for empty input)
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use croptree::math::information_gain;
///
/// let labels = array!["rice", "rice", "maize", "maize"];
/// let values = array![1.0, 1.0, 2.0, 2.0];
/// // Entropy(parent)=1.0 and both value groups are pure, so IG = 1.0
/// assert!((information_gain(&labels, &values) - 1.0).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// - Panics if `y` and `values` have different lengths
pub fn information_gain<S1, S2, A>(y: &ArrayBase<S1, Ix1>, values: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = A>,
    S2: Data<Elem = f64>,
    A: Eq + Hash,
{
    if y.len() != values.len() {
        panic!(
            "Input arrays must have the same length. Labels: {}, Values: {}",
            y.len(),
            values.len()
        );
    }

    let n = y.len() as f64;
    if n == 0.0 {
        return 0.0;
    }

    let base_entropy = entropy(y);

    // Bit patterns give exact equality, matching how the raw values were observed
    let mut groups: AHashMap<u64, AHashMap<&A, usize>> = AHashMap::new();
    for (label, value) in y.iter().zip(values.iter()) {
        *groups
            .entry(value.to_bits())
            .or_default()
            .entry(label)
            .or_insert(0) += 1;
    }

    let weighted_child_entropy: f64 = groups
        .values()
        .map(|counts| {
            let size = counts.values().sum::<usize>() as f64;
            let group_entropy = counts
                .values()
                .map(|&count| {
                    let p = count as f64 / size;
                    -p * p.log2()
                })
                .sum::<f64>();
            (size / n) * group_entropy
        })
        .sum();

    base_entropy - weighted_child_entropy
}
