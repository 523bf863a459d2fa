use ndarray::{ArrayBase, Data, Ix1};
use std::borrow::Borrow;

/// One-vs-rest confusion counts for a single class of a multi-class prediction.
///
/// Every index-aligned (predicted, actual) pair is classified relative to
/// `class`: predicted and actual both equal to it is a true positive, predicted
/// equal but actual different is a false positive, actual equal but predicted
/// different is a false negative, anything else is a true negative.
///
/// # Fields
///
/// - `tp` - True positives
/// - `fp` - False positives
/// - `tn` - True negatives
/// - `fn_` - False negatives
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use croptree::metric::ClassConfusion;
///
/// let predicted = array!["rice", "rice", "maize", "maize"];
/// let actual = array!["rice", "maize", "maize", "rice"];
/// let cm = ClassConfusion::new(&predicted, &actual, "rice");
///
/// assert_eq!(cm.get_counts(), (1, 1, 1, 1));
/// assert_eq!(cm.precision(), 0.5);
/// assert_eq!(cm.recall(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassConfusion {
    tp: usize,
    fp: usize,
    tn: usize,
    fn_: usize,
}

impl ClassConfusion {
    /// Tallies the confusion counts of `class`.
    ///
    /// # Parameters
    ///
    /// - `predicted` - Predicted class labels
    /// - `actual` - Ground-truth class labels
    /// - `class` - The class treated as positive
    ///
    /// # Returns
    ///
    /// - `Self` - Confusion counts for `class`
    ///
    /// # Panics
    ///
    /// - Panics if the two arrays have different lengths
    pub fn new<S1, S2, A, Q>(
        predicted: &ArrayBase<S1, Ix1>,
        actual: &ArrayBase<S2, Ix1>,
        class: &Q,
    ) -> Self
    where
        S1: Data<Elem = A>,
        S2: Data<Elem = A>,
        A: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        check_same_length(predicted.len(), actual.len());

        let mut tp = 0;
        let mut fp = 0;
        let mut tn = 0;
        let mut fn_ = 0;

        for (p, a) in predicted.iter().zip(actual.iter()) {
            let is_predicted = <A as Borrow<Q>>::borrow(p) == class;
            let is_actual = <A as Borrow<Q>>::borrow(a) == class;
            match (is_predicted, is_actual) {
                (true, true) => tp += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
                (false, false) => tn += 1,
            }
        }

        Self { tp, fp, tn, fn_ }
    }

    /// Get the components of the confusion counts.
    ///
    /// # Returns
    ///
    /// - `(usize, usize, usize, usize)` - Tuple of (tp, fp, tn, fn) counts
    pub fn get_counts(&self) -> (usize, usize, usize, usize) {
        (self.tp, self.fp, self.tn, self.fn_)
    }

    /// Calculate precision: TP / (TP + FP).
    ///
    /// # Returns
    ///
    /// - `f64` - Precision in the range \[0.0, 1.0\] (returns 0.0 when the class was never predicted)
    pub fn precision(&self) -> f64 {
        if self.tp + self.fp == 0 {
            return 0.0;
        }
        self.tp as f64 / (self.tp + self.fp) as f64
    }

    /// Calculate recall: TP / (TP + FN).
    ///
    /// # Returns
    ///
    /// - `f64` - Recall in the range \[0.0, 1.0\] (returns 0.0 when the class never occurs in `actual`)
    pub fn recall(&self) -> f64 {
        if self.tp + self.fn_ == 0 {
            return 0.0;
        }
        self.tp as f64 / (self.tp + self.fn_) as f64
    }
}

/// Calculate the accuracy of a classification model.
///
/// Accuracy is the proportion of index-aligned pairs whose labels are equal.
///
/// # Parameters
///
/// - `predicted` - Predicted class labels
/// - `actual` - Ground-truth class labels
///
/// # Examples
/// ```rust
/// use croptree::metric::accuracy;
/// use ndarray::array;
///
/// let predicted = array!["rice", "maize", "maize"];
/// let actual = array!["rice", "rice", "maize"];
/// let acc = accuracy(&predicted, &actual);
/// assert!((acc - 0.6666666666666667).abs() < 1e-6);
/// ```
///
/// # Returns
///
/// - `f64` - Accuracy in the range \[0.0, 1.0\] (returns 0.0 when the input arrays are empty)
///
/// # Panics
///
/// - Panics if the two arrays have different lengths
pub fn accuracy<S1, S2, A>(predicted: &ArrayBase<S1, Ix1>, actual: &ArrayBase<S2, Ix1>) -> f64
where
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    A: PartialEq,
{
    check_same_length(predicted.len(), actual.len());

    if predicted.is_empty() {
        return 0.0;
    }

    let correct_predictions = predicted
        .iter()
        .zip(actual.iter())
        .filter(|&(p, a)| p == a)
        .count();

    correct_predictions as f64 / predicted.len() as f64
}

/// Calculate the precision of one class: TP / (TP + FP).
///
/// Only predictions equal to `class` are considered.
///
/// # Parameters
///
/// - `predicted` - Predicted class labels
/// - `actual` - Ground-truth class labels
/// - `class` - The class whose precision is measured
///
/// # Examples
/// ```rust
/// use croptree::metric::precision;
/// use ndarray::array;
///
/// let predicted = array!["rice", "rice", "maize"];
/// let actual = array!["rice", "maize", "maize"];
/// assert_eq!(precision(&predicted, &actual, "rice"), 0.5);
/// assert_eq!(precision(&predicted, &actual, "jute"), 0.0);
/// ```
///
/// # Returns
///
/// - `f64` - Precision in the range \[0.0, 1.0\] (0.0 when `class` is never predicted)
///
/// # Panics
///
/// - Panics if the two arrays have different lengths
pub fn precision<S1, S2, A, Q>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
    class: &Q,
) -> f64
where
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    A: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    ClassConfusion::new(predicted, actual, class).precision()
}

/// Calculate the recall of one class: TP / (TP + FN).
///
/// Only samples whose actual label equals `class` are considered.
///
/// # Parameters
///
/// - `predicted` - Predicted class labels
/// - `actual` - Ground-truth class labels
/// - `class` - The class whose recall is measured
///
/// # Examples
/// ```rust
/// use croptree::metric::recall;
/// use ndarray::array;
///
/// let predicted = array!["rice", "rice", "maize"];
/// let actual = array!["rice", "maize", "maize"];
/// assert_eq!(recall(&predicted, &actual, "maize"), 0.5);
/// ```
///
/// # Returns
///
/// - `f64` - Recall in the range \[0.0, 1.0\] (0.0 when `class` never occurs in `actual`)
///
/// # Panics
///
/// - Panics if the two arrays have different lengths
pub fn recall<S1, S2, A, Q>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
    class: &Q,
) -> f64
where
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    A: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    ClassConfusion::new(predicted, actual, class).recall()
}

fn check_same_length(predicted: usize, actual: usize) {
    if predicted != actual {
        panic!(
            "Input arrays must have the same length. Predicted: {}, Actual: {}",
            predicted, actual
        );
    }
}
