use super::*;

/// Settings for k-fold cross-validation.
///
/// # Fields
///
/// - `n_folds` - Number of folds `k`, at least 2
/// - `random_state` - Seed for the shuffle before slicing; `None` draws fresh randomness every run
/// - `parallel` - Train the folds concurrently with rayon. The report keeps fold order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossValidationParams {
    pub n_folds: usize,
    pub random_state: Option<u64>,
    pub parallel: bool,
}

/// Five folds, unseeded shuffle, sequential training.
impl Default for CrossValidationParams {
    fn default() -> Self {
        Self {
            n_folds: 5,
            random_state: None,
            parallel: false,
        }
    }
}

/// Quality of the tree trained for one fold, measured on that fold's test set.
///
/// `precision` and `recall` are macro-averages: the unweighted mean of the
/// per-class values over the distinct labels present in the fold's actual labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl FoldMetrics {
    /// Computes accuracy, macro precision and macro recall of a set of predictions.
    ///
    /// # Parameters
    ///
    /// - `predicted` - Predicted labels
    /// - `actual` - Ground-truth labels, index-aligned with `predicted`
    ///
    /// # Returns
    ///
    /// - `FoldMetrics` - All three metrics in \[0.0, 1.0\] (all 0.0 for empty input)
    ///
    /// # Example
    /// ```rust
    /// use croptree::machine_learning::FoldMetrics;
    /// use ndarray::array;
    ///
    /// let predicted = array!["rice", "rice", "maize", "maize"];
    /// let actual = array!["rice", "rice", "rice", "maize"];
    /// let metrics = FoldMetrics::evaluate(&predicted, &actual);
    ///
    /// assert_eq!(metrics.accuracy, 0.75);
    /// // rice: precision 1.0, recall 2/3; maize: precision 0.5, recall 1.0
    /// assert!((metrics.precision - 0.75).abs() < 1e-12);
    /// assert!((metrics.recall - 5.0 / 6.0).abs() < 1e-12);
    /// ```
    ///
    /// # Panics
    ///
    /// - Panics if the two arrays have different lengths
    pub fn evaluate<S1, S2, A>(predicted: &ArrayBase<S1, Ix1>, actual: &ArrayBase<S2, Ix1>) -> Self
    where
        S1: Data<Elem = A>,
        S2: Data<Elem = A>,
        A: Eq + Hash,
    {
        let classes = distinct_in_order(actual);
        let n_classes = classes.len() as f64;

        let (precision_sum, recall_sum) =
            classes
                .iter()
                .fold((0.0, 0.0), |(precision_acc, recall_acc), &class| {
                    (
                        precision_acc + precision(predicted, actual, class),
                        recall_acc + recall(predicted, actual, class),
                    )
                });

        let (precision, recall) = if classes.is_empty() {
            (0.0, 0.0)
        } else {
            (precision_sum / n_classes, recall_sum / n_classes)
        };

        Self {
            accuracy: accuracy(predicted, actual),
            precision,
            recall,
        }
    }
}

impl fmt::Display for FoldMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Acc={:.2}%, Prec={:.2}%, Rec={:.2}%",
            self.accuracy * 100.0,
            self.precision * 100.0,
            self.recall * 100.0
        )
    }
}

/// Per-fold results of a cross-validation run, in fold order.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidationReport {
    folds: Vec<FoldMetrics>,
}

impl CrossValidationReport {
    pub fn new(folds: Vec<FoldMetrics>) -> Self {
        Self { folds }
    }

    pub fn folds(&self) -> &[FoldMetrics] {
        &self.folds
    }

    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    pub fn mean_accuracy(&self) -> f64 {
        self.mean_of(|fold| fold.accuracy)
    }

    pub fn mean_precision(&self) -> f64 {
        self.mean_of(|fold| fold.precision)
    }

    pub fn mean_recall(&self) -> f64 {
        self.mean_of(|fold| fold.recall)
    }

    fn mean_of(&self, metric: impl Fn(&FoldMetrics) -> f64) -> f64 {
        let values: Array1<f64> = self.folds.iter().map(metric).collect();
        mean(&values).unwrap_or(0.0)
    }
}

/// One line per fold: `Fold 1: Acc=93.18%, Prec=93.52%, Rec=93.30%`.
impl fmt::Display for CrossValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fold) in self.folds.iter().enumerate() {
            writeln!(f, "Fold {}: {}", i + 1, fold)?;
        }
        Ok(())
    }
}

/// Estimates the quality of ID3 trees on `records` with k-fold cross-validation.
///
/// The records are shuffled once and sliced into `k` folds of `floor(n / k)`
/// records (the remainder is left out, see [`k_fold_split`]). For every fold `i`
/// a fresh tree is built from the other folds concatenated in order, and
/// evaluated on fold `i`. The input slice is not modified.
///
/// # Parameters
///
/// - `records` - Labeled samples
/// - `tree_params` - Hyperparameters of each fold's tree. If `None`, defaults are used.
/// - `cv_params` - Cross-validation settings. If `None`, defaults are used.
///
/// # Returns
///
/// - `Result<CrossValidationReport, ModelError>` - Metrics of folds `0..k` in order
///
/// # Errors
///
/// - `ModelError::EmptyDataset` if `records` is empty
/// - `ModelError::InputValidationError` if `k < 2` or there are fewer records than folds
/// - `ModelError::MissingFeature` if a record lacks a feature needed to build or query a tree
///
/// # Example
/// ```rust
/// use croptree::dataset::Record;
/// use croptree::machine_learning::{CrossValidationParams, cross_validate};
///
/// let records: Vec<Record> = (0..20)
///     .map(|i| {
///         let n = i as f64 * 5.0;
///         let label = if i < 10 { "rice" } else { "maize" };
///         Record::from_values([n, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], label)
///     })
///     .collect();
///
/// let params = CrossValidationParams { random_state: Some(7), ..Default::default() };
/// let report = cross_validate(&records, None, Some(params)).unwrap();
/// assert_eq!(report.n_folds(), 5);
/// println!("{}", report);
/// ```
pub fn cross_validate(
    records: &[Record],
    tree_params: Option<DecisionTreeParams>,
    cv_params: Option<CrossValidationParams>,
) -> Result<CrossValidationReport, ModelError> {
    if records.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let cv_params = cv_params.unwrap_or_default();
    let model = DecisionTree::new(tree_params);

    let record_refs: Vec<&Record> = records.iter().collect();
    let folds = k_fold_split(&record_refs, cv_params.n_folds, cv_params.random_state)?;

    let run_fold = |i: usize| -> Result<FoldMetrics, ModelError> {
        let train: Vec<&Record> = folds
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .flat_map(|(_, fold)| fold.iter().copied())
            .collect();
        let test = &folds[i];

        let root = model.build_from_refs(&train)?;

        let predicted: Array1<&str> = test
            .iter()
            .map(|record| root.predict(record))
            .collect::<Result<_, _>>()?;
        let actual: Array1<&str> = test.iter().map(|record| record.label()).collect();

        let metrics = FoldMetrics::evaluate(&predicted, &actual);
        info!(
            "Fold {}: trained on {} records, tested on {}: {}",
            i + 1,
            train.len(),
            test.len(),
            metrics
        );
        Ok(metrics)
    };

    let fold_metrics: Vec<FoldMetrics> = if cv_params.parallel {
        (0..folds.len())
            .into_par_iter()
            .map(run_fold)
            .collect::<Result<_, _>>()?
    } else {
        (0..folds.len())
            .map(run_fold)
            .collect::<Result<_, _>>()?
    };

    let report = CrossValidationReport::new(fold_metrics);
    info!(
        "Cross-validation over {} folds: mean accuracy {:.4}, mean precision {:.4}, mean recall {:.4}",
        report.n_folds(),
        report.mean_accuracy(),
        report.mean_precision(),
        report.mean_recall()
    );

    Ok(report)
}

/// Distinct elements of `values` in order of first occurrence.
fn distinct_in_order<S, A>(values: &ArrayBase<S, Ix1>) -> Vec<&A>
where
    S: Data<Elem = A>,
    A: Eq + Hash,
{
    let mut seen = AHashSet::new();
    values.iter().filter(|value| seen.insert(*value)).collect()
}
