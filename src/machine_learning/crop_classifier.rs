use super::*;

/// Outcome of a training session: the tree built from the whole dataset and the
/// cross-validation estimate of its quality.
#[derive(Debug, Clone, Copy)]
pub struct TrainingReport<'a> {
    pub tree: &'a Node,
    pub cross_validation: &'a CrossValidationReport,
}

/// Renders as
///
/// ```text
/// Decision Tree:
/// <tree listing>
///
/// Results:
/// Fold 1: Acc=..%, Prec=..%, Rec=..%
/// ...
/// ```
impl fmt::Display for TrainingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decision Tree:\n{}\n\nResults:\n{}",
            self.tree.render(),
            self.cross_validation
        )
    }
}

/// Crop recommendation model: trains an ID3 tree on the full dataset, validates
/// the approach with k-fold cross-validation, and answers queries typed as text.
///
/// # Example
/// ```rust
/// use croptree::dataset::Record;
/// use croptree::machine_learning::{CropClassifier, CrossValidationParams};
///
/// let records: Vec<Record> = (0..10)
///     .map(|i| {
///         let rainfall = 50.0 + i as f64 * 20.0;
///         let label = if rainfall > 140.0 { "rice" } else { "chickpea" };
///         Record::from_values([40.0, 60.0, 40.0, 22.0, 70.0, 6.8, rainfall], label)
///     })
///     .collect();
///
/// let cv = CrossValidationParams { random_state: Some(1), ..Default::default() };
/// let mut classifier = CropClassifier::new(None, Some(cv));
/// let report = classifier.train(&records).unwrap();
/// println!("{}", report);
///
/// let crop = classifier
///     .recommend(["40", "60", "40", "22.0", "70.0", "6.8", "230.0"])
///     .unwrap();
/// assert_eq!(crop, "rice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CropClassifier {
    model: DecisionTree,
    cv_params: CrossValidationParams,
    cross_validation: Option<CrossValidationReport>,
}

impl CropClassifier {
    /// Creates an untrained classifier.
    ///
    /// # Parameters
    ///
    /// - `tree_params` - Tree hyperparameters, defaults if `None`
    /// - `cv_params` - Cross-validation settings, defaults (5 folds) if `None`
    pub fn new(
        tree_params: Option<DecisionTreeParams>,
        cv_params: Option<CrossValidationParams>,
    ) -> Self {
        Self {
            model: DecisionTree::new(tree_params),
            cv_params: cv_params.unwrap_or_default(),
            cross_validation: None,
        }
    }

    get_field!(get_cv_params, cv_params, CrossValidationParams);

    pub fn get_model(&self) -> &DecisionTree {
        &self.model
    }

    pub fn is_trained(&self) -> bool {
        self.model.get_root().is_some() && self.cross_validation.is_some()
    }

    /// Trains on `records` and cross-validates, replacing any earlier training.
    ///
    /// The tree kept for prediction is built from all records; the
    /// cross-validation trees are built from fold subsets and discarded. The
    /// records themselves are left untouched.
    ///
    /// # Returns
    ///
    /// - `Result<TrainingReport, ModelError>` - The kept tree and the per-fold metrics
    ///
    /// # Errors
    ///
    /// - Any error of [`DecisionTree::fit`] or [`cross_validate`]. On error the
    ///   classifier reports itself as untrained.
    pub fn train(&mut self, records: &[Record]) -> Result<TrainingReport<'_>, ModelError> {
        self.cross_validation = None;

        self.model.fit(records)?;
        let report = cross_validate(
            records,
            Some(self.model.get_parameters().clone()),
            Some(self.cv_params),
        )?;
        self.cross_validation = Some(report);

        self.training_report().ok_or(ModelError::NotFitted)
    }

    /// Report of the last successful training, `None` if untrained.
    pub fn training_report(&self) -> Option<TrainingReport<'_>> {
        match (self.model.get_root(), self.cross_validation.as_ref()) {
            (Some(tree), Some(cross_validation)) => Some(TrainingReport {
                tree,
                cross_validation,
            }),
            _ => None,
        }
    }

    /// Predicts the crop for a record.
    ///
    /// # Errors
    ///
    /// - `ModelError::NotFitted` if the classifier has not been trained
    /// - `ModelError::MissingFeature` if the record lacks a feature on its path
    pub fn predict(&self, record: &Record) -> Result<String, ModelError> {
        if !self.is_trained() {
            return Err(ModelError::NotFitted);
        }
        self.model.predict_one(record)
    }

    /// Predicts the crop for seven textual measurements given in declared feature
    /// order: `N, P, K, temperature, humidity, ph, rainfall`.
    ///
    /// # Errors
    ///
    /// - `ModelError::NotFitted` if the classifier has not been trained
    /// - `ModelError::ParseError` if a field is not a number
    pub fn recommend(&self, fields: [&str; Feature::COUNT]) -> Result<String, ModelError> {
        if !self.is_trained() {
            return Err(ModelError::NotFitted);
        }
        let query = Record::parse_fields(Feature::ALL.into_iter().zip(fields), "")?;
        self.predict(&query)
    }
}
