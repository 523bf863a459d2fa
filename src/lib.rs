/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the
/// specified field. The field type must be `Copy`.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_cv_params)
/// - `$field_name` - The name of the field to access (e.g., cv_params)
/// - `$return_type` - The return type of the getter method
#[cfg(feature = "machine_learning")]
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// A macro that generates a public getter method returning a reference to an optional field.
///
/// # Parameters
///
/// - `$method_name` - The identifier for the generated getter method name
/// - `$field_name` - The identifier of the struct field to access
/// - `$return_type` - The type expression for the return value (typically `Option<&Type>`)
#[cfg(feature = "machine_learning")]
macro_rules! get_field_as_ref {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field as a reference")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name.as_ref()
        }
    };
}

/// Error type shared by every module of the crate.
///
/// - `MissingFeature` / `UnknownFeature` - feature lookups that cannot be satisfied
/// - `EmptyDataset` - building or validating with no records
/// - `ParseError` - non-numeric text for a numeric feature
/// - `NotFitted` - using a model before training it
/// - `InputValidationError` - invalid configuration such as fewer than two folds
///
/// Compiled with `dataset`, since errors name the [`dataset::Feature`] involved.
#[cfg(feature = "dataset")]
pub mod error;

/// Labeled crop samples and the feature vocabulary they are described with.
///
/// # Core Types
/// - `Feature` - The seven soil/climate measurements: `N, P, K, temperature, humidity, ph, rainfall`
/// - `FeatureSet` - Ordered candidate features of a training run
/// - `Record` - One sample: a value per feature plus the crop label
///
/// # Example
/// ```rust
/// use croptree::dataset::{Feature, Record};
///
/// let fields = [(Feature::N, "90"), (Feature::Ph, " 6.5 ")];
/// let record = Record::parse_fields(fields, "rice").unwrap();
/// assert_eq!(record.value(Feature::N).unwrap(), 90.0);
/// assert!(record.value(Feature::K).is_err());
/// ```
#[cfg(feature = "dataset")]
pub mod dataset;

/// Module `math` contains the information-theoretic functions behind ID3.
///
/// - `entropy` - Base-2 Shannon entropy of a label set
/// - `information_gain` - Entropy reduction from grouping samples by exact feature value
/// - `mean` - Arithmetic mean, used as the split threshold
///
/// # Example
/// ```rust
/// use croptree::math::{entropy, information_gain};
/// use ndarray::array;
///
/// let labels = array!["rice", "rice", "maize", "maize"];
/// let values = array![10.0, 10.0, 90.0, 90.0];
/// assert!((entropy(&labels) - 1.0).abs() < 1e-12);
/// assert!((information_gain(&labels, &values) - 1.0).abs() < 1e-12);
/// ```
#[cfg(feature = "math")]
pub mod math;

/// Classification metrics over index-aligned predicted/actual label arrays.
///
/// # Classification Functions
/// - **accuracy**: Fraction of equal pairs
/// - **precision**: TP / (TP + FP) for one class, 0.0 when the class is never predicted
/// - **recall**: TP / (TP + FN) for one class, 0.0 when the class never occurs
///
/// ## ClassConfusion Structure
/// One-vs-rest TP/FP/TN/FN counts of a single class, from which precision and recall derive.
///
/// # Examples
/// ```rust
/// use croptree::metric::*;
/// use ndarray::array;
///
/// let predicted = array!["rice", "maize", "rice", "jute"];
/// let actual = array!["rice", "maize", "maize", "jute"];
/// assert_eq!(accuracy(&predicted, &actual), 0.75);
/// assert_eq!(precision(&predicted, &actual, "rice"), 0.5);
/// assert_eq!(recall(&predicted, &actual, "maize"), 0.5);
/// ```
#[cfg(feature = "metric")]
pub mod metric;

/// Data preparation helpers.
///
/// - **k_fold_split**: Seedable shuffle followed by slicing into `k` equal folds
#[cfg(feature = "utility")]
pub mod utility;

/// Module `machine_learning` provides the ID3 decision tree and its evaluation.
///
/// # Components
/// - **Node**: Leaf (label) or internal (feature + ordered branch conditions)
/// - **DecisionTree**: Builds a tree by information gain with mean thresholds, predicts, renders
/// - **cross_validate**: k-fold cross-validation reporting accuracy and macro precision/recall per fold
/// - **CropClassifier**: Trains on the full dataset, cross-validates, and answers text queries
///
/// # Examples
/// ```rust
/// use croptree::dataset::{FeatureSet, Record};
/// use croptree::machine_learning::*;
///
/// let records = vec![
///     Record::from_values([10.0, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], "rice"),
///     Record::from_values([90.0, 40.0, 40.0, 20.0, 50.0, 7.0, 80.0], "maize"),
/// ];
///
/// let root = build_tree(&records, &FeatureSet::default()).unwrap();
/// assert_eq!(predict(&root, &records[0]).unwrap(), "rice");
/// print!("{}", root);
/// ```
#[cfg(feature = "machine_learning")]
pub mod machine_learning;

/// A convenience module that re-exports the most commonly used types and functions.
///
/// # Examples
/// ```rust
/// use croptree::prelude::*;
///
/// let tree = DecisionTree::new(None);
/// assert!(tree.get_root().is_none());
/// ```
pub mod prelude;

#[cfg(feature = "dataset")]
pub use error::ModelError;
