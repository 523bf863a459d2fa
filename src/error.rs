use crate::dataset::Feature;
use thiserror::Error;

/// Error types that can occur while building, querying or evaluating a tree
///
/// # Variants
///
/// - `MissingFeature` - a record has no value for a feature the tree needs
/// - `UnknownFeature` - a feature name that is not part of the crop feature set
/// - `EmptyDataset` - an operation that needs at least one record received none
/// - `ParseError` - text supplied for a numeric feature is not a number
/// - `NotFitted` - the model has not been trained yet
/// - `InputValidationError` - the input or configuration does not meet the expected rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Record has no value for feature `{0}`")]
    MissingFeature(Feature),
    #[error("Unknown feature name `{0}`")]
    UnknownFeature(String),
    #[error("Cannot build a decision tree from an empty dataset")]
    EmptyDataset,
    #[error("Value `{value}` for feature `{feature}` is not a valid number")]
    ParseError { feature: Feature, value: String },
    #[error(
        "Model has not been fitted. Certain methods require the model to be fitted before use."
    )]
    NotFitted,
    #[error("Input validation error: {0}")]
    InputValidationError(String),
}
