use super::feature::Feature;
use crate::error::ModelError;

/// One labeled sample: a value per crop feature plus the crop label.
///
/// Values are stored in a fixed array addressed by [`Feature`], so a lookup can
/// only fail when a value was never supplied. Integer measurements (N, P, K) are
/// stored as `f64` like every other feature.
///
/// # Example
/// ```rust
/// use croptree::dataset::{Feature, Record};
///
/// let record = Record::from_values([10.0, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], "rice");
/// assert_eq!(record.value(Feature::Ph).unwrap(), 6.5);
/// assert_eq!(record.get("rainfall").unwrap(), 200.0);
/// assert_eq!(record.label(), "rice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: [Option<f64>; Feature::COUNT],
    label: String,
}

impl Record {
    /// Creates a record with a label and no feature values.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            values: [None; Feature::COUNT],
            label: label.into(),
        }
    }

    /// Creates a query record with an empty label, used for prediction only.
    pub fn unlabeled() -> Self {
        Self::new(String::new())
    }

    /// Creates a complete record from values given in declared feature order.
    ///
    /// # Parameters
    ///
    /// - `values` - Values for `N, P, K, temperature, humidity, ph, rainfall`
    /// - `label` - Crop label of the sample
    pub fn from_values(values: [f64; Feature::COUNT], label: impl Into<String>) -> Self {
        Self {
            values: values.map(Some),
            label: label.into(),
        }
    }

    /// Parses feature values from text, as typed into an input form or read from a row.
    ///
    /// Surrounding whitespace is ignored. Features not mentioned stay unset.
    ///
    /// # Parameters
    ///
    /// - `fields` - Pairs of feature and its textual value
    /// - `label` - Crop label of the sample
    ///
    /// # Returns
    ///
    /// - `Result<Record, ModelError>` - The parsed record
    ///
    /// # Errors
    ///
    /// - `ModelError::ParseError` if a value is not a finite number
    pub fn parse_fields<'a, I>(fields: I, label: impl Into<String>) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (Feature, &'a str)>,
    {
        let mut record = Self::new(label);
        for (feature, text) in fields {
            let value = text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ModelError::ParseError {
                    feature,
                    value: text.to_string(),
                })?;
            record.set_value(feature, value);
        }
        Ok(record)
    }

    /// Sets a feature value and returns the record, for builder-style construction.
    pub fn with_value(mut self, feature: Feature, value: f64) -> Self {
        self.set_value(feature, value);
        self
    }

    /// Sets the value of a feature, replacing any previous value.
    ///
    /// # Parameters
    ///
    /// - `feature` - The feature to set
    /// - `value` - Its measured value
    pub fn set_value(&mut self, feature: Feature, value: f64) {
        self.values[feature.index()] = Some(value);
    }

    /// Gets the value of a feature.
    ///
    /// # Errors
    ///
    /// - `ModelError::MissingFeature` if the record carries no value for `feature`
    pub fn value(&self, feature: Feature) -> Result<f64, ModelError> {
        self.values[feature.index()].ok_or(ModelError::MissingFeature(feature))
    }

    /// Gets the value of a feature by its name.
    ///
    /// # Errors
    ///
    /// - `ModelError::UnknownFeature` if `name` is not a crop feature
    /// - `ModelError::MissingFeature` if the record carries no value for it
    pub fn get(&self, name: &str) -> Result<f64, ModelError> {
        self.value(name.parse()?)
    }

    /// Whether the record supplies a value for every feature.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Gets the crop label; empty for query records.
    pub fn label(&self) -> &str {
        &self.label
    }
}
