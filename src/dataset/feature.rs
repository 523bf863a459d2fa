use crate::error::ModelError;
use std::fmt;
use std::str::FromStr;

/// Soil and climate measurements used to recommend a crop.
///
/// # Variants
///
/// - `N` - Nitrogen content of the soil
/// - `P` - Phosphorus content of the soil
/// - `K` - Potassium content of the soil
/// - `Temperature` - Temperature in degrees Celsius
/// - `Humidity` - Relative humidity in percent
/// - `Ph` - pH value of the soil
/// - `Rainfall` - Rainfall in mm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    N,
    P,
    K,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    /// Number of features every complete record carries
    pub const COUNT: usize = 7;

    /// All features in declared order
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::N,
        Feature::P,
        Feature::K,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Gets the canonical name of the feature.
    ///
    /// # Returns
    ///
    /// * `&'static str` - One of `N`, `P`, `K`, `temperature`, `humidity`, `ph`, `rainfall`
    pub fn name(self) -> &'static str {
        match self {
            Feature::N => "N",
            Feature::P => "P",
            Feature::K => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Position of the feature in declared order, used to address record storage.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ModelError;

    /// Parses a feature name case-insensitively (`"pH"`, `"ph"` and `"PH"` all map to `Feature::Ph`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ModelError::UnknownFeature(name.to_string()))
    }
}

/// Ordered set of candidate features for a training run.
///
/// The order decides tie-breaks between features with equal information gain:
/// the one listed first wins. Each feature appears at most once.
///
/// # Example
/// ```rust
/// use croptree::dataset::{Feature, FeatureSet};
///
/// let features = FeatureSet::default();
/// assert_eq!(features.len(), 7);
///
/// let remaining = features.without(Feature::N);
/// assert_eq!(remaining.len(), 6);
/// assert!(!remaining.contains(Feature::N));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Creates a feature set keeping the first occurrence of every feature.
    ///
    /// # Parameters
    ///
    /// * `features` - Candidate features in priority order
    ///
    /// # Returns
    ///
    /// * `FeatureSet` - The deduplicated ordered set
    pub fn new<I>(features: I) -> Self
    where
        I: IntoIterator<Item = Feature>,
    {
        let mut ordered: Vec<Feature> = Vec::with_capacity(Feature::COUNT);
        for feature in features {
            if !ordered.contains(&feature) {
                ordered.push(feature);
            }
        }
        Self { features: ordered }
    }

    /// Creates a feature set from feature names.
    ///
    /// # Errors
    ///
    /// - `ModelError::UnknownFeature` if a name does not denote a crop feature
    pub fn from_names<'a, I>(names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let features = names
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Feature>, ModelError>>()?;
        Ok(Self::new(features))
    }

    /// Returns a copy of this set with `feature` removed, keeping the order of the others.
    pub fn without(&self, feature: Feature) -> Self {
        Self {
            features: self
                .features
                .iter()
                .copied()
                .filter(|&f| f != feature)
                .collect(),
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.features
    }
}

/// The seven crop features in declared order.
impl Default for FeatureSet {
    fn default() -> Self {
        Self::new(Feature::ALL)
    }
}
