pub use crate::dataset::{Feature, FeatureSet, Record};
