use crate::dataset::{Feature, FeatureSet, Record};
use crate::error::ModelError;
use crate::math::{information_gain, mean};
use crate::metric::{accuracy, precision, recall};
use crate::utility::k_fold_split;
use ahash::AHashSet;
use log::{debug, info, warn};
use ndarray::{Array1, ArrayBase, Data, Ix1};
use rayon::prelude::*;
use std::fmt;
use std::hash::Hash;

/// ID3 decision tree: node structure, tree induction and prediction
pub mod decision_tree;
/// K-fold cross-validation of decision trees with per-fold metrics
pub mod cross_validation;
/// Training session that couples a full-dataset tree with its cross-validation report
pub mod crop_classifier;

pub use crop_classifier::*;
pub use cross_validation::*;
pub use decision_tree::*;
