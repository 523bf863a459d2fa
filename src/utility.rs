/// This module provides functionality for partitioning a dataset into shuffled folds,
/// the resampling step behind k-fold cross-validation
pub mod k_fold_split;

pub use k_fold_split::*;
