pub use crate::machine_learning::{
    Branch, BranchCondition, Comparison, DecisionTree, DecisionTreeParams, NO_MATCHING_PATH, Node,
    build_tree, predict,
};
pub use crate::machine_learning::{
    CrossValidationParams, CrossValidationReport, FoldMetrics, cross_validate,
};
pub use crate::machine_learning::{CropClassifier, TrainingReport};
