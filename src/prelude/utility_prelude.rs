pub use crate::utility::k_fold_split::k_fold_split;
