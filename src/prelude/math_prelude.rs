pub use crate::math::{entropy, information_gain, mean};
