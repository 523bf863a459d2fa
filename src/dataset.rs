/// This module provides the crop feature names and the ordered candidate feature set
pub mod feature;
/// This module provides the labeled sample type consumed by the tree builder
pub mod record;

pub use feature::*;
pub use record::*;
