pub use crate::metric::{ClassConfusion, accuracy, precision, recall};
