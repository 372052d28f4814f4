// Matrix data structures and structural validation

pub mod ellpack;
pub mod validate;

pub use ellpack::{EllpackMatrix, PAD_INDEX};
pub use validate::{validate, ValidationError};
