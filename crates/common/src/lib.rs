pub mod error;

pub use error::{HelmaError, HelmaResult};
