//! Registration form state

mod catalog;
mod forms;
mod validation;

pub use catalog::*;
pub use forms::*;
pub use validation::*;
