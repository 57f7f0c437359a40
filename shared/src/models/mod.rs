//! Domain models for the cat box planner

mod cat;
mod catalog;
mod food;
mod plan;
mod result;

pub use cat::*;
pub use catalog::*;
pub use food::*;
pub use plan::*;
pub use result::*;
