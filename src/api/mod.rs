pub mod catalog;
pub mod models;

pub use catalog::*;
pub use models::*;
