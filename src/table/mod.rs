// src/table/mod.rs

pub mod flatten;
pub mod load;
pub mod normalize;
pub mod types;

pub use flatten::flatten;
pub use load::load_document;
pub use normalize::normalize;
pub use types::{RawRecord, Record};
