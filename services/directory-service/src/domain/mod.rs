// Domain models for Directory Service
pub mod category;
pub mod document;
pub mod lawyer;

pub use category::*;
pub use document::*;
pub use lawyer::*;
