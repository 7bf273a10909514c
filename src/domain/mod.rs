pub mod entities;
pub mod errors;
pub mod ports;
pub mod splitter;

pub use entities::*;
pub use errors::{RagError, Result};
pub use splitter::TextSplitter;
