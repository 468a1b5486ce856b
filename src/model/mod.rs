mod library;
mod types;

pub use library::{Library, TypeEntry};
pub use types::*;
