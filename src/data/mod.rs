//! Data module - CSV loading, merging and cleaning

mod loader;
mod processor;
pub mod schema;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, NullPolicy, ProcessorError};
