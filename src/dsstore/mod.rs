//! Core `.DS_Store` reader module

pub mod context;
pub mod format;
pub mod reader;
pub mod records;
pub mod types;
pub mod utils;

pub use reader::{DsStoreReader, ReaderOptions, parse};
pub use types::error::{DsStoreError, FormatWarning, Result};
