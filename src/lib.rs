//! # dsstore-reader
//!
//! A reader for macOS Finder `.DS_Store` metadata files.
//!
//! The decoder takes a complete file image as a byte slice and returns the
//! per-file records stored in its `DSDB` B-tree. It does no I/O of its own.
//!
//! **Note:** Writing `.DS_Store` files is not supported.
pub mod dsstore;

// Re-export the main types for convenience
pub use dsstore::{
    DsStoreError, DsStoreReader, FormatWarning, ReaderOptions, Result, parse,
    records::render_field,
    types::models::{DsStore, FieldValue, Record, StoreHeader, TreeDescriptor},
};
