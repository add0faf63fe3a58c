//! File format parsing layer for `.DS_Store` files.
//!
//! This module bridges between the raw byte cursor and the high-level
//! [`DsStoreReader`](crate::dsstore::reader::DsStoreReader).
//!
//! # Module Organization
//!
//! - [`header`]: Parses the fixed header and locates the block allocator
//! - [`allocator`]: Parses the offsets table and the block directory
//! - [`btree`]: Walks the `DSDB` tree from its master block
//! - [`field`]: Decodes individual entries and their typed values
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌──────────────────┐
//! │  Header          │ ← header::parse()
//! ├──────────────────┤
//! │  Block allocator │ ← allocator::parse()
//! │  (offsets, dir)  │
//! ├──────────────────┤
//! │  Tree blocks     │ ← btree::walk()
//! │  (master, nodes) │     └─ field::decode_entry()
//! └──────────────────┘
//! ```
//!
//! Blocks may appear in any order; only the header position is fixed.

pub mod allocator;
pub mod btree;
pub mod field;
pub mod header;
