//! Core data structures for `.DS_Store` components.
//!
//! This module defines the fundamental types used throughout the library:
//! - File header and tree descriptor metadata
//! - Decoded entries, field values and merged records
//! - The final parse result

use std::collections::HashMap;
use std::fmt;

use super::error::FormatWarning;

/// The fixed-size header at the start of every `.DS_Store` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHeader {
    pub alignment: u32,
    pub magic: [u8; 4],
    /// Absolute offset of the block allocator (`4 + declared offset`).
    pub allocator_offset: usize,
    /// Declared size of the allocator block in bytes.
    pub allocator_size: u32,
}

/// Summary of the `DSDB` tree, read from its master block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeDescriptor {
    /// Block id of the topmost node.
    pub root_id: u32,
    /// Number of internal levels (0 for a tree made of a single leaf).
    pub height: u32,
    pub num_records: u32,
    pub num_nodes: u32,
    /// Node page size; always `0x1000` in files written by Finder.
    pub page_size: u32,
}

/// A decoded attribute value.
///
/// The variant is chosen by the 4-character type tag stored before the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `bool`
    Bool(bool),
    /// `shor` and `long`
    Int32(i32),
    /// `comp` and `dutc`
    Int64(i64),
    /// `type`: a four-character code such as `icnv` or `Nlsv`
    TypeCode(String),
    /// `blob`
    Blob(Vec<u8>),
    /// `ustr`
    UnicodeString(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int32(v) => write!(f, "{}", v),
            FieldValue::Int64(v) => write!(f, "{}", v),
            FieldValue::TypeCode(v) | FieldValue::UnicodeString(v) => f.write_str(v),
            FieldValue::Blob(bytes) => write!(f, "0x{}", hex::encode(bytes)),
        }
    }
}

/// One leaf entry of the tree: a single field of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub code: String,
    pub value: FieldValue,
}

/// All fields recorded for one file name.
///
/// A record is created on the first entry for its name, so `fields` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Returns the value stored under a 4-character field code.
    pub fn get(&self, code: &str) -> Option<&FieldValue> {
        self.fields.get(code)
    }
}

/// The complete result of parsing one `.DS_Store` buffer.
#[derive(Debug, Clone)]
pub struct DsStore {
    pub header: StoreHeader,
    /// Named top-level structures, mapped to their block ids.
    pub directory: HashMap<String, u32>,
    pub tree: TreeDescriptor,
    /// Merged records, in the order their names were first seen in the tree.
    pub records: Vec<Record>,
    /// Non-fatal anomalies met along the way.
    pub warnings: Vec<FormatWarning>,
}

impl DsStore {
    /// Finds the record for a file name.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.name == name)
    }
}
