//! Coalescing of per-field entries into per-file records, and their display.

use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};

use super::types::models::{Entry, FieldValue, Record};

/// Field code of the icon position in its Finder window.
pub const ICON_LOCATION: &str = "Iloc";

/// Merges entries sharing a file name into one [`Record`].
///
/// Records keep the order in which their names were first seen.
#[derive(Debug, Default)]
pub struct RecordMerger {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one field to the record for `name`, creating the record if needed.
    ///
    /// A repeated field code overwrites the earlier value.
    pub fn push(&mut self, name: String, code: String, value: FieldValue) {
        match self.index.get(&name) {
            Some(&idx) => {
                self.records[idx].fields.insert(code, value);
            }
            None => {
                self.index.insert(name.clone(), self.records.len());
                self.records.push(Record {
                    name,
                    fields: HashMap::from([(code, value)]),
                });
            }
        }
    }

    pub fn push_entry(&mut self, entry: Entry) {
        self.push(entry.name, entry.code, entry.value);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> Vec<Record> {
        self.records
    }
}

/// Human-readable rendering of one field.
///
/// `Iloc` blobs of 16 bytes are shown as an icon position; everything else
/// as `code: value`.
pub fn render_field(code: &str, value: &FieldValue) -> String {
    match (code, value) {
        (ICON_LOCATION, FieldValue::Blob(bytes)) if bytes.len() == 16 => {
            let x = BigEndian::read_i32(&bytes[0..4]);
            let y = BigEndian::read_i32(&bytes[4..8]);
            format!("Icon location: x {}px, y {}px", x, y)
        }
        _ => format!("{}: {}", code, value),
    }
}

impl Record {
    /// Renders every field, sorted by field code.
    pub fn render_fields(&self) -> Vec<String> {
        let mut codes: Vec<&String> = self.fields.keys().collect();
        codes.sort();
        codes
            .into_iter()
            .map(|code| render_field(code, &self.fields[code]))
            .collect()
    }
}
