//! Decoding of individual tree entries and their tagged values.
//!
//! # Entry Structure
//! ```text
//! [4 bytes]       File name length in UTF-16 code units (L)
//! [L × 2 bytes]   File name, UTF-16BE
//! [4 bytes]       Field code (e.g. "Iloc", "bwsp")
//! [4 bytes]       Type tag (e.g. "long", "blob")
//! [...]           Value, layout given by the type tag
//! ```

use log::trace;

use crate::dsstore::types::{
    error::{DsStoreError, Result},
    models::{Entry, FieldValue},
};
use crate::dsstore::utils::{self, Cursor};

/// Decodes one entry and advances `cursor` past it.
pub fn decode_entry(cursor: &mut Cursor<'_>) -> Result<Entry> {
    let name = cursor.read_prefixed_utf16()?;
    let code = utils::code_to_string(&cursor.read_code()?);
    let tag = cursor.read_code()?;
    let value = decode_value(cursor, &tag)?;
    trace!("Entry {:?} {} = {:?}", name, code, value);
    Ok(Entry { name, code, value })
}

/// Decodes a value whose type tag has just been read.
///
/// An unknown tag is fatal because its width, and so the start of the next
/// entry, cannot be known.
pub fn decode_value(cursor: &mut Cursor<'_>, tag: &[u8; 4]) -> Result<FieldValue> {
    let value = match tag {
        b"bool" => FieldValue::Bool(cursor.read_u8()? & 0x01 != 0),
        b"shor" | b"long" => FieldValue::Int32(cursor.read_i32()?),
        b"comp" | b"dutc" => FieldValue::Int64(cursor.read_i64()?),
        b"type" => FieldValue::TypeCode(utils::code_to_string(&cursor.read_code()?)),
        b"blob" => FieldValue::Blob(cursor.read_prefixed_bytes()?.to_vec()),
        b"ustr" => FieldValue::UnicodeString(cursor.read_prefixed_utf16()?),
        _ => return Err(DsStoreError::UnsupportedFieldType(utils::code_to_string(tag))),
    };
    Ok(value)
}
