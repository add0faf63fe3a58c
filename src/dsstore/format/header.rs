//! `.DS_Store` file header parsing.
//!
//! # Header Structure
//! ```text
//! [4 bytes] Alignment marker (0x00000001)
//! [4 bytes] Magic "Bud1"
//! [4 bytes] Allocator offset, relative to byte 4
//! [4 bytes] Allocator size
//! [4 bytes] Allocator offset again
//! ```
//!
//! Every block address in the file is relative to byte 4, right after the
//! alignment marker.

use log::{debug, info, trace};

use crate::dsstore::context::ParseContext;
use crate::dsstore::types::{
    error::{FormatWarning, Result},
    models::StoreHeader,
};
use crate::dsstore::utils::{self, Cursor};

pub const ALIGNMENT: u32 = 0x0000_0001;
pub const MAGIC: &[u8; 4] = b"Bud1";

/// Bytes preceding the address space that block offsets are measured in.
pub const BASE_OFFSET: usize = 4;

/// Parses the header and leaves `cursor` at the allocator offset.
///
/// A wrong alignment marker or magic is reported but not fatal: files with
/// the same layout and different branding still parse.
pub fn parse(cursor: &mut Cursor<'_>, ctx: &mut ParseContext) -> Result<StoreHeader> {
    info!("Parsing .DS_Store header");

    let alignment = cursor.read_u32()?;
    if alignment != ALIGNMENT {
        ctx.report(FormatWarning::UnexpectedAlignment { found: alignment })?;
    }

    let magic = cursor.read_code()?;
    if &magic != MAGIC {
        ctx.report(FormatWarning::UnexpectedMagic {
            found: utils::code_to_string(&magic),
        })?;
    }

    let offset = cursor.read_u32()?;
    let allocator_size = cursor.read_u32()?;
    let offset_copy = cursor.read_u32()?;
    trace!(
        "Allocator offset={:#x}, size={:#x}, copy={:#x}",
        offset, allocator_size, offset_copy
    );
    if offset != offset_copy {
        ctx.report(FormatWarning::OffsetMismatch {
            first: offset,
            second: offset_copy,
        })?;
    }

    let allocator_offset = BASE_OFFSET + offset as usize;
    cursor.seek(allocator_offset)?;
    debug!("Block allocator at absolute offset {:#x}", allocator_offset);

    Ok(StoreHeader {
        alignment,
        magic,
        allocator_offset,
        allocator_size,
    })
}
