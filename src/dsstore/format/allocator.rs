//! Block allocator parsing: the offsets table and the named-key directory.
//!
//! # Allocator Structure
//! ```text
//! [4 bytes]     Number of offsets (N)
//! [4 bytes]     Unknown, always zero
//! [N × 4 bytes] Block address words (address | size class)
//! ...           Padding up to 0x408
//! [4 bytes]     Number of directory keys (K)
//! K × { [1 byte] key length, [len bytes] ASCII key, [4 bytes] block id }
//! ```
//! The free lists that follow the directory are not read.

use std::collections::HashMap;

use log::{debug, info, trace};

use crate::dsstore::context::ParseContext;
use crate::dsstore::types::error::{DsStoreError, FormatWarning, Result};
use crate::dsstore::utils::{self, Cursor};

use super::header::BASE_OFFSET;

/// Distance from the allocator start to the directory.
pub const DIRECTORY_OFFSET: usize = 0x408;

/// Directory key naming the master block of the main tree.
pub const ROOT_KEY: &str = "DSDB";

/// Low bits of an address word that store the block size class.
const SIZE_CLASS_MASK: u32 = 0x1F;

/// The offsets table and directory of a `.DS_Store` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAllocator {
    /// Raw address words, indexed by block id.
    pub offsets: Vec<u32>,
    /// Named top-level structures mapped to block ids.
    pub directory: HashMap<String, u32>,
}

impl BlockAllocator {
    /// Resolves a block id to an absolute offset in the buffer.
    ///
    /// The low five bits of the address word (the size class) are masked off.
    pub fn resolve(&self, block_id: u32) -> Result<usize> {
        let word = self.offsets.get(block_id as usize).ok_or_else(|| {
            DsStoreError::CorruptTree(format!(
                "block id {} outside offsets table of {} entries",
                block_id,
                self.offsets.len()
            ))
        })?;
        Ok(BASE_OFFSET + (word & !SIZE_CLASS_MASK) as usize)
    }

    /// Block size in bytes, from the size class in the address word.
    pub fn block_size(&self, block_id: u32) -> Option<u64> {
        self.offsets
            .get(block_id as usize)
            .and_then(|word| 1u64.checked_shl(word & SIZE_CLASS_MASK))
    }

    /// Block id of the `DSDB` master block.
    pub fn root_id(&self) -> Result<u32> {
        self.directory
            .get(ROOT_KEY)
            .copied()
            .ok_or(DsStoreError::MissingRoot)
    }
}

/// Parses the allocator located at `allocator_offset`.
pub fn parse(
    cursor: &mut Cursor<'_>,
    allocator_offset: usize,
    ctx: &mut ParseContext,
) -> Result<BlockAllocator> {
    info!("Parsing block allocator");
    cursor.seek(allocator_offset)?;

    let num_offsets = cursor.read_u32()? as usize;
    let second = cursor.read_u32()?;
    if second != 0 {
        ctx.report(FormatWarning::NonZeroAllocatorField { found: second })?;
    }

    // Cap the preallocation by what the buffer can actually hold.
    let mut offsets = Vec::with_capacity(num_offsets.min(cursor.remaining() / 4));
    for _ in 0..num_offsets {
        offsets.push(cursor.read_u32()?);
    }
    debug!("Offsets table: {} blocks", offsets.len());

    cursor.seek(allocator_offset + DIRECTORY_OFFSET)?;
    let num_keys = cursor.read_u32()?;
    let mut directory = HashMap::new();
    for _ in 0..num_keys {
        let key_len = cursor.read_u8()? as usize;
        let key = utils::code_to_string(cursor.read_bytes(key_len)?);
        let block_id = cursor.read_u32()?;
        trace!("Directory entry {:?} -> block {}", key, block_id);
        directory.insert(key, block_id);
    }

    info!(
        "Block allocator: {} offsets, {} directory keys",
        offsets.len(),
        directory.len()
    );
    Ok(BlockAllocator { offsets, directory })
}
