//! Traversal of the on-disk `DSDB` B-tree.
//!
//! # Master Block
//! ```text
//! [4 bytes] Root node block id
//! [4 bytes] Tree height (internal levels)
//! [4 bytes] Total record count
//! [4 bytes] Total node count
//! [4 bytes] Page size (0x1000)
//! ```
//!
//! # Node Block
//! ```text
//! [4 bytes] Chain pointer P (0 for a leaf)
//! [4 bytes] Entry count N
//! N × { [4 bytes child id, only if P != 0] entry }
//! ```
//! When `P != 0` every entry is preceded by a child id whose subtree is
//! visited before the entry itself, and `P` is visited as one more node after
//! the last entry. The same field therefore acts as the rightmost child of an
//! internal node and as the link to the next node in a chain.

use std::collections::HashSet;

use log::{debug, info, trace};

use crate::dsstore::context::ParseContext;
use crate::dsstore::types::{
    error::{DsStoreError, FormatWarning, Result},
    models::{Entry, TreeDescriptor},
};
use crate::dsstore::utils::Cursor;

use super::allocator::BlockAllocator;
use super::field;

/// Page size recorded in the master block of every Finder-written tree.
pub const MASTER_SENTINEL: u32 = 0x0000_1000;

/// A pending unit of work in the traversal.
///
/// Each frame owns the cursor position it resumes from, so descending into a
/// child never disturbs the parent's place in its own node.
#[derive(Debug)]
enum Frame {
    /// A node whose header has not been read yet.
    Node(u32),
    /// The unread remainder of a node's slots.
    Slots {
        block_id: u32,
        pos: usize,
        remaining: u32,
        chain: u32,
        child_walked: bool,
    },
}

/// Reads the master block stored at `master_id`.
pub fn read_master(
    data: &[u8],
    allocator: &BlockAllocator,
    master_id: u32,
    ctx: &mut ParseContext,
) -> Result<TreeDescriptor> {
    let mut cursor = Cursor::at(data, allocator.resolve(master_id)?)?;
    let tree = TreeDescriptor {
        root_id: cursor.read_u32()?,
        height: cursor.read_u32()?,
        num_records: cursor.read_u32()?,
        num_nodes: cursor.read_u32()?,
        page_size: cursor.read_u32()?,
    };
    debug!(
        "Master block {}: root={}, height={}, records={}, nodes={}",
        master_id, tree.root_id, tree.height, tree.num_records, tree.num_nodes
    );
    if tree.page_size != MASTER_SENTINEL {
        ctx.report(FormatWarning::UnexpectedMasterSentinel {
            found: tree.page_size,
        })?;
    }
    Ok(tree)
}

/// Walks the tree whose master block is `master_id`, calling `visit` for
/// every entry in tree order.
///
/// Fails with [`DsStoreError::CorruptTree`] if a block id is out of range,
/// a node lies past the end of the buffer, or a node is reached twice.
pub fn walk<F>(
    data: &[u8],
    allocator: &BlockAllocator,
    master_id: u32,
    ctx: &mut ParseContext,
    mut visit: F,
) -> Result<TreeDescriptor>
where
    F: FnMut(Entry) -> Result<()>,
{
    info!("Walking DSDB tree from master block {}", master_id);
    let tree = read_master(data, allocator, master_id, ctx)?;

    let mut visited = HashSet::new();
    let mut num_entries: u64 = 0;
    let mut stack = vec![Frame::Node(tree.root_id)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Node(block_id) => {
                if !visited.insert(block_id) {
                    return Err(DsStoreError::CorruptTree(format!(
                        "node {} reached twice",
                        block_id
                    )));
                }
                let mut cursor = Cursor::at(data, allocator.resolve(block_id)?)?;
                let chain = cursor.read_u32()?;
                let count = cursor.read_u32()?;
                trace!("Node {}: chain={}, entries={}", block_id, chain, count);
                stack.push(Frame::Slots {
                    block_id,
                    pos: cursor.position(),
                    remaining: count,
                    chain,
                    child_walked: false,
                });
            }
            Frame::Slots { chain, remaining: 0, .. } => {
                if chain != 0 {
                    stack.push(Frame::Node(chain));
                }
            }
            Frame::Slots {
                block_id,
                pos,
                remaining,
                chain,
                child_walked,
            } => {
                let mut cursor = Cursor::at(data, pos)?;
                if chain != 0 && !child_walked {
                    let child = cursor.read_u32()?;
                    // Resume at the entry once the child subtree is done.
                    stack.push(Frame::Slots {
                        block_id,
                        pos: cursor.position(),
                        remaining,
                        chain,
                        child_walked: true,
                    });
                    stack.push(Frame::Node(child));
                    continue;
                }
                let entry = field::decode_entry(&mut cursor)?;
                num_entries += 1;
                visit(entry)?;
                stack.push(Frame::Slots {
                    block_id,
                    pos: cursor.position(),
                    remaining: remaining - 1,
                    chain,
                    child_walked: false,
                });
            }
        }
    }

    let num_nodes = visited.len() as u64;
    info!("Tree walk finished: {} entries in {} nodes", num_entries, num_nodes);
    if num_entries != u64::from(tree.num_records) {
        ctx.report(FormatWarning::RecordCountMismatch {
            expected: tree.num_records,
            found: num_entries,
        })?;
    }
    if num_nodes != u64::from(tree.num_nodes) {
        ctx.report(FormatWarning::NodeCountMismatch {
            expected: tree.num_nodes,
            found: num_nodes,
        })?;
    }
    Ok(tree)
}
