//! Error and warning types for the dsstore-reader crate.

use thiserror::Error;

/// The primary error type for all parsing operations in this crate.
///
/// Every variant is fatal: a parse that fails returns no records.
#[derive(Debug, Error)]
pub enum DsStoreError {
    /// The allocator directory has no `DSDB` entry, so there is no tree to walk.
    #[error("Missing root: the block directory has no \"DSDB\" entry")]
    MissingRoot,

    /// The tree structure is inconsistent: a block id outside the offsets table,
    /// a read past the end of the buffer, or a node reached twice.
    #[error("Corrupt tree: {0}")]
    CorruptTree(String),

    /// An entry carries a type tag whose byte width is unknown.
    #[error("Unsupported field type: {0:?}")]
    UnsupportedFieldType(String),

    /// A format anomaly promoted to an error because strict mode is enabled.
    #[error("Format anomaly in strict mode: {0}")]
    Anomaly(#[from] FormatWarning),
}

/// A non-fatal structural anomaly found while parsing.
///
/// Lenient parsing records these next to the decoded records and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatWarning {
    #[error("unexpected alignment marker {found:#010x} (expected 0x00000001)")]
    UnexpectedAlignment { found: u32 },

    #[error("unexpected magic {found:?} (expected \"Bud1\")")]
    UnexpectedMagic { found: String },

    /// The header stores the allocator offset twice and the copies disagree.
    #[error("allocator offset copies disagree: {first:#x} vs {second:#x}, using the first")]
    OffsetMismatch { first: u32, second: u32 },

    #[error("allocator field expected to be zero holds {found:#x}")]
    NonZeroAllocatorField { found: u32 },

    #[error("unexpected master block sentinel {found:#010x} (expected 0x00001000)")]
    UnexpectedMasterSentinel { found: u32 },

    #[error("master block declares {expected} records but the walk visited {found}")]
    RecordCountMismatch { expected: u32, found: u64 },

    #[error("master block declares {expected} nodes but the walk visited {found}")]
    NodeCountMismatch { expected: u32, found: u64 },
}

/// A convenience `Result` type alias using the crate's `DsStoreError` type.
pub type Result<T> = std::result::Result<T, DsStoreError>;
