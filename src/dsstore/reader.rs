use log::info;

use super::context::ParseContext;
use super::format;
use super::records::RecordMerger;
use super::types::error::Result;
use super::types::models::DsStore;
use super::utils::Cursor;

/// Options controlling how tolerant parsing is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Treat every format anomaly as a fatal error instead of a warning.
    pub strict: bool,
}

/// The main entry point for decoding `.DS_Store` buffers.
///
/// The reader holds only its options. All state of a parse lives inside the
/// call to [`parse`](Self::parse), so one reader can decode many buffers, also
/// from several threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct DsStoreReader {
    options: ReaderOptions,
}

impl DsStoreReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Decodes a complete `.DS_Store` image.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The directory has no `DSDB` entry
    /// - A block id or read falls outside the buffer or table, or the tree has a cycle
    /// - An entry uses an unknown value type
    /// - Strict mode is on and any format anomaly is found
    pub fn parse(&self, data: &[u8]) -> Result<DsStore> {
        info!("Parsing .DS_Store buffer of {} bytes", data.len());
        let mut ctx = ParseContext::new(self.options.strict);
        let mut cursor = Cursor::new(data);

        let header = format::header::parse(&mut cursor, &mut ctx)?;
        let allocator = format::allocator::parse(&mut cursor, header.allocator_offset, &mut ctx)?;
        let master_id = allocator.root_id()?;

        let mut merger = RecordMerger::new();
        let tree = format::btree::walk(data, &allocator, master_id, &mut ctx, |entry| {
            merger.push_entry(entry);
            Ok(())
        })?;

        let records = merger.finish();
        info!(
            ".DS_Store parsed: {} records, {} warnings",
            records.len(),
            ctx.warnings().len()
        );

        Ok(DsStore {
            header,
            directory: allocator.directory,
            tree,
            records,
            warnings: ctx.into_warnings(),
        })
    }
}

/// Decodes a buffer with default (lenient) options.
pub fn parse(data: &[u8]) -> Result<DsStore> {
    DsStoreReader::default().parse(data)
}
