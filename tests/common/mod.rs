//! Builds `.DS_Store` images in memory, laid out like Finder writes them:
//! a header, 32-byte aligned blocks addressed relative to byte 4, and a block
//! allocator (block 0) holding the offsets table and directory.
#![allow(dead_code)]

pub const DIRECTORY_OFFSET: usize = 0x408;

pub struct StoreBuilder {
    body: Vec<u8>,
    offsets: Vec<u32>,
    directory: Vec<(String, u32)>,
    pub alignment: u32,
    pub magic: [u8; 4],
    pub offset_copy: Option<u32>,
    pub allocator_second: u32,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            // First 32 bytes after the alignment marker hold the header fields.
            body: vec![0u8; 32],
            // Block 0 is the allocator, placed by `finish`.
            offsets: vec![0],
            directory: Vec::new(),
            alignment: 1,
            magic: *b"Bud1",
            offset_copy: None,
            allocator_second: 0,
        }
    }

    /// Id the next `add_block` call will return.
    pub fn next_id(&self) -> u32 {
        self.offsets.len() as u32
    }

    pub fn add_block(&mut self, bytes: &[u8]) -> u32 {
        let addr = self.align();
        self.body.extend_from_slice(bytes);
        self.offsets.push(addr | size_class(bytes.len()));
        self.offsets.len() as u32 - 1
    }

    pub fn key(&mut self, name: &str, block_id: u32) -> &mut Self {
        self.directory.push((name.to_string(), block_id));
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        let addr = self.align();

        let mut alloc = Vec::new();
        push_u32(&mut alloc, self.offsets.len() as u32);
        push_u32(&mut alloc, self.allocator_second);
        self.offsets[0] = addr | 11;
        for word in &self.offsets {
            push_u32(&mut alloc, *word);
        }
        alloc.resize(DIRECTORY_OFFSET, 0);
        push_u32(&mut alloc, self.directory.len() as u32);
        for (name, id) in &self.directory {
            alloc.push(name.len() as u8);
            alloc.extend_from_slice(name.as_bytes());
            push_u32(&mut alloc, *id);
        }
        let alloc_len = alloc.len() as u32;
        self.body.extend_from_slice(&alloc);

        self.body[0..4].copy_from_slice(&self.magic);
        self.body[4..8].copy_from_slice(&addr.to_be_bytes());
        self.body[8..12].copy_from_slice(&alloc_len.to_be_bytes());
        let copy = self.offset_copy.unwrap_or(addr);
        self.body[12..16].copy_from_slice(&copy.to_be_bytes());

        let mut image = self.alignment.to_be_bytes().to_vec();
        image.extend_from_slice(&self.body);
        image
    }

    fn align(&mut self) -> u32 {
        let len = self.body.len().next_multiple_of(32);
        self.body.resize(len, 0);
        len as u32
    }
}

fn size_class(len: usize) -> u32 {
    let mut class = 5;
    while (1usize << class) < len {
        class += 1;
    }
    class
}

pub fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

pub fn utf16be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
}

/// An encoded entry: name, field code, type tag, then the raw value bytes.
pub fn entry(name: &str, code: &str, tag: &[u8; 4], value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, name.encode_utf16().count() as u32);
    buf.extend_from_slice(&utf16be(name));
    buf.extend_from_slice(code.as_bytes());
    buf.extend_from_slice(tag);
    buf.extend_from_slice(value);
    buf
}

pub fn long(v: i32) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn blob(bytes: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, bytes.len() as u32);
    buf.extend_from_slice(bytes);
    buf
}

pub fn ustr(s: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, s.encode_utf16().count() as u32);
    buf.extend_from_slice(&utf16be(s));
    buf
}

pub fn leaf(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, 0);
    push_u32(&mut buf, entries.len() as u32);
    for e in entries {
        buf.extend_from_slice(e);
    }
    buf
}

/// A node whose every entry is preceded by a child id.
pub fn internal(chain: u32, slots: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u32(&mut buf, chain);
    push_u32(&mut buf, slots.len() as u32);
    for (child, e) in slots {
        push_u32(&mut buf, *child);
        buf.extend_from_slice(e);
    }
    buf
}

pub fn master(root: u32, height: u32, records: u32, nodes: u32) -> Vec<u8> {
    master_with_sentinel(root, height, records, nodes, 0x1000)
}

pub fn master_with_sentinel(root: u32, height: u32, records: u32, nodes: u32, sentinel: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    for v in [root, height, records, nodes, sentinel] {
        push_u32(&mut buf, v);
    }
    buf
}

/// A builder holding one leaf with `entries` under a valid `DSDB` master block.
pub fn single_leaf(entries: &[Vec<u8>]) -> StoreBuilder {
    let mut builder = StoreBuilder::new();
    let root = builder.add_block(&leaf(entries));
    let master_id = builder.add_block(&master(root, 0, entries.len() as u32, 1));
    builder.key("DSDB", master_id);
    builder
}

/// Entries for one file with a `long` field and a `blob` field.
pub fn bam_entries() -> Vec<Vec<u8>> {
    vec![
        entry("bam", "lg1S", b"long", &long(4096)),
        entry("bam", "bwsp", b"blob", &blob(b"<plist/>")),
    ]
}
