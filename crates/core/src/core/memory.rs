//! Sparse Memory Stores.
//!
//! This module implements the machine's two memory images:
//! 1. **Code store:** Word-granular, read-only during execution, each word
//!    paired with its disassembly for display.
//! 2. **Data store:** Byte-granular and sparse over the full 2 GiB logical
//!    range; absent bytes read as zero.
//!
//! Loads and stores are little-endian and bounds-checked against
//! `MEMORY_SIZE`. Misaligned accesses are tolerated.

use std::collections::{BTreeMap, HashMap};

use crate::common::constants::MEMORY_SIZE;
use crate::common::error::SimError;

/// Checks that the byte range `[addr, addr + size)` lies inside memory.
pub fn check_bounds(addr: u32, size: u32) -> Result<(), SimError> {
    if addr as u64 + size as u64 > MEMORY_SIZE {
        return Err(SimError::MemoryFault { addr, size });
    }
    Ok(())
}

/// Word-granular code image with per-word disassembly.
#[derive(Clone, Debug, Default)]
pub struct CodeStore {
    words: BTreeMap<u32, (u32, String)>,
}

impl CodeStore {
    /// Creates an empty code store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a word and its disassembly at an address.
    pub fn insert(&mut self, addr: u32, word: u32, disasm: String) {
        self.words.insert(addr, (word, disasm));
    }

    /// Fetches the word at an address, if one was loaded there.
    pub fn word_at(&self, addr: u32) -> Option<u32> {
        self.words.get(&addr).map(|(word, _)| *word)
    }

    /// True when an instruction exists at the address.
    pub fn contains(&self, addr: u32) -> bool {
        self.words.contains_key(&addr)
    }

    /// True when no program is loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Removes all words.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Returns a copy of the full image for snapshotting.
    pub fn snapshot(&self) -> BTreeMap<u32, (u32, String)> {
        self.words.clone()
    }
}

/// Byte-granular sparse data image.
#[derive(Clone, Debug, Default)]
pub struct DataStore {
    bytes: HashMap<u32, u8>,
}

impl DataStore {
    /// Creates an empty data store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one raw byte without a bounds check (image loading).
    pub fn poke(&mut self, addr: u32, byte: u8) {
        self.bytes.insert(addr, byte);
    }

    /// Reads one byte; absent bytes read as zero.
    fn byte_at(&self, addr: u32) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    /// Loads `size` little-endian bytes (1, 2, or 4) at `addr`.
    ///
    /// When `signed` is set the value is sign-extended from its width to
    /// 32 bits (`lb`/`lh`); `lw` reads the full word.
    pub fn load(&self, addr: u32, size: u32, signed: bool) -> Result<u32, SimError> {
        check_bounds(addr, size)?;
        let mut value: u32 = 0;
        for i in 0..size {
            value |= (self.byte_at(addr.wrapping_add(i)) as u32) << (8 * i);
        }
        if signed && size < 4 {
            let shift = 32 - 8 * size;
            value = (((value << shift) as i32) >> shift) as u32;
        }
        Ok(value)
    }

    /// Stores the low `size` little-endian bytes (1, 2, or 4) of `value`.
    pub fn store(&mut self, addr: u32, value: u32, size: u32) -> Result<(), SimError> {
        check_bounds(addr, size)?;
        for i in 0..size {
            self.bytes
                .insert(addr.wrapping_add(i), (value >> (8 * i)) as u8);
        }
        Ok(())
    }

    /// Removes all bytes.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Returns a copy of the populated bytes for snapshotting.
    pub fn snapshot(&self) -> HashMap<u32, u8> {
        self.bytes.clone()
    }
}
