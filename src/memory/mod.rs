// Mon Feb 2 2026 - Alex
//
// The core never touches raw process memory; decoding the reflection table
// into an ObjectGraph happens behind this seam, outside the crate.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Read failed at {address}: {reason}")]
    ReadFailed { address: Address, reason: String },
    #[error("Address out of range: {0}")]
    OutOfRange(Address),
}

/// Narrow external collaborator for raw memory access.
pub trait MemoryReader: Send + Sync {
    fn read_bytes(&self, address: Address, length: usize) -> Result<Vec<u8>, MemoryError>;
}

/// In-memory reader over pre-seeded regions. Test double for the external
/// collaborator.
#[derive(Default)]
pub struct MockMemory {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, address: Address, bytes: &[u8]) {
        self.regions.insert(address.as_u64(), bytes.to_vec());
    }
}

impl MemoryReader for MockMemory {
    fn read_bytes(&self, address: Address, length: usize) -> Result<Vec<u8>, MemoryError> {
        let target = address.as_u64();
        for (start, bytes) in self.regions.range(..=target).rev().take(1) {
            let offset = (target - start) as usize;
            if offset + length <= bytes.len() {
                return Ok(bytes[offset..offset + length].to_vec());
            }
        }
        Err(MemoryError::OutOfRange(address))
    }
}
