use std::fmt;
use std::io::{Read, Write};

use vgacpu_isa::{EncodedInstruction, FILL_BYTE};

use crate::common::{ReadableResource, WriteableResource};

/// Size of the vgacpu instruction memory.
pub const DEFAULT_IMAGE_SIZE: usize = 16384;

/// The instruction did not fit; nothing was written.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CapacityExceeded {
  pub capacity: usize,
  pub cursor: usize,
  pub needed: usize,
}

impl fmt::Display for CapacityExceeded {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} byte(s) at {:#06x} would overrun the {}-byte image",
      self.needed, self.cursor, self.capacity
    )
  }
}

impl std::error::Error for CapacityExceeded {}

/// Fixed-size instruction memory filled front to back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemoryImage {
  bytes: Vec<u8>,
  /// Next free address.
  cursor: usize,
}

impl MemoryImage {
  /// Every byte starts out as HALT.
  pub fn new(capacity: usize) -> Self {
    MemoryImage {
      bytes: vec![FILL_BYTE; capacity],
      cursor: 0,
    }
  }

  pub fn capacity(&self) -> usize {
    self.bytes.len()
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn remaining(&self) -> usize {
    self.capacity() - self.cursor
  }

  /// Writes `instruction` at the cursor and returns its address.
  pub fn append(&mut self, instruction: &EncodedInstruction) -> Result<usize, CapacityExceeded> {
    let encoded = instruction.as_bytes();
    if encoded.len() > self.remaining() {
      return Err(CapacityExceeded {
        capacity: self.capacity(),
        cursor: self.cursor,
        needed: encoded.len(),
      });
    }

    let address = self.cursor;
    self.bytes[address..address + encoded.len()].copy_from_slice(encoded);
    self.cursor += encoded.len();
    Ok(address)
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// The assembled part, without the fill.
  pub fn used(&self) -> &[u8] {
    &self.bytes[..self.cursor]
  }

  /// CRC-32 over the whole image, fill included.
  pub fn checksum(&self) -> u32 {
    crc32fast::hash(&self.bytes)
  }
}

impl WriteableResource for MemoryImage {
  fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
    writer.write_all(&self.bytes)
  }
}

/// A read-back image is treated as fully used.
impl ReadableResource for MemoryImage {
  fn read_from(reader: &mut dyn Read) -> std::io::Result<Self>
  where
    Self: Sized
  {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let cursor = bytes.len();
    Ok(MemoryImage { bytes, cursor })
  }
}
