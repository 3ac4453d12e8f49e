//! Bit layout of the first instruction byte.
//!
//! ```text
//!   bit    7 6 | 5 4 3 | 2 1 0
//!   type 0/3   type | opcode (6 bits)
//!   type 1/2   type | register | opcode (3 bits)
//! ```
//!
//! Types 2 and 3 are followed by one immediate byte.

use std::fmt;

use crate::opcode::{HALT, InstructionDescriptor, InstructionType};

pub const TYPE_SHIFT: u8 = 6;
pub const REGISTER_SHIFT: u8 = 3;
pub const REGISTER_MASK: u8 = 0b111;
pub const WIDE_OPCODE_MASK: u8 = 0b11_1111;
pub const NARROW_OPCODE_MASK: u8 = 0b111;

/// Packs the first byte of an instruction. `register` is ignored for types 0 and 3.
pub const fn pack(kind: InstructionType, opcode: u8, register: u8) -> u8 {
  let head = kind.bits() << TYPE_SHIFT;
  if kind.has_register() {
    head | ((register & REGISTER_MASK) << REGISTER_SHIFT) | (opcode & NARROW_OPCODE_MASK)
  } else {
    head | (opcode & WIDE_OPCODE_MASK)
  }
}

/// Encoded HALT; every byte past the last assembled instruction holds this value.
pub const FILL_BYTE: u8 = pack(HALT.kind, HALT.opcode, 0);

/// A register reference `r0`..`r7`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Register(u8);

impl Register {
  pub const MAX: u8 = REGISTER_MASK;

  pub fn new(index: u8) -> Option<Register> {
    (index <= Self::MAX).then_some(Register(index))
  }

  pub fn index(self) -> u8 {
    self.0
  }
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "r{}", self.0)
  }
}

/// Operands of one instruction, shaped by its type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operands {
  None,
  Register(Register),
  RegisterImmediate(Register, u8),
  Immediate(u8),
}

impl Operands {
  pub fn kind(&self) -> InstructionType {
    match self {
      Operands::None => InstructionType::Implied,
      Operands::Register(_) => InstructionType::Register,
      Operands::RegisterImmediate(..) => InstructionType::RegisterImmediate,
      Operands::Immediate(_) => InstructionType::Immediate,
    }
  }

  fn register(&self) -> u8 {
    match self {
      Operands::Register(register) | Operands::RegisterImmediate(register, _) => register.index(),
      _ => 0,
    }
  }

  fn immediate(&self) -> u8 {
    match self {
      Operands::RegisterImmediate(_, value) | Operands::Immediate(value) => *value,
      _ => 0,
    }
  }
}

/// One or two bytes, exactly as they land in memory.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EncodedInstruction {
  bytes: [u8; 2],
  len: usize,
}

impl EncodedInstruction {
  /// The byte count always follows `descriptor.kind`.
  pub fn encode(descriptor: &InstructionDescriptor, operands: Operands) -> Self {
    debug_assert_eq!(operands.kind(), descriptor.kind, "operands for {}", descriptor.mnemonic);
    let first = pack(descriptor.kind, descriptor.opcode, operands.register());
    EncodedInstruction {
      bytes: [first, operands.immediate()],
      len: descriptor.kind.encoded_len(),
    }
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.len]
  }

  pub fn len(&self) -> usize {
    self.len
  }
}

impl fmt::Display for EncodedInstruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let hex: Vec<String> = self.as_bytes().iter().map(|b| format!("{:02X}", b)).collect();
    write!(f, "{}", hex.join(" "))
  }
}
