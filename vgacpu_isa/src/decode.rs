use std::fmt;

use crate::encoding::{NARROW_OPCODE_MASK, Operands, REGISTER_MASK, REGISTER_SHIFT, Register, TYPE_SHIFT, WIDE_OPCODE_MASK};
use crate::opcode::{InstructionDescriptor, InstructionType, find};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DecodedInstruction {
  pub descriptor: &'static InstructionDescriptor,
  pub operands: Operands,
}

impl DecodedInstruction {
  pub fn len(&self) -> usize {
    self.descriptor.kind.encoded_len()
  }
}

/// Renders the canonical source form, which assembles back to the same bytes.
impl fmt::Display for DecodedInstruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mnemonic = self.descriptor.mnemonic;
    match self.operands {
      Operands::None => write!(f, "{}", mnemonic),
      Operands::Register(register) => write!(f, "{} {}", mnemonic, register),
      Operands::RegisterImmediate(register, value) => write!(f, "{} {}, {}", mnemonic, register, value),
      Operands::Immediate(value) => write!(f, "{} {}", mnemonic, value),
    }
  }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeError {
  Empty,
  /// A two-byte instruction with no immediate byte after it.
  Truncated { kind: InstructionType },
  UnknownOpcode { kind: InstructionType, opcode: u8 },
}

impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DecodeError::Empty => write!(f, "no bytes to decode"),
      DecodeError::Truncated { kind } => write!(f, "{} instruction is missing its immediate byte", kind),
      DecodeError::UnknownOpcode { kind, opcode } => write!(f, "no {} instruction with opcode {:#04x}", kind, opcode),
    }
  }
}

impl std::error::Error for DecodeError {}

/// Decodes the instruction at the start of `bytes`; trailing bytes are ignored.
pub fn decode(bytes: &[u8]) -> Result<DecodedInstruction, DecodeError> {
  let first = *bytes.first().ok_or(DecodeError::Empty)?;
  let kind = InstructionType::from_bits(first >> TYPE_SHIFT);

  let (opcode, register) = if kind.has_register() {
    let index = (first >> REGISTER_SHIFT) & REGISTER_MASK;
    (first & NARROW_OPCODE_MASK, Register::new(index))
  } else {
    (first & WIDE_OPCODE_MASK, None)
  };

  let descriptor = find(kind, opcode).ok_or(DecodeError::UnknownOpcode { kind, opcode })?;

  let immediate = if kind.has_immediate() {
    Some(*bytes.get(1).ok_or(DecodeError::Truncated { kind })?)
  } else {
    None
  };

  let operands = match (register, immediate) {
    (None, None) => Operands::None,
    (Some(register), None) => Operands::Register(register),
    (Some(register), Some(value)) => Operands::RegisterImmediate(register, value),
    (None, Some(value)) => Operands::Immediate(value),
  };

  Ok(DecodedInstruction { descriptor, operands })
}

/// Walks a buffer instruction by instruction, yielding each address with its decoding.
/// Stops after the first error.
pub struct Instructions<'a> {
  bytes: &'a [u8],
  address: usize,
  failed: bool,
}

pub fn instructions(bytes: &[u8]) -> Instructions<'_> {
  Instructions { bytes, address: 0, failed: false }
}

impl Iterator for Instructions<'_> {
  type Item = (usize, Result<DecodedInstruction, DecodeError>);

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.address >= self.bytes.len() {
      return None;
    }
    let address = self.address;
    let decoded = decode(&self.bytes[address..]);
    match &decoded {
      Ok(instruction) => self.address += instruction.len(),
      Err(_) => self.failed = true,
    }
    Some((address, decoded))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::encoding::{EncodedInstruction, FILL_BYTE};
  use crate::opcode::INSTRUCTIONS;

  fn minimal_operands(kind: InstructionType) -> Operands {
    let r1 = Register::new(1).unwrap();
    match kind {
      InstructionType::Implied => Operands::None,
      InstructionType::Register => Operands::Register(r1),
      InstructionType::RegisterImmediate => Operands::RegisterImmediate(r1, 0xA5),
      InstructionType::Immediate => Operands::Immediate(0x5A),
    }
  }

  #[test]
  fn test_every_instruction_decodes_to_itself() {
    for descriptor in INSTRUCTIONS.iter() {
      let operands = minimal_operands(descriptor.kind);
      let encoded = EncodedInstruction::encode(descriptor, operands);
      let decoded = decode(encoded.as_bytes()).unwrap();
      assert_eq!(decoded.descriptor, descriptor);
      assert_eq!(decoded.operands, operands);
    }
  }

  #[test]
  fn test_fill_byte_decodes_to_halt() {
    let decoded = decode(&[FILL_BYTE]).unwrap();
    assert_eq!(decoded.descriptor.mnemonic, "halt");
  }

  #[test]
  fn test_display_canonical_text() {
    assert_eq!(decode(&[0x00]).unwrap().to_string(), "nop");
    assert_eq!(decode(&[0b01_011_000]).unwrap().to_string(), "push r3");
    assert_eq!(decode(&[0b10_010_000, 10]).unwrap().to_string(), "lim r2, 10");
    assert_eq!(decode(&[0b11_000000, 5]).unwrap().to_string(), "page 5");
  }

  #[test]
  fn test_truncated_immediate() {
    assert_eq!(
      decode(&[0b11_000000]),
      Err(DecodeError::Truncated { kind: InstructionType::Immediate })
    );
  }

  #[test]
  fn test_unknown_opcode() {
    assert_eq!(
      decode(&[0b00_100000]),
      Err(DecodeError::UnknownOpcode { kind: InstructionType::Implied, opcode: 0b100000 })
    );
    assert_eq!(decode(&[]), Err(DecodeError::Empty));
  }

  #[test]
  fn test_instructions_walks_mixed_lengths() {
    let bytes = [0x00, 0b10_010_000, 10, 0b01_011_000, 0b11_000000, 5];
    let listing: Vec<(usize, String)> = instructions(&bytes)
      .map(|(address, decoded)| (address, decoded.unwrap().to_string()))
      .collect();
    assert_eq!(listing, vec![
      (0, "nop".to_string()),
      (1, "lim r2, 10".to_string()),
      (3, "push r3".to_string()),
      (4, "page 5".to_string()),
    ]);
  }

  #[test]
  fn test_instructions_stops_on_error() {
    let bytes = [0x00, 0b00_100000, 0x00];
    let items: Vec<_> = instructions(&bytes).collect();
    assert_eq!(items.len(), 2);
    assert!(items[1].1.is_err());
  }
}
