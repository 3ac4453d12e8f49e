use std::fmt;

/// Instruction format class. Selects the operand grammar and the encoded size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum InstructionType {
  /// Type 0: no operands, one byte.
  Implied,
  /// Type 1: a register embedded in the instruction byte.
  Register,
  /// Type 2: a register plus an immediate byte.
  RegisterImmediate,
  /// Type 3: an immediate byte only.
  Immediate,
}

impl InstructionType {
  pub const ALL: [InstructionType; 4] = [
    InstructionType::Implied,
    InstructionType::Register,
    InstructionType::RegisterImmediate,
    InstructionType::Immediate,
  ];

  /// The 2-bit value stored in the top of the first instruction byte.
  pub const fn bits(self) -> u8 {
    match self {
      InstructionType::Implied => 0,
      InstructionType::Register => 1,
      InstructionType::RegisterImmediate => 2,
      InstructionType::Immediate => 3,
    }
  }

  /// Only the low two bits of `bits` are looked at, so every byte has a type.
  pub const fn from_bits(bits: u8) -> Self {
    match bits & 0b11 {
      0 => InstructionType::Implied,
      1 => InstructionType::Register,
      2 => InstructionType::RegisterImmediate,
      _ => InstructionType::Immediate,
    }
  }

  pub const fn encoded_len(self) -> usize {
    match self {
      InstructionType::Implied | InstructionType::Register => 1,
      InstructionType::RegisterImmediate | InstructionType::Immediate => 2,
    }
  }

  pub const fn has_register(self) -> bool {
    matches!(self, InstructionType::Register | InstructionType::RegisterImmediate)
  }

  pub const fn has_immediate(self) -> bool {
    matches!(self, InstructionType::RegisterImmediate | InstructionType::Immediate)
  }
}

impl fmt::Display for InstructionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "type {}", self.bits())
  }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InstructionDescriptor {
  /// Lowercase mnemonic as written in source.
  pub mnemonic: &'static str,
  /// 6 bits for types 0 and 3, 3 bits for types 1 and 2.
  pub opcode: u8,
  pub kind: InstructionType,
}

impl InstructionDescriptor {
  const fn new(mnemonic: &'static str, opcode: u8, kind: InstructionType) -> Self {
    InstructionDescriptor { mnemonic, opcode, kind }
  }
}

/// The instruction unassembled memory is filled with.
pub const HALT: InstructionDescriptor = InstructionDescriptor::new("halt", 0b111110, InstructionType::Implied);

use InstructionType::{Immediate, Implied, Register, RegisterImmediate};

pub static INSTRUCTIONS: [InstructionDescriptor; 44] = [
  InstructionDescriptor::new("page", 0b000000, Immediate),
  InstructionDescriptor::new("sjump", 0b000001, Immediate),
  InstructionDescriptor::new("slt", 0b000010, Immediate),
  InstructionDescriptor::new("seq", 0b000011, Immediate),
  InstructionDescriptor::new("sgt", 0b000100, Immediate),
  InstructionDescriptor::new("fill", 0b000101, Immediate),
  InstructionDescriptor::new("point", 0b000110, Immediate),
  InstructionDescriptor::new("line", 0b000111, Immediate),
  InstructionDescriptor::new("wait", 0b001000, Immediate),
  InstructionDescriptor::new("scall", 0b001001, Immediate),
  InstructionDescriptor::new("pollin", 0b001010, Immediate),
  InstructionDescriptor::new("0tox", 0b100000, Immediate),
  InstructionDescriptor::new("xto0", 0b100001, Immediate),

  InstructionDescriptor::new("lim", 0b000, RegisterImmediate),
  InstructionDescriptor::new("char", 0b001, RegisterImmediate),
  InstructionDescriptor::new("load", 0b010, RegisterImmediate),
  InstructionDescriptor::new("store", 0b011, RegisterImmediate),
  InstructionDescriptor::new("sl", 0b100, RegisterImmediate),
  InstructionDescriptor::new("sr", 0b101, RegisterImmediate),

  InstructionDescriptor::new("push", 0b000, Register),
  InstructionDescriptor::new("pop", 0b001, Register),
  InstructionDescriptor::new("add", 0b010, Register),
  InstructionDescriptor::new("sub", 0b011, Register),
  InstructionDescriptor::new("and", 0b100, Register),
  InstructionDescriptor::new("or", 0b101, Register),
  InstructionDescriptor::new("xor", 0b110, Register),
  InstructionDescriptor::new("mul", 0b111, Register),

  InstructionDescriptor::new("nop", 0b000000, Implied),
  InstructionDescriptor::new("envga", 0b000001, Implied),
  InstructionDescriptor::new("tone", 0b000010, Implied),
  InstructionDescriptor::new("notone", 0b000011, Implied),
  InstructionDescriptor::new("jump", 0b000100, Implied),
  InstructionDescriptor::new("jlt", 0b000101, Implied),
  InstructionDescriptor::new("jeq", 0b000110, Implied),
  InstructionDescriptor::new("jgt", 0b000111, Implied),
  InstructionDescriptor::new("lcall", 0b001000, Implied),
  InstructionDescriptor::new("logo", 0b001001, Implied),
  InstructionDescriptor::new("pollblank", 0b001010, Implied),
  InstructionDescriptor::new("pollrenderbusy", 0b001011, Implied),
  InstructionDescriptor::new("ret", 0b001100, Implied),
  InstructionDescriptor::new("jbez", 0b001101, Implied),
  InstructionDescriptor::new("jbnez", 0b001110, Implied),
  HALT,
  InstructionDescriptor::new("reset", 0b111111, Implied),
];

/// Resolves a mnemonic. Matching is exact and case-sensitive.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionDescriptor> {
  INSTRUCTIONS.iter().find(|descriptor| descriptor.mnemonic == mnemonic)
}

/// Reverse lookup used when decoding.
pub fn find(kind: InstructionType, opcode: u8) -> Option<&'static InstructionDescriptor> {
  INSTRUCTIONS.iter().find(|descriptor| descriptor.kind == kind && descriptor.opcode == opcode)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_mnemonics_are_unique() {
    let unique: HashSet<_> = INSTRUCTIONS.iter().map(|d| d.mnemonic).collect();
    assert_eq!(unique.len(), INSTRUCTIONS.len());
  }

  #[test]
  fn test_opcodes_unique_within_type() {
    let unique: HashSet<_> = INSTRUCTIONS.iter().map(|d| (d.kind, d.opcode)).collect();
    assert_eq!(unique.len(), INSTRUCTIONS.len());
  }

  #[test]
  fn test_opcodes_fit_their_field() {
    for descriptor in INSTRUCTIONS.iter() {
      let limit = if descriptor.kind.has_register() { 0b111 } else { 0b11_1111 };
      assert!(descriptor.opcode <= limit, "{} has opcode {:#b}", descriptor.mnemonic, descriptor.opcode);
    }
  }

  #[test]
  fn test_mnemonics_are_lowercase() {
    for descriptor in INSTRUCTIONS.iter() {
      assert_eq!(descriptor.mnemonic, descriptor.mnemonic.to_lowercase());
    }
  }

  #[test]
  fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup("push").map(|d| d.opcode), Some(0));
    assert!(lookup("PUSH").is_none());
    assert!(lookup("pus").is_none());
    assert!(lookup("").is_none());
  }

  #[test]
  fn test_lookup_halt_matches_constant() {
    assert_eq!(lookup("halt"), Some(&HALT));
  }

  #[test]
  fn test_find_reverses_lookup() {
    assert_eq!(find(Register, 0b111).map(|d| d.mnemonic), Some("mul"));
    assert_eq!(find(Immediate, 0b100001).map(|d| d.mnemonic), Some("xto0"));
    assert!(find(RegisterImmediate, 0b110).is_none());
  }

  #[test]
  fn test_type_bits_round_trip() {
    for kind in InstructionType::ALL {
      assert_eq!(InstructionType::from_bits(kind.bits()), kind);
    }
  }

  #[test]
  fn test_encoded_len_by_type() {
    assert_eq!(Implied.encoded_len(), 1);
    assert_eq!(Register.encoded_len(), 1);
    assert_eq!(RegisterImmediate.encoded_len(), 2);
    assert_eq!(Immediate.encoded_len(), 2);
  }
}
