use vgacpu_isa::{EncodedInstruction, InstructionDescriptor, InstructionType, Operands, Register, lookup};

use crate::error::SyntaxError;
use crate::parser::{OperandParts, parse_integer, parse_operands, parse_statement};

/// Encodes one code line (leading whitespace already stripped).
pub fn encode(line: &str) -> Result<EncodedInstruction, SyntaxError> {
  let statement = parse_statement(line)?;
  let descriptor = lookup(statement.mnemonic)
    .ok_or_else(|| SyntaxError::UnknownMnemonic(statement.mnemonic.to_string()))?;
  let parts = parse_operands(descriptor.kind, statement.operands)?;
  let operands = resolve_operands(descriptor, &parts)?;
  Ok(EncodedInstruction::encode(descriptor, operands))
}

fn resolve_operands(descriptor: &'static InstructionDescriptor, parts: &OperandParts) -> Result<Operands, SyntaxError> {
  let operands = match descriptor.kind {
    InstructionType::Implied => Operands::None,
    InstructionType::Register => Operands::Register(register(descriptor, parts)?),
    InstructionType::RegisterImmediate => {
      let register = register(descriptor, parts)?;
      if !parts.separator {
        return Err(missing(descriptor, "`,` and an immediate after the register"));
      }
      let literal = parts.literal.ok_or_else(|| missing(descriptor, "an immediate after `,`"))?;
      Operands::RegisterImmediate(register, immediate(descriptor, literal)?)
    }
    InstructionType::Immediate => {
      let literal = parts.literal.ok_or_else(|| missing(descriptor, "an immediate"))?;
      Operands::Immediate(immediate(descriptor, literal)?)
    }
  };

  if let Some(garbage) = parts.trailing {
    return Err(SyntaxError::TrailingGarbage {
      mnemonic: descriptor.mnemonic,
      garbage: garbage.to_string(),
    });
  }

  Ok(operands)
}

fn missing(descriptor: &'static InstructionDescriptor, expected: &'static str) -> SyntaxError {
  SyntaxError::MissingOperand { mnemonic: descriptor.mnemonic, expected }
}

fn register(descriptor: &'static InstructionDescriptor, parts: &OperandParts) -> Result<Register, SyntaxError> {
  let digits = parts.register.ok_or_else(|| missing(descriptor, "a register `r0`..`r7`"))?;
  digits.parse::<u8>().ok()
    .and_then(Register::new)
    .ok_or_else(|| SyntaxError::InvalidRegister {
      mnemonic: descriptor.mnemonic,
      register: digits.to_string(),
    })
}

/// Values wider than a byte keep their low 8 bits.
fn immediate(descriptor: &'static InstructionDescriptor, literal: &str) -> Result<u8, SyntaxError> {
  parse_integer(literal)
    .map(|value| value as u8)
    .ok_or_else(|| SyntaxError::MalformedImmediate {
      mnemonic: descriptor.mnemonic,
      literal: literal.to_string(),
    })
}
