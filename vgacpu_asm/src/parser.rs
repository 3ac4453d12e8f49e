use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use vgacpu_isa::InstructionType;

use crate::error::SyntaxError;

#[derive(Parser)]
#[grammar = "grammar/vgacpu_asm.pest"]
pub struct VgaAsmParser;

/// A code line split at the first whitespace.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Statement<'a> {
  pub mnemonic: &'a str,
  /// Everything after the mnemonic, leading whitespace removed.
  pub operands: &'a str,
}

/// The pieces of an operand field that the grammar managed to recognise.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct OperandParts<'a> {
  /// Digits following `r`.
  pub register: Option<&'a str>,
  pub separator: bool,
  pub literal: Option<&'a str>,
  pub trailing: Option<&'a str>,
}

fn parse_rule(rule: Rule, text: &str) -> Result<Pair<'_, Rule>, SyntaxError> {
  VgaAsmParser::parse(rule, text)
    .map_err(|e| SyntaxError::Unparsable(e.to_string()))?
    .next()
    .ok_or_else(|| SyntaxError::Unparsable(format!("no {:?} in `{}`", rule, text)))
}

pub fn parse_statement(line: &str) -> Result<Statement<'_>, SyntaxError> {
  let pair = parse_rule(Rule::statement, line)?;
  let mut statement = Statement { mnemonic: "", operands: "" };

  for item in pair.into_inner() {
    match item.as_rule() {
      Rule::mnemonic => statement.mnemonic = item.as_str(),
      Rule::remainder => statement.operands = item.as_str(),
      _ => {}
    }
  }

  Ok(statement)
}

fn operand_rule(kind: InstructionType) -> Rule {
  match kind {
    InstructionType::Implied => Rule::no_operands,
    InstructionType::Register => Rule::register_operand,
    InstructionType::RegisterImmediate => Rule::register_immediate,
    InstructionType::Immediate => Rule::immediate_operand,
  }
}

/// Splits the operand field using the grammar for `kind`.
pub fn parse_operands(kind: InstructionType, text: &str) -> Result<OperandParts<'_>, SyntaxError> {
  let pair = parse_rule(operand_rule(kind), text)?;
  let mut parts = OperandParts::default();

  for item in pair.into_inner() {
    match item.as_rule() {
      Rule::register => {
        parts.register = item.into_inner()
          .find(|inner| inner.as_rule() == Rule::register_index)
          .map(|inner| inner.as_str());
      }
      Rule::separator => parts.separator = true,
      Rule::literal => parts.literal = Some(item.as_str()),
      Rule::trailing => parts.trailing = Some(item.as_str().trim_end()),
      _ => {}
    }
  }

  Ok(parts)
}

/// Parses an integer literal the way C's auto-base conversion does: `0x` selects
/// hex, a leading `0` selects octal, anything else is decimal. A sign may precede
/// the prefix. Returns `None` for malformed or out-of-range text.
pub fn parse_integer(text: &str) -> Option<i64> {
  let (negative, unsigned) = match text.as_bytes().first() {
    Some(b'-') => (true, &text[1..]),
    Some(b'+') => (false, &text[1..]),
    _ => (false, text),
  };

  let (radix, digits) = if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
    (16, hex)
  } else if unsigned.len() > 1 && unsigned.starts_with('0') {
    (8, &unsigned[1..])
  } else {
    (10, unsigned)
  };

  // from_str_radix would accept a second sign here
  if digits.is_empty() || digits.starts_with(['+', '-']) {
    return None;
  }

  let magnitude = i64::from_str_radix(digits, radix).ok()?;
  Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_statement_splits_at_whitespace() {
    let statement = parse_statement("lim r2, 10").unwrap();
    assert_eq!(statement, Statement { mnemonic: "lim", operands: "r2, 10" });
  }

  #[test]
  fn test_statement_without_operands() {
    let statement = parse_statement("nop").unwrap();
    assert_eq!(statement, Statement { mnemonic: "nop", operands: "" });
  }

  #[test]
  fn test_statement_tab_separated() {
    let statement = parse_statement("push\t\tr3  ").unwrap();
    assert_eq!(statement.mnemonic, "push");
    assert_eq!(statement.operands, "r3  ");
  }

  #[test]
  fn test_mnemonic_includes_punctuation() {
    let statement = parse_statement("nop,r1").unwrap();
    assert_eq!(statement.mnemonic, "nop,r1");
    assert_eq!(statement.operands, "");
  }

  #[test]
  fn test_no_operands_whitespace_only() {
    let parts = parse_operands(InstructionType::Implied, "   \t").unwrap();
    assert_eq!(parts, OperandParts::default());
  }

  #[test]
  fn test_no_operands_with_garbage() {
    let parts = parse_operands(InstructionType::Implied, "extra  ").unwrap();
    assert_eq!(parts.trailing, Some("extra"));
  }

  #[test]
  fn test_register_operand() {
    let parts = parse_operands(InstructionType::Register, "r3").unwrap();
    assert_eq!(parts.register, Some("3"));
    assert_eq!(parts.trailing, None);
  }

  #[test]
  fn test_register_operand_with_suffix() {
    let parts = parse_operands(InstructionType::Register, "r3x").unwrap();
    assert_eq!(parts.register, Some("3"));
    assert_eq!(parts.trailing, Some("x"));
  }

  #[test]
  fn test_register_operand_missing_prefix() {
    let parts = parse_operands(InstructionType::Register, "x3").unwrap();
    assert_eq!(parts.register, None);
    assert_eq!(parts.trailing, Some("x3"));
  }

  #[test]
  fn test_register_immediate_spacing() {
    for text in ["r2, 10", "r2,10", "r2 ,10", "r2 , 10 "] {
      let parts = parse_operands(InstructionType::RegisterImmediate, text).unwrap();
      assert_eq!(parts.register, Some("2"), "{text}");
      assert!(parts.separator, "{text}");
      assert_eq!(parts.literal, Some("10"), "{text}");
      assert_eq!(parts.trailing, None, "{text}");
    }
  }

  #[test]
  fn test_register_immediate_missing_comma() {
    let parts = parse_operands(InstructionType::RegisterImmediate, "r2 10").unwrap();
    assert_eq!(parts.register, Some("2"));
    assert!(!parts.separator);
    assert_eq!(parts.trailing, Some("10"));
  }

  #[test]
  fn test_immediate_operand() {
    let parts = parse_operands(InstructionType::Immediate, "0x1F").unwrap();
    assert_eq!(parts.literal, Some("0x1F"));
    assert_eq!(parts.trailing, None);
  }

  #[test]
  fn test_parse_integer_bases() {
    assert_eq!(parse_integer("10"), Some(10));
    assert_eq!(parse_integer("0x0A"), Some(10));
    assert_eq!(parse_integer("0X0a"), Some(10));
    assert_eq!(parse_integer("012"), Some(10));
    assert_eq!(parse_integer("0"), Some(0));
    assert_eq!(parse_integer("-1"), Some(-1));
    assert_eq!(parse_integer("+7"), Some(7));
  }

  #[test]
  fn test_parse_integer_rejects_malformed() {
    assert_eq!(parse_integer(""), None);
    assert_eq!(parse_integer("0x"), None);
    assert_eq!(parse_integer("08"), None);
    assert_eq!(parse_integer("1a"), None);
    assert_eq!(parse_integer("--1"), None);
    assert_eq!(parse_integer("0x-1"), None);
    assert_eq!(parse_integer("99999999999999999999"), None);
  }
}
