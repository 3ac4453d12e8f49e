use std::fmt;
use std::path::PathBuf;

/// Why a single code line could not be encoded.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SyntaxError {
  UnknownMnemonic(String),
  MissingOperand { mnemonic: &'static str, expected: &'static str },
  /// `rN` with N above 7.
  InvalidRegister { mnemonic: &'static str, register: String },
  MalformedImmediate { mnemonic: &'static str, literal: String },
  TrailingGarbage { mnemonic: &'static str, garbage: String },
  /// The line grammar rejected the text outright.
  Unparsable(String),
}

impl fmt::Display for SyntaxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SyntaxError::UnknownMnemonic(mnemonic) => write!(f, "unknown mnemonic `{}`", mnemonic),
      SyntaxError::MissingOperand { mnemonic, expected } => write!(f, "`{}` expects {}", mnemonic, expected),
      SyntaxError::InvalidRegister { mnemonic, register } => {
        write!(f, "`{}`: register `r{}` does not exist (r0 to r7)", mnemonic, register)
      }
      SyntaxError::MalformedImmediate { mnemonic, literal } => {
        write!(f, "`{}`: malformed immediate `{}`", mnemonic, literal)
      }
      SyntaxError::TrailingGarbage { mnemonic, garbage } => {
        write!(f, "`{}`: unexpected `{}` after operands", mnemonic, garbage)
      }
      SyntaxError::Unparsable(message) => write!(f, "parse error: {}", message),
    }
  }
}

impl std::error::Error for SyntaxError {}

#[derive(Debug)]
pub enum AsmError {
  /// Bad command line, e.g. the same file given as input and output.
  Argument(String),
  Io { path: PathBuf, source: std::io::Error },
  Config { path: Option<PathBuf>, message: String },
  Syntax { line: usize, source: SyntaxError },
  CapacityExceeded { line: usize, capacity: usize },
}

impl AsmError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    AsmError::Io { path: path.into(), source }
  }

  /// 1-based source line for syntax and capacity failures.
  pub fn line(&self) -> Option<usize> {
    match self {
      AsmError::Syntax { line, .. } | AsmError::CapacityExceeded { line, .. } => Some(*line),
      _ => None,
    }
  }
}

impl fmt::Display for AsmError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AsmError::Argument(message) => write!(f, "{}", message),
      AsmError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
      AsmError::Config { path: Some(path), message } => {
        write!(f, "invalid configuration in {}: {}", path.display(), message)
      }
      AsmError::Config { path: None, message } => write!(f, "invalid configuration: {}", message),
      AsmError::Syntax { line, source } => write!(f, "line {}: {}", line, source),
      AsmError::CapacityExceeded { line, capacity } => {
        write!(f, "line {}: program does not fit in the {}-byte image", line, capacity)
      }
    }
  }
}

impl std::error::Error for AsmError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AsmError::Io { source, .. } => Some(source),
      AsmError::Syntax { source, .. } => Some(source),
      _ => None,
    }
  }
}
