use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::AsmError;

/// Something the assembler hands to the file system in one piece.
pub trait WriteableResource {
  fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()>;

  /// Creates or truncates `path`. Failures name the path.
  fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), AsmError> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| AsmError::io(path, e))?;
    self.write_to(&mut file)
      .and_then(|_| file.flush())
      .map_err(|e| AsmError::io(path, e))
  }
}

pub trait ReadableResource {
  fn read_from(reader: &mut dyn Read) -> std::io::Result<Self>
  where
    Self: Sized;

  fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, AsmError>
  where
    Self: Sized,
  {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| AsmError::io(path, e))?;
    Self::read_from(&mut file).map_err(|e| AsmError::io(path, e))
  }
}
