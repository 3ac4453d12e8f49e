use log::{debug, trace};
use vgacpu_isa::EncodedInstruction;

use crate::encoder::encode;
use crate::error::AsmError;
use crate::image::MemoryImage;
use crate::tokenizer::{LineKind, SourceLine, split};

/// One instruction placed in the image, with where it came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EmittedInstruction<'a> {
  pub address: usize,
  pub line: usize,
  pub encoded: EncodedInstruction,
  /// The source line as written, leading whitespace removed.
  pub source: &'a str,
}

/// Single pass over the source. Stops at the first failing line.
pub struct Assembler<'a> {
  image: MemoryImage,
  emitted: Vec<EmittedInstruction<'a>>,
}

#[derive(Debug)]
pub struct Assembly<'a> {
  pub image: MemoryImage,
  pub instructions: Vec<EmittedInstruction<'a>>,
}

impl<'a> Assembler<'a> {
  pub fn new(capacity: usize) -> Self {
    Assembler {
      image: MemoryImage::new(capacity),
      emitted: Vec::new(),
    }
  }

  pub fn assemble_line(&mut self, line: SourceLine<'a>) -> Result<(), AsmError> {
    let code = match line.kind() {
      LineKind::Blank => {
        trace!("line {}: blank", line.number);
        return Ok(());
      }
      LineKind::Comment(comment) => {
        trace!("line {}: comment {:?}", line.number, comment);
        return Ok(());
      }
      LineKind::Code(code) => code,
    };

    let encoded = encode(code).map_err(|source| AsmError::Syntax { line: line.number, source })?;
    let address = self.image.append(&encoded).map_err(|e| AsmError::CapacityExceeded {
      line: line.number,
      capacity: e.capacity,
    })?;

    debug!("{:04X}: {:<5}  line {}: {}", address, encoded.to_string(), line.number, code.trim_end());
    self.emitted.push(EmittedInstruction {
      address,
      line: line.number,
      encoded,
      source: code.trim_end(),
    });
    Ok(())
  }

  pub fn finish(self) -> Assembly<'a> {
    Assembly {
      image: self.image,
      instructions: self.emitted,
    }
  }
}

/// Assembles `source` into an image of `capacity` bytes.
pub fn assemble(source: &str, capacity: usize) -> Result<Assembly<'_>, AsmError> {
  let mut assembler = Assembler::new(capacity);
  for line in split(source) {
    assembler.assemble_line(line)?;
  }
  Ok(assembler.finish())
}
