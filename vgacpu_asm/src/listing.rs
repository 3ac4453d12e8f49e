//! Listing file generation.

use std::io::Write;

use vgacpu_isa::decode;

use crate::assembler::{Assembly, EmittedInstruction};
use crate::common::WriteableResource;

const BYTES_WIDTH: usize = 5;
const TEXT_WIDTH: usize = 20;

/// Text listing of an assembled program.
pub struct Listing<'s, 'a> {
  assembly: &'s Assembly<'a>,
  title: String,
}

impl<'s, 'a> Listing<'s, 'a> {
  pub fn new(assembly: &'s Assembly<'a>, title: impl Into<String>) -> Self {
    Listing { assembly, title: title.into() }
  }
}

fn format_line(instruction: &EmittedInstruction<'_>) -> String {
  let text = decode(instruction.encoded.as_bytes())
    .map(|decoded| decoded.to_string())
    .unwrap_or_else(|e| format!("?? {}", e));
  format!(
    "{:04X}  {:<bytes_width$}  {:>5}  {:<text_width$}  {}",
    instruction.address,
    instruction.encoded.to_string(),
    instruction.line,
    text,
    instruction.source,
    bytes_width = BYTES_WIDTH,
    text_width = TEXT_WIDTH,
  )
}

impl WriteableResource for Listing<'_, '_> {
  fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
    let image = &self.assembly.image;
    writeln!(writer, "{}", self.title)?;
    writeln!(writer, "ADDR  BYTES   LINE  INSTRUCTION           SOURCE")?;
    writeln!(writer, "----  -----  -----  --------------------  ------")?;
    for instruction in &self.assembly.instructions {
      writeln!(writer, "{}", format_line(instruction))?;
    }
    writeln!(
      writer,
      "; {} instruction(s), {} of {} bytes used, crc32 {:08X}",
      self.assembly.instructions.len(),
      image.cursor(),
      image.capacity(),
      image.checksum()
    )
  }
}
