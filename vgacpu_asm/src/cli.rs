use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;
use log::info;

use crate::assembler::assemble;
use crate::common::WriteableResource;
use crate::config::AssemblerConfig;
use crate::error::AsmError;
use crate::listing::Listing;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Assembler for the vgacpu", long_about = None)]
pub struct Cli {
  /// Input assembly file
  pub input: PathBuf,

  /// Output memory image
  pub output: PathBuf,

  /// TOML configuration file
  #[arg(short, long)]
  pub config: Option<PathBuf>,

  /// Image size in bytes, overrides the configuration file
  #[arg(short = 's', long)]
  pub image_size: Option<usize>,

  /// Write a listing of the assembled program
  #[arg(short, long)]
  pub listing: Option<PathBuf>,

  /// Increase logging verbosity (-v, -vv, etc.)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,
}

impl Cli {
  pub fn log_level(&self) -> &'static str {
    match self.verbose {
      0 => "info",
      1 => "debug",
      _ => "trace",
    }
  }
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Summary {
  pub instructions: usize,
  pub bytes_used: usize,
  pub capacity: usize,
  pub checksum: u32,
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Successfully assembled {} instructions into {} of {} bytes (crc32 {:08X})",
      self.instructions, self.bytes_used, self.capacity, self.checksum
    )
  }
}

/// Paths are compared as given; nothing is touched on disk.
fn check_paths(cli: &Cli) -> Result<(), AsmError> {
  if cli.input == cli.output {
    return Err(AsmError::Argument(format!(
      "input and output are the same file: {}",
      cli.input.display()
    )));
  }
  if let Some(listing) = &cli.listing {
    if listing == &cli.input || listing == &cli.output {
      return Err(AsmError::Argument(format!(
        "listing would overwrite {}",
        listing.display()
      )));
    }
  }
  Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AssemblerConfig, AsmError> {
  let mut config = match &cli.config {
    Some(path) => AssemblerConfig::load(path)?,
    None => AssemblerConfig::default(),
  };
  if let Some(image_size) = cli.image_size {
    config.image_size = image_size;
  }
  config.validate()?;
  Ok(config)
}

fn title(path: &Path) -> String {
  format!("vgacpu listing of {}", path.display())
}

/// Assembles `cli.input` into `cli.output`. Nothing is written unless the whole
/// source assembles.
pub fn run(cli: &Cli) -> Result<Summary, AsmError> {
  check_paths(cli)?;
  let config = resolve_config(cli)?;

  info!("Assembling {} into {}", cli.input.display(), cli.output.display());

  let source = fs::read_to_string(&cli.input).map_err(|e| AsmError::io(&cli.input, e))?;
  let assembly = assemble(&source, config.image_size)?;

  assembly.image.write_to_path(&cli.output)?;

  if let Some(path) = &cli.listing {
    info!("Writing listing to {}", path.display());
    Listing::new(&assembly, title(&cli.input)).write_to_path(path)?;
  }

  Ok(Summary {
    instructions: assembly.instructions.len(),
    bytes_used: assembly.image.cursor(),
    capacity: assembly.image.capacity(),
    checksum: assembly.image.checksum(),
  })
}
