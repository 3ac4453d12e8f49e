//! Assembler for the vgacpu: turns assembly text into a fixed-size memory image.

pub mod assembler;
pub mod cli;
pub mod common;
pub mod config;
pub mod encoder;
pub mod error;
pub mod image;
pub mod listing;
pub mod parser;
pub mod tokenizer;

pub use assembler::{Assembly, assemble};
pub use error::{AsmError, SyntaxError};
pub use image::{DEFAULT_IMAGE_SIZE, MemoryImage};
