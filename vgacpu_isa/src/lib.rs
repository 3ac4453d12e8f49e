//! Instruction set of the vgacpu: the opcode table, the byte layout and a decoder.

pub mod decode;
pub mod encoding;
pub mod opcode;

pub use decode::{DecodeError, DecodedInstruction, decode, instructions};
pub use encoding::{EncodedInstruction, FILL_BYTE, Operands, Register};
pub use opcode::{HALT, INSTRUCTIONS, InstructionDescriptor, InstructionType, find, lookup};
