//! Dashboard panels.
//!
//! Each panel samples one facet of machine state and returns a fresh
//! [`Element`](super::element::Element) tree:
//!
//! - **registers**: full-width general purpose registers, six per row
//! - **instructions**: disassembly around the instruction pointer
//! - **data**: the first bytes of the data segment
//! - **stack**: the top of the stack, fixed height
//! - **vector**: the eight 128-bit xmm registers
//! - **fpu**: the eight floating-point stages, raw and decoded
//!
//! Panels only borrow the machine while building their tree. Nothing sampled
//! here outlives the frame.

pub mod data;
pub mod fpu;
pub mod instructions;
pub mod registers;
pub mod stack;
pub mod vector;
pub mod window;

pub use window::{InstructionWindow, MemoryWindow};

/// Registers shown per row
pub const REGISTERS_PER_LINE: usize = 6;
/// Width of the right-aligned register name field
pub const REGISTER_NAME_WIDTH: u16 = 6;

/// Instructions shown either side of the current one
pub const INSTRUCTIONS_RANGE: u64 = 8;
/// Bytes assumed per instruction when backing up from the current address
pub const INSTRUCTION_SIZE: u64 = 8;
pub const INSTRUCTION_PANEL_HEIGHT: u16 = 30;

pub const DATA_SEGMENT_BYTES: usize = 108;
pub const MEMORY_BYTES_PER_LINE: usize = 12;

pub const STACK_BYTES_PER_LINE: usize = 4;
pub const STACK_HEIGHT: usize = 30;
pub const STACK_READ_LIMIT: u64 = (STACK_HEIGHT * STACK_BYTES_PER_LINE) as u64;
pub const STACK_PANEL_WIDTH: u16 = 13;

pub const FPU_PANEL_WIDTH: u16 = 55;
