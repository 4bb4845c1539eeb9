//! Bounded views into machine memory, sampled once per frame

use crate::engine::{Machine, RegisterCode};

use super::{
    DATA_SEGMENT_BYTES, INSTRUCTIONS_RANGE, INSTRUCTION_SIZE, STACK_READ_LIMIT,
};

/// A byte range read from memory
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryWindow {
    pub base: u64,
    pub bytes: Vec<u8>,
}

impl MemoryWindow {
    /// The first `DATA_SEGMENT_BYTES` bytes of the data segment
    pub fn data_segment<M: Machine>(machine: &M) -> Self {
        let base = machine.register(RegisterCode::Ds);
        Self {
            base,
            bytes: machine.read_bytes(base, DATA_SEGMENT_BYTES),
        }
    }

    /// Live stack bytes from the stack pointer towards the stack bottom,
    /// at most `STACK_READ_LIMIT` of them
    pub fn stack<M: Machine>(machine: &M) -> Self {
        let ss = machine.register(RegisterCode::Ss);
        let top = ss.saturating_add(machine.register(RegisterCode::Rsp));
        let len = Self::stack_read_len(ss, top, machine.default_stack_size());
        Self {
            base: top,
            bytes: machine.read_bytes(top, len),
        }
    }

    /// Number of bytes between `top` and the bottom of a stack of
    /// `stack_size` bytes based at `ss`, capped at `STACK_READ_LIMIT`.
    /// A stack pointer past the bottom reads nothing.
    pub fn stack_read_len(ss: u64, top: u64, stack_size: u64) -> usize {
        let bottom = ss.saturating_add(stack_size);
        bottom.saturating_sub(top).min(STACK_READ_LIMIT) as usize
    }
}

/// Disassembly around the current instruction
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionWindow {
    /// Instruction pointer, relative to the code segment
    pub instruction_pointer: u64,
    /// Absolute address of the current instruction
    pub current: u64,
    /// (address, text) in address order
    pub entries: Vec<(u64, String)>,
}

impl InstructionWindow {
    pub fn capture<M: Machine>(machine: &M) -> Self {
        let instruction_pointer = machine.instruction_pointer();
        let code_base = machine.register(RegisterCode::Cs);
        let current = code_base.saturating_add(instruction_pointer);
        let start = Self::start_address(code_base, current);
        let count = (INSTRUCTIONS_RANGE * 2) as usize;

        Self {
            instruction_pointer,
            current,
            entries: machine.read_instructions(start, count),
        }
    }

    /// First address to disassemble: `INSTRUCTIONS_RANGE` instructions
    /// before `current`, but never before the code segment base.
    pub fn start_address(code_base: u64, current: u64) -> u64 {
        current
            .saturating_sub(INSTRUCTIONS_RANGE * INSTRUCTION_SIZE)
            .max(code_base)
    }
}
