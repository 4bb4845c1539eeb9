//! Interfaces to the virtual machine being visualized.
//!
//! The dashboard does not execute instructions itself. It drives any engine
//! that implements these traits:
//!
//! - **Machine**: register store, control unit, vector and floating-point
//!   units, memory, loader and the single-step operation
//! - **Assembler**: turns program source into an instruction sequence
//! - **Instruction**: one assembled instruction, classified by opcode
//!
//! # Ownership
//!
//! ```text
//! Dashboard
//! └── Machine (exclusively owned)
//!     ├── read by panels through &self while a frame is built
//!     └── mutated only by step(), after the frame is drawn
//! ```

#[cfg(test)]
pub mod testing;

use std::fmt;
use thiserror::Error;

/// Register identifiers
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum RegisterCode {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    Rip,
    Rflags,
    Cs,
    Ds,
    Ss,
    Es,
    Fs,
    Gs,
    Eax,
    Ebx,
    Ecx,
    Edx,
    Esi,
    Edi,
    Ebp,
    Esp,
}

impl RegisterCode {
    /// Lowercase mnemonic
    pub fn name(self) -> &'static str {
        match self {
            RegisterCode::Rax => "rax",
            RegisterCode::Rbx => "rbx",
            RegisterCode::Rcx => "rcx",
            RegisterCode::Rdx => "rdx",
            RegisterCode::Rsi => "rsi",
            RegisterCode::Rdi => "rdi",
            RegisterCode::Rbp => "rbp",
            RegisterCode::Rsp => "rsp",
            RegisterCode::R8 => "r8",
            RegisterCode::R9 => "r9",
            RegisterCode::R10 => "r10",
            RegisterCode::R11 => "r11",
            RegisterCode::R12 => "r12",
            RegisterCode::R13 => "r13",
            RegisterCode::R14 => "r14",
            RegisterCode::R15 => "r15",
            RegisterCode::Rip => "rip",
            RegisterCode::Rflags => "rflags",
            RegisterCode::Cs => "cs",
            RegisterCode::Ds => "ds",
            RegisterCode::Ss => "ss",
            RegisterCode::Es => "es",
            RegisterCode::Fs => "fs",
            RegisterCode::Gs => "gs",
            RegisterCode::Eax => "eax",
            RegisterCode::Ebx => "ebx",
            RegisterCode::Ecx => "ecx",
            RegisterCode::Edx => "edx",
            RegisterCode::Esi => "esi",
            RegisterCode::Edi => "edi",
            RegisterCode::Ebp => "ebp",
            RegisterCode::Esp => "esp",
        }
    }
}

impl fmt::Display for RegisterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One register as observed at frame time.
///
/// Narrow aliases (e.g. the 32-bit view of a 64-bit register) are their own
/// variant so callers filter on capability instead of on names.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Register {
    /// A full-width register
    Full { code: RegisterCode, value: u64 },
    /// A narrower view into `parent`
    Sub {
        code: RegisterCode,
        parent: RegisterCode,
        value: u64,
    },
}

impl Register {
    pub fn code(&self) -> RegisterCode {
        match self {
            Register::Full { code, .. } | Register::Sub { code, .. } => *code,
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            Register::Full { value, .. } | Register::Sub { value, .. } => *value,
        }
    }

    /// Whether this register is full width (not an alias)
    pub fn is_full(&self) -> bool {
        matches!(self, Register::Full { .. })
    }
}

/// Coarse opcode classification, used to look for a halt in a program
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OpcodeClass {
    Halt,
    Other,
}

/// An assembled instruction
pub trait Instruction {
    fn opcode_class(&self) -> OpcodeClass;

    fn is_halt(&self) -> bool {
        self.opcode_class() == OpcodeClass::Halt
    }
}

/// Fatal fault raised by a single step.
///
/// The machine is left in an undefined state; the session cannot continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Fault {
    message: String,
}

impl Fault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human readable diagnostic
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while preparing a program
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to assemble program: {0}")]
    Assembly(String),

    #[error("Failed to load program: {0}")]
    Load(String),
}

/// Turns program source into instructions
pub trait Assembler {
    type Instruction: Instruction;

    fn assemble(&self, source: &str) -> Result<Vec<Self::Instruction>, EngineError>;
}

/// A virtual machine the dashboard can observe and step.
///
/// Every read method takes `&self` and returns owned data sampled at call
/// time; only [`Machine::load`] and [`Machine::step`] mutate.
pub trait Machine {
    type Instruction: Instruction;

    /// All registers, full width and aliases, in display order
    fn registers(&self) -> Vec<Register>;

    /// Current value of one register (0 if the machine has no such register)
    fn register(&self, code: RegisterCode) -> u64 {
        self.registers()
            .into_iter()
            .find(|r| r.code() == code)
            .map(|r| r.value())
            .unwrap_or(0)
    }

    /// Instruction pointer, relative to the code segment base
    fn instruction_pointer(&self) -> u64;

    /// Halt flag of the control unit
    fn halted(&self) -> bool;

    /// Raw bytes of the eight 128-bit vector registers
    fn vector_registers(&self) -> [[u8; 16]; 8];

    /// Raw bits of the eight floating-point stages
    fn fpu_stages(&self) -> [u64; 8];

    /// Read `len` bytes starting at `address`
    fn read_bytes(&self, address: u64, len: usize) -> Vec<u8>;

    /// Disassemble up to `count` instructions starting at `address`
    fn read_instructions(&self, address: u64, count: usize) -> Vec<(u64, String)>;

    /// Size of the stack the loader reserves
    fn default_stack_size(&self) -> u64;

    /// Install a program into memory and registers
    fn load(&mut self, program: &[Self::Instruction]) -> Result<(), EngineError>;

    /// Execute exactly one instruction
    fn step(&mut self) -> Result<(), Fault>;
}
