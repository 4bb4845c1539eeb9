//! Scripted in-memory machine for tests.
//!
//! Every instruction occupies 8 bytes of the code segment. The segments are
//! laid out as:
//!
//! ```text
//! 0x0000  code  (cs)
//! 0x1000  data  (ds), filled with 0x00, 0x01, 0x02, ...
//! 0x2000  stack (ss), DEFAULT_STACK_SIZE bytes, grows down
//! ```

use std::collections::BTreeMap;

use super::{
    Assembler, EngineError, Fault, Instruction, Machine, OpcodeClass, Register, RegisterCode,
};

pub const CODE_BASE: u64 = 0x0000;
pub const DATA_BASE: u64 = 0x1000;
pub const STACK_BASE: u64 = 0x2000;
pub const DEFAULT_STACK_SIZE: u64 = 0x100;
const MEMORY_SIZE: usize = 0x3000;
pub const INSTRUCTION_SIZE: u64 = 8;

#[derive(Clone, Debug, PartialEq)]
pub enum TestOp {
    Nop,
    Halt,
    Push(u8),
    Fault(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestInstruction {
    pub op: TestOp,
    pub text: String,
}

impl Instruction for TestInstruction {
    fn opcode_class(&self) -> OpcodeClass {
        match self.op {
            TestOp::Halt => OpcodeClass::Halt,
            _ => OpcodeClass::Other,
        }
    }
}

/// Accepts one instruction per line: `nop`, `hlt`, `push <hex byte>`,
/// `fault <message>`.
pub struct TestAssembler;

impl Assembler for TestAssembler {
    type Instruction = TestInstruction;

    fn assemble(&self, source: &str) -> Result<Vec<TestInstruction>, EngineError> {
        let mut program = Vec::new();
        for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let (mnemonic, rest) = match line.split_once(' ') {
                Some((m, r)) => (m, r.trim()),
                None => (line, ""),
            };
            let op = match mnemonic {
                "nop" => TestOp::Nop,
                "hlt" => TestOp::Halt,
                "push" => {
                    let byte = u8::from_str_radix(rest, 16)
                        .map_err(|e| EngineError::Assembly(format!("{}: {}", line, e)))?;
                    TestOp::Push(byte)
                }
                "fault" => TestOp::Fault(rest.to_string()),
                other => {
                    return Err(EngineError::Assembly(format!("unknown mnemonic {}", other)));
                }
            };
            program.push(TestInstruction {
                op,
                text: line.to_string(),
            });
        }
        Ok(program)
    }
}

pub struct ScriptedMachine {
    registers: BTreeMap<RegisterCode, u64>,
    program: Vec<TestInstruction>,
    memory: Vec<u8>,
    pub vector: [[u8; 16]; 8],
    pub fpu: [u64; 8],
    pub halted: bool,
    pub steps: usize,
}

impl Default for ScriptedMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedMachine {
    pub fn new() -> Self {
        let mut registers = BTreeMap::new();
        for code in [
            RegisterCode::Rax,
            RegisterCode::Rbx,
            RegisterCode::Rcx,
            RegisterCode::Rdx,
            RegisterCode::Rsi,
            RegisterCode::Rdi,
            RegisterCode::Rbp,
            RegisterCode::Rsp,
            RegisterCode::Cs,
            RegisterCode::Ds,
            RegisterCode::Ss,
        ] {
            registers.insert(code, 0);
        }
        Self {
            registers,
            program: Vec::new(),
            memory: vec![0; MEMORY_SIZE],
            vector: [[0; 16]; 8],
            fpu: [0; 8],
            halted: false,
            steps: 0,
        }
    }

    /// Assemble and load `source`, panicking on bad input
    pub fn with_program(source: &str) -> Self {
        let mut machine = Self::new();
        let program = TestAssembler.assemble(source).unwrap();
        machine.load(&program).unwrap();
        machine
    }

    pub fn set_register(&mut self, code: RegisterCode, value: u64) {
        self.registers.insert(code, value);
    }

    pub fn write_bytes(&mut self, address: u64, bytes: &[u8]) {
        let start = address as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl Machine for ScriptedMachine {
    type Instruction = TestInstruction;

    fn registers(&self) -> Vec<Register> {
        let mut out: Vec<Register> = self
            .registers
            .iter()
            .map(|(code, value)| Register::Full { code: *code, value: *value })
            .collect();
        out.push(Register::Sub {
            code: RegisterCode::Eax,
            parent: RegisterCode::Rax,
            value: self.register(RegisterCode::Rax) & 0xffff_ffff,
        });
        out
    }

    fn register(&self, code: RegisterCode) -> u64 {
        self.registers.get(&code).copied().unwrap_or(0)
    }

    fn instruction_pointer(&self) -> u64 {
        self.register(RegisterCode::Rip)
    }

    fn halted(&self) -> bool {
        self.halted
    }

    fn vector_registers(&self) -> [[u8; 16]; 8] {
        self.vector
    }

    fn fpu_stages(&self) -> [u64; 8] {
        self.fpu
    }

    fn read_bytes(&self, address: u64, len: usize) -> Vec<u8> {
        let start = (address as usize).min(self.memory.len());
        let end = start.saturating_add(len).min(self.memory.len());
        self.memory[start..end].to_vec()
    }

    fn read_instructions(&self, address: u64, count: usize) -> Vec<(u64, String)> {
        let cs = self.register(RegisterCode::Cs);
        let first = (address.saturating_sub(cs) / INSTRUCTION_SIZE) as usize;
        self.program
            .iter()
            .enumerate()
            .skip(first)
            .take(count)
            .map(|(i, ins)| (cs + i as u64 * INSTRUCTION_SIZE, ins.text.clone()))
            .collect()
    }

    fn default_stack_size(&self) -> u64 {
        DEFAULT_STACK_SIZE
    }

    fn load(&mut self, program: &[TestInstruction]) -> Result<(), EngineError> {
        if program.len() as u64 * INSTRUCTION_SIZE > DATA_BASE - CODE_BASE {
            return Err(EngineError::Load("program does not fit the code segment".into()));
        }
        self.program = program.to_vec();
        self.set_register(RegisterCode::Cs, CODE_BASE);
        self.set_register(RegisterCode::Ds, DATA_BASE);
        self.set_register(RegisterCode::Ss, STACK_BASE);
        self.set_register(RegisterCode::Rsp, DEFAULT_STACK_SIZE);
        self.set_register(RegisterCode::Rip, 0);
        for i in 0..=u8::MAX {
            self.memory[DATA_BASE as usize + i as usize] = i;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), Fault> {
        let ip = self.instruction_pointer();
        let index = (ip / INSTRUCTION_SIZE) as usize;
        let op = match self.program.get(index) {
            Some(ins) => ins.op.clone(),
            None => return Err(Fault::new(format!("instruction pointer {:#x} out of bounds", ip))),
        };
        self.steps += 1;
        match op {
            TestOp::Nop => {}
            TestOp::Halt => self.halted = true,
            TestOp::Push(byte) => {
                let rsp = self.register(RegisterCode::Rsp);
                if rsp == 0 {
                    return Err(Fault::new("stack overflow"));
                }
                let ss = self.register(RegisterCode::Ss);
                self.memory[(ss + rsp - 1) as usize] = byte;
                self.set_register(RegisterCode::Rsp, rsp - 1);
            }
            TestOp::Fault(message) => return Err(Fault::new(message)),
        }
        self.set_register(RegisterCode::Rip, ip + INSTRUCTION_SIZE);
        Ok(())
    }
}
