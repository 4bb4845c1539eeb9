//! Dashboard - the render / wait / step loop around a machine
//!
//! ```text
//!            ┌──────────────── halted? ──yes──▶ Halted
//!            ▼
//!         Running ── render frame
//!            │
//!   interactive? ──yes──▶ AwaitingInput ── quit keyword / EOF ──▶ QuitRequested
//!            │no                │enter
//!         sleep(wait)           │
//!            ▼                  ▼
//!          step() ── fault ──▶ Faulted
//!            │ok
//!         Stepped ──▶ back to the halt check
//! ```

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::thread;

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::{queue, terminal};
use tracing::{debug, error, info, trace, warn};

use crate::config::{SessionConfig, DEFAULT_FRAME_WIDTH};
use crate::engine::{Assembler, Fault, Instruction, Machine};
use crate::error::Result;
use crate::ui::{compose, Frame, RedrawState};

/// Operator input that ends an interactive session
pub const QUIT_KEYWORDS: [&str; 3] = ["q", "quit", "exit"];

/// Shown before each interactive step
pub const PROMPT: &str = "> press enter to step, type quit, exit or q to close\n";

/// Execution state
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Running,
    AwaitingInput,
    Stepped,
    Halted,
    Faulted,
    QuitRequested,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Halted | RunState::Faulted | RunState::QuitRequested
        )
    }
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The machine executed a halt
    Halted,
    /// The operator typed a quit keyword or closed the input
    QuitRequested,
    /// A step failed; the diagnostic has already been printed
    Faulted(Fault),
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Halted | RunOutcome::QuitRequested => 0,
            RunOutcome::Faulted(_) => 1,
        }
    }
}

/// Whether an assembled program contains a halt instruction
pub fn has_halt<I: Instruction>(program: &[I]) -> bool {
    program.iter().any(Instruction::is_halt)
}

/// Live dashboard over one machine
pub struct Dashboard<M, W, R> {
    machine: M,
    config: SessionConfig,
    redraw: RedrawState,
    state: RunState,
    frames: usize,
    out: W,
    input: R,
}

impl<M: Machine> Dashboard<M, Stdout, StdinLock<'static>> {
    /// Dashboard on the process's stdout and stdin
    pub fn stdio(machine: M, config: SessionConfig) -> Self {
        Self::new(machine, config, io::stdout(), io::stdin().lock())
    }
}

impl<M, W, R> Dashboard<M, W, R>
where
    M: Machine,
    W: Write,
    R: BufRead,
{
    pub fn new(machine: M, config: SessionConfig, out: W, input: R) -> Self {
        Self {
            machine,
            config,
            redraw: RedrawState::new(),
            state: RunState::Running,
            frames: 0,
            out,
            input,
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Frames drawn so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_parts(self) -> (M, W) {
        (self.machine, self.out)
    }

    /// Assemble `source`, warn if it never halts, and install it
    pub fn load<A>(&mut self, assembler: &A, source: &str) -> Result<()>
    where
        A: Assembler<Instruction = M::Instruction>,
    {
        let program = assembler.assemble(source)?;
        info!("Assembled {} instructions", program.len());

        if !has_halt(&program) {
            warn!("Program does not include a halt instruction");
            self.advise("program does not include a halt instruction, this might cause a segmentation fault.")?;
        }

        self.machine.load(&program)?;
        Ok(())
    }

    /// Run until the machine halts, the operator quits or a step faults
    pub fn run(&mut self) -> Result<RunOutcome> {
        info!(
            "Session starting (interactive: {}, step rate: {}/min, wait: {:?})",
            self.config.interactive,
            self.config.step_rate,
            self.config.wait()
        );

        while !self.machine.halted() {
            self.transition(RunState::Running);
            self.render()?;

            if self.config.interactive {
                self.transition(RunState::AwaitingInput);
                if self.should_quit()? {
                    self.transition(RunState::QuitRequested);
                    info!("Operator quit after {} frames", self.frames);
                    return Ok(RunOutcome::QuitRequested);
                }
            } else {
                thread::sleep(self.config.wait());
            }

            if let Err(fault) = self.machine.step() {
                self.transition(RunState::Faulted);
                error!("Machine fault: {}", fault);
                writeln!(self.out, "{}", fault)?;
                self.out.flush()?;
                return Ok(RunOutcome::Faulted(fault));
            }
            self.transition(RunState::Stepped);
            trace!("Stepped, ip = {:#x}", self.machine.instruction_pointer());
        }

        self.transition(RunState::Halted);
        info!("Machine halted after {} frames", self.frames);
        Ok(RunOutcome::Halted)
    }

    /// Compose and present one frame of the current machine state
    pub fn render(&mut self) -> io::Result<()> {
        let document = compose(&self.machine);
        let frame = Frame::render(&document, self.frame_width(), self.config.dim_color());
        self.redraw.present(&mut self.out, &frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Prompt, read a line and check it against the quit keywords.
    /// Closed input counts as a quit.
    fn should_quit(&mut self) -> io::Result<bool> {
        self.redraw.print(&mut self.out, PROMPT)?;
        match self.redraw.read_line(&mut self.input)? {
            Some(line) => Ok(QUIT_KEYWORDS.contains(&line.trim())),
            None => {
                info!("Input closed");
                Ok(true)
            }
        }
    }

    /// Print a one-off warning above the dashboard.
    ///
    /// Not counted by the redraw bookkeeping: it stays on screen above the
    /// first frame.
    fn advise(&mut self, message: &str) -> io::Result<()> {
        write!(self.out, "[")?;
        queue!(self.out, SetForegroundColor(Color::Magenta))?;
        write!(self.out, "WARNING")?;
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        writeln!(self.out, "] {}", message)?;
        self.out.flush()
    }

    fn frame_width(&self) -> u16 {
        self.config
            .width
            .or_else(|| terminal::size().ok().map(|(cols, _)| cols))
            .filter(|&cols| cols > 0)
            .unwrap_or(DEFAULT_FRAME_WIDTH)
    }

    fn transition(&mut self, next: RunState) {
        if self.state != next {
            debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
