//! vmdash - a live terminal dashboard for a virtual machine
//!
//! vmdash shows the state of a running virtual machine and steps it one
//! instruction at a time, either on Enter or on a fixed clock. Each frame is
//! repainted in place, so the terminal looks like a dashboard instead of a
//! scrolling log.
//!
//! # Panels
//!
//! - **Registers**: every full-width register, six per row
//! - **Instructions**: disassembly around the instruction pointer
//! - **Data**: the first 108 bytes of the data segment
//! - **SSE**: xmm0..xmm7
//! - **FPU**: st0..st7, raw and as doubles
//! - **Stack**: the top of the stack
//!
//! # Usage
//!
//! ```ignore
//! let config = vmdash::SessionConfig::load()?;
//! vmdash::logging::init(&config.log_path())?;
//!
//! let mut dashboard = vmdash::Dashboard::stdio(machine, config);
//! dashboard.load(&assembler, &source)?;
//! let outcome = dashboard.run()?;
//! std::process::exit(outcome.exit_code());
//! ```
//!
//! The machine, its assembler and its loader are supplied by the caller
//! through the traits in [`engine`].

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod format;
pub mod logging;
pub mod ui;

pub use config::SessionConfig;
pub use dashboard::{Dashboard, RunOutcome, RunState};
pub use error::{DashError, Result};
