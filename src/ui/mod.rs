//! Everything that produces terminal output.
//!
//! - **element**: immutable layout tree built fresh for each frame
//! - **canvas**: cell grid the tree is painted onto, converted to ANSI text
//! - **panels**: the six machine-state panels
//! - **compositor**: arranges the panels and renders a [`Frame`]
//! - **redraw**: in-place repainting and line bookkeeping between frames
//!
//! # Data Flow
//!
//! ```text
//! Machine ──(&self reads)──▶ panels ──▶ Element ──▶ Canvas ──▶ Frame
//!                                                               │
//!                                         RedrawState::present ◀┘
//! ```

pub mod canvas;
pub mod compositor;
pub mod element;
pub mod panels;
pub mod redraw;

pub use compositor::{compose, Frame};
pub use redraw::{HomeOffset, RedrawState};
