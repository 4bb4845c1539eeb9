//! Frame compositor - arranges the panels into one screen
//!
//! ```text
//! ┌ registers ─────────────────────────────────────────────┐
//! └────────────────────────────────────────────────────────┘
//! ┌ instructions (flex) ──┐ ┌ data ───┐ ┌ stack ┐
//! │                       │ ├ sse ────┤ │       │
//! │                       │ ├ fpu ────┤ │       │
//! └───────────────────────┘ └─────────┘ └───────┘
//! ```

use crossterm::style::Color;

use crate::engine::Machine;

use super::canvas::Canvas;
use super::element::{hbox, text, vbox, Element, Rect, Sides};
use super::panels::{data, fpu, instructions, registers, stack, vector};
use super::redraw::HomeOffset;

/// Build the full document for the machine's current state
pub fn compose<M: Machine>(machine: &M) -> Element {
    vbox(vec![
        registers::panel(machine),
        hbox(vec![
            instructions::panel(machine).flex(),
            text(" "),
            vbox(vec![
                data::panel(machine),
                vector::panel(machine),
                fpu::panel(machine),
            ]),
            text(" "),
            stack::panel(machine),
        ])
        .flex(),
    ])
    .padding_sides(Sides::symmetric(1, 1))
}

/// One rendered frame, ready to be written to the terminal
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    text: String,
    height: u16,
}

impl Frame {
    /// Paint `document` at `width` columns and its natural height
    pub fn render(document: &Element, width: u16, dim_color: Color) -> Self {
        let height = document.measure().height;
        let mut canvas = Canvas::new(width, height);
        document.render(&mut canvas, Rect::new(0, 0, width, height));

        Self {
            text: canvas.to_ansi(dim_color),
            height: canvas.height(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cursor movement from the frame's last line back to its first
    pub fn home_offset(&self) -> HomeOffset {
        HomeOffset::new(self.height.saturating_sub(1))
    }
}
