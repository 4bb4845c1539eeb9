//! Stack panel - top of the stack at a constant height
//!
//! Bytes are read upwards from the stack pointer and grouped
//! `STACK_BYTES_PER_LINE` to a line, each line reversed so the byte at the
//! higher address sits on the left. The short group comes first so the line
//! nearest the stack bottom is always full. Blank lines above the content
//! keep the panel `STACK_HEIGHT` lines tall whatever the stack depth.

use crate::engine::Machine;
use crate::format::hex_byte;
use crate::ui::element::{separator, text, vbox, Element};

use super::{MemoryWindow, STACK_BYTES_PER_LINE, STACK_HEIGHT, STACK_PANEL_WIDTH};

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&MemoryWindow::stack(machine))
}

/// Group stack bytes into lines, short group first
pub fn lines(bytes: &[u8]) -> Vec<String> {
    let head = bytes.len() % STACK_BYTES_PER_LINE;
    let (first, rest) = bytes.split_at(head);

    std::iter::once(first)
        .filter(|g| !g.is_empty())
        .chain(rest.chunks(STACK_BYTES_PER_LINE))
        .map(|group| {
            group
                .iter()
                .rev()
                .map(|b| hex_byte(*b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Exactly `STACK_HEIGHT` rows: blank padding on top, content below
pub fn rows(bytes: &[u8]) -> Vec<String> {
    let mut content = lines(bytes);
    content.truncate(STACK_HEIGHT);

    let mut rows = vec![String::new(); STACK_HEIGHT - content.len()];
    rows.extend(content);
    rows
}

pub fn render(window: &MemoryWindow) -> Element {
    let rows = rows(&window.bytes).into_iter().map(text).collect();

    vbox(vec![
        vbox(rows).dim().padding(1),
        separator(),
        text(" Stack"),
    ])
    .width(STACK_PANEL_WIDTH)
    .border()
}
