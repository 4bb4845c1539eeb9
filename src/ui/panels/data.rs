//! Data segment panel

use crate::engine::Machine;
use crate::format::hex_bytes;
use crate::ui::element::{separator, text, vbox, Element};

use super::{MemoryWindow, MEMORY_BYTES_PER_LINE};

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&MemoryWindow::data_segment(machine))
}

/// `MEMORY_BYTES_PER_LINE` hex pairs per line; the last line may be short
pub fn lines(bytes: &[u8]) -> Vec<String> {
    bytes.chunks(MEMORY_BYTES_PER_LINE).map(hex_bytes).collect()
}

pub fn render(window: &MemoryWindow) -> Element {
    let rows = lines(&window.bytes).into_iter().map(text).collect();

    vbox(vec![
        text("Data").padding(1),
        separator(),
        vbox(rows).dim().padding(1),
    ])
    .border()
}
