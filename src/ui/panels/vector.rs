//! SSE panel - xmm0..xmm7 as raw bytes

use crate::engine::Machine;
use crate::format::hex_bytes;
use crate::ui::element::{hbox, separator, text, vbox, Element};

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&machine.vector_registers())
}

pub fn render(registers: &[[u8; 16]; 8]) -> Element {
    let labels = (0..registers.len()).map(|i| text(format!("xmm{}", i))).collect();
    let values = registers.iter().map(|r| text(hex_bytes(r))).collect();

    vbox(vec![
        text("SSE").padding(1),
        separator(),
        hbox(vec![vbox(labels), text("  "), vbox(values).dim()]).padding(1),
    ])
    .border()
}
