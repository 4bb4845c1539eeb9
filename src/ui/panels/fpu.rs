//! FPU panel - st0..st7 as raw bytes and as doubles

use crate::engine::Machine;
use crate::format::hex_bytes;
use crate::ui::element::{hbox, separator, text, vbox, Element, Sides};

use super::FPU_PANEL_WIDTH;

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&machine.fpu_stages())
}

/// The stage's bits reinterpreted as an IEEE double
pub fn decode(bits: u64) -> String {
    f64::from_bits(bits).to_string()
}

pub fn render(stages: &[u64; 8]) -> Element {
    let labels = (0..stages.len()).map(|i| text(format!("st{}", i))).collect();
    let raw = stages
        .iter()
        .map(|s| text(hex_bytes(&s.to_le_bytes())))
        .collect();
    let values = stages
        .iter()
        .map(|s| text(format!(" = {}", decode(*s))))
        .collect();

    vbox(vec![
        text("FPU").padding(1),
        separator(),
        hbox(vec![
            vbox(labels).padding_sides(Sides::new(0, 2, 0, 1)),
            vbox(raw).dim(),
            vbox(values).dim(),
        ]),
    ])
    .border()
    .width(FPU_PANEL_WIDTH)
}
