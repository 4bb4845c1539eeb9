//! Registers panel - full-width registers in a fixed-column grid

use crate::engine::{Machine, Register};
use crate::format::{to_hex, zero_extend};
use crate::ui::element::{hbox, text, vbox, Element};

use super::{REGISTERS_PER_LINE, REGISTER_NAME_WIDTH};

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&machine.registers())
}

/// Lay out full-width registers left to right, `REGISTERS_PER_LINE` per row.
/// Narrow aliases are skipped.
pub fn render(registers: &[Register]) -> Element {
    let full: Vec<&Register> = registers.iter().filter(|r| r.is_full()).collect();

    let rows = full
        .chunks(REGISTERS_PER_LINE)
        .map(|chunk| hbox(chunk.iter().map(|r| cell(r)).collect()))
        .collect();

    vbox(rows).border()
}

fn cell(register: &Register) -> Element {
    hbox(vec![
        text(register.code().name())
            .align_right()
            .width(REGISTER_NAME_WIDTH),
        text(" "),
        text(zero_extend(&to_hex(register.value()), 16)).dim(),
    ])
    .padding(1)
}
