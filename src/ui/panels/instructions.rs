//! Instructions panel - disassembly around the instruction pointer

use crate::engine::Machine;
use crate::format::{terminal_safe, to_hex, zero_extend};
use crate::ui::element::{hbox, separator, text, vbox, Element};

use super::{InstructionWindow, INSTRUCTION_PANEL_HEIGHT};

pub fn panel<M: Machine>(machine: &M) -> Element {
    render(&InstructionWindow::capture(machine))
}

/// Address and text columns; every row but the current one is dimmed
pub fn render(window: &InstructionWindow) -> Element {
    let rip = zero_extend(&to_hex(window.instruction_pointer), 16);

    let mut addresses = Vec::with_capacity(window.entries.len());
    let mut instructions = Vec::with_capacity(window.entries.len());
    for (address, line) in &window.entries {
        let mut address_e = text(zero_extend(&to_hex(*address), 8)).align_right();
        let mut instruction_e = text(terminal_safe(line).into_owned());

        if *address != window.current {
            address_e = address_e.dim();
            instruction_e = instruction_e.dim();
        }

        addresses.push(address_e);
        instructions.push(instruction_e);
    }

    vbox(vec![
        hbox(vec![
            text("instructions").padding(1).flex(),
            separator(),
            hbox(vec![text("rip"), text(" "), text(rip).dim()]).padding(1),
        ]),
        separator(),
        hbox(vec![
            vbox(addresses)
                .padding(1)
                .width(10)
                .height(INSTRUCTION_PANEL_HEIGHT),
            separator(),
            vbox(instructions).padding(1).flex(),
        ]),
    ])
    .border()
}
