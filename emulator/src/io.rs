pub mod console;
pub mod keyboard;
pub mod terminal;

use crate::{EmuError, EmulatorState};

pub use console::{Console, PipeConsole};
pub use keyboard::Keyboard;
pub use terminal::TerminalConsole;

// A device living at one or more memory addresses. Reads and writes of those
// addresses are routed here instead of to plain memory.
pub trait MMIOHandler {
    fn default_addrs(&self) -> &[u16] {
        &[]
    }

    fn read_word(&mut self, state: &mut EmulatorState, addr: u16) -> Result<u16, EmuError>;

    fn write_word(&mut self, state: &mut EmulatorState, addr: u16, val: u16) -> Result<(), EmuError> {
        state.mem_write(addr, val);
        Ok(())
    }
}
