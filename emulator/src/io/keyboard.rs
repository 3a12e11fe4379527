use std::sync::Arc;
use std::time::Duration;

use common::constants::{KBDR, KBSR, KBSR_READY};

use crate::io::{Console, MMIOHandler};
use crate::{EmuError, EmulatorState};

// Keyboard status register. Every read of KBSR polls the console; if a key came in,
// the ready bit is set and the key is left in KBDR, which is otherwise plain memory.
pub struct Keyboard {
    console: Arc<dyn Console>,
}

impl Keyboard {
    pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(console: Arc<dyn Console>) -> Self {
        Keyboard { console }
    }

    fn kbsr_read(&mut self, state: &mut EmulatorState) -> Result<u16, EmuError> {
        match self.console.poll_key(Self::POLL_TIMEOUT)? {
            Some(key) => {
                state.mem_write(KBSR, KBSR_READY);
                state.mem_write(KBDR, key as u16);
            },
            None => state.mem_write(KBSR, 0),
        }
        Ok(state.mem_read(KBSR))
    }
}

impl MMIOHandler for Keyboard {
    fn default_addrs(&self) -> &[u16] {
        &[KBSR]
    }

    fn read_word(&mut self, state: &mut EmulatorState, addr: u16) -> Result<u16, EmuError> {
        match addr {
            KBSR => self.kbsr_read(state),
            _ => panic!("Keyboard doesn't handle address {addr:#06x}"),
        }
    }
}
