use common::asm::{Reg, TrapVector};

use crate::{EmuError, Emulator, ExecRet};

use log::{debug, warn};
use num_traits::FromPrimitive;

impl Emulator {
    const IN_PROMPT: &'static [u8] = b"Enter a character: ";

    // The trap routines are built in rather than loaded from a trap vector table.
    pub(crate) fn exec_trap_ins(&mut self, vector: u8) -> Result<ExecRet, EmuError> {
        let Some(trap) = TrapVector::from_u8(vector) else {
            warn!("Unknown trap vector {vector:#04x}, ignoring");
            return Ok(ExecRet::Ok);
        };
        debug!("Trap {trap}");

        match trap {
            TrapVector::Getc => self.trap_getc()?,
            TrapVector::Out => self.trap_out()?,
            TrapVector::Puts => self.trap_puts()?,
            TrapVector::In => self.trap_in()?,
            TrapVector::Putsp => self.trap_putsp()?,
            TrapVector::Halt => {
                self.console.flush()?;
                self.halt();
                return Ok(ExecRet::Halt);
            },
        }
        Ok(ExecRet::Ok)
    }

    fn trap_getc(&mut self) -> Result<(), EmuError> {
        let ch = self.console.read_char()?;
        self.reg_write(Reg::R0, ch as u16);
        Ok(())
    }

    fn trap_out(&mut self) -> Result<(), EmuError> {
        self.console.write_char(self.reg_read(Reg::R0) as u8)?;
        self.console.flush()?;
        Ok(())
    }

    // One character per word, up to a zero word.
    fn trap_puts(&mut self) -> Result<(), EmuError> {
        let mut addr = self.reg_read(Reg::R0);
        loop {
            let word = self.mem_read(addr)?;
            if word == 0 {
                break;
            }
            self.console.write_char(word as u8)?;
            addr = addr.wrapping_add(1);
        }
        self.console.flush()?;
        Ok(())
    }

    fn trap_in(&mut self) -> Result<(), EmuError> {
        self.console.write_all(Self::IN_PROMPT)?;
        self.console.flush()?;
        let ch = self.console.read_char()?;
        self.console.write_char(ch)?;
        self.console.flush()?;
        self.reg_write(Reg::R0, ch as u16);
        Ok(())
    }

    // Two characters per word, low byte first, up to a zero word. A zero high
    // byte is skipped, so odd length strings work.
    fn trap_putsp(&mut self) -> Result<(), EmuError> {
        let mut addr = self.reg_read(Reg::R0);
        loop {
            let word = self.mem_read(addr)?;
            if word == 0 {
                break;
            }
            self.console.write_char(word as u8)?;
            let upper = (word >> u8::BITS) as u8;
            if upper != 0 {
                self.console.write_char(upper)?;
            }
            addr = addr.wrapping_add(1);
        }
        self.console.flush()?;
        Ok(())
    }
}
