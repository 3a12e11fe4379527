use common::asm::{Cond, NUM_REGS, Reg};
use common::constants::{MEM_WORDS, PC_START};

use log::trace;

// Raw machine state. Memory accesses here have no device side effects; those go
// through the Emulator. This is separate so a mutable borrow can be passed to the
// MMIO handlers.
pub struct EmulatorState {
    num_ins: usize,
    mem: Vec<u16>,
    regs: [u16; NUM_REGS],
    pc: u16,
    cond: Option<Cond>, // None until the first flag-setting instruction
}

impl EmulatorState {
    pub fn new() -> Self {
        EmulatorState {
            num_ins: 0usize,
            mem: vec![0; MEM_WORDS],
            regs: [0; NUM_REGS],
            pc: PC_START,
            cond: None,
        }
    }

    pub fn inc_ins(&mut self) {
        self.num_ins += 1;
    }

    pub fn num_ins(&self) -> usize {
        self.num_ins
    }

    pub fn mem_read(&self, addr: u16) -> u16 {
        self.mem[addr as usize]
    }

    pub fn mem_write(&mut self, addr: u16, val: u16) {
        trace!("Mem: writing {val:#06x} to {addr:#06x}");
        self.mem[addr as usize] = val;
    }

    pub fn reg_read(&self, reg: Reg) -> u16 {
        self.regs[reg.idx()]
    }

    pub fn reg_write(&mut self, reg: Reg, val: u16) {
        trace!("Reg: writing {val:#06x} to {reg}");
        self.regs[reg.idx()] = val;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        trace!("Reg: writing {pc:#06x} to PC");
        self.pc = pc;
    }

    pub fn cond(&self) -> Option<Cond> {
        self.cond
    }

    pub fn set_cond(&mut self, cond: Cond) {
        self.cond = Some(cond);
    }
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::new()
    }
}
