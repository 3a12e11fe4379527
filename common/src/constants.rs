pub const MEM_WORDS: usize = (u16::MAX as usize) + 1;

// Where execution starts; lower memory is left to the trap routines and OS.
pub const PC_START: u16 = 0x3000;

// Memory mapped keyboard registers.
pub const KBSR: u16 = 0xfe00; // Keyboard status
pub const KBDR: u16 = 0xfe02; // Keyboard data

pub const KBSR_READY: u16 = 1 << 15;
