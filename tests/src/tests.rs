#![cfg(test)]

mod branch;
mod flags;
mod image;
mod io;
mod memory;
mod progs;
mod trap;

use common::asm::Cond;
use common::constants::PC_START;
use emu_lib::Emulator;
use emu_lib::io::PipeConsole;
use obj::Image;

use std::sync::Arc;

// Load words at the start address without running anything.
pub fn setup(words: &[u16]) -> (Emulator, Arc<PipeConsole>) {
    let con = Arc::new(PipeConsole::default());
    let mut emu = Emulator::new(con.clone());
    emu.load_image(&Image::new(PC_START, words.to_vec()));
    (emu, con)
}

// Assumes the program halts.
pub fn run(words: &[u16]) -> (Emulator, Arc<PipeConsole>) {
    let (mut emu, con) = setup(words);
    emu.run().unwrap();
    assert!(!emu.is_running());
    (emu, con)
}

pub fn check_cond(emu: &Emulator, exp: Cond) {
    assert_eq!(emu.cond(), Some(exp), "condition code");
}

// One character per word, zero terminated, as PUTS expects.
pub fn str_words(s: &str) -> Vec<u16> {
    s.bytes().map(u16::from).chain(std::iter::once(0)).collect()
}
