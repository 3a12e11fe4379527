use crate::setup;

use common::asm::Reg;
use common::constants::{KBDR, KBSR, KBSR_READY};
use emu_lib::EmuError;

// Spin on the keyboard status register, then print the key.
const ECHO_KEY: &[u16] = &[
    0xa005, // poll: LDI R0, kbsr
    0x07fe, // BRzp poll
    0xa004, // LDI R0, kbdr
    0xf021, // OUT
    0xf025, // HALT
    0x0000,
    KBSR,   // kbsr
    KBDR,   // kbdr
];

#[test]
fn echo_pending_key() {
    let (mut emu, con) = setup(ECHO_KEY);
    con.push_input(b'z');
    emu.run().unwrap();
    assert_eq!(con.output_string(), "z");
    assert_eq!(emu.reg_read(Reg::R0), b'z' as u16);
}

#[test]
fn spins_until_key() {
    let (mut emu, con) = setup(ECHO_KEY);
    for _ in 0..3 {
        emu.run_ins().unwrap();
        emu.run_ins().unwrap();
        assert_eq!(emu.pc(), 0x3000);
        assert_eq!(emu.get_state().mem_read(KBSR), 0);
    }

    con.push_input(b'q');
    emu.run().unwrap();
    assert_eq!(con.output_string(), "q");
}

#[test]
fn status_read_side_effects() {
    let (mut emu, con) = setup(&[]);
    con.push_input(b'x');
    assert_eq!(emu.mem_read(KBSR).unwrap(), KBSR_READY);
    assert_eq!(emu.mem_read(KBDR).unwrap(), b'x' as u16);

    // Data register keeps the last key.
    assert_eq!(emu.mem_read(KBSR).unwrap(), 0);
    assert_eq!(emu.mem_read(KBDR).unwrap(), b'x' as u16);
}

#[test]
fn poll_failure_is_fatal() {
    let (mut emu, con) = setup(ECHO_KEY);
    con.break_pipe();
    assert!(matches!(emu.run(), Err(EmuError::Console(_))));
    assert_eq!(emu.reg_read(Reg::R0), 0);
}
