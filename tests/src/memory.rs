use crate::{run, setup};

use common::asm::Reg;

#[test]
fn ld_st() {
    let (emu, _) = run(&[
        0x2003, // LD R0, src
        0x3003, // ST R0, dst
        0xf025, // HALT
        0x0000,
        0x00ff, // src
        0x0000, // dst
    ]);
    assert_eq!(emu.reg_read(Reg::R0), 0xff);
    assert_eq!(emu.get_state().mem_read(0x3005), 0xff);
}

#[test]
fn ldi() {
    let (mut emu, _) = setup(&[
        0xa001, // LDI R0, ptr
        0xf025, // HALT
        0x4000, // ptr
    ]);
    emu.get_state_mut().mem_write(0x4000, 0x1234);
    emu.run().unwrap();
    assert_eq!(emu.reg_read(Reg::R0), 0x1234);
}

#[test]
fn sti() {
    let (emu, _) = run(&[
        0x127e, // ADD R1, R1, #-2
        0xb201, // STI R1, ptr
        0xf025, // HALT
        0x4000, // ptr
    ]);
    assert_eq!(emu.get_state().mem_read(0x4000), 0xfffe);
    assert_eq!(emu.get_state().mem_read(0x3003), 0x4000);
}

#[test]
fn ldr_str_negative_offset() {
    let (emu, _) = run(&[
        0xec05, // LEA R6, #5
        0x61bf, // LDR R0, R6, #-1
        0x7182, // STR R0, R6, #2
        0xf025, // HALT
        0x0000,
        0x1234,
    ]);
    assert_eq!(emu.reg_read(Reg::R6), 0x3006);
    assert_eq!(emu.reg_read(Reg::R0), 0x1234);
    assert_eq!(emu.get_state().mem_read(0x3008), 0x1234);
}

#[test]
fn ldr_wraps() {
    let (mut emu, _) = setup(&[
        0x6181, // LDR R0, R6, #1
        0xf025, // HALT
    ]);
    emu.get_state_mut().mem_write(0x0000, 0xbeef);
    emu.reg_write(Reg::R6, 0xffff);
    emu.run().unwrap();
    assert_eq!(emu.reg_read(Reg::R0), 0xbeef);
}

#[test]
fn whole_address_space() {
    let (mut emu, _) = setup(&[]);
    emu.mem_write(0xffff, 0xaaaa).unwrap();
    assert_eq!(emu.mem_read(0xffff).unwrap(), 0xaaaa);
    assert_eq!(emu.mem_read(0x0000).unwrap(), 0);
}
