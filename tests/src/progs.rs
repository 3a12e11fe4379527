use crate::run;

use common::asm::Reg;

#[test]
fn countdown() {
    let (_, con) = run(&[
        0x2209, // LD R1, count
        0x2409, // LD R2, zero
        0x1042, // loop: ADD R0, R1, R2
        0xf021, // OUT
        0x127f, // ADD R1, R1, #-1
        0x03fc, // BRp loop
        0x2005, // LD R0, newline
        0xf021, // OUT
        0xf025, // HALT
        0x0000,
        0x0003, // count
        0x0030, // zero: '0'
        0x000a, // newline
    ]);
    assert_eq!(con.output_string(), "321\n");
}

#[test]
fn multiply_subroutine() {
    let (emu, _) = run(&[
        0x2209, // LD R1, a
        0x2409, // LD R2, b
        0x4802, // JSR mul
        0x3008, // ST R0, res
        0xf025, // HALT
        0x5020, // mul: AND R0, R0, #0
        0x1001, // loop: ADD R0, R0, R1
        0x14bf, // ADD R2, R2, #-1
        0x03fd, // BRp loop
        0xc1c0, // RET
        0x0006, // a
        0x0007, // b
        0x0000, // res
    ]);
    assert_eq!(emu.get_state().mem_read(0x300c), 42);
    assert_eq!(emu.reg_read(Reg::R7), 0x3003);
    assert_eq!(emu.num_ins(), 3 + 1 + 7 * 3 + 1 + 2);
}
