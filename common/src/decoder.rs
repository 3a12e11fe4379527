use num_traits::FromPrimitive;

use super::asm::*;

// Widen the low `bits` bits of val to 16 bits, replicating bit `bits - 1`.
pub fn sign_extend(val: u16, bits: u32) -> u16 {
    assert!((1..=u16::BITS).contains(&bits));
    let shift = u16::BITS - bits;
    (((val << shift) as i16) >> shift) as u16
}

fn field(ins: u16, shift: usize, bits: u32) -> u16 {
    (ins >> shift) & ((1u16 << bits) - 1)
}

fn dr(ins: u16) -> Reg {
    Reg::from_bits(ins >> 9)
}

fn sr1(ins: u16) -> Reg {
    Reg::from_bits(ins >> 6)
}

fn pc_offset9(ins: u16) -> u16 {
    sign_extend(field(ins, 0, 9), 9)
}

fn offset6(ins: u16) -> u16 {
    sign_extend(field(ins, 0, 6), 6)
}

fn src2(ins: u16) -> Src {
    if field(ins, 5, 1) != 0 {
        Src::Imm(sign_extend(field(ins, 0, 5), 5))
    } else {
        Src::Reg(Reg::from_bits(ins))
    }
}

pub fn decode_opcode(ins: u16) -> Opcode {
    let op = ins >> Opcode::LOWER_BITS;
    let Some(opcode) = Opcode::from_u16(op) else {
        unreachable!("4 bit opcode {op:#x} not covered by Opcode");
    };
    opcode
}

pub fn decode(ins: u16) -> Ins {
    match decode_opcode(ins) {
        Opcode::Br => Ins::Br {
            n: field(ins, 11, 1) != 0,
            z: field(ins, 10, 1) != 0,
            p: field(ins, 9, 1) != 0,
            offset: pc_offset9(ins),
        },
        Opcode::Add => Ins::Add { dr: dr(ins), sr1: sr1(ins), src2: src2(ins) },
        Opcode::And => Ins::And { dr: dr(ins), sr1: sr1(ins), src2: src2(ins) },
        Opcode::Not => Ins::Not { dr: dr(ins), sr: sr1(ins) },
        Opcode::Ld => Ins::Ld { dr: dr(ins), offset: pc_offset9(ins) },
        Opcode::Ldi => Ins::Ldi { dr: dr(ins), offset: pc_offset9(ins) },
        Opcode::Lea => Ins::Lea { dr: dr(ins), offset: pc_offset9(ins) },
        Opcode::St => Ins::St { sr: dr(ins), offset: pc_offset9(ins) },
        Opcode::Sti => Ins::Sti { sr: dr(ins), offset: pc_offset9(ins) },
        Opcode::Ldr => Ins::Ldr { dr: dr(ins), base: sr1(ins), offset: offset6(ins) },
        Opcode::Str => Ins::Str { sr: dr(ins), base: sr1(ins), offset: offset6(ins) },
        Opcode::Jmp => Ins::Jmp { base: sr1(ins) },
        Opcode::Jsr => {
            let target = if field(ins, 11, 1) != 0 {
                JsrTarget::Offset(sign_extend(field(ins, 0, 11), 11))
            } else {
                JsrTarget::Reg(sr1(ins))
            };
            Ins::Jsr { target }
        },
        Opcode::Trap => Ins::Trap { vector: (ins & TrapVector::MASK) as u8 },
        Opcode::Rti => Ins::Rti,
        Opcode::Res => Ins::Res,
    }
}
