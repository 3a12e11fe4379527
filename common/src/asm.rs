use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

pub const NUM_REGS: usize = 8;

impl Reg {
    pub const NUM_BITS: usize = 3;
    pub const MASK: u16 = (1u16 << Self::NUM_BITS) - 1;

    pub const ALL: [Reg; NUM_REGS] = [
        Reg::R0, Reg::R1, Reg::R2, Reg::R3, Reg::R4, Reg::R5, Reg::R6, Reg::R7,
    ];

    // Only the low three bits are looked at.
    pub fn from_bits(bits: u16) -> Reg {
        Self::ALL[(bits & Self::MASK) as usize]
    }

    pub fn idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Opcode {
    Br = 0,
    Add,
    Ld,
    St,
    Jsr,
    And,
    Ldr,
    Str,
    Rti,
    Not,
    Ldi,
    Sti,
    Jmp,
    Res,
    Lea,
    Trap,
}

impl Opcode {
    pub const NUM_BITS: usize = 4;
    pub const LOWER_BITS: usize = (u16::BITS as usize) - Self::NUM_BITS;
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum TrapVector {
    Getc = 0x20,
    Out,
    Puts,
    In,
    Putsp,
    Halt,
}

impl TrapVector {
    pub const MASK: u16 = 0xff;
}

impl fmt::Display for TrapVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

// Condition codes. The discriminants are the bits used by the nzp field of BR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Pos = 1 << 0,
    Zero = 1 << 1,
    Neg = 1 << 2,
}

impl Cond {
    pub fn from_result(val: u16) -> Cond {
        if val == 0 {
            Cond::Zero
        } else if val >> 15 != 0 {
            Cond::Neg
        } else {
            Cond::Pos
        }
    }

    pub fn bits(self) -> u16 {
        self as u16
    }

    pub fn matches(self, n: bool, z: bool, p: bool) -> bool {
        let mask = ((n as u16) << 2) | ((z as u16) << 1) | (p as u16);
        mask & self.bits() != 0
    }
}

////////////////////////////////////////////////////////////////////////////////

// Second operand of ADD and AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Src {
    Reg(Reg),
    Imm(u16), // Already sign extended
}

impl fmt::Display for Src {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Src::Reg(r) => write!(f, "{r}"),
            Src::Imm(imm) => write!(f, "#{}", *imm as i16),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsrTarget {
    Offset(u16), // JSR
    Reg(Reg),    // JSRR
}

// A decoded instruction. Offsets and immediates are stored sign extended to 16 bits,
// so handlers can add them with wrapping arithmetic directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ins {
    Br { n: bool, z: bool, p: bool, offset: u16 },
    Add { dr: Reg, sr1: Reg, src2: Src },
    Ld { dr: Reg, offset: u16 },
    St { sr: Reg, offset: u16 },
    Jsr { target: JsrTarget },
    And { dr: Reg, sr1: Reg, src2: Src },
    Ldr { dr: Reg, base: Reg, offset: u16 },
    Str { sr: Reg, base: Reg, offset: u16 },
    Rti,
    Not { dr: Reg, sr: Reg },
    Ldi { dr: Reg, offset: u16 },
    Sti { sr: Reg, offset: u16 },
    Jmp { base: Reg },
    Res,
    Lea { dr: Reg, offset: u16 },
    Trap { vector: u8 },
}

impl Ins {
    pub fn opcode(&self) -> Opcode {
        match self {
            Ins::Br { .. } => Opcode::Br,
            Ins::Add { .. } => Opcode::Add,
            Ins::Ld { .. } => Opcode::Ld,
            Ins::St { .. } => Opcode::St,
            Ins::Jsr { .. } => Opcode::Jsr,
            Ins::And { .. } => Opcode::And,
            Ins::Ldr { .. } => Opcode::Ldr,
            Ins::Str { .. } => Opcode::Str,
            Ins::Rti => Opcode::Rti,
            Ins::Not { .. } => Opcode::Not,
            Ins::Ldi { .. } => Opcode::Ldi,
            Ins::Sti { .. } => Opcode::Sti,
            Ins::Jmp { .. } => Opcode::Jmp,
            Ins::Res => Opcode::Res,
            Ins::Lea { .. } => Opcode::Lea,
            Ins::Trap { .. } => Opcode::Trap,
        }
    }

    // Whether executing this writes the condition register.
    pub fn sets_cond(&self) -> bool {
        matches!(
            self.opcode(),
            Opcode::Add | Opcode::And | Opcode::Not | Opcode::Ld | Opcode::Ldi | Opcode::Ldr | Opcode::Lea
        )
    }

    // Like Display, but PC-relative offsets are resolved to absolute addresses.
    // pc is the address of this instruction.
    pub fn fmt_with_pc(&self, f: &mut fmt::Formatter, pc: u16) -> fmt::Result {
        let next = pc.wrapping_add(1);
        let target = |offset: u16| next.wrapping_add(offset);
        match *self {
            Ins::Br { offset, .. } => write!(f, "{}\tx{:04X}", self.mnemonic(), target(offset)),
            Ins::Jsr { target: JsrTarget::Offset(offset) } => write!(f, "JSR\tx{:04X}", target(offset)),
            Ins::Ld { dr, offset } | Ins::Ldi { dr, offset } | Ins::Lea { dr, offset } => {
                write!(f, "{}\t{dr}, x{:04X}", self.opcode(), target(offset))
            },
            Ins::St { sr, offset } | Ins::Sti { sr, offset } => {
                write!(f, "{}\t{sr}, x{:04X}", self.opcode(), target(offset))
            },
            _ => fmt::Display::fmt(self, f),
        }
    }

    pub fn display_with_pc(&self, pc: u16) -> DisplayWithPc<'_> {
        DisplayWithPc { ins: self, pc }
    }

    fn mnemonic(&self) -> String {
        match *self {
            Ins::Br { n, z, p, .. } => {
                let mut s = String::from("BR");
                if n { s.push('n'); }
                if z { s.push('z'); }
                if p { s.push('p'); }
                s
            },
            Ins::Jmp { base: Reg::R7 } => "RET".into(),
            Ins::Jsr { target: JsrTarget::Reg(_) } => "JSRR".into(),
            _ => self.opcode().to_string(),
        }
    }
}

impl fmt::Display for Ins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = self.mnemonic();
        match *self {
            Ins::Br { offset, .. } => write!(f, "{op}\t#{}", offset as i16),
            Ins::Add { dr, sr1, src2 } | Ins::And { dr, sr1, src2 } => write!(f, "{op}\t{dr}, {sr1}, {src2}"),
            Ins::Ld { dr, offset } | Ins::Ldi { dr, offset } | Ins::Lea { dr, offset } => {
                write!(f, "{op}\t{dr}, #{}", offset as i16)
            },
            Ins::St { sr, offset } | Ins::Sti { sr, offset } => write!(f, "{op}\t{sr}, #{}", offset as i16),
            Ins::Jsr { target: JsrTarget::Offset(offset) } => write!(f, "{op}\t#{}", offset as i16),
            Ins::Jsr { target: JsrTarget::Reg(base) } => write!(f, "{op}\t{base}"),
            Ins::Ldr { dr, base, offset } => write!(f, "{op}\t{dr}, {base}, #{}", offset as i16),
            Ins::Str { sr, base, offset } => write!(f, "{op}\t{sr}, {base}, #{}", offset as i16),
            Ins::Not { dr, sr } => write!(f, "{op}\t{dr}, {sr}"),
            Ins::Jmp { base: Reg::R7 } => write!(f, "{op}"),
            Ins::Jmp { base } => write!(f, "{op}\t{base}"),
            Ins::Rti | Ins::Res => write!(f, "{op}"),
            Ins::Trap { vector } => write!(f, "{op}\tx{vector:02X}"),
        }
    }
}

pub struct DisplayWithPc<'a> {
    ins: &'a Ins,
    pc: u16,
}

impl fmt::Display for DisplayWithPc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ins.fmt_with_pc(f, self.pc)
    }
}
