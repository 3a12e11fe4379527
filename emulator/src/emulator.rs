use common::asm::*;
use common::decoder::decode;
use crate::io::{Console, Keyboard, MMIOHandler};
use crate::{EmuError, EmulatorState};

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use delegate::delegate;
use log::{debug, info, warn};
use obj::Image;


// Reads and parses an image without touching any machine, so load errors can be
// reported before the console is set up.
pub fn read_image_file(path: impl AsRef<Path>) -> Result<Image, EmuError> {
    let path = path.as_ref();
    let image_err = |source| EmuError::Image { path: path.display().to_string(), source };

    let mut file = File::open(path).map_err(|e| image_err(e.into()))?;
    let image = Image::read_from(&mut file).map_err(image_err)?;
    info!("Read {} words for {:#06x} from {}", image.words.len(), image.origin, path.display());
    Ok(image)
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecRet {
    Ok,
    Halt,
}


pub struct Emulator {
    state: EmulatorState,
    pub(crate) console: Arc<dyn Console>,
    mmio_handlers: Vec<Box<dyn MMIOHandler>>,
    mmio_addrs: HashMap<u16, usize>,
    running: bool,
}

impl Emulator {
    pub fn new(console: Arc<dyn Console>) -> Emulator {
        let mut emu = Emulator {
            state: EmulatorState::new(),
            console: console.clone(),
            mmio_handlers: vec![],
            mmio_addrs: HashMap::new(),
            running: true,
        };
        emu.set_mmio_handler(Keyboard::new(console));
        emu
    }

    delegate! {
        to self.state {
            pub fn reg_read(&self, reg: Reg) -> u16;
            pub fn reg_write(&mut self, reg: Reg, val: u16);
            pub fn pc(&self) -> u16;
            pub fn set_pc(&mut self, pc: u16);
            pub fn cond(&self) -> Option<Cond>;
            pub fn num_ins(&self) -> usize;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn halt(&mut self) {
        self.running = false;
    }

    // Run until a halt.
    pub fn run(&mut self) -> Result<(), EmuError> {
        info!("CPU start at {:#06x}", self.pc());
        while self.run_ins()? != ExecRet::Halt {}
        info!("Halted after {} instructions", self.num_ins());
        Ok(())
    }

    pub fn run_at(&mut self, pc: u16) -> Result<(), EmuError> {
        self.set_pc(pc);
        self.run()
    }

    // Fetch and execute a single instruction. Does nothing once halted.
    pub fn run_ins(&mut self) -> Result<ExecRet, EmuError> {
        if !self.running {
            return Ok(ExecRet::Halt);
        }
        let ins = self.fetch()?;
        self.execute(ins)
    }

    // Returns the word at PC, advancing PC past it.
    pub fn fetch(&mut self) -> Result<u16, EmuError> {
        let pc = self.pc();
        let ins = self.mem_read(pc)?;
        self.set_pc(pc.wrapping_add(1));
        Ok(ins)
    }

    // PC must already point past the instruction, as after fetch().
    pub fn execute(&mut self, word: u16) -> Result<ExecRet, EmuError> {
        let ins = decode(word);
        let addr = self.pc().wrapping_sub(1);
        debug!("PC: {addr:#06x}: {}", ins.display_with_pc(addr));
        self.state.inc_ins();
        self.exec(&ins)
    }

    pub fn load_image(&mut self, image: &Image) {
        for (addr, word) in image.placements() {
            self.state.mem_write(addr, word);
        }
        info!("Loaded {} words at {:#06x}", image.words.len(), image.origin);
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), obj::ImageError> {
        let image = Image::from_bytes(bytes)?;
        self.load_image(&image);
        Ok(())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), EmuError> {
        let image = read_image_file(path)?;
        self.load_image(&image);
        Ok(())
    }

    pub fn set_mmio_handler(&mut self, handler: impl MMIOHandler + 'static) {
        let addrs = handler.default_addrs().to_vec();
        self.set_mmio_handler_for(handler, addrs);
    }

    pub fn set_mmio_handler_for<M, I>(&mut self, handler: M, addrs: I)
    where
        M: MMIOHandler + 'static,
        I: IntoIterator<Item = u16> {

        let idx = self.mmio_handlers.len();
        self.mmio_handlers.push(Box::new(handler));
        for addr in addrs {
            let prev = self.mmio_addrs.insert(addr, idx);
            assert!(prev.is_none(), "Duplicate MMIOHandler for {addr:#06x}");
        }
    }


    ///////////////////////////////////////////////////////////////////////////


    pub fn mem_read(&mut self, addr: u16) -> Result<u16, EmuError> {
        if let Some(&idx) = self.mmio_addrs.get(&addr) {
            return self.mmio_handlers[idx].read_word(&mut self.state, addr);
        }
        Ok(self.state.mem_read(addr))
    }

    pub fn mem_write(&mut self, addr: u16, val: u16) -> Result<(), EmuError> {
        if let Some(&idx) = self.mmio_addrs.get(&addr) {
            return self.mmio_handlers[idx].write_word(&mut self.state, addr, val);
        }
        self.state.mem_write(addr, val);
        Ok(())
    }

    pub fn get_state(&self) -> &EmulatorState {
        &self.state
    }

    pub fn get_state_mut(&mut self) -> &mut EmulatorState {
        &mut self.state
    }

    fn write_reg_cond(&mut self, reg: Reg, val: u16) {
        self.state.reg_write(reg, val);
        self.state.set_cond(Cond::from_result(val));
    }

    fn src_val(&self, src: Src) -> u16 {
        match src {
            Src::Reg(r) => self.reg_read(r),
            Src::Imm(imm) => imm,
        }
    }

    fn pc_rel(&self, offset: u16) -> u16 {
        self.pc().wrapping_add(offset)
    }

    ///////////////////////////////////////////////////////////////////////////
    // Execute
    ///////////////////////////////////////////////////////////////////////////

    fn exec_br_ins(&mut self, n: bool, z: bool, p: bool, offset: u16) {
        if self.cond().is_some_and(|c| c.matches(n, z, p)) {
            self.set_pc(self.pc_rel(offset));
        }
    }

    fn exec_jsr_ins(&mut self, target: JsrTarget) {
        self.reg_write(Reg::R7, self.pc());
        let new_pc = match target {
            JsrTarget::Offset(offset) => self.pc_rel(offset),
            JsrTarget::Reg(base) => self.reg_read(base),
        };
        self.set_pc(new_pc);
    }

    fn exec(&mut self, ins: &Ins) -> Result<ExecRet, EmuError> {
        match *ins {
            Ins::Add { dr, sr1, src2 } => {
                let res = self.reg_read(sr1).wrapping_add(self.src_val(src2));
                self.write_reg_cond(dr, res);
            },
            Ins::And { dr, sr1, src2 } => {
                let res = self.reg_read(sr1) & self.src_val(src2);
                self.write_reg_cond(dr, res);
            },
            Ins::Not { dr, sr } => {
                let res = !self.reg_read(sr);
                self.write_reg_cond(dr, res);
            },
            Ins::Br { n, z, p, offset } => self.exec_br_ins(n, z, p, offset),
            Ins::Jmp { base } => self.set_pc(self.reg_read(base)),
            Ins::Jsr { target } => self.exec_jsr_ins(target),
            Ins::Ld { dr, offset } => {
                let val = self.mem_read(self.pc_rel(offset))?;
                self.write_reg_cond(dr, val);
            },
            Ins::Ldi { dr, offset } => {
                let addr = self.mem_read(self.pc_rel(offset))?;
                let val = self.mem_read(addr)?;
                self.write_reg_cond(dr, val);
            },
            Ins::Ldr { dr, base, offset } => {
                let val = self.mem_read(self.reg_read(base).wrapping_add(offset))?;
                self.write_reg_cond(dr, val);
            },
            Ins::Lea { dr, offset } => self.write_reg_cond(dr, self.pc_rel(offset)),
            Ins::St { sr, offset } => self.mem_write(self.pc_rel(offset), self.reg_read(sr))?,
            Ins::Sti { sr, offset } => {
                let addr = self.mem_read(self.pc_rel(offset))?;
                self.mem_write(addr, self.reg_read(sr))?;
            },
            Ins::Str { sr, base, offset } => {
                self.mem_write(self.reg_read(base).wrapping_add(offset), self.reg_read(sr))?
            },
            Ins::Trap { vector } => return self.exec_trap_ins(vector),
            Ins::Rti | Ins::Res => {
                warn!("{} at {:#06x} not implemented, ignoring", ins.opcode(), self.pc().wrapping_sub(1));
            },
        }

        Ok(ExecRet::Ok)
    }
}
