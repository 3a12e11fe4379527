use std::io::{self, Read, Write};

// Words are stored big endian in images.

pub trait ReadU16 {
    // Ok(None) on a clean EOF; a lone trailing byte is padded with a zero low byte.
    fn read_u16(&mut self) -> io::Result<Option<u16>>;
}

impl<T: Read> ReadU16 for T {
    fn read_u16(&mut self) -> io::Result<Option<u16>> {
        let mut buf = [0u8; 2];
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if filled == 0 {
            return Ok(None);
        }
        Ok(Some(u16::from_be_bytes(buf)))
    }
}

////////////////////////////////////////////////////////////////////////////////

pub trait WriteU16 {
    fn write_u16(&mut self, val: u16) -> io::Result<()>;
}

impl<T: Write> WriteU16 for T {
    fn write_u16(&mut self, val: u16) -> io::Result<()> {
        self.write_all(&val.to_be_bytes())
    }
}

pub fn words_to_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}
