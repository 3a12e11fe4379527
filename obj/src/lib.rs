use std::io::{self, Read, Write};

use common::mem::{ReadU16, WriteU16};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("image of {len} byte(s) has no origin word")]
    MissingOrigin { len: usize },
}

// An object image: the first word is the load address, the rest are loaded
// consecutively from there. Everything is big endian, with no header beyond the
// origin; an odd trailing byte is the high half of a final word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub origin: u16,
    pub words: Vec<u16>,
}

impl Image {
    pub fn new(origin: u16, words: Vec<u16>) -> Image {
        Image { origin, words }
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Image, ImageError> {
        let len = bytes.len();
        if len < 2 {
            return Err(ImageError::MissingOrigin { len });
        }
        let origin = u16::from_be_bytes([bytes[0], bytes[1]]);
        bytes = &bytes[2..];

        let mut words = Vec::with_capacity(len.div_ceil(2) - 1);
        while let Some(word) = bytes.read_u16()? {
            words.push(word);
        }
        Ok(Image { origin, words })
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Image, ImageError> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_u16(self.origin)?;
        for word in &self.words {
            writer.write_u16(*word)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((self.words.len() + 1) * 2);
        self.write_to(&mut out).expect("write to Vec");
        out
    }

    // (address, word) pairs in load order, wrapping at the top of memory.
    pub fn placements(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let mut addr = self.origin;
        self.words.iter().map(move |word| {
            let at = addr;
            addr = addr.wrapping_add(1);
            (at, *word)
        })
    }
}
