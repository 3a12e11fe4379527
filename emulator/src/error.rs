use std::io;

use obj::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmuError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: ImageError,
    },

    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}
