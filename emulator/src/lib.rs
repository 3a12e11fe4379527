pub mod emulator;
pub mod emulator_state;
pub mod error;
pub mod io;
mod trap;

pub use emulator::{read_image_file, Emulator, ExecRet};
pub use emulator_state::EmulatorState;
pub use error::EmuError;
pub use io::MMIOHandler;
