use std::process::ExitCode;
use std::sync::Arc;

use common::constants::PC_START;
use emu_lib::io::TerminalConsole;
use emu_lib::{read_image_file, EmuError, Emulator};
use obj::Image;

use clap::Parser;


/// LC-3 Emulator
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Object images to load, in order. Later images overwrite earlier ones where
    /// they overlap.
    #[arg(required = true)]
    images: Vec<String>,

    /// Address at which to start executing (hex with 0x/x prefix, or decimal).
    #[arg(long, default_value_t = PC_START, value_parser = parse_addr)]
    start: u16,
}

fn parse_addr(s: &str) -> Result<u16, String> {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('x'))
        .or_else(|| s.strip_prefix('X'));
    match hex {
        Some(digits) => u16::from_str_radix(digits, 16),
        None => s.parse::<u16>(),
    }
    .map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn read_images(paths: &[String]) -> Result<Vec<Image>, EmuError> {
    paths.iter().map(read_image_file).collect()
}

fn run(args: &Args) -> Result<(), EmuError> {
    // Images are read before the terminal goes raw, so load errors aren't
    // masked by console setup.
    let images = read_images(&args.images)?;

    let console = Arc::new(TerminalConsole::new()?);
    let mut emu = Emulator::new(console);
    for image in &images {
        emu.load_image(image);
    }

    emu.run_at(args.start)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    // The terminal is restored when the emulator is dropped at the end of run().
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}
