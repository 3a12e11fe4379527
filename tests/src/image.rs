use crate::setup;

use common::mem::words_to_bytes;
use emu_lib::{read_image_file, EmuError};
use obj::{Image, ImageError};

use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lc3-{}-{name}.obj", std::process::id()))
}

#[test]
fn load_sets_only_payload() {
    let (mut emu, _) = setup(&[]);
    emu.load_bytes(&[0x30, 0x00, 0xaa, 0xaa, 0xbb, 0xbb]).unwrap();

    let state = emu.get_state();
    assert_eq!(state.mem_read(0x3000), 0xaaaa);
    assert_eq!(state.mem_read(0x3001), 0xbbbb);
    let nonzero = (0..=u16::MAX).filter(|addr| state.mem_read(*addr) != 0).count();
    assert_eq!(nonzero, 2);
}

#[test]
fn overlap_last_write_wins() {
    let (mut emu, _) = setup(&[]);
    emu.load_image(&Image::new(0x3000, vec![1, 2, 3, 4]));
    emu.load_image(&Image::new(0x3002, vec![9, 10]));

    let mem: Vec<u16> = (0x3000..0x3004).map(|addr| emu.get_state().mem_read(addr)).collect();
    assert_eq!(mem, [1, 2, 9, 10]);
}

#[test]
fn load_wraps_at_top() {
    let (mut emu, _) = setup(&[]);
    emu.load_image(&Image::new(0xfffe, vec![1, 2, 3]));
    assert_eq!(emu.get_state().mem_read(0xfffe), 1);
    assert_eq!(emu.get_state().mem_read(0xffff), 2);
    assert_eq!(emu.get_state().mem_read(0x0000), 3);
}

#[test]
fn load_and_run_file() {
    let path = temp_path("hello");
    let image = Image::new(0x3000, vec![
        0xe002, // LEA R0, msg
        0xf022, // PUTS
        0xf025, // HALT
        b'o' as u16,
        b'k' as u16,
        0x0000,
    ]);
    let mut file = std::fs::File::create(&path).unwrap();
    image.write_to(&mut file).unwrap();
    drop(file);

    let (mut emu, con) = setup(&[]);
    let res = emu.load_file(&path);
    std::fs::remove_file(&path).unwrap();
    res.unwrap();

    emu.run().unwrap();
    assert_eq!(con.output_string(), "ok");
}

#[test]
fn odd_trailing_byte() {
    let mut bytes = words_to_bytes(&[0x3000, 0x1234]);
    bytes.push(0x56);
    let (mut emu, _) = setup(&[]);
    emu.load_bytes(&bytes).unwrap();
    assert_eq!(emu.get_state().mem_read(0x3001), 0x5600);
}

#[test]
fn missing_file() {
    let (mut emu, _) = setup(&[]);
    let err = emu.load_file(temp_path("does-not-exist")).unwrap_err();
    let EmuError::Image { source: ImageError::Io(e), .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn truncated_file() {
    let path = temp_path("truncated");
    std::fs::write(&path, [0x30]).unwrap();

    let (mut emu, _) = setup(&[]);
    let res = emu.load_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(res, Err(EmuError::Image { source: ImageError::MissingOrigin { len: 1 }, .. })));
}

#[test]
fn read_image_file_needs_no_machine() {
    let path = temp_path("standalone");
    std::fs::write(&path, [0x30, 0x00, 0xf0, 0x25]).unwrap();
    let res = read_image_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(res.unwrap(), Image::new(0x3000, vec![0xf025]));

    let missing = temp_path("standalone-missing");
    let err = read_image_file(&missing).unwrap_err();
    let EmuError::Image { path, source: ImageError::Io(e) } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(path, &missing.display().to_string());
    assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
}
