//! End-to-end tests of the `bmpcopy` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn bmpcopy<I, S>(args: I, cwd: &Path) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_bmpcopy"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn assert_usage_exit(out: &Output) {
    assert!(!out.status.success());
    // The OS keeps only the low byte of the exit status.
    #[cfg(unix)]
    assert_eq!(out.status.code(), Some(1000 & 0xFF));
    #[cfg(windows)]
    assert_eq!(out.status.code(), Some(1000));
    assert!(stdout(out).contains("Usage: bmpcopy [input path] [output path]"));
}

fn write_2x2_24bit(path: &Path) -> Vec<u8> {
    let mut data = vec![0u8; 54];
    data[0..2].copy_from_slice(b"BM");
    data[18..22].copy_from_slice(&[0x02, 0x00, 0x00, 0x00]);
    data[22..26].copy_from_slice(&[0x02, 0x00, 0x00, 0x00]);
    data[28..32].copy_from_slice(&[0x18, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0xAB, 0xCD, 0xEF, 0x01]);
    fs::write(path, &data).unwrap();
    data
}

fn header(width: i32, height: i32, bit_depth: i32) -> Vec<u8> {
    let mut h = vec![0u8; 54];
    h[0..2].copy_from_slice(b"BM");
    h[18..22].copy_from_slice(&width.to_le_bytes());
    h[22..26].copy_from_slice(&height.to_le_bytes());
    h[28..32].copy_from_slice(&bit_depth.to_le_bytes());
    h
}

fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn copies_and_reports_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_2x2_24bit(&dir.path().join("in.bmp"));

    let out = bmpcopy(["in.bmp", "out.bmp"], dir.path());
    assert!(out.status.success(), "{out:?}");
    assert_eq!(fs::read(dir.path().join("out.bmp")).unwrap(), data);

    let text = stdout(&out);
    assert!(text.contains("Copy successful!"));
    assert!(text.contains("Width: 2"));
    assert!(text.contains("Height: 2"));
}

#[test]
fn no_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let out = bmpcopy(Vec::<&str>::new(), dir.path());
    assert_usage_exit(&out);
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn one_argument() {
    let dir = tempfile::tempdir().unwrap();
    write_2x2_24bit(&dir.path().join("in.bmp"));
    let out = bmpcopy(["in.bmp"], dir.path());
    assert_usage_exit(&out);
    assert_eq!(dir_entries(dir.path()), 1);
}

#[test]
fn three_arguments() {
    let dir = tempfile::tempdir().unwrap();
    write_2x2_24bit(&dir.path().join("in.bmp"));
    let out = bmpcopy(["in.bmp", "out.bmp", "extra.bmp"], dir.path());
    assert_usage_exit(&out);
    assert!(!dir.path().join("out.bmp").exists());
    assert!(!dir.path().join("extra.bmp").exists());
}

#[test]
fn help_flag_is_just_a_wrong_arity() {
    let dir = tempfile::tempdir().unwrap();
    let out = bmpcopy(["--help"], dir.path());
    assert_usage_exit(&out);
}

#[test]
fn truncated_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.bmp"), [0u8; 30]).unwrap();

    let out = bmpcopy(["in.bmp", "out.bmp"], dir.path());
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    assert!(!stdout(&out).contains("Copy successful!"));
    assert!(!dir.path().join("out.bmp").exists());
}

#[test]
fn missing_input_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let out = bmpcopy(["nope.bmp", "out.bmp"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("out.bmp").exists());
}

#[test]
fn copies_palette_of_8bit_image() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = header(3, 2, 8);
    let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 0]).collect();
    data.extend_from_slice(&palette);
    data.extend_from_slice(&[0, 1, 2, 253, 254, 255]);
    fs::write(dir.path().join("gray.bmp"), &data).unwrap();

    let out = bmpcopy(["gray.bmp", "copy.bmp"], dir.path());
    assert!(out.status.success(), "{out:?}");
    let copied = fs::read(dir.path().join("copy.bmp")).unwrap();
    assert_eq!(copied.len(), 54 + 1024 + 6);
    assert_eq!(&copied[54..54 + 1024], &palette[..]);
    assert_eq!(copied, data);
    assert!(stdout(&out).contains("Width: 3"));
    assert!(stdout(&out).contains("Height: 2"));
}

#[test]
fn negative_height_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = header(2, -2, 24);
    data.extend_from_slice(&[0u8; 4]);
    fs::write(dir.path().join("in.bmp"), &data).unwrap();

    let out = bmpcopy(["in.bmp", "out.bmp"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!stdout(&out).contains("Copy successful!"));
    assert!(!dir.path().join("out.bmp").exists());
}

#[test]
fn double_dash_counts_as_argument() {
    let dir = tempfile::tempdir().unwrap();
    write_2x2_24bit(&dir.path().join("in.bmp"));
    let out = bmpcopy(["--", "in.bmp", "out.bmp"], dir.path());
    assert_usage_exit(&out);
    assert!(!dir.path().join("out.bmp").exists());
}
