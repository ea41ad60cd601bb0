use image::{ColorType, Rgba, RgbaImage};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `chat-icon-gen` with no arguments inside an empty directory and asserts
/// that `app_icon.png` appears there as a 512×512 RGBA PNG with the expected layout.
#[test]
fn test_generates_app_icon_in_working_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = run_icon_gen(temp_path, &[]);
    assert_success(&output);

    let icon_path = temp_path.join("app_icon.png");
    assert!(
        icon_path.exists(),
        "app_icon.png should exist at: {}",
        icon_path.display()
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Icon generated: app_icon.png"),
        "Unexpected stdout: {}",
        stdout
    );

    let icon = image::open(&icon_path).expect("app_icon.png should be a valid PNG");
    assert_eq!(icon.width(), 512, "Icon width should be 512");
    assert_eq!(icon.height(), 512, "Icon height should be 512");
    assert_eq!(icon.color(), ColorType::Rgba8, "Icon should be 8-bit RGBA");

    let rgba_img = icon.to_rgba8();

    let center = rgba_img.get_pixel(256, 256);
    assert_eq!(center[3], 255, "Center pixel should be opaque");

    let dot = rgba_img.get_pixel(256, 250);
    assert_eq!(dot.0, [0x21, 0x96, 0xF3, 255], "Center dot should be the accent color");

    let bubble = rgba_img.get_pixel(256, 300);
    assert_eq!(bubble.0, [255, 255, 255, 255], "Bubble body should be white");

    for (x, y) in [(0, 0), (511, 0), (0, 511), (511, 511)] {
        assert_eq!(
            rgba_img.get_pixel(x, y)[3],
            0,
            "Corner ({}, {}) should be transparent",
            x,
            y
        );
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();
    let icon_path = temp_path.join("app_icon.png");

    assert_success(&run_icon_gen(temp_path, &[]));
    let first = std::fs::read(&icon_path).expect("Failed to read first icon");

    assert_success(&run_icon_gen(temp_path, &[]));
    let second = std::fs::read(&icon_path).expect("Failed to read second icon");

    assert!(!first.is_empty(), "Icon file should not be empty");
    assert_eq!(first, second, "Icon output should not change between runs");
}

#[test]
fn test_output_flag_overrides_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();
    let custom_path = temp_path.join("custom_icon.png");

    let output = run_icon_gen(temp_path, &[OsStr::new("-o"), custom_path.as_os_str()]);
    assert_success(&output);

    assert!(custom_path.exists(), "Custom output path should be written");
    assert!(
        !temp_path.join("app_icon.png").exists(),
        "Default file should not be written when --output is given"
    );

    let icon = image::open(&custom_path).expect("Custom icon should be a valid PNG");
    assert_eq!((icon.width(), icon.height()), (512, 512));
}

#[test]
fn test_unwritable_destination_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();
    let missing_dir_path = temp_path.join("missing").join("app_icon.png");

    let output = run_icon_gen(
        temp_path,
        &[OsStr::new("--output"), missing_dir_path.as_os_str()],
    );

    assert!(
        !output.status.success(),
        "Writing into a missing directory should fail"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to write icon"),
        "Unexpected stderr: {}",
        stderr
    );
    assert!(!missing_dir_path.exists(), "No file should be left behind");
}

#[test]
fn test_plain_cargo_run_targets_the_generator() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest.contains("default-run = \"chat-icon-gen\""),
        "`cargo run` without --bin should pick the icon generator"
    );
}

#[test]
fn test_verifier_accepts_generated_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    assert_success(&run_icon_gen(temp_path, &[]));

    let output = run_verify_icon(temp_path, &[OsStr::new("app_icon.png")]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("✓ Icon looks right!"),
        "Unexpected stdout: {}",
        stdout
    );
}

#[test]
fn test_verifier_fails_on_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();

    let output = run_verify_icon(temp_path, &[OsStr::new("no_such_icon.png")]);
    assert!(
        !output.status.success(),
        "Verifying a missing file should fail"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to open"),
        "Unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_verifier_rejects_square_opaque_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();
    let icon_path = temp_path.join("square.png");

    // Right size, but no rounded corners, bubble or dots
    let image = RgbaImage::from_pixel(512, 512, Rgba([10, 20, 30, 255]));
    image.save(&icon_path).expect("Failed to save square icon");

    let output = run_verify_icon(temp_path, &[icon_path.as_os_str()]);
    assert!(
        !output.status.success(),
        "A square opaque icon should not verify"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("did not match the expected icon"),
        "Unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_verifier_rejects_wrong_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path();
    let icon_path = temp_path.join("small.png");

    let image = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
    image.save(&icon_path).expect("Failed to save small icon");

    let output = run_verify_icon(temp_path, &[icon_path.as_os_str()]);
    assert!(!output.status.success(), "A 64x64 icon should not verify");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Expected a 512x512 icon"),
        "Unexpected stderr: {}",
        stderr
    );
}

fn run_icon_gen(working_dir: &Path, args: &[&OsStr]) -> Output {
    Command::new(icon_gen_binary_path())
        .args(args)
        .current_dir(working_dir)
        .output()
        .expect("Failed to run chat-icon-gen command")
}

fn run_verify_icon(working_dir: &Path, args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_verify_icon"))
        .args(args)
        .current_dir(working_dir)
        .output()
        .expect("Failed to run verify_icon command")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("chat-icon-gen command failed");
    }
}

/// Path to the binary Cargo built for this test run
fn icon_gen_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chat-icon-gen"))
}
