mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::{
    FRAME_COUNT, FRAME_SIZE, write_garbage, write_wav, write_y4m, write_y4m_with_bad_frame,
};

fn demux_decode(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_demux-decode"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to spawn demux-decode")
}

#[test]
fn no_arguments_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_demux-decode"))
        .env("RUST_LOG", "info")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("kind=\"usage\""));
}

#[test]
fn help_exits_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_demux-decode"))
        .arg("--help")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--ffmpeg-log-level"));
}

#[test]
fn decodes_every_picture_into_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_y4m(dir.path(), "clip.y4m", FRAME_COUNT);
    let destination = dir.path().join("clip.raw");

    let output = demux_decode(&[&source, &destination]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::metadata(&destination).unwrap().len() as usize;
    assert_eq!(written, FRAME_COUNT * FRAME_SIZE);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Demuxing succeeded."));
    assert!(stderr.contains("ffplay -f rawvideo -pix_fmt yuv420p -video_size 64x64"));
}

#[test]
fn discards_pictures_without_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_y4m(dir.path(), "clip.y4m", 3);

    let output = demux_decode(&[&source]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("/dev/null"));
}

#[test]
fn missing_source_fails_without_creating_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("missing.mp4");
    let destination = dir.path().join("out.raw");

    let output = demux_decode(&[&source, &destination]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!destination.exists());
}

#[test]
fn audio_only_source_fails_without_creating_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_wav(dir.path(), "tone.wav");
    let destination = dir.path().join("out.raw");

    let output = demux_decode(&[&source, &destination]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!destination.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not find video stream"));
}

#[test]
fn unrecognized_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_garbage(dir.path(), "garbage.mp4");

    let output = demux_decode(&[&source]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn hyphen_prefixed_source_is_a_path() {
    let dir = tempfile::tempdir().unwrap();
    write_y4m(dir.path(), "-clip.y4m", 2);

    let output = Command::new(env!("CARGO_BIN_EXE_demux-decode"))
        .current_dir(dir.path())
        .args(["-clip.y4m", "-clip.raw"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = fs::metadata(dir.path().join("-clip.raw")).unwrap().len() as usize;
    assert_eq!(written, 2 * FRAME_SIZE);
}

#[test]
fn corrupt_frame_fails_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_y4m_with_bad_frame(dir.path(), "broken.y4m", FRAME_COUNT, 6);
    let destination = dir.path().join("broken.raw");

    let output = demux_decode(&[&source, &destination]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error decoding video"), "stderr: {stderr}");
    assert!(!stderr.contains("Demuxing succeeded."));
}
