//! Batch runs against a stand-in transcoder script.
//!
//! The script copies its input to its output, except for inputs named
//! `b.mp4`, where it prints a diagnostic and exits 1.

#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const FAKE_FFMPEG: &str = r#"#!/bin/sh
[ "$1" = "-y" ] || { echo "missing overwrite flag" >&2; exit 3; }
[ "$4" = "-vn" ] || { echo "missing drop video flag" >&2; exit 3; }
input="$3"
for output; do :; done
case "$input" in
    */b.mp4) echo "b.mp4: Invalid data found when processing input" >&2; exit 1 ;;
esac
cp "$input" "$output"
"#;

fn install_fake_ffmpeg(dir: &Path) -> PathBuf {
    let path = dir.join("fake-ffmpeg");
    fs::write(&path, FAKE_FFMPEG).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[allow(deprecated)]
fn run(workdir: &Path, src: &Path, dst: &Path, ffmpeg: &Path) -> assert_cmd::assert::Assert {
    Command::cargo_bin("video_to_audio")
        .unwrap()
        .current_dir(workdir)
        .env_remove("RUST_LOG")
        .arg(src)
        .arg(dst)
        .arg("--ffmpeg")
        .arg(ffmpeg)
        .arg("--no-progress")
        .assert()
}

#[test]
fn test_one_bad_file_does_not_stop_the_batch_and_rerun_is_idempotent() {
    let work = tempdir().unwrap();
    let ffmpeg = install_fake_ffmpeg(work.path());
    let src = work.path().join("src");
    let dst = work.path().join("dst");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.mp4"), b"a").unwrap();
    fs::write(src.join("b.mp4"), b"b").unwrap();
    fs::write(src.join("sub/c.mp4"), b"c").unwrap();

    run(work.path(), &src, &dst, &ffmpeg)
        .success()
        .stdout(predicate::str::contains("成功: 2 | 失敗: 1"))
        .stdout(predicate::str::contains("Invalid data found when processing input"));

    assert_eq!(fs::read(dst.join("a.mp3")).unwrap(), b"a");
    assert!(!dst.join("b.mp3").exists());
    assert_eq!(fs::read(dst.join("sub/c.mp3")).unwrap(), b"c");

    fs::write(src.join("a.mp4"), b"a2").unwrap();
    run(work.path(), &src, &dst, &ffmpeg)
        .success()
        .stdout(predicate::str::contains("成功: 2 | 失敗: 1"));
    assert_eq!(fs::read(dst.join("a.mp3")).unwrap(), b"a2");
}
