use crate::common::file::{write_file, FileSpec};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_nit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with a single tracked file `1.txt` committed on master
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let file = FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one\n".to_string(),
    );
    write_file(file);

    run_nit_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    nit_commit(init_repository_dir.path(), "first commit")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_nit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("nit").expect("Failed to find nit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Commit with a pinned clock so commit ids stay deterministic
pub fn nit_commit(dir: &Path, message: &str) -> Command {
    nit_commit_at(dir, message, "2023-01-01 12:00:00 +0000")
}

pub fn nit_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_nit_command(dir, &["commit", message]);
    cmd.env("NIT_COMMIT_DATE", date);
    cmd
}

/// Read the commit id the active branch points to
pub fn head_commit_id(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".nit").join("HEAD"))
        .expect("Failed to read HEAD");
    let branch_path = dir.join(".nit").join("branches").join(head.trim());

    std::fs::read_to_string(&branch_path)
        .unwrap_or_else(|e| panic!("Failed to read branch file {:?}: {}", branch_path, e))
        .trim()
        .to_string()
}
