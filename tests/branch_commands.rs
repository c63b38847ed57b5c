use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::command::{
    committed_repository_dir, head_commit_id, init_repository_dir, nit_commit, run_nit_command,
};
use common::file::{read_file, write_file, FileSpec};

#[rstest]
fn branch_points_at_the_current_commit_without_switching(committed_repository_dir: TempDir) {
    let head_id = head_commit_id(committed_repository_dir.path());

    run_nit_command(committed_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    let branch_file = committed_repository_dir
        .path()
        .join(".nit")
        .join("branches")
        .join("feature");
    assert_eq!(read_file(&branch_file).trim(), head_id);

    // still on master
    run_nit_command(committed_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Branches ===\nfeature\n*master\n",
        ));
}

#[rstest]
fn branch_with_an_existing_name_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_nit_command(committed_repository_dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[rstest]
fn rm_branch_deletes_only_the_pointer(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_nit_command(committed_repository_dir.path(), &["rm-branch", "feature"])
        .assert()
        .success();

    assert!(!committed_repository_dir
        .path()
        .join(".nit")
        .join("branches")
        .join("feature")
        .exists());

    // the commits the branch pointed at are untouched
    run_nit_command(committed_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first commit"));
}

#[rstest]
fn rm_branch_on_a_missing_branch_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn rm_branch_on_the_active_branch_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));
}

#[rstest]
fn checkout_branch_materializes_its_tip(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        committed_repository_dir.path().join("1.txt"),
        "changed\n".to_string(),
    ));
    run_nit_command(committed_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    nit_commit(committed_repository_dir.path(), "change 1.txt")
        .assert()
        .success();

    run_nit_command(committed_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_file(&committed_repository_dir.path().join("1.txt")),
        "one\n"
    );
    let head = read_file(&committed_repository_dir.path().join(".nit").join("HEAD"));
    assert_eq!(head.trim(), "feature");
}

#[rstest]
fn checkout_missing_branch_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such branch exists."));
}

#[rstest]
fn checkout_the_active_branch_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));
}

#[rstest]
fn checkout_refuses_to_clobber_an_untracked_file(init_repository_dir: TempDir) {
    run_nit_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_nit_command(init_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "committed on feature\n".to_string(),
    ));
    run_nit_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    nit_commit(init_repository_dir.path(), "track 1.txt on feature")
        .assert()
        .success();

    run_nit_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    // locally created file with the same name as one the target tracks
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "local work\n".to_string(),
    ));

    run_nit_command(init_repository_dir.path(), &["checkout", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // nothing was touched
    assert_eq!(
        read_file(&init_repository_dir.path().join("1.txt")),
        "local work\n"
    );
    let head = read_file(&init_repository_dir.path().join(".nit").join("HEAD"));
    assert_eq!(head.trim(), "master");
}

#[rstest]
fn checkout_file_restores_the_head_version(committed_repository_dir: TempDir) {
    write_file(FileSpec::new(
        committed_repository_dir.path().join("1.txt"),
        "scribbles\n".to_string(),
    ));

    run_nit_command(committed_repository_dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(
        read_file(&committed_repository_dir.path().join("1.txt")),
        "one\n"
    );
}

#[rstest]
fn checkout_file_from_a_commit_id_prefix(committed_repository_dir: TempDir) {
    let first_id = head_commit_id(committed_repository_dir.path());

    write_file(FileSpec::new(
        committed_repository_dir.path().join("1.txt"),
        "changed\n".to_string(),
    ));
    run_nit_command(committed_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    nit_commit(committed_repository_dir.path(), "change 1.txt")
        .assert()
        .success();

    run_nit_command(
        committed_repository_dir.path(),
        &["checkout", &first_id[..8], "--", "1.txt"],
    )
    .assert()
    .success();

    assert_eq!(
        read_file(&committed_repository_dir.path().join("1.txt")),
        "one\n"
    );
}

#[rstest]
fn checkout_file_from_a_missing_commit_fails(committed_repository_dir: TempDir) {
    let bogus_id = "0".repeat(40);

    run_nit_command(
        committed_repository_dir.path(),
        &["checkout", &bogus_id, "--", "1.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn checkout_file_absent_from_the_commit_fails(committed_repository_dir: TempDir) {
    run_nit_command(
        committed_repository_dir.path(),
        &["checkout", "--", "ghost.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn checkout_with_extra_operands_fails(committed_repository_dir: TempDir) {
    run_nit_command(committed_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect operands."));
}

#[rstest]
fn reset_moves_the_active_branch_and_the_working_tree(committed_repository_dir: TempDir) {
    let first_id = head_commit_id(committed_repository_dir.path());

    write_file(FileSpec::new(
        committed_repository_dir.path().join("2.txt"),
        "two\n".to_string(),
    ));
    run_nit_command(committed_repository_dir.path(), &["add", "2.txt"])
        .assert()
        .success();
    nit_commit(committed_repository_dir.path(), "add 2.txt")
        .assert()
        .success();

    run_nit_command(committed_repository_dir.path(), &["reset", &first_id[..8]])
        .assert()
        .success();

    assert!(!committed_repository_dir.path().join("2.txt").exists());
    assert_eq!(head_commit_id(committed_repository_dir.path()), first_id);

    run_nit_command(committed_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first commit"))
        .stdout(predicate::str::contains("add 2.txt").not());
}

#[rstest]
fn reset_with_an_ambiguous_prefix_fails(committed_repository_dir: TempDir) {
    // the empty prefix matches every stored commit
    run_nit_command(committed_repository_dir.path(), &["reset", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ambiguous commit id prefix."));
}
