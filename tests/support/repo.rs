// ABOUTME: Scratch git repository builder for archiver and pipeline tests.
// ABOUTME: Creates a real repo with one commit and reports its id.

use std::path::Path;
use std::process::Command;

use slipway::types::CommitId;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("git should be runnable in tests");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository in `dir` with a single commit; returns its id.
pub fn init_with_commit(dir: &Path) -> CommitId {
    git(dir, &["init", "--quiet"]);
    std::fs::write(dir.join("app.py"), "print('hello')\n").unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "--quiet", "-m", "initial"]);
    CommitId::new(git(dir, &["rev-parse", "HEAD"]))
}
