// tests/integration_test.rs
//
// Runs the facade and the workflow against real repositories built with git2,
// with the `git` executable doing the work.
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::build::CheckoutBuilder;
use git2::{Commit, Repository as Git2Repo, RepositoryInitOptions, Signature};
use tempfile::TempDir;

use version_manager::domain::BumpKind;
use version_manager::git::{GitCli, Repository, SystemExecutor};
use version_manager::progress::SilentProgress;
use version_manager::release::{ReleasePublisher, ReleaseRequest};
use version_manager::workflow::{StepTimings, Workflow, WorkflowConfig};

struct Fixture {
    work: TempDir,
    remote: TempDir,
}

impl Fixture {
    fn git(&self) -> GitCli<SystemExecutor> {
        GitCli::new(SystemExecutor::in_dir(self.work.path()))
    }

    fn local(&self) -> Git2Repo {
        Git2Repo::open(self.work.path()).unwrap()
    }

    fn bare(&self) -> Git2Repo {
        Git2Repo::open_bare(self.remote.path()).unwrap()
    }
}

struct NoRelease;

impl ReleasePublisher for NoRelease {
    fn publish(&self, _request: &ReleaseRequest) -> version_manager::Result<()> {
        panic!("release publisher must not be called");
    }
}

fn commit_file(repo: &Git2Repo, name: &str, contents: &str, message: &str) {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(name), contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn switch_to(repo: &Git2Repo, branch: &str) {
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
    repo.checkout_head(Some(CheckoutBuilder::new().force()))
        .unwrap();
}

/// `main` with one commit, `feature` one commit ahead, `origin` a bare repository
fn fixture() -> Fixture {
    let remote = TempDir::new().unwrap();
    Git2Repo::init_bare(remote.path()).unwrap();

    let work = TempDir::new().unwrap();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Git2Repo::init_opts(work.path(), &opts).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    commit_file(&repo, "README.md", "# widgets\n", "Initial commit");

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch("feature", &head, false).unwrap();
    switch_to(&repo, "feature");
    commit_file(&repo, "feature.txt", "new feature\n", "Add feature");
    switch_to(&repo, "main");

    repo.remote("origin", remote.path().to_str().unwrap())
        .unwrap();

    Fixture { work, remote }
}

fn run_workflow(fixture: &Fixture, config: &WorkflowConfig) -> Option<String> {
    let repo = fixture.git();
    let progress = SilentProgress::new();
    Workflow::new(&repo, &NoRelease, &progress)
        .with_timings(StepTimings::none())
        .run(config)
        .unwrap()
        .tag
}

#[test]
fn test_facade_lists_branches_and_remotes() {
    let fixture = fixture();
    let git = fixture.git();

    let mut branches = git.list_branches().unwrap();
    branches.sort();
    assert_eq!(branches, vec!["feature", "main"]);
    assert_eq!(git.list_remotes().unwrap(), vec!["origin"]);
    assert_eq!(
        git.remote_url("origin").unwrap(),
        fixture.remote.path().to_str().unwrap()
    );
}

#[test]
fn test_facade_without_tags() {
    let fixture = fixture();
    assert!(fixture.git().latest_tag().is_err());
}

#[test]
fn test_facade_errors_carry_git_output() {
    let fixture = fixture();

    let err = fixture.git().checkout("no-such-branch").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("git checkout no-such-branch"), "got: {}", msg);
    assert!(msg.contains("no-such-branch"), "got: {}", msg);
}

#[test]
fn test_merge_tag_push_and_remove_branch() {
    let fixture = fixture();
    let mut config = WorkflowConfig::new("origin", "feature", "main");
    config.push = true;
    config.remove_branch = true;
    config.bump = Some(BumpKind::Minor);

    let tag = run_workflow(&fixture, &config);
    assert_eq!(tag.as_deref(), Some("v1.0.0"));

    let local = fixture.local();
    assert!(local.find_branch("feature", git2::BranchType::Local).is_err());
    assert!(fixture.work.path().join("feature.txt").exists());

    let bare = fixture.bare();
    let remote_main = bare.find_reference("refs/heads/main").unwrap();
    let local_main = local.find_reference("refs/heads/main").unwrap();
    assert_eq!(remote_main.target(), local_main.target());
    assert!(bare.find_reference("refs/tags/v1.0.0").is_ok());
    assert!(bare.find_reference("refs/heads/feature").is_err());
}

#[test]
fn test_second_run_bumps_from_latest_tag() {
    let fixture = fixture();
    let mut config = WorkflowConfig::new("origin", "feature", "main");
    config.bump = Some(BumpKind::Patch);

    assert_eq!(run_workflow(&fixture, &config).as_deref(), Some("v1.0.0"));

    // The source branch was kept and checked out again
    let local = fixture.local();
    assert_eq!(local.head().unwrap().shorthand(), Some("feature"));
    commit_file(&local, "more.txt", "more\n", "More work");

    config.bump = Some(BumpKind::PrePatch);
    assert_eq!(
        run_workflow(&fixture, &config).as_deref(),
        Some("v1.0.1-pre.0")
    );
    assert_eq!(fixture.git().latest_tag().unwrap(), "v1.0.1-pre.0");
}

#[test]
fn test_keep_branch_pushes_source() {
    let fixture = fixture();
    let mut config = WorkflowConfig::new("origin", "feature", "main");
    config.push = true;

    assert_eq!(run_workflow(&fixture, &config), None);

    let bare = fixture.bare();
    assert!(bare.find_reference("refs/heads/main").is_ok());
    assert!(bare.find_reference("refs/heads/feature").is_ok());
    assert!(fixture.local().tag_names(None).unwrap().is_empty());
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_binary_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version-manager"));
    assert!(stdout.contains("--bump"));
    assert!(stdout.contains("--no-input"));
}

#[test]
fn test_binary_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_binary_list() {
    let fixture = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .arg("--list")
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("feature"));
    assert!(stdout.contains("origin"));
}

#[test]
fn test_binary_runs_without_prompts() {
    let fixture = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .args([
            "--no-input",
            "--no-delay",
            "--remote",
            "origin",
            "--source",
            "feature",
            "--destination",
            "main",
            "--push",
            "--bump",
            "major",
        ])
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(fixture.bare().find_reference("refs/tags/v1.0.0").is_ok());
}

#[test]
fn test_binary_failure_names_step_and_exits_nonzero() {
    let fixture = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .args([
            "--no-input",
            "--no-delay",
            "--remote",
            "origin",
            "--source",
            "feature",
            "--destination",
            "does-not-exist",
        ])
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("checkout destination"), "stderr: {}", stderr);
    assert_eq!(
        stderr.matches("did not match").count(),
        1,
        "git output must be reported once, stderr: {}",
        stderr
    );
}

#[test]
fn test_binary_merge_conflict_reported_once() {
    let fixture = fixture();
    let local = fixture.local();
    commit_file(&local, "feature.txt", "conflicting change\n", "Conflict on main");

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .args([
            "--no-input",
            "--no-delay",
            "--remote",
            "origin",
            "--source",
            "feature",
            "--destination",
            "main",
        ])
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("merge forward"), "stderr: {}", stderr);
    assert_eq!(
        stderr.matches("Merge conflict in feature.txt").count(),
        1,
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_binary_invalid_config_is_not_a_git_failure() {
    let fixture = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .args([
            "--no-input",
            "--no-delay",
            "--remote",
            "origin",
            "--source",
            "main",
            "--destination",
            "main",
        ])
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"), "stderr: {}", stderr);
    assert!(!stderr.contains("Git step"), "stderr: {}", stderr);
}

#[test]
fn test_binary_missing_token_fails_before_git() {
    let fixture = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_version-manager"))
        .args([
            "--no-input",
            "--no-delay",
            "--remote",
            "origin",
            "--source",
            "feature",
            "--destination",
            "main",
            "--push",
            "--bump",
            "minor",
            "--release",
            "--repo-type",
            "github",
        ])
        .env_remove("GITHUB_TOKEN")
        .current_dir(fixture.work.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GITHUB_TOKEN"), "stderr: {}", stderr);
    // main was not touched
    let local = fixture.local();
    let main = local
        .find_reference("refs/heads/main")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(main.message(), Some("Initial commit"));
}
