//! End-to-end sessions against a single repository.

use chrono::{Duration, TimeZone, Utc};
use minigit_core::clock::SteppingClock;
use minigit_core::diff::DiffStatus;
use minigit_core::{fingerprint, Repository};

fn repo() -> Repository {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let mut repo = Repository::new().with_clock(SteppingClock::new(start, Duration::seconds(1)));
    repo.init().unwrap();
    repo
}

#[test]
fn first_commit_shows_in_log() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("first").unwrap();

    let log = repo.log().unwrap();
    assert_eq!(log.total, 1);
    assert_eq!(log.entries[0].message, "first");
    assert_eq!(log.entries[0].file_count, 1);
}

#[test]
fn undo_and_redo_move_working_files() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("c1").unwrap();
    repo.add("a.txt", "y").unwrap();
    repo.commit("c2").unwrap();

    repo.undo().unwrap();
    assert_eq!(repo.working_files().get("a.txt"), Some("x"));

    repo.redo().unwrap();
    assert_eq!(repo.working_files().get("a.txt"), Some("y"));
}

#[test]
fn undo_redo_are_exact_inverses() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.add("b.txt", "keep").unwrap();
    repo.commit("c1").unwrap();

    let head_before = repo.head().map(|c| c.id().to_string());
    let working_before = repo.working_files().clone();

    repo.add("a.txt", "y").unwrap();
    let c2 = repo.commit("c2").unwrap();
    let working_after = repo.working_files().clone();

    repo.undo().unwrap();
    assert_eq!(repo.head().map(|c| c.id().to_string()), head_before);
    assert_eq!(repo.working_files(), &working_before);

    repo.redo().unwrap();
    assert_eq!(repo.head().map(|c| c.id()), Some(c2.id.as_str()));
    assert_eq!(repo.working_files(), repo.head().unwrap().snapshot());
    assert_eq!(repo.working_files().get("a.txt"), working_after.get("a.txt"));
}

#[test]
fn feature_files_stay_on_feature_branch() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("c1").unwrap();

    repo.branch("feature").unwrap();
    repo.checkout("feature").unwrap();
    repo.add("b.txt", "z").unwrap();
    repo.commit("c3").unwrap();
    repo.checkout("main").unwrap();

    let status = repo.status().unwrap();
    assert_eq!(status.branch, "main");
    assert!(status.working.iter().all(|f| f.name != "b.txt"));
    assert!(status.staged.is_empty());
}

#[test]
fn committing_on_one_branch_leaves_the_other_alone() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("c1").unwrap();
    repo.branch("other").unwrap();
    let other_head = repo.branches().find("other").unwrap().head;

    for i in 0..5 {
        repo.add("a.txt", &format!("v{i}")).unwrap();
        repo.commit(&format!("main {i}")).unwrap();
    }

    assert_eq!(repo.branches().find("other").unwrap().head, other_head);
    repo.checkout("other").unwrap();
    assert_eq!(repo.working_files().get("a.txt"), Some("x"));
    assert!(repo.staged_files().is_empty());
}

#[test]
fn merge_brings_feature_files_into_main() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("c1").unwrap();
    repo.branch("feature").unwrap();
    repo.checkout("feature").unwrap();
    repo.add("b.txt", "z").unwrap();
    repo.commit("c3").unwrap();
    repo.checkout("main").unwrap();

    let merged = repo.merge("feature").unwrap();
    assert_eq!(merged.target, "main");

    let head = repo.head().unwrap();
    assert_eq!(head.snapshot().get("a.txt"), Some("x"));
    assert_eq!(head.snapshot().get("b.txt"), Some("z"));
    assert_eq!(repo.undo_depth(), 3);
    assert_eq!(repo.redo_depth(), 0);
}

#[test]
fn revert_is_additive() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    let c1 = repo.commit("c1").unwrap();
    repo.add("a.txt", "y").unwrap();
    repo.commit("c2").unwrap();
    repo.undo().unwrap();
    repo.redo().unwrap();

    let depth_before = repo.undo_depth();
    let log_before = repo.log().unwrap().total;
    let target_before = repo.show(&c1.id).unwrap();

    let reverted = repo.revert(&c1.id).unwrap();
    assert_ne!(reverted.id, c1.id);
    assert_eq!(repo.undo_depth(), depth_before + 1);
    assert_eq!(repo.redo_depth(), 0);
    assert_eq!(repo.log().unwrap().total, log_before + 1);
    assert_eq!(repo.working_files(), &target_before.files);

    let target_after = repo.show(&c1.id).unwrap();
    assert_eq!(target_after.files, target_before.files);
    assert_eq!(target_after.message, target_before.message);
}

#[test]
fn uncommitted_edit_shows_as_modified() {
    let mut repo = repo();
    repo.add("a.txt", "x").unwrap();
    repo.commit("c1").unwrap();
    repo.add("a.txt", "y").unwrap();

    let report = repo.diff("a.txt").unwrap();
    match report.status {
        DiffStatus::Modified {
            committed_fingerprint,
            committed,
            working,
        } => {
            assert_eq!(committed_fingerprint, fingerprint("x"));
            assert_eq!(report.working_fingerprint, fingerprint("y"));
            assert_eq!(committed, "x");
            assert_eq!(working, "y");
        }
        other => panic!("expected modified, got {other:?}"),
    }
}

#[test]
fn repositories_are_isolated() {
    let mut left = repo();
    let mut right = repo();

    left.add("a.txt", "left").unwrap();
    left.commit("left").unwrap();

    assert_eq!(right.log().unwrap().total, 0);
    assert!(right.working_files().is_empty());
    right.add("a.txt", "right").unwrap();
    assert_eq!(left.working_files().get("a.txt"), Some("left"));
}

#[test]
fn many_files_and_branches() {
    let mut repo = repo();
    for i in 0..250 {
        repo.add(&format!("file{i}.txt"), &format!("content {i}")).unwrap();
    }
    repo.commit("bulk").unwrap();
    for i in 0..40 {
        repo.branch(&format!("b{i}")).unwrap();
    }

    assert_eq!(repo.head().unwrap().file_count(), 250);
    assert_eq!(repo.list_branches().unwrap().total, 41);
}
