// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-repo exclusive advisory lock, backed directly by `flock(2)`.
//!
//! Mirrors the approach used elsewhere in this codebase for session locks:
//! own the `File` whose fd carries the lock, and release explicitly on
//! `Drop` rather than threading a separate RAII guard type through the
//! struct. Acquisition is always non-blocking (`LOCK_NB`) — a second
//! invocation against a busy repo fails immediately rather than queueing.

use std::cell::Cell;
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use repomirror_core::{Error, Result};

thread_local! {
    /// At most one lock may be held by this process at a time; a nested
    /// acquire for a different repo while one is already held is a
    /// programming error, not a recoverable condition.
    static HELD: Cell<bool> = const { Cell::new(false) };
}

/// An exclusive hold on `{repo_dir}/{repo}.lock`. Released on drop: the
/// advisory lock via `flock(LOCK_UN)` and the lock file itself via unlink.
pub struct RepoLock {
    file: File,
    lock_path: PathBuf,
    repo: String,
}

impl std::fmt::Debug for RepoLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoLock")
            .field("repo", &self.repo)
            .field("lock_path", &self.lock_path)
            .finish()
    }
}

impl RepoLock {
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` is owned by `self.file` and still open.
        unsafe {
            libc::flock(fd, libc::LOCK_UN);
        }
        if let Err(err) = std::fs::remove_file(&self.lock_path) {
            tracing::debug!(repo = %self.repo, path = %self.lock_path.display(), %err, "failed to unlink lock file on release");
        }
        HELD.with(|h| h.set(false));
    }
}

/// Acquire the exclusive, non-blocking lock for `repo` under `repo_dir`.
/// `repo_dir` must already exist. Fails immediately (no retry) if another
/// holder has the lock, or if a lock is already held by this process.
pub fn acquire(repo_dir: &Path, repo: &str) -> Result<RepoLock> {
    if HELD.with(|h| h.get()) {
        panic!("repomirror-lock: nested lock acquisition in the same process is a programming error");
    }
    if !repo_dir.is_dir() {
        return Err(Error::MissingPath(repo_dir.to_path_buf()));
    }

    let lock_path = repo_dir.join(format!("{repo}.lock"));
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)?;

    let fd = file.as_raw_fd();
    // SAFETY: `fd` is a valid fd owned by `file`, just opened above.
    let ret = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if ret != 0 {
        return Err(Error::LockContention {
            repo: repo.to_string(),
        });
    }

    HELD.with(|h| h.set(true));
    Ok(RepoLock {
        file,
        lock_path,
        repo: repo.to_string(),
    })
}
