// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! SIGINT/SIGTERM handling: flips a shared flag that fan-out loops and the
//! fetcher check between blocking calls, rather than killing the process
//! outright, so a held `RepoLock`'s `Drop` still runs and releases/unlinks
//! the lock file.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn install() -> Arc<AtomicBool> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!(%err, "failed to install signal handler");
    }
    cancelled
}

pub fn check(cancelled: &AtomicBool) -> bool {
    cancelled.load(Ordering::SeqCst)
}
