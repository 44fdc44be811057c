// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Repo selection ("all" / regex fan-out) and the per-repo lock/dispatch
//! loop shared by every mutating action.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use repomirror_backend::{Backend, RepoCtx};
use repomirror_core::config::{Config, Repo, HEAD_TAG};
use repomirror_core::{Error, Result};

pub fn build_registry() -> repomirror_backend::Registry {
    let mut registry = repomirror_backend::Registry::new();
    registry.register(Arc::new(repomirror_yum::YumBackend));
    registry.register(Arc::new(repomirror_apt::AptBackend));
    registry.register(Arc::new(repomirror_plain::PlainBackend));
    registry
}

/// Resolve `repo` against `config`: a literal name, `"all"`, or — when
/// `regex` is set — a pattern matched against every configured name. Always
/// returned in the config's sorted (deterministic) order.
pub fn resolve_repos<'a>(config: &'a Config, repo: &str, regex: bool) -> Result<Vec<&'a Repo>> {
    if regex {
        let names = config.repo_names_matching(repo)?;
        return Ok(names.iter().map(|n| &config.repos[n]).collect());
    }
    if repo == "all" {
        return Ok(config.repos.values().collect());
    }
    config
        .repos
        .get(repo)
        .map(|r| vec![r])
        .ok_or_else(|| Error::Config(format!("no such repo '{repo}'")))
}

pub fn arches_for(repo: &Repo, arch: Option<&str>) -> Vec<String> {
    match arch {
        Some(a) => vec![a.to_string()],
        None => repo.arch.clone(),
    }
}

/// Run `action` against every repo in `repos`, holding that repo's lock for
/// the duration. A signal checked before each repo aborts the remaining
/// fan-out cleanly. On error: if `ignore_errors`, log and continue to the
/// next repo; otherwise abort the whole fan-out immediately.
pub fn for_each_repo<F>(
    config: &Config,
    repos: &[&Repo],
    registry: &repomirror_backend::Registry,
    cancelled: &AtomicBool,
    ignore_errors: bool,
    mut action: F,
) -> Result<()>
where
    F: FnMut(&dyn Backend, &RepoCtx) -> Result<()>,
{
    for repo in repos {
        if crate::signal::check(cancelled) {
            tracing::warn!(repo = %repo.name, "cancelled, aborting remaining fan-out");
            break;
        }

        let ctx = RepoCtx::new(config, repo);
        let lock_dir = ctx.tag_dir(HEAD_TAG);
        std::fs::create_dir_all(&lock_dir)?;

        let lock = match repomirror_lock::acquire(&lock_dir, &repo.name) {
            Ok(lock) => lock,
            Err(err) => {
                tracing::error!(
                    repo = %repo.name,
                    path = %repomirror_core::path::lock_path(&lock_dir, &repo.name).display(),
                    %err,
                    "lock acquisition failed"
                );
                if ignore_errors {
                    continue;
                }
                return Err(err);
            }
        };
        tracing::info!(repo = %repo.name, "locked");

        let backend = registry.get(repo.repo_type.as_str())?;
        let result = action(backend.as_ref(), &ctx);
        drop(lock);

        match result {
            Ok(()) => tracing::info!(repo = %repo.name, "done"),
            Err(err) if ignore_errors => {
                tracing::error!(repo = %repo.name, %err, "repo failed, continuing (ignore_errors)");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
