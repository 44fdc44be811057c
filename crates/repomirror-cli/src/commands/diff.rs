// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use repomirror_backend::RepoCtx;
use repomirror_core::config::Config;
use repomirror_core::{Error, Result};

use crate::cli::DiffArgs;
use crate::list;
use crate::orchestrator;

/// Read-only: does not take the repo lock, same as `list`.
pub fn run(config: &Config, args: &DiffArgs) -> Result<()> {
    let repo = config
        .repos
        .get(&args.repo)
        .ok_or_else(|| Error::Config(format!("no such repo '{}'", args.repo)))?;

    let registry = orchestrator::build_registry();
    let backend = registry.get(repo.repo_type.as_str())?;
    let ctx = RepoCtx::new(config, repo);

    let result = backend.diff(
        &args.arch,
        &ctx.tag_dir(&args.src_tag),
        &args.src_tag,
        &ctx.tag_dir(&args.tag),
        &args.tag,
    )?;
    list::render_diff(&result, args.format);
    Ok(())
}
