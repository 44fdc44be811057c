// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::AtomicBool;

use repomirror_core::config::Config;
use repomirror_core::Result;

use crate::cli::AddFileArgs;
use crate::orchestrator;

pub fn run(config: &Config, args: &AddFileArgs, cancelled: &AtomicBool) -> Result<()> {
    let repos = orchestrator::resolve_repos(config, &args.repo, false)?;
    let registry = orchestrator::build_registry();

    orchestrator::for_each_repo(config, &repos, &registry, cancelled, false, |backend, ctx| {
        backend.add_file(ctx, &args.arch, &args.file, args.force)
    })
}
