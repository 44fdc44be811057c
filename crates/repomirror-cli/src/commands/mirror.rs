// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::AtomicBool;

use repomirror_backend::MirrorOptions;
use repomirror_core::config::Config;
use repomirror_core::Result;

use crate::cli::MirrorArgs;
use crate::orchestrator;

pub fn run(config: &Config, args: &MirrorArgs, cancelled: &AtomicBool) -> Result<()> {
    let repos = orchestrator::resolve_repos(config, &args.repo, args.regex)?;
    let registry = orchestrator::build_registry();
    let opts = MirrorOptions {
        checksums: args.checksums,
        force: args.force,
        ignore_errors: args.ignore_errors,
    };

    orchestrator::for_each_repo(
        config,
        &repos,
        &registry,
        cancelled,
        args.ignore_errors,
        |backend, ctx| {
            let arches = orchestrator::arches_for(ctx.repo, args.arch.as_deref());
            backend.mirror(ctx, &arches, &opts)
        },
    )
}
