// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::AtomicBool;

use repomirror_backend::tag_engine::validate_tag_name;
use repomirror_core::config::Config;
use repomirror_core::Result;

use crate::cli::TagArgs;
use crate::orchestrator;

pub fn run(config: &Config, args: &TagArgs, cancelled: &AtomicBool) -> Result<()> {
    validate_tag_name(&args.tag)?;
    let repos = orchestrator::resolve_repos(config, &args.repo, false)?;
    let registry = orchestrator::build_registry();

    orchestrator::for_each_repo(config, &repos, &registry, cancelled, false, |backend, ctx| {
        let src_dir = ctx.tag_dir(&args.src_tag);
        let dest_dir = ctx.tag_dir(&args.tag);
        let dest_is_hard = config
            .hard_tag_regex_for(ctx.repo)
            .map(|re| re.is_match(&args.tag))
            .unwrap_or(false);
        backend.tag(&src_dir, &dest_dir, args.symlink, dest_is_hard, args.force)
    })
}
