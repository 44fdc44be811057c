// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Binary entry point: install the logger once, parse arguments, load and
//! validate the config catalog, then dispatch to one action.

mod cli;
mod commands;
mod list;
mod logging;
mod orchestrator;
mod signal;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

fn main() -> ExitCode {
    logging::install();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            tracing::error!(%err, "fatal");
            ExitCode::FAILURE
        }
    }
}

fn run() -> repomirror_core::Result<()> {
    let args = cli::Cli::parse();
    let mut config = repomirror_core::loader::load_config(args.config.as_deref())?;

    if let Some(dir) = &args.data_dir {
        if !dir.is_dir() {
            return Err(repomirror_core::Error::MissingPath(dir.clone()));
        }
        config.data_dir = dir.clone();
    }

    let cancelled = signal::install();

    match &args.action {
        cli::Action::Mirror(a) => commands::mirror::run(&config, a, &cancelled),
        cli::Action::Clean(a) => commands::clean::run(&config, a, &cancelled),
        cli::Action::AddFile(a) => commands::add_file::run(&config, a, &cancelled),
        cli::Action::DelFile(a) => commands::del_file::run(&config, a, &cancelled),
        cli::Action::Init(a) => commands::init::run(&config, a, &cancelled),
        cli::Action::Tag(a) => commands::tag::run(&config, a, &cancelled),
        cli::Action::List(a) => list::run(&config, a),
        cli::Action::Diff(a) => commands::diff::run(&config, a),
    }
}
