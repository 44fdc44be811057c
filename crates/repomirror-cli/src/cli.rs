// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Argument parsing. One `clap::Args` struct per action, a struct per
//! subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repomirror", about = "Mirror and snapshot package repositories")]
pub struct Cli {
    /// Explicit config file; layered on top of the system and user config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured data_dir.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand)]
pub enum Action {
    Mirror(MirrorArgs),
    Clean(CleanArgs),
    AddFile(AddFileArgs),
    DelFile(DelFileArgs),
    Init(InitArgs),
    List(ListArgs),
    Tag(TagArgs),
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct MirrorArgs {
    /// Repo name, or "all".
    pub repo: String,
    #[arg(long)]
    pub arch: Option<String>,
    #[arg(long)]
    pub checksums: bool,
    #[arg(long)]
    pub force: bool,
    #[arg(long)]
    pub ignore_errors: bool,
    /// Treat `repo` as a regex matched against configured repo names.
    #[arg(long)]
    pub regex: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    pub repo: String,
    #[arg(long)]
    pub arch: Option<String>,
    #[arg(long)]
    pub regex: bool,
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddFileArgs {
    pub repo: String,
    pub arch: String,
    #[arg(required = true)]
    pub file: Vec<PathBuf>,
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct DelFileArgs {
    pub repo: String,
    pub arch: String,
    #[arg(required = true)]
    pub file: Vec<String>,
}

#[derive(Args)]
pub struct InitArgs {
    pub repo: String,
    #[arg(long)]
    pub arch: Option<String>,
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Omit to list repos; provide a repo name to list its tags instead.
    pub repo: Option<String>,
    #[arg(long, value_enum, default_value_t = ListFormat::Default)]
    pub format: ListFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ListFormat {
    Default,
    Json,
    Csv,
}

#[derive(Args)]
pub struct TagArgs {
    pub repo: String,
    pub tag: String,
    #[arg(long, default_value = "head")]
    pub src_tag: String,
    #[arg(long)]
    pub symlink: bool,
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub repo: String,
    pub tag: String,
    pub arch: String,
    #[arg(long, default_value = "head")]
    pub src_tag: String,
    #[arg(long, value_enum, default_value_t = ListFormat::Default)]
    pub format: ListFormat,
}
