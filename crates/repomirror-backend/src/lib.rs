// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

pub mod diff_engine;
pub mod registry;
pub mod tag_engine;

use std::path::{Path, PathBuf};

use repomirror_core::config::{Config, Repo, HEAD_TAG};
use repomirror_core::{path, Result};

pub use diff_engine::DiffResult;
pub use registry::Registry;

#[derive(Debug, Clone, Default)]
pub struct MirrorOptions {
    pub checksums: bool,
    pub force: bool,
    pub ignore_errors: bool,
}

/// Everything a backend needs to act on one configured repo.
pub struct RepoCtx<'a> {
    pub config: &'a Config,
    pub repo: &'a Repo,
}

impl<'a> RepoCtx<'a> {
    pub fn new(config: &'a Config, repo: &'a Repo) -> Self {
        Self { config, repo }
    }

    pub fn tag_dir(&self, tag: &str) -> PathBuf {
        path::repo_tag_dir(&self.config.data_dir, self.config.tag_style, self.repo, tag)
    }

    pub fn arch_dir(&self, tag: &str, arch: &str) -> PathBuf {
        path::arch_dir(&self.config.data_dir, self.config.tag_style, self.repo, tag, arch)
    }

    pub fn head_arch_dir(&self, arch: &str) -> PathBuf {
        self.arch_dir(HEAD_TAG, arch)
    }
}

/// Uniform operation surface every backend exposes (spec §4.6). Default
/// implementations for `make_dir` and `tag` are provided since those two
/// operations do not depend on the metadata format a backend understands.
pub trait Backend: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn mirror(&self, ctx: &RepoCtx, arches: &[String], opts: &MirrorOptions) -> Result<()>;

    fn clean(&self, ctx: &RepoCtx, arches: &[String], force: bool) -> Result<()>;

    fn init(&self, ctx: &RepoCtx, arch: Option<&str>, force: bool) -> Result<()>;

    fn add_file(&self, ctx: &RepoCtx, arch: &str, files: &[PathBuf], force: bool) -> Result<()>;

    fn del_file(&self, ctx: &RepoCtx, arch: &str, files: &[String]) -> Result<()>;

    fn diff(
        &self,
        arch: &str,
        src_dir: &Path,
        src_tag: &str,
        dest_dir: &Path,
        dest_tag: &str,
    ) -> Result<DiffResult>;

    fn make_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }

    fn tag(
        &self,
        src_dir: &Path,
        dest_dir: &Path,
        symlink: bool,
        dest_tag_is_hard: bool,
        force: bool,
    ) -> Result<()> {
        tag_engine::build_tag(src_dir, dest_dir, symlink, dest_tag_is_hard, force)
    }
}
