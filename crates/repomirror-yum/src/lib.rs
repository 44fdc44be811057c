// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

pub mod clean;
mod filter;
mod init;
pub mod metadata;
pub mod package;
pub mod packages;
pub mod primary;
pub mod repomd;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use repomirror_backend::{Backend, DiffResult, MirrorOptions, RepoCtx};
use repomirror_core::config::Repo;
use repomirror_core::{Error, Result};
use repomirror_fetch::ClientOptions;

pub struct YumBackend;

impl Backend for YumBackend {
    fn type_name(&self) -> &'static str {
        "Yum"
    }

    fn mirror(&self, ctx: &RepoCtx, arches: &[String], opts: &MirrorOptions) -> Result<()> {
        for arch in arches {
            let arch_dir = ctx.head_arch_dir(arch);
            std::fs::create_dir_all(arch_dir.join("Packages"))?;

            let result = metadata::get_metadata(ctx.repo, &arch_dir, arch, opts.checksums);
            let result = match result {
                Ok(r) => r,
                Err(err) if opts.ignore_errors => {
                    tracing::debug!(repo = %ctx.repo.name, arch, %err, "skipping arch after metadata failure");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let client_opts = fetch_opts(ctx.repo);
            let downloaded = packages::get_packages(
                &arch_dir,
                &result.pinned_url,
                &client_opts,
                &ctx.repo.filter,
                &result.packages,
                opts.checksums,
                opts.ignore_errors,
            )?;
            tracing::info!(repo = %ctx.repo.name, arch, downloaded, total = result.packages.len(), "mirror complete");
        }
        Ok(())
    }

    fn clean(&self, ctx: &RepoCtx, arches: &[String], _force: bool) -> Result<()> {
        for arch in arches {
            clean::clean(&ctx.head_arch_dir(arch))?;
        }
        Ok(())
    }

    fn init(&self, ctx: &RepoCtx, arch: Option<&str>, force: bool) -> Result<()> {
        if ctx.repo.is_mirrored() {
            return Err(Error::OperationNotValid {
                op: "init".to_string(),
                repo: ctx.repo.name.clone(),
                reason: "repo is mirrored; init only applies to local-only repos".to_string(),
            });
        }
        for a in arches_to_touch(ctx.repo, arch)? {
            init::init_arch(&ctx.head_arch_dir(a), force)?;
        }
        Ok(())
    }

    fn add_file(&self, ctx: &RepoCtx, arch: &str, files: &[PathBuf], force: bool) -> Result<()> {
        if ctx.repo.is_mirrored() {
            return Err(Error::OperationNotValid {
                op: "add-file".to_string(),
                repo: ctx.repo.name.clone(),
                reason: "repo is mirrored; add-file only applies to local-only repos".to_string(),
            });
        }
        require_arch_configured(ctx.repo, arch)?;

        let arch_dir = ctx.head_arch_dir(arch);
        let packages_dir = arch_dir.join("Packages");
        std::fs::create_dir_all(&packages_dir)?;

        for file in files {
            let name = file
                .file_name()
                .ok_or_else(|| Error::Config(format!("'{}' has no file name", file.display())))?;
            let dest = packages_dir.join(name);
            if dest.exists() && !force {
                return Err(Error::Config(format!(
                    "'{}' already exists; pass force to overwrite",
                    dest.display()
                )));
            }
            std::fs::copy(file, &dest)?;
        }

        init::init_arch(&arch_dir, false)
    }

    fn del_file(&self, ctx: &RepoCtx, arch: &str, files: &[String]) -> Result<()> {
        if ctx.repo.is_mirrored() {
            return Err(Error::OperationNotValid {
                op: "del-file".to_string(),
                repo: ctx.repo.name.clone(),
                reason: "repo is mirrored; del-file only applies to local-only repos".to_string(),
            });
        }
        require_arch_configured(ctx.repo, arch)?;

        let arch_dir = ctx.head_arch_dir(arch);
        let packages_dir = arch_dir.join("Packages");
        for file in files {
            let path = packages_dir.join(file);
            if path.is_file() {
                std::fs::remove_file(&path)?;
            }
        }

        init::init_arch(&arch_dir, false)
    }

    fn diff(
        &self,
        arch: &str,
        src_dir: &Path,
        src_tag: &str,
        dest_dir: &Path,
        dest_tag: &str,
    ) -> Result<DiffResult> {
        let src_set = referenced_rpm_basenames(&src_dir.join(arch))?;
        let dest_set = referenced_rpm_basenames(&dest_dir.join(arch))?;
        Ok(repomirror_backend::diff_engine::diff(
            src_tag, src_set, dest_tag, dest_set,
        ))
    }
}

fn referenced_rpm_basenames(arch_dir: &Path) -> Result<BTreeSet<String>> {
    Ok(metadata::read_metadata(arch_dir)?
        .iter()
        .map(|p| p.basename().to_string())
        .filter(|name| name.ends_with(".rpm"))
        .collect())
}

fn arches_to_touch<'a>(repo: &'a Repo, arch: Option<&'a str>) -> Result<Vec<&'a str>> {
    match arch {
        Some(a) => {
            require_arch_configured(repo, a)?;
            Ok(vec![a])
        }
        None => Ok(repo.arch.iter().map(String::as_str).collect()),
    }
}

fn require_arch_configured(repo: &Repo, arch: &str) -> Result<()> {
    if repo.arch.iter().any(|a| a == arch) {
        Ok(())
    } else {
        Err(Error::ArchNotConfigured {
            repo: repo.name.clone(),
            arch: arch.to_string(),
        })
    }
}

fn fetch_opts(repo: &Repo) -> ClientOptions {
    ClientOptions {
        proxy: repo.proxy.clone(),
        ca: repo.ca.clone(),
        cert: repo.cert.clone(),
        key: repo.key.clone(),
    }
}
