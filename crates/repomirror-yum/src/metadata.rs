// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! `get_metadata`/`read_metadata`: parse `repodata/repomd.xml`, fetch any
//! child metadata file that is missing or fails validation, then parse the
//! `primary` child into package records.

use std::io::Read;
use std::path::Path;

use repomirror_core::config::Repo;
use repomirror_core::validate::{validate_file, Check};
use repomirror_core::{Error, Result};
use repomirror_fetch::ClientOptions;

use crate::package::PackageRecord;
use crate::repomd::{self, RepoMdEntry};
use crate::{fetch_opts, primary};

pub struct MetadataResult {
    pub packages: Vec<PackageRecord>,
    /// The upstream URL (already `%ARCH%`-expanded) that served this
    /// metadata successfully; subsequent package downloads for this arch are
    /// pinned to it for the rest of the run.
    pub pinned_url: String,
}

pub fn expand_arch(url: &str, arch: &str) -> String {
    url.replace("%ARCH%", arch)
}

/// Fetch and parse metadata for `arch`, trying each configured URL in order
/// until one completes without error.
pub fn get_metadata(repo: &Repo, arch_dir: &Path, arch: &str, checksums: bool) -> Result<MetadataResult> {
    std::fs::create_dir_all(arch_dir.join("repodata"))?;
    let client_opts = fetch_opts(repo);

    let mut last_err: Option<Error> = None;
    for url in &repo.url {
        let base = expand_arch(url, arch);
        match fetch_from_url(&base, arch_dir, &client_opts, checksums) {
            Ok(packages) => {
                tracing::info!(repo = %repo.name, arch, url = %base, "pinned metadata url");
                return Ok(MetadataResult { packages, pinned_url: base });
            }
            Err(err) => {
                tracing::debug!(repo = %repo.name, arch, url = %base, %err, "metadata fetch failed, trying next url");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| Error::Config(format!("repo '{}' has no urls configured", repo.name))))
}

fn fetch_from_url(
    base_url: &str,
    arch_dir: &Path,
    client_opts: &ClientOptions,
    checksums: bool,
) -> Result<Vec<PackageRecord>> {
    let base_url = base_url.trim_end_matches('/');
    let repomd_path = arch_dir.join("repodata/repomd.xml");

    // Always re-download repomd.xml: it is the root of trust for what else
    // needs fetching, so no local validation short-circuits it.
    repomirror_fetch::download_binary_file(
        &format!("{base_url}/repodata/repomd.xml"),
        &repomd_path,
        client_opts,
    )?;

    let xml = std::fs::read(&repomd_path)?;
    let entries = repomd::parse_repomd(&xml)?;

    let mut primary_path = None;
    for entry in &entries {
        let dest = arch_dir.join(&entry.href);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let check = entry_check(entry, checksums)?;
        let valid = dest.is_file() && validate_file(&dest, &check);
        if !valid {
            let url = format!("{base_url}/{}", entry.href);
            repomirror_fetch::download_binary_file(&url, &dest, client_opts)?;
        }
        if entry.data_type == "primary" {
            primary_path = Some(dest);
        }
    }

    let primary_path = primary_path
        .ok_or_else(|| Error::Config("repomd.xml has no 'primary' entry".to_string()))?;
    parse_primary_file(&primary_path)
}

/// Parse what is already on disk, without any network I/O. Used by `clean`
/// and `diff`, which only need to know what the current metadata
/// references.
pub fn read_metadata(arch_dir: &Path) -> Result<Vec<PackageRecord>> {
    let repomd_path = arch_dir.join("repodata/repomd.xml");
    if !repomd_path.is_file() {
        return Err(Error::MissingPath(repomd_path));
    }
    let xml = std::fs::read(&repomd_path)?;
    let entries = repomd::parse_repomd(&xml)?;
    let primary_entry = entries
        .iter()
        .find(|e| e.data_type == "primary")
        .ok_or_else(|| Error::Config("repomd.xml has no 'primary' entry".to_string()))?;
    parse_primary_file(&arch_dir.join(&primary_entry.href))
}

pub fn repomd_referenced_paths(arch_dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let repomd_path = arch_dir.join("repodata/repomd.xml");
    let xml = std::fs::read(&repomd_path)?;
    let entries = repomd::parse_repomd(&xml)?;
    let mut paths: Vec<_> = entries.iter().map(|e| arch_dir.join(&e.href)).collect();
    paths.push(repomd_path);
    Ok(paths)
}

fn parse_primary_file(path: &Path) -> Result<Vec<PackageRecord>> {
    let gz = std::fs::read(path)?;
    let xml = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        gunzip(&gz)?
    } else {
        gz
    };
    primary::parse_primary(&xml)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn entry_check(entry: &RepoMdEntry, checksums: bool) -> Result<Check> {
    if !checksums {
        if let Some(size) = entry.size {
            return Ok(Check::Size(size));
        }
    }
    if let (Some(algorithm), Some(hex_value)) =
        (entry.checksum_algorithm.clone(), entry.checksum_value.clone())
    {
        return Ok(Check::Digest { algorithm, hex_value });
    }
    if let Some(size) = entry.size {
        return Ok(Check::Size(size));
    }
    Err(Error::Config(format!(
        "repomd.xml entry '{}' has neither a size nor a checksum",
        entry.data_type
    )))
}
