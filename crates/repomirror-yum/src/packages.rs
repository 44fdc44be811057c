// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use repomirror_core::config::Filter;
use repomirror_core::validate::validate_file;
use repomirror_core::Result;
use repomirror_fetch::ClientOptions;

use crate::filter;
use crate::package::PackageRecord;

/// Download every package that doesn't already pass validation, applying the
/// repo's filter. Per-package errors are suppressed (logged at debug and
/// skipped) when `ignore_errors` is set, same policy as metadata fetches.
pub fn get_packages(
    arch_dir: &Path,
    base_url: &str,
    client_opts: &ClientOptions,
    pkg_filter: &Option<Filter>,
    packages: &[PackageRecord],
    checksums: bool,
    ignore_errors: bool,
) -> Result<usize> {
    let base_url = base_url.trim_end_matches('/');
    let mut downloaded = 0usize;

    for pkg in packages {
        if !filter::keep(pkg_filter, pkg) {
            continue;
        }

        let dest = arch_dir.join(&pkg.location);
        let check = match pkg.validate_check(checksums) {
            Ok(check) => check,
            Err(err) if ignore_errors => {
                tracing::debug!(package = %pkg.name, %err, "skipping package with no validate record");
                continue;
            }
            Err(err) => return Err(err),
        };

        if dest.is_file() && validate_file(&dest, &check) {
            tracing::debug!(package = %pkg.name, "already up to date, skipping");
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let url = format!("{base_url}/{}", pkg.location);
        match repomirror_fetch::download_binary_file(&url, &dest, client_opts) {
            Ok(_) => {
                tracing::debug!(package = %pkg.name, "downloaded");
                downloaded += 1;
            }
            Err(err) => {
                if ignore_errors {
                    tracing::debug!(package = %pkg.name, %err, "ignoring package download failure");
                    continue;
                }
                return Err(err);
            }
        }
    }

    Ok(downloaded)
}
