// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use repomirror_core::Result;

use crate::metadata;

/// Remove every regular file under `arch_dir` that current metadata does not
/// reference (packages, plus the repodata files themselves).
pub fn clean(arch_dir: &Path) -> Result<()> {
    let packages = metadata::read_metadata(arch_dir)?;
    let mut keep: HashSet<PathBuf> = packages
        .iter()
        .map(|p| arch_dir.join(&p.location))
        .collect();
    keep.extend(metadata::repomd_referenced_paths(arch_dir)?);

    for entry in walkdir::WalkDir::new(arch_dir) {
        let entry = entry.map_err(walkdir_to_io)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().to_path_buf();
        if path.extension().and_then(|e| e.to_str()) == Some("lock") {
            continue;
        }
        if !keep.contains(&path) {
            std::fs::remove_file(&path)?;
            tracing::info!(path = %path.display(), "removed file not referenced by current metadata");
        }
    }
    Ok(())
}

fn walkdir_to_io(err: walkdir::Error) -> repomirror_core::Error {
    match err.into_io_error() {
        Some(err) => repomirror_core::Error::Io(err),
        None => repomirror_core::Error::Config("directory walk failed during clean".to_string()),
    }
}
