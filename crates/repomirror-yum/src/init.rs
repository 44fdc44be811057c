// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use repomirror_core::{Error, Result};

/// Ensure `{arch}` and `{arch}/Packages` exist, then invoke the external
/// `createrepo` tool. Reuses existing digests (`--update`) unless `force` is
/// set or there is no existing `repomd.xml` to update from.
pub fn init_arch(arch_dir: &Path, force: bool) -> Result<()> {
    std::fs::create_dir_all(arch_dir.join("Packages"))?;

    let repomd_path = arch_dir.join("repodata/repomd.xml");
    let update = repomd_path.is_file() && !force;

    let mut cmd = std::process::Command::new("createrepo");
    cmd.arg("--basedir")
        .arg(arch_dir)
        .arg("--outputdir")
        .arg(arch_dir);
    if update {
        cmd.arg("--update");
    }
    cmd.arg(arch_dir);

    tracing::debug!(?cmd, "running createrepo");
    let status = cmd.status().map_err(|err| Error::Subprocess {
        command: "createrepo".to_string(),
        status: err.to_string(),
    })?;
    if !status.success() {
        return Err(Error::Subprocess {
            command: "createrepo".to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}
