// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Apt backend plugin. Internals (Release/Packages.gz parsing, dpkg version
//! comparison) are out of scope; this crate exists to honor the `Backend`
//! contract so the registry and orchestrator can dispatch to `Apt` repos
//! without special-casing them, and so the contract itself is exercised by a
//! real (if inert) implementation.

use std::path::{Path, PathBuf};

use repomirror_backend::{Backend, DiffResult, MirrorOptions, RepoCtx};
use repomirror_core::{Error, Result};

pub struct AptBackend;

impl AptBackend {
    fn unimplemented(&self, op: &str) -> Error {
        Error::NotImplemented {
            backend: self.type_name().to_string(),
            op: op.to_string(),
        }
    }
}

impl Backend for AptBackend {
    fn type_name(&self) -> &'static str {
        "Apt"
    }

    fn mirror(&self, _ctx: &RepoCtx, _arches: &[String], _opts: &MirrorOptions) -> Result<()> {
        Err(self.unimplemented("mirror"))
    }

    fn clean(&self, _ctx: &RepoCtx, _arches: &[String], _force: bool) -> Result<()> {
        Err(self.unimplemented("clean"))
    }

    fn init(&self, _ctx: &RepoCtx, _arch: Option<&str>, _force: bool) -> Result<()> {
        Err(self.unimplemented("init"))
    }

    fn add_file(&self, _ctx: &RepoCtx, _arch: &str, _files: &[PathBuf], _force: bool) -> Result<()> {
        Err(self.unimplemented("add-file"))
    }

    fn del_file(&self, _ctx: &RepoCtx, _arch: &str, _files: &[String]) -> Result<()> {
        Err(self.unimplemented("del-file"))
    }

    fn diff(
        &self,
        _arch: &str,
        _src_dir: &Path,
        _src_tag: &str,
        _dest_dir: &Path,
        _dest_tag: &str,
    ) -> Result<DiffResult> {
        Err(self.unimplemented("diff"))
    }
}
