// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Set-symmetric-difference between the files referenced by two tags'
//! metadata. Backends gather the referenced basenames (format-specific);
//! this module only does the set arithmetic.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub src_tag: String,
    pub dest_tag: String,
    /// Referenced by `src_tag` but not `dest_tag`.
    pub src_only: Vec<String>,
    /// Referenced by `dest_tag` but not `src_tag`.
    pub dest_only: Vec<String>,
}

pub fn diff(
    src_tag: &str,
    src_files: BTreeSet<String>,
    dest_tag: &str,
    dest_files: BTreeSet<String>,
) -> DiffResult {
    let src_only = src_files.difference(&dest_files).cloned().collect();
    let dest_only = dest_files.difference(&src_files).cloned().collect();
    DiffResult {
        src_tag: src_tag.to_string(),
        dest_tag: dest_tag.to_string(),
        src_only,
        dest_only,
    }
}
