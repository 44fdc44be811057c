// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Builds one tag directory from another: a hardlink tree (independent
//! snapshot, shares inodes with the source) or a symlink (a cheap, atomic
//! pointer). See spec §4.9: symlinks are for production promotion, hardlinks
//! for a stable snapshot unaffected by later mutation of the source.

use std::path::Path;

use repomirror_core::{Error, Result};

static TAG_NAME_RE: &str = r"^[A-Za-z0-9_-]+$";

pub fn validate_tag_name(tag: &str) -> Result<()> {
    let re = regex::Regex::new(TAG_NAME_RE).expect("static regex is valid");
    if re.is_match(tag) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "tag name '{tag}' must match {TAG_NAME_RE}"
        )))
    }
}

/// Build `dest_dir` from `src_dir`. `symlink` is the caller's requested mode;
/// `dest_tag_is_hard` is whether the destination tag name matches the
/// configured `hard_tag_regex`, which forces hardlink mode regardless of
/// `symlink`.
pub fn build_tag(
    src_dir: &Path,
    dest_dir: &Path,
    symlink: bool,
    dest_tag_is_hard: bool,
    force: bool,
) -> Result<()> {
    if !src_dir.is_dir() {
        return Err(Error::MissingPath(src_dir.to_path_buf()));
    }

    if dest_dir.exists() || dest_dir.is_symlink() {
        let non_empty = if dest_dir.is_symlink() {
            true
        } else {
            dest_dir
                .read_dir()
                .map(|mut d| d.next().is_some())
                .unwrap_or(false)
        };
        if non_empty && !force {
            return Err(Error::Config(format!(
                "dest tag '{}' already exists; pass force to overwrite",
                dest_dir.display()
            )));
        }
        if dest_dir.is_symlink() || dest_dir.is_file() {
            std::fs::remove_file(dest_dir)?;
        } else {
            std::fs::remove_dir_all(dest_dir)?;
        }
    }

    if let Some(parent) = dest_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let use_symlink = symlink && !dest_tag_is_hard;
    if use_symlink {
        std::os::unix::fs::symlink(src_dir, dest_dir)?;
        tracing::info!(src = %src_dir.display(), dest = %dest_dir.display(), "created soft tag (symlink)");
    } else {
        hardlink_tree(src_dir, dest_dir)?;
        tracing::info!(src = %src_dir.display(), dest = %dest_dir.display(), "created hard tag (hardlink tree)");
    }
    Ok(())
}

fn hardlink_tree(src: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry.map_err(walkdir_to_io)?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(err) => return Err(Error::Config(err.to_string())),
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::hard_link(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn walkdir_to_io(err: walkdir::Error) -> Error {
    match err.into_io_error() {
        Some(err) => Error::Io(err),
        None => Error::Config("directory walk failed".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_rejects_slashes() {
        assert!(validate_tag_name("release-1").is_ok());
        assert!(validate_tag_name("../escape").is_err());
    }

    #[test]
    fn hardlink_tag_shares_inode() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("head");
        std::fs::create_dir_all(src.join("x86_64/Packages")).unwrap();
        std::fs::write(src.join("x86_64/Packages/foo-1.0.rpm"), b"hi").unwrap();

        let dest = tmp.path().join("release-1");
        build_tag(&src, &dest, false, false, false).unwrap();

        let src_meta = std::fs::metadata(src.join("x86_64/Packages/foo-1.0.rpm")).unwrap();
        let dest_meta = std::fs::metadata(dest.join("x86_64/Packages/foo-1.0.rpm")).unwrap();
        use std::os::unix::fs::MetadataExt;
        assert_eq!(src_meta.ino(), dest_meta.ino());
    }

    #[test]
    fn symlink_tag_points_at_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("head");
        std::fs::create_dir_all(&src).unwrap();

        let dest = tmp.path().join("prod");
        build_tag(&src, &dest, true, false, false).unwrap();

        assert!(dest.is_symlink());
        assert_eq!(std::fs::read_link(&dest).unwrap(), src);
    }

    #[test]
    fn hard_tag_regex_overrides_symlink_request() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("head");
        std::fs::create_dir_all(&src).unwrap();

        let dest = tmp.path().join("release-1");
        build_tag(&src, &dest, true, true, false).unwrap();

        assert!(!dest.is_symlink());
        assert!(dest.is_dir());
    }
}
