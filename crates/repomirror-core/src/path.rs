// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Pure path computation. Never touches the filesystem.

use std::path::PathBuf;

use crate::config::{Repo, TagStyle};

/// `{data_dir}/{tag}/{local}` for topdir, `{data_dir}/{local}/{tag}` for
/// bottomdir.
pub fn repo_tag_dir(data_dir: &std::path::Path, tag_style: TagStyle, repo: &Repo, tag: &str) -> PathBuf {
    match tag_style {
        TagStyle::TopDir => data_dir.join(tag).join(&repo.local),
        TagStyle::BottomDir => data_dir.join(&repo.local).join(tag),
    }
}

pub fn arch_dir(data_dir: &std::path::Path, tag_style: TagStyle, repo: &Repo, tag: &str, arch: &str) -> PathBuf {
    repo_tag_dir(data_dir, tag_style, repo, tag).join(arch)
}

pub fn lock_path(repo_tag_dir: &std::path::Path, repo_name: &str) -> PathBuf {
    repo_tag_dir.join(format!("{repo_name}.lock"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoType;

    fn repo(local: &str) -> Repo {
        Repo {
            name: "r".into(),
            repo_type: RepoType::Yum,
            local: local.into(),
            arch: vec!["x86_64".into()],
            url: vec![],
            ca: None,
            cert: None,
            key: None,
            filter: None,
            proxy: None,
            hard_tag_regex: None,
        }
    }

    #[test]
    fn topdir_puts_tag_first() {
        let p = repo_tag_dir(
            std::path::Path::new("/srv"),
            TagStyle::TopDir,
            &repo("centos-base"),
            "head",
        );
        assert_eq!(p, std::path::PathBuf::from("/srv/head/centos-base"));
    }

    #[test]
    fn bottomdir_puts_local_first() {
        let p = repo_tag_dir(
            std::path::Path::new("/srv"),
            TagStyle::BottomDir,
            &repo("centos-base"),
            "head",
        );
        assert_eq!(p, std::path::PathBuf::from("/srv/centos-base/head"));
    }
}
