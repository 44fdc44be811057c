// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// End-to-end scenario: symlink-promote `head` to a soft tag, then promote to
// a tag matched by `hard_tag_regex`, which must force a hardlink tree instead
// of the symlink the caller asked for.

mod support;

use std::os::unix::fs::MetadataExt;
use std::process::Command;

#[test]
fn symlink_promote_then_regex_forced_hardlink() {
    let data_dir = tempfile::tempdir().unwrap();

    let head_packages = data_dir.path().join("head/centos-base/x86_64/Packages");
    std::fs::create_dir_all(&head_packages).unwrap();
    std::fs::write(head_packages.join("foo-1.0.rpm"), b"package bytes").unwrap();

    let config_path = data_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
data_dir = "{data_dir}"
tag_style = "topdir"
hard_tag_regex = "^release-"

[repo.centos-base]
type = "Yum"
local = "centos-base"
arch = "x86_64"
url = "http://127.0.0.1:0/%ARCH%/os/"
"#,
            data_dir = data_dir.path().display(),
        ),
    )
    .unwrap();

    let bin = env!("CARGO_BIN_EXE_repomirror");

    let prod = Command::new(bin)
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            data_dir.path().to_str().unwrap(),
            "tag",
            "centos-base",
            "prod",
            "--symlink",
        ])
        .output()
        .unwrap();
    assert!(prod.status.success(), "{:?}", String::from_utf8_lossy(&prod.stderr));

    let prod_link = data_dir.path().join("prod/centos-base");
    assert!(prod_link.is_symlink(), "prod tag should be a symlink");
    assert_eq!(
        std::fs::read_link(&prod_link).unwrap(),
        data_dir.path().join("head/centos-base")
    );

    let release = Command::new(bin)
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            data_dir.path().to_str().unwrap(),
            "tag",
            "centos-base",
            "release-1",
            "--symlink",
        ])
        .output()
        .unwrap();
    assert!(
        release.status.success(),
        "{:?}",
        String::from_utf8_lossy(&release.stderr)
    );

    let release_pkg = data_dir
        .path()
        .join("release-1/centos-base/x86_64/Packages/foo-1.0.rpm");
    assert!(
        !data_dir.path().join("release-1/centos-base").is_symlink(),
        "hard_tag_regex should have forced a hardlink tree despite --symlink"
    );
    let head_meta = std::fs::metadata(head_packages.join("foo-1.0.rpm")).unwrap();
    let release_meta = std::fs::metadata(&release_pkg).unwrap();
    assert_eq!(
        head_meta.ino(),
        release_meta.ino(),
        "release-1's copy should share an inode with head's"
    );
}
