// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Streamed HTTP(S) downloads with optional mutual-TLS client auth and
//! per-repo proxying. This is the only crate in the workspace that performs
//! network I/O.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use repomirror_core::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub proxy: Option<String>,
    pub ca: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

/// Build a blocking client for one repo's fetches. Cheap enough to build per
/// call; the options rarely change within a single mirror run.
fn build_client(opts: &ClientOptions) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(300))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy) = &opts.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| Error::Config(format!("invalid proxy '{proxy}': {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(ca) = &opts.ca {
        let pem = std::fs::read(ca)?;
        let cert = reqwest::Certificate::from_pem(&pem)
            .map_err(|e| Error::Config(format!("invalid CA file {}: {e}", ca.display())))?;
        builder = builder.add_root_certificate(cert);
    }

    if let (Some(cert), Some(key)) = (&opts.cert, &opts.key) {
        let mut pem = std::fs::read(cert)?;
        pem.extend(std::fs::read(key)?);
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| Error::Config(format!("invalid client cert/key pair: {e}")))?;
        builder = builder.identity(identity);
    }

    builder
        .build()
        .map_err(|e| Error::Fetch {
            url: String::new(),
            message: e.to_string(),
        })
}

/// Download `url` to `dest`, writing to a sibling `.part` file first and
/// renaming into place only once the full body has been written
/// successfully. Returns the number of bytes written. Parent directory of
/// `dest` must already exist.
pub fn download_binary_file(url: &str, dest: &Path, opts: &ClientOptions) -> Result<u64> {
    let client = build_client(opts)?;
    let mut response = client.get(url).send().map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Fetch {
            url: url.to_string(),
            message: format!("HTTP status {status}"),
        });
    }

    let part_path = part_path(dest);
    let mut file = std::fs::File::create(&part_path)?;
    let written = std::io::copy(&mut response, &mut file).map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    file.flush()?;
    drop(file);

    std::fs::rename(&part_path, dest)?;
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_suffixes_filename() {
        let dest = Path::new("/srv/head/centos-base/x86_64/repodata/repomd.xml");
        assert_eq!(
            part_path(dest),
            Path::new("/srv/head/centos-base/x86_64/repodata/repomd.xml.part")
        );
    }
}
