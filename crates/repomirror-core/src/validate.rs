// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Check a local file's size or digest against an expected value. Size is
// preferred over a digest when both are available and checksums are not
// forced on, since digests are orders of magnitude slower on large packages.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use digest::Digest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Size(u64),
    Digest { algorithm: String, hex_value: String },
}

pub fn validate_file(path: &Path, check: &Check) -> bool {
    match check {
        Check::Size(expected) => match std::fs::metadata(path) {
            Ok(meta) => meta.len() == *expected,
            Err(_) => false,
        },
        Check::Digest { algorithm, hex_value } => match digest_file(path, algorithm) {
            Ok(actual) => actual.eq_ignore_ascii_case(hex_value),
            Err(_) => false,
        },
    }
}

fn digest_file(path: &Path, algorithm: &str) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = [0u8; 64 * 1024];

    macro_rules! hash_with {
        ($hasher:ty) => {{
            let mut hasher = <$hasher>::new();
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
            hex::encode(hasher.finalize())
        }};
    }

    Ok(match algorithm {
        "sha256" => hash_with!(sha2::Sha256),
        "sha1" => hash_with!(sha1::Sha1),
        "md5" => hash_with!(md5::Md5),
        other => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("unsupported digest algorithm '{other}'"),
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.rpm");
        std::fs::write(&path, b"hello").unwrap();
        assert!(validate_file(&path, &Check::Size(5)));
        assert!(!validate_file(&path, &Check::Size(6)));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.rpm");
        assert!(!validate_file(&path, &Check::Size(0)));
    }

    #[test]
    fn sha256_digest_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.rpm");
        std::fs::write(&path, b"hello").unwrap();
        let expected = {
            use digest::Digest;
            hex::encode(sha2::Sha256::digest(b"hello"))
        };
        assert!(validate_file(
            &path,
            &Check::Digest {
                algorithm: "sha256".into(),
                hex_value: expected,
            }
        ));
    }
}
