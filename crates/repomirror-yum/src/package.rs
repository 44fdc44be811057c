// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use repomirror_core::validate::Check;
use repomirror_core::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub algorithm: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    /// Repo-relative path, e.g. `Packages/foo-1.0.rpm`.
    pub location: String,
    pub size: Option<u64>,
    pub checksum: Option<Checksum>,
}

impl PackageRecord {
    pub fn basename(&self) -> &str {
        self.location.rsplit('/').next().unwrap_or(&self.location)
    }

    /// The predicate used to decide whether a local copy is up to date: size
    /// when checksums are not forced on and a size is known, otherwise the
    /// checksum. A descriptor with neither is a hard error (spec §4.7).
    pub fn validate_check(&self, checksums: bool) -> Result<Check, Error> {
        if !checksums {
            if let Some(size) = self.size {
                return Ok(Check::Size(size));
            }
        }
        if let Some(checksum) = &self.checksum {
            return Ok(Check::Digest {
                algorithm: checksum.algorithm.clone(),
                hex_value: checksum.value.clone(),
            });
        }
        if let Some(size) = self.size {
            return Ok(Check::Size(size));
        }
        Err(Error::Config(format!(
            "package '{}' has neither a size nor a checksum to validate against",
            self.name
        )))
    }
}
