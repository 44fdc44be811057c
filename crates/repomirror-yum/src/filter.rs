// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

use repomirror_core::config::Filter;

use crate::package::PackageRecord;

/// Whether `pkg` survives the repo's configured filter. At most one of the
/// four filter kinds is ever set (enforced at config-validation time).
pub fn keep(filter: &Option<Filter>, pkg: &PackageRecord) -> bool {
    match filter {
        None => true,
        Some(Filter::IncludeFilename(re)) => re.is_match(pkg.basename()),
        Some(Filter::IncludePackage(re)) => re.is_match(&pkg.name),
        Some(Filter::ExcludeFilename(re)) => !re.is_match(pkg.basename()),
        Some(Filter::ExcludePackage(re)) => !re.is_match(&pkg.name),
    }
}
