// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Repo catalog: parse into a raw, serde-friendly shape, then validate once
// into an immutable `Config`. All normalization (arch/url coercion to a
// sequence, proxy inheritance, tag_style parsing) happens in this one pass;
// nothing downstream mutates the config afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const HEAD_TAG: &str = "head";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    TopDir,
    BottomDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoType {
    Yum,
    Apt,
    Plain,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::Yum => "Yum",
            RepoType::Apt => "Apt",
            RepoType::Plain => "Plain",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Yum" => Some(RepoType::Yum),
            "Apt" => Some(RepoType::Apt),
            "Plain" => Some(RepoType::Plain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Filter {
    IncludeFilename(Regex),
    IncludePackage(Regex),
    ExcludeFilename(Regex),
    ExcludePackage(Regex),
}

#[derive(Debug, Clone)]
pub struct Repo {
    pub name: String,
    pub repo_type: RepoType,
    pub local: String,
    pub arch: Vec<String>,
    /// Empty means "local-only repo" (no upstream URL).
    pub url: Vec<String>,
    pub ca: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub filter: Option<Filter>,
    pub proxy: Option<String>,
    /// Per-repo override of the top-level `hard_tag_regex`.
    pub hard_tag_regex: Option<Regex>,
}

impl Repo {
    pub fn is_mirrored(&self) -> bool {
        !self.url.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub tag_style: TagStyle,
    pub proxy: Option<String>,
    pub hard_tag_regex: Option<Regex>,
    /// Sorted by repo name so "all"/regex fan-out is deterministic.
    pub repos: BTreeMap<String, Repo>,
}

impl Config {
    /// The regex that forces hardlink mode for a given repo's tags: the
    /// repo's own override if set, else the top-level default.
    pub fn hard_tag_regex_for<'a>(&'a self, repo: &'a Repo) -> Option<&'a Regex> {
        repo.hard_tag_regex.as_ref().or(self.hard_tag_regex.as_ref())
    }

    pub fn repo_names_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let re = Regex::new(pattern)?;
        Ok(self
            .repos
            .keys()
            .filter(|name| re.is_match(name))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    #[serde(rename = "type")]
    pub repo_type: String,
    pub local: String,
    pub arch: OneOrMany<String>,
    pub url: Option<OneOrMany<String>>,
    pub ca: Option<String>,
    pub cert: Option<String>,
    pub key: Option<String>,
    pub include_filename: Option<String>,
    pub include_package: Option<String>,
    pub exclude_filename: Option<String>,
    pub exclude_package: Option<String>,
    pub proxy: Option<String>,
    pub hard_tag_regex: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    pub data_dir: PathBuf,
    pub tag_style: String,
    pub proxy: Option<String>,
    pub hard_tag_regex: Option<String>,
    #[serde(default)]
    pub repo: BTreeMap<String, RawRepo>,
}

/// Validate and normalize a raw config into its immutable form. Fails the
/// whole call on the first violated invariant.
pub fn validate_config(raw: RawConfig, cwd: &Path) -> Result<Config> {
    let data_dir = if raw.data_dir.is_absolute() {
        raw.data_dir
    } else {
        cwd.join(raw.data_dir)
    };
    if !data_dir.is_dir() {
        return Err(Error::MissingPath(data_dir));
    }

    let tag_style = match raw.tag_style.as_str() {
        "topdir" => TagStyle::TopDir,
        "bottomdir" => TagStyle::BottomDir,
        other => {
            return Err(Error::Config(format!(
                "tag_style must be 'topdir' or 'bottomdir', got '{other}'"
            )))
        }
    };

    let hard_tag_regex = raw
        .hard_tag_regex
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let mut repos = BTreeMap::new();
    for (name, raw_repo) in raw.repo {
        let repo = validate_repo(&name, raw_repo, raw.proxy.as_deref())?;
        repos.insert(name, repo);
    }

    Ok(Config {
        data_dir,
        tag_style,
        proxy: raw.proxy,
        hard_tag_regex,
        repos,
    })
}

fn validate_repo(name: &str, raw: RawRepo, global_proxy: Option<&str>) -> Result<Repo> {
    let repo_type = RepoType::parse(&raw.repo_type).ok_or_else(|| {
        Error::Config(format!(
            "repo '{name}': type must be one of Yum, Apt, Plain, got '{}'",
            raw.repo_type
        ))
    })?;

    if raw.local.is_empty() {
        return Err(Error::Config(format!("repo '{name}': local must not be empty")));
    }

    let arch = raw.arch.into_vec();
    if arch.is_empty() {
        return Err(Error::Config(format!("repo '{name}': arch must not be empty")));
    }

    let url = raw.url.map(OneOrMany::into_vec).unwrap_or_default();

    let filter_count = [
        &raw.include_filename,
        &raw.include_package,
        &raw.exclude_filename,
        &raw.exclude_package,
    ]
    .iter()
    .filter(|v| v.is_some())
    .count();
    if filter_count > 1 {
        return Err(Error::Config(format!(
            "repo '{name}': at most one of include_filename/include_package/exclude_filename/exclude_package may be set"
        )));
    }
    let filter = if let Some(p) = &raw.include_filename {
        Some(Filter::IncludeFilename(Regex::new(p)?))
    } else if let Some(p) = &raw.include_package {
        Some(Filter::IncludePackage(Regex::new(p)?))
    } else if let Some(p) = &raw.exclude_filename {
        Some(Filter::ExcludeFilename(Regex::new(p)?))
    } else if let Some(p) = &raw.exclude_package {
        Some(Filter::ExcludePackage(Regex::new(p)?))
    } else {
        None
    };

    let (ca, cert, key) = if url.is_empty() {
        if raw.ca.is_some() || raw.cert.is_some() || raw.key.is_some() {
            return Err(Error::Config(format!(
                "repo '{name}': ca/cert/key are only valid for a mirrored (url-bearing) repo"
            )));
        }
        (None, None, None)
    } else {
        let present = [&raw.ca, &raw.cert, &raw.key]
            .iter()
            .filter(|v| v.is_some())
            .count();
        if present != 0 && present != 3 {
            return Err(Error::Config(format!(
                "repo '{name}': ca, cert and key must be set all together or not at all"
            )));
        }
        let mut resolve = |field: &str, v: &Option<String>| -> Result<Option<PathBuf>> {
            match v {
                None => Ok(None),
                Some(p) => {
                    let path = PathBuf::from(p);
                    if !path.is_file() {
                        return Err(Error::Config(format!(
                            "repo '{name}': {field} '{p}' does not exist as a regular file"
                        )));
                    }
                    Ok(Some(path))
                }
            }
        };
        (
            resolve("ca", &raw.ca)?,
            resolve("cert", &raw.cert)?,
            resolve("key", &raw.key)?,
        )
    };

    let hard_tag_regex = raw
        .hard_tag_regex
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    Ok(Repo {
        name: name.to_string(),
        repo_type,
        local: raw.local,
        arch,
        url,
        ca,
        cert,
        key,
        filter,
        proxy: raw.proxy.or_else(|| global_proxy.map(str::to_string)),
        hard_tag_regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(local: &str, arch: Vec<&str>, url: Option<Vec<&str>>) -> RawRepo {
        RawRepo {
            repo_type: "Yum".to_string(),
            local: local.to_string(),
            arch: OneOrMany::Many(arch.into_iter().map(String::from).collect()),
            url: url.map(|v| OneOrMany::Many(v.into_iter().map(String::from).collect())),
            ca: None,
            cert: None,
            key: None,
            include_filename: None,
            include_package: None,
            exclude_filename: None,
            exclude_package: None,
            proxy: None,
            hard_tag_regex: None,
        }
    }

    #[test]
    fn arch_is_coerced_from_scalar() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfig {
            data_dir: dir.path().to_path_buf(),
            tag_style: "topdir".to_string(),
            proxy: None,
            hard_tag_regex: None,
            repo: BTreeMap::new(),
        };
        raw.repo.insert(
            "centos-base".to_string(),
            RawRepo {
                arch: OneOrMany::One("x86_64".to_string()),
                ..repo("centos-base", vec![], None)
            },
        );
        let cfg = validate_config(raw, Path::new("/")).unwrap();
        assert_eq!(cfg.repos["centos-base"].arch, vec!["x86_64".to_string()]);
    }

    #[test]
    fn two_filters_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfig {
            data_dir: dir.path().to_path_buf(),
            tag_style: "topdir".to_string(),
            proxy: None,
            hard_tag_regex: None,
            repo: BTreeMap::new(),
        };
        let mut r = repo("centos-base", vec!["x86_64"], None);
        r.include_filename = Some(".*".to_string());
        r.exclude_package = Some(".*".to_string());
        raw.repo.insert("centos-base".to_string(), r);
        assert!(validate_config(raw, Path::new("/")).is_err());
    }

    #[test]
    fn ca_cert_key_must_be_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfig {
            data_dir: dir.path().to_path_buf(),
            tag_style: "topdir".to_string(),
            proxy: None,
            hard_tag_regex: None,
            repo: BTreeMap::new(),
        };
        let mut r = repo("centos-base", vec!["x86_64"], Some(vec!["http://x/"]));
        r.ca = Some("/does/not/exist".to_string());
        raw.repo.insert("centos-base".to_string(), r);
        assert!(validate_config(raw, Path::new("/")).is_err());
    }

    #[test]
    fn global_proxy_inherited_unless_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfig {
            data_dir: dir.path().to_path_buf(),
            tag_style: "topdir".to_string(),
            proxy: Some("http://proxy:3128".to_string()),
            hard_tag_regex: None,
            repo: BTreeMap::new(),
        };
        raw.repo
            .insert("a".to_string(), repo("a", vec!["x86_64"], None));
        let mut b = repo("b", vec!["x86_64"], None);
        b.proxy = Some("http://other:8080".to_string());
        raw.repo.insert("b".to_string(), b);
        let cfg = validate_config(raw, Path::new("/")).unwrap();
        assert_eq!(
            cfg.repos["a"].proxy.as_deref(),
            Some("http://proxy:3128")
        );
        assert_eq!(cfg.repos["b"].proxy.as_deref(), Some("http://other:8080"));
    }
}
