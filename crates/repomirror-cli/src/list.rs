// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! `list` action and the `diff` renderer it shares its output formats with.
//! Both are read-only and never take a repo lock.

use itertools::{EitherOrBoth, Itertools};

use repomirror_backend::DiffResult;
use repomirror_core::config::{Config, Repo, TagStyle};
use repomirror_core::{Error, Result};

use crate::cli::{ListArgs, ListFormat};

pub fn run(config: &Config, args: &ListArgs) -> Result<()> {
    match &args.repo {
        None => render_repos(config, args.format),
        Some(name) => render_tags(config, name, args.format),
    }
}

fn render_repos(config: &Config, format: ListFormat) -> Result<()> {
    match format {
        ListFormat::Json => {
            let repos: Vec<_> = config
                .repos
                .values()
                .map(|r| {
                    serde_json::json!({
                        "type": r.repo_type.as_str(),
                        "mirrored": r.is_mirrored(),
                        "name": r.name,
                    })
                })
                .collect();
            println!("{}", serde_json::json!({ "repos": repos }));
        }
        ListFormat::Csv => {
            for r in config.repos.values() {
                println!(
                    "{},{},{}",
                    csv_quote(r.repo_type.as_str()),
                    r.is_mirrored(),
                    csv_quote(&r.name)
                );
            }
        }
        ListFormat::Default => {
            for r in config.repos.values() {
                println!("{}|{}|{}", r.repo_type.as_str(), r.is_mirrored(), r.name);
            }
        }
    }
    Ok(())
}

fn render_tags(config: &Config, repo_name: &str, format: ListFormat) -> Result<()> {
    let repo = config
        .repos
        .get(repo_name)
        .ok_or_else(|| Error::Config(format!("no such repo '{repo_name}'")))?;
    let tags = list_tags(config, repo)?;

    match format {
        ListFormat::Json => {
            let tags_json: Vec<_> = tags
                .iter()
                .map(|(tag, soft)| serde_json::json!({ "tag": tag, "soft tag": soft }))
                .collect();
            println!("{}", serde_json::json!({ "repo": repo_name, "tags": tags_json }));
        }
        ListFormat::Csv => {
            for (tag, soft) in &tags {
                println!("{},{}", csv_quote(tag), soft);
            }
        }
        ListFormat::Default => {
            for (tag, soft) in &tags {
                println!("{}|{}", tag, soft);
            }
        }
    }
    Ok(())
}

/// Tags for `repo`: every tag directory that has a (possibly symlinked)
/// entry for this repo, paired with whether that entry is a symlink ("soft"
/// tag) rather than a hardlink tree.
fn list_tags(config: &Config, repo: &Repo) -> Result<Vec<(String, bool)>> {
    let mut tags = Vec::new();
    match config.tag_style {
        TagStyle::TopDir => {
            if !config.data_dir.is_dir() {
                return Ok(tags);
            }
            for entry in std::fs::read_dir(&config.data_dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let candidate = entry.path().join(&repo.local);
                if candidate.exists() || candidate.is_symlink() {
                    tags.push((
                        entry.file_name().to_string_lossy().into_owned(),
                        candidate.is_symlink(),
                    ));
                }
            }
        }
        TagStyle::BottomDir => {
            let local_dir = config.data_dir.join(&repo.local);
            if !local_dir.is_dir() {
                return Ok(tags);
            }
            for entry in std::fs::read_dir(&local_dir)? {
                let entry = entry?;
                tags.push((
                    entry.file_name().to_string_lossy().into_owned(),
                    entry.path().is_symlink(),
                ));
            }
        }
    }
    tags.sort();
    Ok(tags)
}

pub fn render_diff(result: &DiffResult, format: ListFormat) {
    match format {
        ListFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "src_tag": result.src_tag,
                    "dest_tag": result.dest_tag,
                    "src_only": result.src_only,
                    "dest_only": result.dest_only,
                })
            );
        }
        ListFormat::Csv => {
            for f in &result.src_only {
                println!("{},{}", csv_quote(&result.src_tag), csv_quote(f));
            }
            for f in &result.dest_only {
                println!("{},{}", csv_quote(&result.dest_tag), csv_quote(f));
            }
        }
        ListFormat::Default => {
            println!("{}|{}", result.src_tag, result.dest_tag);
            for pair in result.src_only.iter().zip_longest(result.dest_only.iter()) {
                match pair {
                    EitherOrBoth::Both(a, b) => println!("{a}|{b}"),
                    EitherOrBoth::Left(a) => println!("{a}|"),
                    EitherOrBoth::Right(b) => println!("|{b}"),
                }
            }
        }
    }
}

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
