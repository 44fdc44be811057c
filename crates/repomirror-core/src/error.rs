// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Error type for the mirror/snapshot engine.
//
// Every fatal condition spec'd in the error handling design gets its own
// variant so the orchestrator can match on kind instead of parsing strings.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("repo '{repo}' is locked by another process")]
    LockContention { repo: String },

    #[error("missing path: {0}")]
    MissingPath(PathBuf),

    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("validation failed for {path}: {message}")]
    Validation { path: PathBuf, message: String },

    #[error("subprocess '{command}' failed with status {status}")]
    Subprocess { command: String, status: String },

    #[error("no backend registered for type '{0}'")]
    PluginNotFound(String),

    #[error("arch '{arch}' is not configured for repo '{repo}'")]
    ArchNotConfigured { repo: String, arch: String },

    #[error("operation '{op}' is not valid for repo '{repo}': {reason}")]
    OperationNotValid {
        op: String,
        repo: String,
        reason: String,
    },

    #[error("backend '{backend}' does not implement '{op}'")]
    NotImplemented { backend: String, op: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("xml parse error: {0}")]
    Xml(String),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
