// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

// Loads the repo catalog: default -> system file -> user file -> explicit
// file -> environment, merged with the `config` crate, then handed to
// validate_config for the one normalization/validation pass.

use std::path::Path;

use config::{Config as ConfigBuilderSource, Environment, File, FileFormat};

use crate::config::{validate_config, Config, RawConfig};
use crate::error::Result;

pub const SYSTEM_CONFIG_PATH: &str = "/etc/repomirror.conf";

pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
    let mut builder = ConfigBuilderSource::builder().add_source(
        File::with_name(SYSTEM_CONFIG_PATH)
            .format(FileFormat::Ini)
            .required(false),
    );

    if let Some(home) = dirs::home_dir() {
        let user_config = home.join(".config/repomirror/repomirror.conf");
        if let Some(name) = user_config.to_str() {
            builder = builder.add_source(
                File::with_name(name).format(FileFormat::Ini).required(false),
            );
        }
    }

    if let Some(path) = explicit_path {
        // Format is inferred from the extension (.toml/.ini/.json/...) rather
        // than forced, unlike the fixed-name system/user files above: an
        // explicit `--config` path is free to use whichever format its
        // extension names.
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("REPOMIRROR").separator("_"));

    let raw: RawConfig = builder.build()?.try_deserialize()?;
    let cwd = std::env::current_dir()?;
    validate_config(raw, &cwd)
}
