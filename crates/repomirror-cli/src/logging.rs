// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Process-wide `tracing` sink, installed exactly once: library crates never
//! install one of their own, only the binary does. Honors `REPOMIRROR_LOG`,
//! falling back to `RUST_LOG`, defaulting to `info`.

pub fn install() {
    let filter = std::env::var("REPOMIRROR_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_target(false)
        .init();
}
