// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for retroasm.

use std::process::ExitCode;

use clap::Parser;

use retroasm::cli::{run, Cli};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(message) => {
            eprintln!("retroasm: {message}");
            ExitCode::from(2)
        }
    }
}
