// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski

//! vectorgen: writes the trap vector stubs and table to stdout.
//! Takes no arguments; output is byte-identical on every run.

use std::io::{self, BufWriter, Write};

use tool_log::tlog_error;

fn run() -> vectorgen::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    vectorgen::generate(&mut out)?;
    out.flush()?;
    Ok(())
}

fn main() {
    tool_log::init(tool_log::DEFAULT_LEVEL, tool_log::LoggerCallbacks::default());

    if let Err(e) = run() {
        tlog_error!("vectorgen", "{}", e);
        std::process::exit(1);
    }
}
