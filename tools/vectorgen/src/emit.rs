// tools/vectorgen/src/emit.rs
// Trap entry stubs and vector table emission
// ============================================================================
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski
// SPDX-License-Identifier: BSD-3-Clause

use std::io::Write;

use bitflags::bitflags;
use tool_log::tlog_debug;

use crate::config::GenConfig;
use crate::error::Result;
use crate::vectors::{self, VECTOR_COUNT};

const SUBSYS: &str = "vectorgen";

bitflags! {
    /// Parts of the listing to write. `Sections::all()` is the full file.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Sections: u8 {
        /// Generated-file banner and the shared entry declaration.
        const HEADER = 1 << 0;
        /// One stub per vector, in the current (text) section.
        const STUBS = 1 << 1;
        /// Data section switch and the table of stub addresses.
        const TABLE = 1 << 2;
    }
}

/// Emits the per-vector entry stubs and the `vectors` address table.
///
/// Every stub leaves the same two words on the stack for the shared entry
/// (error code, then trap number): vectors where the CPU already pushed an
/// error code get only the trap number, all others get a zero first.
#[derive(Clone, Copy, Debug)]
pub struct VectorTableGenerator {
    config: GenConfig,
}

impl VectorTableGenerator {
    pub fn new(config: GenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    #[must_use]
    pub fn stub_symbol(&self, vector: u8) -> String {
        format!("{}{}", self.config.stub_prefix, vector)
    }

    pub fn emit<W: Write>(&self, out: &mut W, sections: Sections) -> Result<()> {
        if sections.contains(Sections::HEADER) {
            self.write_header(out)?;
        }
        if sections.contains(Sections::STUBS) {
            for v in vectors::all() {
                self.write_stub(out, v)?;
            }
        }
        if sections.contains(Sections::TABLE) {
            self.write_table(out)?;
        }
        tlog_debug!(SUBSYS, "emitted {:?} for {} vectors", sections, VECTOR_COUNT);
        Ok(())
    }

    /// Full listing as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::with_capacity(VECTOR_COUNT * 64);
        // Writes into a Vec cannot fail
        let _ = self.emit(&mut buf, Sections::all());
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn write_header<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.config.header)?;
        writeln!(out, ".globl {}", self.config.entry_symbol)?;
        Ok(())
    }

    fn write_stub<W: Write>(&self, out: &mut W, vector: u8) -> Result<()> {
        let cfg = &self.config;
        let sym = self.stub_symbol(vector);

        writeln!(out, ".globl {}", sym)?;
        writeln!(out, "{}:", sym)?;
        if vectors::pushes_synthetic_error_code(vector) {
            writeln!(out, "{}{} $0", cfg.indent, cfg.push)?;
        }
        writeln!(out, "{}{} ${}", cfg.indent, cfg.push, vector)?;
        writeln!(out, "{}{} {}", cfg.indent, cfg.jump, cfg.entry_symbol)?;
        Ok(())
    }

    fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        let cfg = &self.config;

        writeln!(out)?;
        writeln!(out, "{}", cfg.data_section)?;
        writeln!(out, ".globl {}", cfg.table_symbol)?;
        writeln!(out, "{}:", cfg.table_symbol)?;
        for v in vectors::all() {
            writeln!(out, "{}{} {}", cfg.indent, cfg.pointer, self.stub_symbol(v))?;
        }
        Ok(())
    }
}

impl Default for VectorTableGenerator {
    fn default() -> Self {
        Self {
            config: GenConfig::default(),
        }
    }
}

/// Write the complete default listing.
pub fn generate<W: Write>(out: &mut W) -> Result<()> {
    VectorTableGenerator::default().emit(out, Sections::all())
}
