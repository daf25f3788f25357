// tools/vectorgen/src/config.rs
// Emission parameters for the vector stub listing
// ============================================================================
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski
// SPDX-License-Identifier: BSD-3-Clause

use crate::error::{Error, Result};

pub const DEFAULT_HEADER: &str = "# Generated by vectorgen. Do not edit!";
pub const DEFAULT_ENTRY_SYMBOL: &str = "alltraps";
pub const DEFAULT_STUB_PREFIX: &str = "vector";
pub const DEFAULT_TABLE_SYMBOL: &str = "vectors";
pub const DEFAULT_JUMP: &str = "jmp";
pub const DEFAULT_DATA_SECTION: &str = ".data";
pub const DEFAULT_INDENT: &str = "    ";

/// Assembler spelling for the target's word size. GNU as syntax either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Amd64,
    I386,
}

impl Dialect {
    pub const fn push(self) -> &'static str {
        match self {
            Dialect::Amd64 => "push",
            Dialect::I386 => "pushl",
        }
    }

    /// Pointer-width data directive for the table.
    pub const fn pointer(self) -> &'static str {
        match self {
            Dialect::Amd64 => ".quad",
            Dialect::I386 => ".long",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenConfig {
    pub header: &'static str,
    pub entry_symbol: &'static str,
    pub stub_prefix: &'static str,
    pub table_symbol: &'static str,
    pub push: &'static str,
    pub jump: &'static str,
    pub data_section: &'static str,
    pub pointer: &'static str,
    pub indent: &'static str,
}

impl GenConfig {
    pub const fn default() -> Self {
        Self::for_dialect(Dialect::Amd64)
    }

    pub const fn for_dialect(dialect: Dialect) -> Self {
        Self {
            header: DEFAULT_HEADER,
            entry_symbol: DEFAULT_ENTRY_SYMBOL,
            stub_prefix: DEFAULT_STUB_PREFIX,
            table_symbol: DEFAULT_TABLE_SYMBOL,
            push: dialect.push(),
            jump: DEFAULT_JUMP,
            data_section: DEFAULT_DATA_SECTION,
            pointer: dialect.pointer(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Reject anything that would break the line contract or produce
    /// unassemblable symbols.
    pub fn validate(&self) -> Result<()> {
        check_symbol("entry_symbol", self.entry_symbol)?;
        check_symbol("stub_prefix", self.stub_prefix)?;
        check_symbol("table_symbol", self.table_symbol)?;
        check_directive("push", self.push)?;
        check_directive("jump", self.jump)?;
        check_directive("data_section", self.data_section)?;
        check_directive("pointer", self.pointer)?;

        if !self.header.starts_with('#') || self.header.contains('\n') {
            return Err(Error::InvalidDirective("header"));
        }
        if !self.indent.bytes().all(|b| b == b' ' || b == b'\t') {
            return Err(Error::InvalidDirective("indent"));
        }
        if self.stub_prefix == self.table_symbol || self.entry_symbol == self.table_symbol {
            return Err(Error::InvalidSymbol("table_symbol"));
        }
        Ok(())
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig::default()
    }
}

fn check_symbol(field: &'static str, sym: &str) -> Result<()> {
    let mut bytes = sym.bytes();
    let first_ok = matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'.');
    if !first_ok || !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'$') {
        return Err(Error::InvalidSymbol(field));
    }
    Ok(())
}

fn check_directive(field: &'static str, token: &str) -> Result<()> {
    if token.is_empty() || token.bytes().any(|b| b.is_ascii_whitespace() || b.is_ascii_control()) {
        return Err(Error::InvalidDirective(field));
    }
    Ok(())
}
