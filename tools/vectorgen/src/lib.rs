// tools/vectorgen/src/lib.rs
// Trap vector stub generator
// ============================================================================
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski
// SPDX-License-Identifier: BSD-3-Clause

//! Build-time generator for the x86 trap entry stubs (`vector0`..`vector255`)
//! and the `vectors` table the IDT setup code indexes by vector number.
//!
//! The executable writes the default listing to stdout; kernel build scripts
//! can use the library directly with their own [`GenConfig`].

pub mod config;
pub mod emit;
pub mod error;
pub mod vectors;

pub use config::{Dialect, GenConfig};
pub use emit::{generate, Sections, VectorTableGenerator};
pub use error::{Error, Result};
