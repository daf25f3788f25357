// tools/vectorgen/src/vectors.rs
// x86 trap vector numbering and hardware error codes
// ============================================================================
// Copyright (c) 2025 Cartesian School - Siergej Sobolewski
// SPDX-License-Identifier: BSD-3-Clause

pub const VECTOR_COUNT: usize = 256;

pub const T_DBLFLT: u8 = 8; // double fault
pub const T_TSS: u8 = 10; // invalid TSS
pub const T_SEGNP: u8 = 11; // segment not present
pub const T_STACK: u8 = 12; // stack-segment fault
pub const T_GPFLT: u8 = 13; // general protection fault
pub const T_PGFLT: u8 = 14; // page fault
pub const T_ALIGN: u8 = 17; // alignment check

/// Vectors for which the CPU pushes an error code before entering the stub.
pub const ERROR_CODE_VECTORS: VectorSet =
    VectorSet::from_slice(&[T_DBLFLT, T_TSS, T_SEGNP, T_STACK, T_GPFLT, T_PGFLT, T_ALIGN]);

/// Fixed 256-bit membership bitmap, one bit per vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorSet {
    bits: [u64; VECTOR_COUNT / 64],
}

impl VectorSet {
    pub const fn empty() -> Self {
        Self {
            bits: [0; VECTOR_COUNT / 64],
        }
    }

    pub const fn from_slice(vectors: &[u8]) -> Self {
        let mut set = Self::empty();
        let mut i = 0;
        while i < vectors.len() {
            let v = vectors[i] as usize;
            set.bits[v / 64] |= 1u64 << (v % 64);
            i += 1;
        }
        set
    }

    #[inline]
    pub const fn contains(&self, vector: u8) -> bool {
        let v = vector as usize;
        (self.bits[v / 64] & (1u64 << (v % 64))) != 0
    }

    pub const fn len(&self) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < self.bits.len() {
            count += self.bits[i].count_ones() as usize;
            i += 1;
        }
        count
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&v| self.contains(v))
    }
}

#[inline]
pub const fn has_error_code(vector: u8) -> bool {
    ERROR_CODE_VECTORS.contains(vector)
}

/// True when the stub must push a zero in place of the missing error code.
#[inline]
pub const fn pushes_synthetic_error_code(vector: u8) -> bool {
    !has_error_code(vector)
}

/// Words the stub itself pushes; together with the hardware error code (if
/// any) the trap handler always sees two.
#[inline]
pub const fn stub_push_count(vector: u8) -> usize {
    if pushes_synthetic_error_code(vector) {
        2
    } else {
        1
    }
}

pub fn error_code_vectors() -> impl Iterator<Item = u8> {
    ERROR_CODE_VECTORS.iter()
}

/// All vector numbers, ascending.
pub fn all() -> impl Iterator<Item = u8> {
    0..=u8::MAX
}
