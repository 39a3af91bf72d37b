//! Resource limits for parsing.
//!
//! The parser is recursive, so nesting depth bounds stack use; input size
//! bounds the memory a single call can claim.

/// Limits enforced by the [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: usize,
    /// Maximum nesting depth for objects and arrays, counting the root object
    pub max_nesting_depth: usize,
}

impl Limits {
    /// General-purpose limits, used by default.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024, // 64 MiB
            max_nesting_depth: 128,
        }
    }

    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024, // 1 MiB
            max_nesting_depth: 32,
        }
    }

    /// Loose limits for large trusted documents.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_nesting_depth: 512,
        }
    }

    /// Returns a copy with a different nesting limit.
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Returns a copy with a different input size limit.
    pub const fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
