//! Per-compilation state: how deep the reference chain currently is.

use crate::error::CompileError;

/// Bound on nested custom type references.
///
/// This is the only thing standing between a cyclic type graph and unbounded
/// recursion; the compiler keeps no visited set.
pub const MAX_RECURSION_DEPTH: usize = 10;

/// Immutable build context.
///
/// Going one level deeper yields a new context, so sibling branches compile
/// independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    depth: usize,
    limit: usize,
}

impl BuildContext {
    /// Root context bounded by [`MAX_RECURSION_DEPTH`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: 0,
            limit: MAX_RECURSION_DEPTH,
        }
    }

    /// Root context with another bound
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// Current nesting depth
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Bound this context enforces
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Context one level deeper
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            depth: self.depth + 1,
            limit: self.limit,
        }
    }

    /// Fail once the bound is reached
    ///
    /// # Errors
    ///
    /// Returns `RecursionLimitExceeded` when `depth >= limit`
    pub fn check_depth(&self) -> Result<(), CompileError> {
        if self.depth >= self.limit {
            return Err(CompileError::RecursionLimitExceeded { limit: self.limit });
        }
        Ok(())
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new()
    }
}
