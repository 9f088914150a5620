//! Scan session options.

/// Nesting depth allowed by [`ScanOptions::default`].
pub const DEFAULT_MAX_DEPTH: u32 = 1024;

/// Flags controlling one scan session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    /// Stop after the first top-level value.
    pub next_only: bool,
    /// Stop after the first top-level value and reject `[` and `(`.
    pub single_value_only: bool,
    /// Record malformed input as error values and keep scanning.
    pub relax_errors: bool,
    /// Deepest allowed nesting of blocks, parens, paths and constructs.
    pub max_depth: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            next_only: false,
            single_value_only: false,
            relax_errors: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScanOptions {
    #[must_use]
    pub fn with_next_only(mut self, next_only: bool) -> Self {
        self.next_only = next_only;
        self
    }

    #[must_use]
    pub fn with_single_value_only(mut self, single_value_only: bool) -> Self {
        self.single_value_only = single_value_only;
        self
    }

    #[must_use]
    pub fn with_relax_errors(mut self, relax_errors: bool) -> Self {
        self.relax_errors = relax_errors;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// True when the scan stops after one top-level value.
    #[inline]
    pub(crate) fn stops_after_value(&self) -> bool {
        self.next_only || self.single_value_only
    }
}
