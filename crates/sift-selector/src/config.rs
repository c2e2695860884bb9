//! Parser configuration.

/// Default bound on nested selector arguments such as `:not(:has(...))`.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Knobs accepted by [`SelectorParser`](crate::SelectorParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How many selector-valued pseudo-function arguments may nest inside
    /// each other. `:not(.a)` has depth 1, `:not(:has(.a))` depth 2. Zero
    /// rejects selector arguments altogether.
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    /// Configuration with default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Replace the nesting limit.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
