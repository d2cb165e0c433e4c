//! Tree traversal limits.

use serde::{Deserialize, Serialize};
use veneer_core::traversal::{DEFAULT_MAX_DEPTH, DEFAULT_YIELD_EVERY, TraversalOptions};

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

const fn default_yield_every() -> usize {
    DEFAULT_YIELD_EVERY
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraversalConfig {
    /// Depth at which path mapping, enrichment and browse filtering stop descending.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Nodes visited between yields to the async scheduler. `0` never yields.
    #[serde(default = "default_yield_every")]
    pub yield_every: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            yield_every: default_yield_every(),
        }
    }
}

impl TraversalConfig {
    #[must_use]
    pub const fn options(&self) -> TraversalOptions {
        TraversalOptions {
            max_depth: self.max_depth,
            yield_every: self.yield_every,
        }
    }
}
