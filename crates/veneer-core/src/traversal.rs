//! Limits shared by the tree traversals.

use serde::{Deserialize, Serialize};

/// Depth beyond which traversals silently stop descending.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Nodes visited between cooperative yields to the async scheduler.
pub const DEFAULT_YIELD_EVERY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalOptions {
    pub max_depth: usize,
    /// Zero disables yielding.
    pub yield_every: usize,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            yield_every: DEFAULT_YIELD_EVERY,
        }
    }
}

impl TraversalOptions {
    /// Whether a cooperative traversal should yield after `visited` nodes.
    #[must_use]
    pub const fn should_yield(&self, visited: usize) -> bool {
        self.yield_every != 0 && visited != 0 && visited % self.yield_every == 0
    }
}
