//! Browse-mode filtering of an enriched tree.
//!
//! Pass 1 finds every node marked `menu: root`, at any depth and in document
//! order; if there are any they replace the top-level forest. Pass 2 walks the
//! starting forest and applies the markers:
//!
//! ```text
//! disabled → drop the node and its subtree
//! hide     → drop the node, splice its filtered children in its place
//! other    → keep the node with filtered children
//! ```
//!
//! Both passes are depth-capped and skip ids they have already seen, so a
//! node is emitted at most once even when input is malformed.

use std::collections::HashSet;

use veneer_core::enhanced::EnhancedNode;
use veneer_core::overrides::MenuMode;

/// Collect `menu: root` nodes in document order, descending into matches too.
fn collect_roots<'a>(
    items: &'a [EnhancedNode],
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<&'a str>,
    roots: &mut Vec<&'a EnhancedNode>,
) {
    for item in items {
        if !visited.insert(item.id.as_str()) {
            continue;
        }
        if item.menu == Some(MenuMode::Root) {
            roots.push(item);
        }
        if depth < max_depth {
            collect_roots(&item.children, depth + 1, max_depth, visited, roots);
        }
    }
}

/// Apply `disabled` and `hide` markers to `items`.
fn suppress(
    items: Vec<EnhancedNode>,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<String>,
) -> Vec<EnhancedNode> {
    let mut out = Vec::with_capacity(items.len());
    for mut item in items {
        if !visited.insert(item.id.clone()) {
            continue;
        }
        let children = std::mem::take(&mut item.children);
        match item.menu {
            Some(MenuMode::Disabled) => {}
            Some(MenuMode::Hide) => {
                if depth < max_depth {
                    out.extend(suppress(children, depth + 1, max_depth, visited));
                }
            }
            _ => {
                if depth < max_depth {
                    item.children = suppress(children, depth + 1, max_depth, visited);
                }
                out.push(item);
            }
        }
    }
    out
}

/// Produce the browse-mode forest for `items`.
///
/// A `root` node nested inside another `root` is emitted once, at the first
/// position pass 2 reaches it (inside its ancestor, unless the ancestor's
/// branch leading to it is suppressed).
#[must_use]
pub fn filter_for_browse(items: &[EnhancedNode], max_depth: usize) -> Vec<EnhancedNode> {
    let mut seen = HashSet::new();
    let mut roots = Vec::new();
    collect_roots(items, 0, max_depth, &mut seen, &mut roots);

    let forest: Vec<EnhancedNode> = if roots.is_empty() {
        items.to_vec()
    } else {
        tracing::debug!(roots = roots.len(), "browse roots promoted");
        roots.into_iter().cloned().collect()
    };

    let mut visited = HashSet::new();
    suppress(forest, 0, max_depth, &mut visited)
}
