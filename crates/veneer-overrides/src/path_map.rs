//! Deterministic unique-path assignment.
//!
//! Every node of a snapshot receives a `NodePath` built from its lineage of
//! base names (`name`, or `kind` when the name is empty). Siblings that share
//! a base name are disambiguated by an index suffix in traversal order:
//! `Wall`, `Wall[1]`, `Wall[2]`. The root is keyed under the empty parent path
//! together with its own children, so top-level paths carry no root prefix.
//!
//! The walk is an explicit-stack pre-order traversal so the cooperative
//! variant can yield between nodes without changing the result.

use std::collections::{HashMap, HashSet};

use veneer_core::NodePath;
use veneer_core::scene::SceneNode;
use veneer_core::traversal::TraversalOptions;

/// Result of a path-mapping pass over one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    by_id: HashMap<String, NodePath>,
    /// `(id, path)` in pre-order.
    ordered: Vec<(String, NodePath)>,
    paths: HashSet<NodePath>,
    truncated: bool,
}

impl PathMapping {
    /// Path assigned to the node with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Whether some node of the snapshot was assigned `path`.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// `(id, path)` pairs in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered.iter().map(|(id, path)| (id.as_str(), path.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Whether the depth cap cut off part of the tree.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }
}

struct Frame<'a> {
    node: &'a SceneNode,
    depth: usize,
    /// Parent path handed to this node's children.
    child_prefix: String,
    next_child: usize,
}

/// Incremental pre-order walker. Each `step` assigns at most one path.
struct PathWalker<'a> {
    options: TraversalOptions,
    stack: Vec<Frame<'a>>,
    counters: HashMap<(String, String), usize>,
    mapping: PathMapping,
}

impl<'a> PathWalker<'a> {
    fn new(root: &'a SceneNode, options: TraversalOptions) -> Self {
        let mut walker = Self {
            options,
            stack: Vec::new(),
            counters: HashMap::new(),
            mapping: PathMapping::default(),
        };
        walker.assign(root, "");
        // The root's children are addressed without the root segment.
        walker.stack.push(Frame {
            node: root,
            depth: 0,
            child_prefix: String::new(),
            next_child: 0,
        });
        walker
    }

    /// Compute and record the path of `node` under `parent_path`.
    fn assign(&mut self, node: &SceneNode, parent_path: &str) -> NodePath {
        let base = node.base_name();
        let prefix = if parent_path.is_empty() {
            base.to_string()
        } else {
            format!("{parent_path}/{base}")
        };

        let counter = self
            .counters
            .entry((parent_path.to_string(), base.to_string()))
            .or_insert(0);
        let mut path = if *counter == 0 {
            prefix.clone()
        } else {
            format!("{prefix}[{counter}]")
        };
        *counter += 1;

        // A literal name such as `Wall[1]` can collide with a generated
        // suffix; keep counting until the path is free.
        while self.mapping.paths.contains(&path) {
            path = format!("{prefix}[{counter}]");
            *counter += 1;
        }

        if self.mapping.by_id.contains_key(&node.id) {
            tracing::debug!(id = %node.id, %path, "duplicate node id; keeping first path");
        } else {
            self.mapping.by_id.insert(node.id.clone(), path.clone());
        }
        self.mapping.ordered.push((node.id.clone(), path.clone()));
        self.mapping.paths.insert(path.clone());
        path
    }

    /// Advance by one node. Returns `false` once the walk is complete.
    fn step(&mut self) -> bool {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return false;
            };
            let node = frame.node;
            let depth = frame.depth;

            if frame.next_child >= node.children.len() {
                self.stack.pop();
                continue;
            }
            if depth >= self.options.max_depth {
                if !self.mapping.truncated {
                    tracing::warn!(
                        max_depth = self.options.max_depth,
                        "path mapping truncated at depth cap"
                    );
                }
                self.mapping.truncated = true;
                self.stack.pop();
                continue;
            }

            let child = &node.children[frame.next_child];
            frame.next_child += 1;
            let parent_path = frame.child_prefix.clone();

            let path = self.assign(child, &parent_path);
            self.stack.push(Frame {
                node: child,
                depth: depth + 1,
                child_prefix: path,
                next_child: 0,
            });
            return true;
        }
    }

    fn finish(self) -> PathMapping {
        tracing::debug!(
            nodes = self.mapping.len(),
            truncated = self.mapping.truncated,
            "path mapping built"
        );
        self.mapping
    }
}

/// Assign a unique path to every node reachable from `root` within the depth cap.
#[must_use]
pub fn build_path_mapping(root: &SceneNode, options: TraversalOptions) -> PathMapping {
    let mut walker = PathWalker::new(root, options);
    while walker.step() {}
    walker.finish()
}

/// Same as [`build_path_mapping`], yielding to the scheduler every
/// `options.yield_every` nodes.
pub async fn build_path_mapping_cooperative(
    root: &SceneNode,
    options: TraversalOptions,
) -> PathMapping {
    let mut walker = PathWalker::new(root, options);
    let mut visited = 1usize;
    while walker.step() {
        visited += 1;
        if options.should_yield(visited) {
            tokio::task::yield_now().await;
        }
    }
    walker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, name: &str) -> SceneNode {
        SceneNode::new(id, name, "Group")
    }

    fn paths(mapping: &PathMapping) -> Vec<(&str, &str)> {
        mapping.iter().collect()
    }

    #[test]
    fn root_and_top_level_paths() {
        let root = node("r", "Scene").with_children(vec![
            node("a", "Level 1").with_children(vec![node("b", "Slab")]),
            node("c", "Level 2"),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(
            paths(&mapping),
            vec![
                ("r", "Scene"),
                ("a", "Level 1"),
                ("b", "Level 1/Slab"),
                ("c", "Level 2"),
            ]
        );
    }

    #[test]
    fn duplicate_siblings_get_increasing_suffixes() {
        let root = node("r", "Scene").with_children(vec![
            node("w0", "Wall"),
            node("d", "Door"),
            node("w1", "Wall"),
            node("w2", "Wall"),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("w0"), Some("Wall"));
        assert_eq!(mapping.get("w1"), Some("Wall[1]"));
        assert_eq!(mapping.get("w2"), Some("Wall[2]"));
        assert_eq!(mapping.get("d"), Some("Door"));
    }

    #[test]
    fn unnamed_nodes_use_kind() {
        let root = node("r", "Scene").with_children(vec![
            SceneNode::new("m0", "", "Mesh"),
            SceneNode::new("m1", "", "Mesh"),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("m0"), Some("Mesh"));
        assert_eq!(mapping.get("m1"), Some("Mesh[1]"));
    }

    #[test]
    fn same_name_under_different_parents_is_not_suffixed() {
        let root = node("r", "Scene").with_children(vec![
            node("a", "A").with_children(vec![node("a-x", "X")]),
            node("b", "B").with_children(vec![node("b-x", "X")]),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("a-x"), Some("A/X"));
        assert_eq!(mapping.get("b-x"), Some("B/X"));
    }

    #[test]
    fn duplicated_parent_prefixes_children() {
        let root = node("r", "Scene").with_children(vec![
            node("f0", "Floor").with_children(vec![node("f0-r", "Room")]),
            node("f1", "Floor").with_children(vec![node("f1-r", "Room")]),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("f1-r"), Some("Floor[1]/Room"));
    }

    #[test]
    fn child_named_like_root_is_suffixed() {
        let root = node("r", "Scene").with_children(vec![node("s", "Scene")]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("r"), Some("Scene"));
        assert_eq!(mapping.get("s"), Some("Scene[1]"));
    }

    #[test]
    fn literal_suffix_names_never_collide() {
        let root = node("r", "Scene").with_children(vec![
            node("a", "Wall"),
            node("b", "Wall[1]"),
            node("c", "Wall"),
        ]);
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(mapping.get("a"), Some("Wall"));
        assert_eq!(mapping.get("b"), Some("Wall[1]"));
        assert_eq!(mapping.get("c"), Some("Wall[2]"));
    }

    #[test]
    fn depth_cap_truncates_silently() {
        let mut deep = node("n5", "N5");
        for i in (0..5).rev() {
            deep = node(&format!("n{i}"), &format!("N{i}")).with_children(vec![deep]);
        }
        let options = TraversalOptions {
            max_depth: 2,
            yield_every: 0,
        };
        let mapping = build_path_mapping(&deep, options);
        assert!(mapping.truncated());
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("n2"), Some("N1/N2"));
        assert_eq!(mapping.get("n3"), None);
    }

    #[test]
    fn rerun_is_identical() {
        let root = node("r", "Scene").with_children(vec![
            node("a", "A").with_children(vec![node("x", "X"), node("y", "X")]),
            node("b", "A"),
        ]);
        let first = build_path_mapping(&root, TraversalOptions::default());
        let second = build_path_mapping(&root, TraversalOptions::default());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cooperative_matches_sync() {
        let children = (0..50)
            .map(|i| {
                node(&format!("g{i}"), "Group")
                    .with_children(vec![node(&format!("g{i}-m"), "Mesh")])
            })
            .collect();
        let root = node("r", "Scene").with_children(children);
        let options = TraversalOptions {
            max_depth: 100,
            yield_every: 7,
        };
        let sync = build_path_mapping(&root, options);
        let coop = build_path_mapping_cooperative(&root, options).await;
        assert_eq!(sync, coop);
        assert_eq!(coop.get("g49-m"), Some("Group[49]/Mesh"));
    }
}
