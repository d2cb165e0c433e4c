//! Tree enrichment: raw scene + path map + overrides -> display tree.
//!
//! The root itself is not exposed; the result is the enriched list of its
//! children. Effective visibility defaults to `true` and never consults the
//! engine-side `SceneNode::visible` flag.

use veneer_core::enhanced::EnhancedNode;
use veneer_core::overrides::{NodeOverride, OverrideDocument};
use veneer_core::scene::SceneNode;
use veneer_core::traversal::TraversalOptions;

use crate::path_map::PathMapping;

/// Build the display node for `node` without its children.
fn enhance(node: &SceneNode, path: &str, entry: Option<&NodeOverride>) -> EnhancedNode {
    EnhancedNode {
        id: node.id.clone(),
        path: path.to_string(),
        original_name: node.name.clone(),
        display_name: entry
            .and_then(|o| o.display_name.clone())
            .unwrap_or_else(|| node.name.clone()),
        kind: node.kind.clone(),
        children: Vec::new(),
        visible: entry.and_then(|o| o.visible).unwrap_or(true),
        menu: entry.and_then(|o| o.menu),
        properties: entry
            .and_then(|o| o.properties.clone())
            .unwrap_or_default(),
        has_override: entry.is_some_and(|o| !o.is_empty()),
    }
}

struct Frame<'a> {
    node: &'a SceneNode,
    depth: usize,
    built: EnhancedNode,
    next_child: usize,
}

/// Incremental post-order builder over the children of a root.
struct Enricher<'a> {
    root: &'a SceneNode,
    mapping: &'a PathMapping,
    document: &'a OverrideDocument,
    options: TraversalOptions,
    next_top: usize,
    stack: Vec<Frame<'a>>,
    out: Vec<EnhancedNode>,
}

impl<'a> Enricher<'a> {
    const fn new(
        root: &'a SceneNode,
        mapping: &'a PathMapping,
        document: &'a OverrideDocument,
        options: TraversalOptions,
    ) -> Self {
        Self {
            root,
            mapping,
            document,
            options,
            next_top: 0,
            stack: Vec::new(),
            out: Vec::new(),
        }
    }

    fn frame_for(&self, node: &'a SceneNode, depth: usize) -> Frame<'a> {
        // Fallback to the id only happens for a mapping built from another snapshot.
        let path = self.mapping.get(&node.id).unwrap_or(node.id.as_str());
        Frame {
            node,
            depth,
            built: enhance(node, path, self.document.get(path)),
            next_child: 0,
        }
    }

    /// Advance by one node. Returns `false` once every child of the root is built.
    fn step(&mut self) -> bool {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                if self.options.max_depth == 0 || self.next_top >= self.root.children.len() {
                    return false;
                }
                let child = &self.root.children[self.next_top];
                self.next_top += 1;
                let frame = self.frame_for(child, 1);
                self.stack.push(frame);
                return true;
            };

            let node = frame.node;
            if frame.next_child < node.children.len() && frame.depth < self.options.max_depth {
                let child = &node.children[frame.next_child];
                frame.next_child += 1;
                let depth = frame.depth + 1;
                let next = self.frame_for(child, depth);
                self.stack.push(next);
                return true;
            }

            let Some(done) = self.stack.pop() else {
                return false;
            };
            match self.stack.last_mut() {
                Some(parent) => parent.built.children.push(done.built),
                None => self.out.push(done.built),
            }
        }
    }
}

/// Enrich the children of `root` against `document`.
///
/// Pure and idempotent: the same inputs always produce the same tree.
#[must_use]
pub fn enrich(
    root: &SceneNode,
    mapping: &PathMapping,
    document: &OverrideDocument,
    options: TraversalOptions,
) -> Vec<EnhancedNode> {
    let mut enricher = Enricher::new(root, mapping, document, options);
    while enricher.step() {}
    enricher.out
}

/// Same as [`enrich`], yielding to the scheduler every `options.yield_every` nodes.
pub async fn enrich_cooperative(
    root: &SceneNode,
    mapping: &PathMapping,
    document: &OverrideDocument,
    options: TraversalOptions,
) -> Vec<EnhancedNode> {
    let mut enricher = Enricher::new(root, mapping, document, options);
    let mut visited = 0usize;
    while enricher.step() {
        visited += 1;
        if options.should_yield(visited) {
            tokio::task::yield_now().await;
        }
    }
    enricher.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use veneer_core::overrides::MenuMode;

    use crate::path_map::build_path_mapping;

    fn scene() -> SceneNode {
        let mut hidden_in_engine = SceneNode::new("c", "Core", "Group");
        hidden_in_engine.visible = false;
        SceneNode::new("r", "Scene", "Group").with_children(vec![
            SceneNode::new("a", "Level 1", "Group").with_children(vec![
                SceneNode::new("a1", "Slab", "Mesh"),
                SceneNode::new("a2", "", "Mesh"),
            ]),
            hidden_in_engine,
        ])
    }

    fn run(doc: &OverrideDocument) -> Vec<EnhancedNode> {
        let root = scene();
        let mapping = build_path_mapping(&root, TraversalOptions::default());
        enrich(&root, &mapping, doc, TraversalOptions::default())
    }

    #[test]
    fn root_is_not_exposed() {
        let tree = run(&OverrideDocument::new("m", Utc::now()));
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(tree[0].children.len(), 2);
    }

    #[test]
    fn defaults_without_overrides() {
        let tree = run(&OverrideDocument::new("m", Utc::now()));
        let slab = &tree[0].children[0];
        assert_eq!(slab.path, "Level 1/Slab");
        assert_eq!(slab.display_name, "Slab");
        assert_eq!(slab.original_name, "Slab");
        assert!(slab.visible);
        assert_eq!(slab.menu, None);
        assert!(slab.properties.is_empty());
        assert!(!slab.has_override);

        let unnamed = &tree[0].children[1];
        assert_eq!(unnamed.path, "Level 1/Mesh");
        assert_eq!(unnamed.display_name, "");
    }

    #[test]
    fn engine_visibility_is_ignored() {
        let tree = run(&OverrideDocument::new("m", Utc::now()));
        assert!(tree[1].visible);
    }

    #[test]
    fn overrides_apply_by_path() {
        let mut doc = OverrideDocument::new("m", Utc::now());
        doc.merge(
            "Level 1/Slab",
            NodeOverride::default()
                .with_display_name("Ground slab")
                .with_visible(false)
                .with_menu(MenuMode::Hide)
                .with_property("fire", "R90"),
        );
        let tree = run(&doc);
        let slab = &tree[0].children[0];
        assert_eq!(slab.display_name, "Ground slab");
        assert_eq!(slab.original_name, "Slab");
        assert!(!slab.visible);
        assert_eq!(slab.menu, Some(MenuMode::Hide));
        assert_eq!(slab.properties.get("fire").map(String::as_str), Some("R90"));
        assert!(slab.has_override);
        assert!(!tree[0].has_override);
    }

    #[test]
    fn explicit_default_still_counts_as_override() {
        let mut doc = OverrideDocument::new("m", Utc::now());
        doc.merge("Core", NodeOverride::default().with_visible(true));
        let tree = run(&doc);
        assert!(tree[1].visible);
        assert!(tree[1].has_override);
    }

    #[test]
    fn unresolvable_paths_are_inert() {
        let mut doc = OverrideDocument::new("m", Utc::now());
        doc.merge("Nowhere/Else", NodeOverride::default().with_visible(false));
        let with = run(&doc);
        let without = run(&OverrideDocument::new("m", Utc::now()));
        assert_eq!(with, without);
    }

    #[test]
    fn missing_mapping_falls_back_to_id() {
        let root = scene();
        let mut doc = OverrideDocument::new("m", Utc::now());
        doc.merge("a1", NodeOverride::default().with_display_name("by id"));
        let tree = enrich(&root, &PathMapping::default(), &doc, TraversalOptions::default());
        assert_eq!(tree[0].path, "a");
        assert_eq!(tree[0].children[0].display_name, "by id");
    }

    #[test]
    fn depth_cap_drops_deeper_levels() {
        let root = scene();
        let options = TraversalOptions {
            max_depth: 1,
            yield_every: 0,
        };
        let mapping = build_path_mapping(&root, options);
        let tree = enrich(&root, &mapping, &OverrideDocument::new("m", Utc::now()), options);
        assert_eq!(tree.len(), 2);
        assert!(tree[0].children.is_empty());
    }

    #[tokio::test]
    async fn cooperative_matches_sync() {
        let root = scene();
        let options = TraversalOptions {
            max_depth: 100,
            yield_every: 1,
        };
        let mapping = build_path_mapping(&root, options);
        let doc = OverrideDocument::new("m", Utc::now());
        assert_eq!(
            enrich(&root, &mapping, &doc, options),
            enrich_cooperative(&root, &mapping, &doc, options).await
        );
    }
}
