//! Flat id-indexed arena over a fetched roadmap-node forest.
//!
//! The nested fetch payload is flattened into a slot-addressed table once per
//! loaded roadmap; `children` become slot indices while dependencies and
//! prerequisites stay as raw id references (which may dangle). The arena is
//! immutable for the lifetime of the loaded roadmap.

use rustc_hash::FxHashMap;

use crate::model::{EstimatedDuration, NodeRef, NodeType, Resource, RoadmapNode};

#[derive(Debug, Clone)]
pub struct IndexedNode {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Depth as supplied by the payload; may be missing (negative) in malformed data.
    pub depth: i64,
    /// Depth discovered while flattening; fallback when the payload depth is unusable.
    pub structural_depth: i64,
    pub position: i64,
    pub node_type: NodeType,
    pub is_optional: bool,
    pub estimated_duration: Option<EstimatedDuration>,
    pub resources: Vec<Resource>,
    pub dependencies: Vec<NodeRef>,
    pub prerequisites: Vec<NodeRef>,
    /// Slot indices of owned children, in payload order.
    pub children: Vec<usize>,
}

impl IndexedNode {
    pub fn effective_depth(&self) -> i64 {
        if self.depth >= 0 {
            self.depth
        } else {
            self.structural_depth
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: Vec<IndexedNode>,
    by_id: FxHashMap<String, usize>,
    roots: Vec<usize>,
}

impl NodeIndex {
    /// Flattens a node forest into the arena. Duplicate ids keep the first
    /// occurrence; later ones are skipped with a warning (their subtrees too,
    /// since a subtree without an addressable root cannot be toggled).
    pub fn build(forest: &[RoadmapNode]) -> Self {
        let mut index = NodeIndex::default();
        for node in forest {
            if let Some(slot) = index.insert(node, 0) {
                index.roots.push(slot);
            }
        }
        index
    }

    fn insert(&mut self, node: &RoadmapNode, structural_depth: i64) -> Option<usize> {
        if self.by_id.contains_key(&node.id) {
            tracing::warn!(id = %node.id, "duplicate roadmap node id, keeping first occurrence");
            return None;
        }

        let slot = self.nodes.len();
        self.by_id.insert(node.id.clone(), slot);
        self.nodes.push(IndexedNode {
            id: node.id.clone(),
            title: node.title.clone(),
            description: node.description.clone(),
            depth: node.depth,
            structural_depth,
            position: node.position,
            node_type: node.node_type,
            is_optional: node.is_optional,
            estimated_duration: node.estimated_duration,
            resources: node.resources.clone(),
            dependencies: node.dependencies.clone(),
            prerequisites: node.prerequisites.clone(),
            children: Vec::new(),
        });

        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            if let Some(child_slot) = self.insert(child, structural_depth + 1) {
                children.push(child_slot);
            }
        }
        self.nodes[slot].children = children;
        Some(slot)
    }

    pub fn get(&self, id: &str) -> Option<&IndexedNode> {
        self.by_id.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn get_slot(&self, slot: usize) -> Option<&IndexedNode> {
        self.nodes.get(slot)
    }

    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedNode> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadmapDetail;

    fn forest(json: &str) -> Vec<RoadmapNode> {
        let detail =
            RoadmapDetail::from_json_str(&format!(r#"{{"id":"r","nodes":{json}}}"#)).unwrap();
        detail.nodes
    }

    #[test]
    fn build_flattens_nested_children() {
        let index = NodeIndex::build(&forest(
            r#"[{"id":"a","children":[{"id":"b","children":[{"id":"c"}]},{"id":"d"}]}]"#,
        ));
        assert_eq!(index.len(), 4);
        assert_eq!(index.roots().len(), 1);
        let a = index.get("a").unwrap();
        assert_eq!(a.children.len(), 2);
        assert_eq!(index.get("c").unwrap().structural_depth, 2);
    }

    #[test]
    fn duplicate_id_keeps_first_occurrence() {
        let index = NodeIndex::build(&forest(
            r#"[{"id":"a","title":"first"},{"id":"a","title":"second"},{"id":"b"}]"#,
        ));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().title, "first");
        assert_eq!(index.roots().len(), 2);
    }

    #[test]
    fn effective_depth_falls_back_to_structural() {
        let index = NodeIndex::build(&forest(
            r#"[{"id":"a","depth":-1,"children":[{"id":"b","depth":7}]}]"#,
        ));
        assert_eq!(index.get("a").unwrap().effective_depth(), 0);
        assert_eq!(index.get("b").unwrap().effective_depth(), 7);
    }

    #[test]
    fn dangling_references_survive_the_build() {
        let index = NodeIndex::build(&forest(
            r#"[{"id":"a","dependencies":[{"id":"ghost","title":"gone"}]}]"#,
        ));
        assert_eq!(index.get("a").unwrap().dependencies[0].id, "ghost");
        assert!(!index.contains("ghost"));
    }
}
