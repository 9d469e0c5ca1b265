//! Recursive hierarchy-to-graph layout.
//!
//! One pass walks the node arena depth-first, honoring expansion state:
//! collapsed subtrees are never visited, so cost is bounded by the rendered
//! set. Siblings are position-sorted (stable) and share a running y cursor,
//! each reserving at least one row; an expanded parent's reservation grows to
//! the sum of its children's. Cross-link edges are emitted only when both
//! endpoints landed in the rendered set; anything else is dropped with a
//! warning. The pass is total: malformed input shrinks the output, never fails.

mod render_model;


pub use render_model::{EdgeKind, RoadmapGraphLayout, VisualEdge, VisualNode, VisualNodePayload};

use rustc_hash::FxHashSet;

use crate::expansion::ExpansionState;
use crate::index::{IndexedNode, NodeIndex};

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub origin_x: f64,
    pub origin_y: f64,
    /// Horizontal shift per hierarchy level.
    pub depth_step: f64,
    /// Vertical slot reserved by every rendered node (the layout "unit").
    pub row_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            depth_step: 280.0,
            row_height: 120.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_origin(origin_x: f64, origin_y: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            ..Self::default()
        }
    }
}

pub fn layout(
    index: &NodeIndex,
    expansion: &ExpansionState,
    options: &LayoutOptions,
) -> RoadmapGraphLayout {
    let mut pass = LayoutPass {
        index,
        expansion,
        options,
        nodes: Vec::new(),
        edges: Vec::new(),
        rendered: FxHashSet::default(),
    };

    let mut cursor = options.origin_y;
    for slot in sorted_by_position(index, index.roots()) {
        cursor += pass.place(slot, options.origin_x, cursor);
    }
    let subtree_height = cursor - options.origin_y;

    pass.emit_reference_edges();

    RoadmapGraphLayout {
        nodes: pass.nodes,
        edges: pass.edges,
        subtree_height,
    }
}

/// Stable position-sort: ties keep payload order.
fn sorted_by_position(index: &NodeIndex, slots: &[usize]) -> Vec<usize> {
    let mut out = slots.to_vec();
    out.sort_by_key(|&slot| index.get_slot(slot).map_or(i64::MAX, |n| n.position));
    out
}

struct LayoutPass<'a> {
    index: &'a NodeIndex,
    expansion: &'a ExpansionState,
    options: &'a LayoutOptions,
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    rendered: FxHashSet<usize>,
}

impl LayoutPass<'_> {
    /// Places one subtree at (x, y) and returns the height it reserved.
    fn place(&mut self, slot: usize, x: f64, y: f64) -> f64 {
        let Some(node) = self.index.get_slot(slot) else {
            return 0.0;
        };
        let depth = node.effective_depth();
        let expanded = node.has_children() && self.expansion.is_expanded(&node.id, depth);

        self.nodes.push(VisualNode {
            id: node.id.clone(),
            x,
            y,
            payload: payload_of(node, expanded),
        });
        self.rendered.insert(slot);

        if !expanded {
            return self.options.row_height;
        }

        let children = sorted_by_position(self.index, &node.children);
        let parent_id = node.id.clone();
        let child_x = x + self.options.depth_step;
        let mut child_y = y;
        let mut total = 0.0;
        for child_slot in children {
            let Some(child) = self.index.get_slot(child_slot) else {
                continue;
            };
            // slot-based ids: node ids may contain the separator themselves
            self.edges.push(VisualEdge {
                id: format!("edge_h_{slot}_{child_slot}"),
                source: parent_id.clone(),
                target: child.id.clone(),
                kind: EdgeKind::Hierarchy,
                animated: false,
                dashed: false,
            });
            let height = self.place(child_slot, child_x, child_y);
            child_y += height;
            total += height;
        }
        total.max(self.options.row_height)
    }

    /// Emits dependency/prerequisite edges for every rendered node whose
    /// reference target is also rendered; everything else is dropped.
    fn emit_reference_edges(&mut self) {
        let mut seen: FxHashSet<(EdgeKind, usize, usize)> = FxHashSet::default();
        let rendered_nodes: Vec<usize> = {
            let mut slots: Vec<usize> = self.rendered.iter().copied().collect();
            slots.sort_unstable();
            slots
        };

        for slot in rendered_nodes {
            let Some(node) = self.index.get_slot(slot) else {
                continue;
            };
            for reference in &node.dependencies {
                self.emit_reference_edge(slot, node, &reference.id, EdgeKind::Dependency, &mut seen);
            }
            for reference in &node.prerequisites {
                self.emit_reference_edge(
                    slot,
                    node,
                    &reference.id,
                    EdgeKind::Prerequisite,
                    &mut seen,
                );
            }
        }
    }

    /// The arrow flows referenced -> referencing: the listing node requires
    /// the listed one first. Dedup is on the (kind, source, target) slot
    /// triple; the formatted id stays unambiguous because slots are unique.
    fn emit_reference_edge(
        &mut self,
        slot: usize,
        node: &IndexedNode,
        target_id: &str,
        kind: EdgeKind,
        seen: &mut FxHashSet<(EdgeKind, usize, usize)>,
    ) {
        if target_id == node.id {
            tracing::warn!(id = %node.id, "node references itself, dropping edge");
            return;
        }
        let source_slot = self
            .index
            .slot_of(target_id)
            .filter(|s| self.rendered.contains(s));
        let Some(source_slot) = source_slot else {
            tracing::warn!(
                source = %target_id,
                target = %node.id,
                "reference endpoint not in rendered set, dropping edge"
            );
            return;
        };
        if !seen.insert((kind, source_slot, slot)) {
            return;
        }

        let (prefix, animated, dashed) = match kind {
            EdgeKind::Dependency => ("d", true, false),
            EdgeKind::Prerequisite => ("p", false, true),
            EdgeKind::Hierarchy => ("h", false, false),
        };
        self.edges.push(VisualEdge {
            id: format!("edge_{prefix}_{source_slot}_{slot}"),
            source: target_id.to_string(),
            target: node.id.clone(),
            kind,
            animated,
            dashed,
        });
    }
}

fn payload_of(node: &IndexedNode, expanded: bool) -> VisualNodePayload {
    VisualNodePayload {
        title: node.title.clone(),
        description: node.description.clone(),
        node_type: node.node_type,
        is_optional: node.is_optional,
        depth: node.effective_depth(),
        estimated_duration: node.estimated_duration,
        resource_count: node.resources.len(),
        has_children: node.has_children(),
        expanded,
    }
}
