use serde::{Deserialize, Serialize};

use crate::model::{EstimatedDuration, NodeType};

/// Output of one layout pass. Ephemeral: regenerated on every pass, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapGraphLayout {
    #[serde(default)]
    pub nodes: Vec<VisualNode>,
    #[serde(default)]
    pub edges: Vec<VisualEdge>,
    /// Total vertical extent reserved by the rendered forest, in layout units.
    #[serde(default)]
    pub subtree_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub payload: VisualNodePayload,
}

/// Display-field snapshot carried on every rendered node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNodePayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub depth: i64,
    #[serde(default)]
    pub estimated_duration: Option<EstimatedDuration>,
    #[serde(default)]
    pub resource_count: usize,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Hierarchy,
    Dependency,
    Prerequisite,
}
