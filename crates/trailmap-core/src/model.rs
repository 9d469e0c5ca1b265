//! Wire-facing roadmap data model.
//!
//! These types mirror the roadmap-detail fetch payload: a nested node forest with
//! cross-cutting dependency/prerequisite references. Every field except `id` is
//! default-tolerant so partial documents still load; unknown enum strings degrade
//! to their default variant instead of failing the whole document.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A roadmap-detail document as returned by the fetch collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDetail {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The node forest. Child ownership forms a tree; dependencies and
    /// prerequisites are unordered cross-links and may dangle or cycle.
    #[serde(default)]
    pub nodes: Vec<RoadmapNode>,
}

impl RoadmapDetail {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::RoadmapParse {
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub depth: i64,
    /// Sibling order; lower positions render above higher ones.
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub estimated_duration: Option<EstimatedDuration>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub dependencies: Vec<NodeRef>,
    #[serde(default)]
    pub prerequisites: Vec<NodeRef>,
    #[serde(default)]
    pub children: Vec<RoadmapNode>,
}

/// Reference to another node by id. May point outside the current forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub resource_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedDuration {
    pub value: f64,
    #[serde(default)]
    pub unit: DurationUnit,
}

impl EstimatedDuration {
    /// Normalizes the duration to hours for display payloads.
    pub fn as_hours(&self) -> f64 {
        self.value * self.unit.hours_per_unit()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DurationUnit {
    #[default]
    Hours,
    Days,
    Weeks,
    Months,
}

impl DurationUnit {
    pub fn from_key(key: &str) -> Self {
        match key {
            "days" => DurationUnit::Days,
            "weeks" => DurationUnit::Weeks,
            "months" => DurationUnit::Months,
            _ => DurationUnit::Hours,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
            DurationUnit::Weeks => "weeks",
            DurationUnit::Months => "months",
        }
    }

    fn hours_per_unit(self) -> f64 {
        match self {
            DurationUnit::Hours => 1.0,
            DurationUnit::Days => 24.0,
            DurationUnit::Weeks => 24.0 * 7.0,
            DurationUnit::Months => 24.0 * 30.0,
        }
    }
}

impl From<String> for DurationUnit {
    fn from(value: String) -> Self {
        DurationUnit::from_key(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NodeType {
    #[default]
    Topic,
    Skill,
    Milestone,
    Project,
    Checkpoint,
    Group,
}

impl NodeType {
    /// Unknown keys degrade to `Topic` rather than failing the document.
    pub fn from_key(key: &str) -> Self {
        match key {
            "skill" => NodeType::Skill,
            "milestone" => NodeType::Milestone,
            "project" => NodeType::Project,
            "checkpoint" => NodeType::Checkpoint,
            "group" => NodeType::Group,
            _ => NodeType::Topic,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            NodeType::Topic => "topic",
            NodeType::Skill => "skill",
            NodeType::Milestone => "milestone",
            NodeType::Project => "project",
            NodeType::Checkpoint => "checkpoint",
            NodeType::Group => "group",
        }
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        NodeType::from_key(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roadmap_detail_minimal_document() {
        let detail = RoadmapDetail::from_json_str(r#"{"id":"r1","nodes":[{"id":"a"}]}"#).unwrap();
        assert_eq!(detail.id, "r1");
        assert_eq!(detail.nodes.len(), 1);
        assert_eq!(detail.nodes[0].node_type, NodeType::Topic);
        assert!(detail.nodes[0].children.is_empty());
    }

    #[test]
    fn node_type_unknown_key_degrades_to_topic() {
        let node: RoadmapNode =
            serde_json::from_str(r#"{"id":"a","nodeType":"galaxy-brain"}"#).unwrap();
        assert_eq!(node.node_type, NodeType::Topic);
    }

    #[test]
    fn node_type_round_trips_known_keys() {
        for key in ["topic", "skill", "milestone", "project", "checkpoint", "group"] {
            assert_eq!(NodeType::from_key(key).key(), key);
        }
    }

    #[test]
    fn estimated_duration_as_hours() {
        let d: EstimatedDuration =
            serde_json::from_str(r#"{"value":2,"unit":"weeks"}"#).unwrap();
        assert_eq!(d.as_hours(), 2.0 * 24.0 * 7.0);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = RoadmapDetail::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Roadmap parse error"));
    }
}
