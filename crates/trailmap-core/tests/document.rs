//! End-to-end: fetch-shaped JSON document -> index -> layout -> JSON graph.

use trailmap_core::layout::{LayoutOptions, layout};
use trailmap_core::{EdgeKind, ExpansionState, NodeIndex, RoadmapDetail};

const DOCUMENT: &str = r#"{
    "id": "data-engineering",
    "title": "Data Engineering",
    "description": "From SQL to pipelines",
    "nodes": [
        {
            "id": "sql", "title": "SQL", "description": "Query fundamentals",
            "depth": 0, "position": 0, "nodeType": "topic",
            "estimatedDuration": {"value": 2, "unit": "weeks"},
            "resources": [{"title": "SQLBolt", "url": "https://sqlbolt.com", "resourceType": "course"}],
            "children": [
                {"id": "joins", "title": "Joins", "depth": 1, "position": 0, "nodeType": "skill"},
                {"id": "window-fns", "title": "Window Functions", "depth": 1, "position": 1,
                 "nodeType": "skill", "isOptional": true,
                 "prerequisites": [{"id": "joins", "title": "Joins"}]}
            ]
        },
        {
            "id": "pipelines", "title": "Pipelines", "depth": 0, "position": 1, "nodeType": "milestone",
            "dependencies": [{"id": "sql", "title": "SQL"}, {"id": "spark", "title": "Spark"}],
            "children": [
                {"id": "batch", "title": "Batch", "depth": 1,
                 "children": [
                    {"id": "orchestration", "title": "Orchestration", "depth": 2,
                     "children": [{"id": "airflow", "title": "Airflow", "depth": 3}]}
                 ]}
            ]
        }
    ]
}"#;

#[test]
fn document_lays_out_with_defaults() {
    let detail = RoadmapDetail::from_json_str(DOCUMENT).unwrap();
    assert_eq!(detail.id, "data-engineering");
    let index = NodeIndex::build(&detail.nodes);
    assert_eq!(index.len(), 7);

    let graph = layout(&index, &ExpansionState::new(), &LayoutOptions::default());

    // orchestration (depth 2) is collapsed by default, airflow stays hidden
    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        ["sql", "joins", "window-fns", "pipelines", "batch", "orchestration"]
    );

    // the dangling "spark" dependency was dropped, the sql one kept
    let deps: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Dependency)
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(deps, [("sql", "pipelines")]);

    let pre: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Prerequisite)
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(pre, [("joins", "window-fns")]);

    // sql reserves two rows for its children, pipelines one for its chain
    assert_eq!(graph.subtree_height, 3.0 * LayoutOptions::default().row_height);

    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(value["nodes"][0]["payload"]["resourceCount"], 1);
    assert_eq!(value["nodes"][2]["payload"]["isOptional"], true);
    assert_eq!(value["nodes"][3]["payload"]["nodeType"], "milestone");
}

#[test]
fn layout_json_round_trips() {
    let detail = RoadmapDetail::from_json_str(DOCUMENT).unwrap();
    let index = NodeIndex::build(&detail.nodes);
    let graph = layout(&index, &ExpansionState::new(), &LayoutOptions::default());

    let text = serde_json::to_string(&graph).unwrap();
    let back: trailmap_core::RoadmapGraphLayout = serde_json::from_str(&text).unwrap();
    assert_eq!(back.nodes.len(), graph.nodes.len());
    assert_eq!(back.edges.len(), graph.edges.len());
    assert_eq!(back.subtree_height, graph.subtree_height);
}
