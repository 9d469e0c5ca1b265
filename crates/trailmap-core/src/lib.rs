#![forbid(unsafe_code)]

//! Learning-roadmap semantic model (headless).
//!
//! Design goals:
//! - deterministic, testable outputs (layout and progress snapshots are plain data)
//! - tolerance of partial/malformed roadmap documents (degrade, never panic)
//! - single-writer mutable state (expansion, progress), no locks required

pub mod error;
pub mod expansion;
pub mod index;
pub mod layout;
pub mod model;
pub mod progress;

pub use error::{Error, Result};
pub use expansion::{DEFAULT_EXPANDED_DEPTH, ExpansionState};
pub use index::{IndexedNode, NodeIndex};
pub use layout::{
    EdgeKind, LayoutOptions, RoadmapGraphLayout, VisualEdge, VisualNode, VisualNodePayload, layout,
};
pub use model::{
    DurationUnit, EstimatedDuration, NodeRef, NodeType, Resource, RoadmapDetail, RoadmapNode,
};
pub use progress::{
    COMPLETE_LINGER, ErrorSeverity, GenerationStep, ProgressEvent, ProgressSnapshot,
    ProgressTracker, STALL_TIMEOUT, SessionToken, Terminal,
};
