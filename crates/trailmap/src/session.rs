//! Session glue between a view coordinator and the core components.
//!
//! The session owns every piece of mutable state (node index, expansion
//! flags, progress tracker) with itself as the single writer. User intents
//! come in, effects go out; a relayout is always an explicit effect of an
//! intent, never a hidden side effect of mutating state.

use std::time::Instant;

use trailmap_core::layout::{LayoutOptions, RoadmapGraphLayout, layout};
use trailmap_core::{
    EstimatedDuration, ExpansionState, IndexedNode, NodeIndex, NodeRef, NodeType, ProgressEvent,
    ProgressSnapshot, ProgressTracker, Resource, RoadmapDetail, SessionToken,
};

/// User intents forwarded by the view coordinator.
#[derive(Debug, Clone)]
pub enum ViewIntent {
    ToggleNode { id: String },
    SelectNode { id: String },
    SubmitGeneration { prompt: String, contribute: bool },
    Teardown,
}

/// What the coordinator gets back for rendering or forwarding.
#[derive(Debug, Clone)]
pub enum ViewEffect {
    /// Recompute result for the current roadmap. Atomic: produced fully
    /// before the next intent is processed.
    Relayout(RoadmapGraphLayout),
    /// Detail snapshot for a dialog/detail view.
    ShowNodeDetail(NodeDetail),
    GenerationStarted(SessionToken),
    /// Forwarded to the external generation pipeline as-is.
    GenerationRequested { prompt: String, contribute: bool },
}

/// Node snapshot carried on a selection effect. Owns its data so the dialog
/// can outlive a roadmap reload.
#[derive(Debug, Clone)]
pub struct NodeDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub node_type: NodeType,
    pub is_optional: bool,
    pub estimated_duration: Option<EstimatedDuration>,
    pub resources: Vec<Resource>,
    pub dependencies: Vec<NodeRef>,
    pub prerequisites: Vec<NodeRef>,
}

impl NodeDetail {
    fn of(node: &IndexedNode) -> Self {
        Self {
            id: node.id.clone(),
            title: node.title.clone(),
            description: node.description.clone(),
            node_type: node.node_type,
            is_optional: node.is_optional,
            estimated_duration: node.estimated_duration,
            resources: node.resources.clone(),
            dependencies: node.dependencies.clone(),
            prerequisites: node.prerequisites.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RoadmapSession {
    index: Option<NodeIndex>,
    expansion: ExpansionState,
    tracker: ProgressTracker,
    options: LayoutOptions,
}

impl RoadmapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Installs a fetched roadmap and returns its initial layout. Loading a
    /// roadmap with a different id resets all expansion overrides.
    pub fn load_roadmap(&mut self, detail: &RoadmapDetail) -> RoadmapGraphLayout {
        self.expansion.activate(&detail.id);
        let index = NodeIndex::build(&detail.nodes);
        let graph = layout(&index, &self.expansion, &self.options);
        self.index = Some(index);
        graph
    }

    pub fn handle_intent(&mut self, intent: ViewIntent, now: Instant) -> Vec<ViewEffect> {
        match intent {
            ViewIntent::ToggleNode { id } => {
                let Some(index) = self.index.as_ref() else {
                    return Vec::new();
                };
                let Some(node) = index.get(&id) else {
                    // unknown id: nothing changed, no relayout requested
                    return Vec::new();
                };
                self.expansion.toggle(&id, node.effective_depth());
                vec![ViewEffect::Relayout(layout(
                    index,
                    &self.expansion,
                    &self.options,
                ))]
            }
            ViewIntent::SelectNode { id } => {
                let Some(node) = self.index.as_ref().and_then(|index| index.get(&id)) else {
                    return Vec::new();
                };
                vec![ViewEffect::ShowNodeDetail(NodeDetail::of(node))]
            }
            ViewIntent::SubmitGeneration { prompt, contribute } => {
                let token = self.tracker.start_session(now);
                vec![
                    ViewEffect::GenerationStarted(token),
                    ViewEffect::GenerationRequested { prompt, contribute },
                ]
            }
            ViewIntent::Teardown => {
                self.tracker.reset();
                self.expansion.reset_all();
                self.index = None;
                Vec::new()
            }
        }
    }

    /// Recomputes the layout for the loaded roadmap without mutating anything.
    pub fn relayout(&self) -> Option<RoadmapGraphLayout> {
        self.index
            .as_ref()
            .map(|index| layout(index, &self.expansion, &self.options))
    }

    pub fn apply_progress(&mut self, token: SessionToken, event: &ProgressEvent, now: Instant) {
        self.tracker.apply_event(token, event, now);
    }

    /// Polls deferred progress transitions, then snapshots. `None` when idle.
    pub fn progress_snapshot(&mut self, now: Instant) -> Option<ProgressSnapshot> {
        self.tracker.poll(now);
        self.tracker.snapshot()
    }

    pub fn index(&self) -> Option<&NodeIndex> {
        self.index.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }
}
