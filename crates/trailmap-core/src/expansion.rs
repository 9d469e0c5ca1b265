//! Per-node expand/collapse flags with depth-based defaults.
//!
//! Absent entries resolve to "expanded" for the first two depth levels and
//! "collapsed" below. Mutation happens only through explicit operations here;
//! relayout is requested separately by the caller, never triggered from a
//! mutation as a side effect.

use rustc_hash::FxHashMap;

/// Nodes shallower than this depth are expanded by default.
pub const DEFAULT_EXPANDED_DEPTH: i64 = 2;

#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    entries: FxHashMap<String, bool>,
    active_roadmap: Option<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_for_depth(depth: i64) -> bool {
        depth < DEFAULT_EXPANDED_DEPTH
    }

    pub fn is_expanded(&self, id: &str, depth: i64) -> bool {
        self.entries
            .get(id)
            .copied()
            .unwrap_or_else(|| Self::default_for_depth(depth))
    }

    /// Flips the flag, materializing the depth default first if absent.
    /// Returns the new value.
    pub fn toggle(&mut self, id: &str, depth: i64) -> bool {
        let entry = self
            .entries
            .entry(id.to_string())
            .or_insert_with(|| Self::default_for_depth(depth));
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, id: &str, expanded: bool) {
        self.entries.insert(id.to_string(), expanded);
    }

    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    /// Records the active roadmap identity; switching roadmaps clears all
    /// stored flags so the new roadmap starts from the depth defaults.
    pub fn activate(&mut self, roadmap_id: &str) {
        if self.active_roadmap.as_deref() != Some(roadmap_id) {
            self.entries.clear();
            self.active_roadmap = Some(roadmap_id.to_string());
        }
    }

    pub fn overridden_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_defaults_apply_when_absent() {
        let state = ExpansionState::new();
        assert!(state.is_expanded("a", 0));
        assert!(state.is_expanded("a", 1));
        assert!(!state.is_expanded("a", 2));
        assert!(!state.is_expanded("a", 9));
    }

    #[test]
    fn toggle_materializes_the_default_then_flips() {
        let mut state = ExpansionState::new();
        assert!(!state.toggle("shallow", 0));
        assert!(!state.is_expanded("shallow", 0));
        assert!(state.toggle("deep", 5));
        assert!(state.is_expanded("deep", 5));
    }

    #[test]
    fn reset_all_restores_defaults() {
        let mut state = ExpansionState::new();
        state.toggle("a", 0);
        state.reset_all();
        assert!(state.is_expanded("a", 0));
        assert_eq!(state.overridden_count(), 0);
    }

    #[test]
    fn activating_a_different_roadmap_clears_entries() {
        let mut state = ExpansionState::new();
        state.activate("r1");
        state.toggle("a", 0);
        state.activate("r1");
        assert_eq!(state.overridden_count(), 1);
        state.activate("r2");
        assert_eq!(state.overridden_count(), 0);
    }
}
