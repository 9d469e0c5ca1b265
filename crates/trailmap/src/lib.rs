#![forbid(unsafe_code)]

//! `trailmap` is a headless engine for hierarchical learning roadmaps.
//!
//! The core crate supplies the semantic model (node arena, expansion state,
//! graph layout, generation-progress state machine); this facade adds the
//! session glue a view coordinator talks to, plus an executor-free pump for
//! the asynchronous progress-event channel.

pub use trailmap_core::*;

pub mod channel;
pub mod session;

pub use channel::pump_progress;
pub use session::{NodeDetail, RoadmapSession, ViewEffect, ViewIntent};
