//! Generation-progress state machine.
//!
//! One generation session at a time, identified by a monotonic token. Events
//! arrive from a best-effort push channel; an event carrying any token other
//! than the current one belongs to a superseded session and is dropped. That
//! token comparison is the whole cancellation mechanism. The step pointer only
//! moves forward within a session; late lower-index arrivals still update
//! percentage and error text. Time never comes from the clock here: callers
//! pass `Instant`s in, so tests are deterministic.


use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a completed session lingers before falling back to idle, so
/// observers can render the terminal state.
pub const COMPLETE_LINGER: Duration = Duration::from_secs(2);

/// A session with no events for this long is marked failed on the next poll.
pub const STALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Fixed pipeline stage vocabulary, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStep {
    Searching,
    Analyzing,
    Researching,
    Structuring,
    Generating,
    Finalizing,
    Complete,
}

impl GenerationStep {
    pub const ALL: [GenerationStep; 7] = [
        GenerationStep::Searching,
        GenerationStep::Analyzing,
        GenerationStep::Researching,
        GenerationStep::Structuring,
        GenerationStep::Generating,
        GenerationStep::Finalizing,
        GenerationStep::Complete,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "searching" => Some(GenerationStep::Searching),
            "analyzing" => Some(GenerationStep::Analyzing),
            "researching" => Some(GenerationStep::Researching),
            "structuring" => Some(GenerationStep::Structuring),
            "generating" => Some(GenerationStep::Generating),
            "finalizing" => Some(GenerationStep::Finalizing),
            "complete" => Some(GenerationStep::Complete),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            GenerationStep::Searching => "searching",
            GenerationStep::Analyzing => "analyzing",
            GenerationStep::Researching => "researching",
            GenerationStep::Structuring => "structuring",
            GenerationStep::Generating => "generating",
            GenerationStep::Finalizing => "finalizing",
            GenerationStep::Complete => "complete",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Explicit error severity carried by redesigned event payloads. Events from
/// older producers omit it, in which case the benign-marker heuristic applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Fatal,
}

/// One message from the push channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub step: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub severity: Option<ErrorSeverity>,
}

impl ProgressEvent {
    pub fn new(step: &str, progress: f64) -> Self {
        Self {
            step: step.to_string(),
            progress,
            error: None,
            severity: None,
        }
    }

    pub fn with_error(step: &str, progress: f64, error: &str) -> Self {
        Self {
            step: step.to_string(),
            progress,
            error: Some(error.to_string()),
            severity: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub step: GenerationStep,
    pub percentage: f64,
    pub error: Option<String>,
    pub terminal: Option<Terminal>,
}

#[derive(Debug)]
struct ActiveSession {
    token: SessionToken,
    step: GenerationStep,
    percentage: f64,
    error: Option<String>,
    terminal: Option<Terminal>,
    last_event_at: Instant,
    idle_at: Option<Instant>,
}

#[derive(Debug)]
pub struct ProgressTracker {
    next_token: u64,
    active: Option<ActiveSession>,
    benign_markers: Vec<String>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        // The only marker observed from the generation pipeline; anything else
        // in an untagged error is treated as fatal.
        Self::with_benign_markers(vec!["Checking similarity".to_string()])
    }

    pub fn with_benign_markers(markers: Vec<String>) -> Self {
        Self {
            next_token: 0,
            active: None,
            benign_markers: markers,
        }
    }

    /// Issues a fresh session token and resets the machine to the first step.
    /// Any event still in flight under an older token will no longer match.
    pub fn start_session(&mut self, now: Instant) -> SessionToken {
        self.next_token += 1;
        let token = SessionToken(self.next_token);
        self.active = Some(ActiveSession {
            token,
            step: GenerationStep::Searching,
            percentage: 0.0,
            error: None,
            terminal: None,
            last_event_at: now,
            idle_at: None,
        });
        token
    }

    pub fn current_token(&self) -> Option<SessionToken> {
        self.active.as_ref().map(|s| s.token)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn apply_event(&mut self, token: SessionToken, event: &ProgressEvent, now: Instant) {
        let Some(session) = self.active.as_mut() else {
            tracing::debug!(token = token.value(), "progress event while idle, dropped");
            return;
        };
        if session.token != token {
            tracing::debug!(
                stale = token.value(),
                current = session.token.value(),
                "stale progress event, dropped"
            );
            return;
        }
        if session.terminal.is_some() {
            return;
        }

        session.last_event_at = now;
        let percentage = event.progress.clamp(0.0, 100.0);
        session.percentage = percentage;
        session.error = event.error.clone();

        match GenerationStep::from_key(&event.step) {
            // The pointer never moves backward within a session.
            Some(step) if step.index() > session.step.index() => session.step = step,
            Some(_) => {}
            None => {
                tracing::debug!(step = %event.step, "unknown generation step key");
            }
        }

        if let Some(error) = &event.error {
            let fatal = match event.severity {
                Some(ErrorSeverity::Fatal) => true,
                Some(ErrorSeverity::Info) => false,
                None => !self
                    .benign_markers
                    .iter()
                    .any(|marker| error.contains(marker.as_str())),
            };
            if fatal {
                session.terminal = Some(Terminal::Failed);
                session.idle_at = None;
                return;
            }
        }

        if event.step == "complete" || percentage >= 100.0 {
            session.step = GenerationStep::Complete;
            session.percentage = 100.0;
            session.terminal = Some(Terminal::Complete);
            session.idle_at = Some(now + COMPLETE_LINGER);
        }
    }

    /// Applies deferred transitions: complete sessions fall back to idle after
    /// the linger, and sessions that stopped receiving events are failed.
    pub fn poll(&mut self, now: Instant) {
        let clear = match self.active.as_mut() {
            None => false,
            Some(session) => {
                if session.idle_at.is_some_and(|at| now >= at) {
                    true
                } else {
                    if session.terminal.is_none()
                        && now.duration_since(session.last_event_at) >= STALL_TIMEOUT
                    {
                        session.terminal = Some(Terminal::Failed);
                        session.error =
                            Some("Generation stalled: no progress events received".to_string());
                    }
                    false
                }
            }
        };
        if clear {
            self.active = None;
        }
    }

    /// `None` while idle (no session, or the completed one already cleared).
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        self.active.as_ref().map(|session| ProgressSnapshot {
            step: session.step,
            percentage: session.percentage,
            error: session.error.clone(),
            terminal: session.terminal,
        })
    }

    /// Immediate return to idle; used on view teardown.
    pub fn reset(&mut self) {
        self.active = None;
    }
}
