use cancelflow_flow::{ActionKind, Step, Terminal};
use serde::{Deserialize, Serialize};

/// Represents a discrete event in a dialog session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// An action was accepted
    Dispatched {
        action: ActionKind,
        from: Step,
        to: Step,
        timestamp: u64,
    },
    /// An action was refused; the state did not change
    Rejected {
        action: ActionKind,
        screen: Step,
        reason: String,
        timestamp: u64,
    },
    /// The user kept their subscription
    Aborted { screen: Step, timestamp: u64 },
    /// A terminal step was reached
    Completed { terminal: Terminal, timestamp: u64 },
}

impl TimelineEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            TimelineEvent::Dispatched { timestamp, .. }
            | TimelineEvent::Rejected { timestamp, .. }
            | TimelineEvent::Aborted { timestamp, .. }
            | TimelineEvent::Completed { timestamp, .. } => *timestamp,
        }
    }
}

/// A sequential record of one dialog session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TimelineEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Screens visited in order, starting with the first `from`.
    pub fn screens(&self) -> Vec<Step> {
        let mut screens = Vec::new();
        for event in &self.events {
            if let TimelineEvent::Dispatched { from, to, .. } = event {
                if screens.is_empty() {
                    screens.push(*from);
                }
                if screens.last() != Some(to) {
                    screens.push(*to);
                }
            }
        }
        screens
    }

    pub fn rejections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TimelineEvent::Rejected { .. }))
            .count()
    }

    /// Sort events by timestamp
    pub fn sort(&mut self) {
        self.events.sort_by_key(TimelineEvent::timestamp);
    }
}
