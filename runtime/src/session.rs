//! Session - One dialog activation
//!
//! The Session owns the single [`FlowState`] of an open dialog, runs every
//! dispatch through [`transition`], and records what happened on a
//! [`Timeline`]. It is not shared: one session per open dialog, driven by one
//! caller. Dropping it is how the dialog is closed.

use crate::timeline::{Timeline, TimelineEvent};
use cancelflow_flow::{
    available_actions, init_flow, transition, Action, ActionKind, Completion, FlowError,
    FlowState, Outcome, Step,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] FlowError),

    #[error("session {id} is closed ({status}); `{action}` was not applied")]
    Closed {
        id: Uuid,
        status: &'static str,
        action: ActionKind,
    },
}

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Completed { completion: Completion },
    Aborted,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Completed { .. } => "completed",
            SessionStatus::Aborted => "aborted",
        }
    }
}

pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: FlowState,
    status: SessionStatus,
    timeline: Timeline,
}

impl Session {
    /// Open a new dialog at `Intro`.
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "Session opened");
        Session {
            id,
            started_at: Utc::now(),
            state: init_flow(),
            status: SessionStatus::Open,
            timeline: Timeline::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }

    pub fn completion(&self) -> Option<&Completion> {
        match &self.status {
            SessionStatus::Completed { completion } => Some(completion),
            _ => None,
        }
    }

    /// What the caller may offer the user right now.
    pub fn available_actions(&self) -> Vec<ActionKind> {
        if self.is_open() {
            available_actions(&self.state)
        } else {
            Vec::new()
        }
    }

    /// Apply one action.
    ///
    /// Rejections are recorded on the timeline and leave the state as it
    /// was. Once the flow completes or is aborted, every further dispatch is
    /// refused with [`SessionError::Closed`].
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, SessionError> {
        let kind = action.kind();
        let screen = self.state.screen();
        let span = info_span!(
            "dispatch",
            session = %self.id,
            screen = %screen,
            action = %kind
        );
        let _enter = span.enter();

        if !self.is_open() {
            warn!(status = self.status.as_str(), "Dispatch on closed session");
            return Err(SessionError::Closed {
                id: self.id,
                status: self.status.as_str(),
                action: kind,
            });
        }

        let outcome = match transition(&self.state, action) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "Action rejected");
                self.record(|timestamp| TimelineEvent::Rejected {
                    action: kind,
                    screen,
                    reason: err.to_string(),
                    timestamp,
                });
                return Err(err.into());
            }
        };

        match &outcome {
            Outcome::Next { state } => {
                debug!(to = %state.screen(), "Action accepted");
                self.record_dispatch(kind, screen, state.screen());
            }
            Outcome::Terminal { state, completion } => {
                self.record_dispatch(kind, screen, state.step());
                self.record(|timestamp| TimelineEvent::Completed {
                    terminal: completion.terminal,
                    timestamp,
                });
                info!(terminal = ?completion.terminal, "Flow completed");
                self.status = SessionStatus::Completed {
                    completion: completion.clone(),
                };
            }
            Outcome::Abort { .. } => {
                self.record(|timestamp| TimelineEvent::Aborted { screen, timestamp });
                info!("Flow aborted, subscription kept");
                self.status = SessionStatus::Aborted;
            }
        }

        self.state = outcome.state().clone();
        Ok(outcome)
    }

    fn record_dispatch(&mut self, action: ActionKind, from: Step, to: Step) {
        self.record(|timestamp| TimelineEvent::Dispatched {
            action,
            from,
            to,
            timestamp,
        });
    }

    fn record(&mut self, event: impl FnOnce(u64) -> TimelineEvent) {
        let timestamp = Utc::now().timestamp_millis().max(0) as u64;
        self.timeline.push(event(timestamp));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("screen", &self.state.screen())
            .field("status", &self.status.as_str())
            .field("events", &self.timeline.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cancelflow_flow::{CancelReason, Terminal};

    #[test]
    fn test_dispatch_updates_state() {
        let mut session = Session::new();
        let outcome = session.dispatch(Action::StillLooking).unwrap();
        assert!(!outcome.is_terminal());
        assert_eq!(session.state().step(), Step::OfferOrQuestionnaire);
        assert_eq!(session.timeline().len(), 1);
    }

    #[test]
    fn test_rejection_is_recorded() {
        let mut session = Session::new();
        let err = session.dispatch(Action::AcceptDiscount).unwrap_err();
        assert!(matches!(err, SessionError::Rejected(FlowError::InvalidAction { .. })));
        assert_eq!(session.state().step(), Step::Intro);
        assert_eq!(session.timeline().rejections(), 1);
        assert!(session.is_open());
    }

    #[test]
    fn test_completion_closes_session() {
        let mut session = Session::new();
        session.dispatch(Action::StillLooking).unwrap();
        session.dispatch(Action::AcceptDiscount).unwrap();

        assert_eq!(
            session.completion().map(|c| c.terminal),
            Some(Terminal::DiscountAccepted)
        );
        assert!(session.available_actions().is_empty());
        let err = session.dispatch(Action::Back).unwrap_err();
        assert!(matches!(err, SessionError::Closed { status: "completed", .. }));
    }

    #[test]
    fn test_keep_subscription_aborts() {
        let mut session = Session::new();
        session.dispatch(Action::StillLooking).unwrap();
        session.dispatch(Action::DeclineOffer).unwrap();
        session
            .dispatch(Action::SelectCancelReason(CancelReason::Other))
            .unwrap();
        let outcome = session.dispatch(Action::KeepSubscription).unwrap();

        assert!(outcome.is_abort());
        assert_eq!(session.status(), &SessionStatus::Aborted);
        assert_eq!(session.completion(), None);
        assert!(!session.state().is_terminal());
        assert!(matches!(
            session.timeline().events.last(),
            Some(TimelineEvent::Aborted {
                screen: Step::DeclineFeedback,
                ..
            })
        ));
    }
}
