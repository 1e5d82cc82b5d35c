//! Outcome - Control flow of a dispatch, as data
//!
//! Every accepted action yields an `Outcome` carrying the next state. The
//! caller keeps rendering on `Next`, acts on the [`Completion`] of a
//! `Terminal`, and closes the dialog on `Abort`.

use crate::answers::{CancelReason, JobAnswers, SearchAnswers};
use crate::state::{FlowState, Path, Step};
use serde::{Deserialize, Serialize};

/// The three ways a flow can finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    DiscountAccepted,
    Cancelled,
    CancelledWithVisaSupport,
}

impl Terminal {
    pub fn from_step(step: Step) -> Option<Self> {
        match step {
            Step::DiscountAccepted => Some(Terminal::DiscountAccepted),
            Step::Cancelled => Some(Terminal::Cancelled),
            Step::CancelledWithVisaSupport => Some(Terminal::CancelledWithVisaSupport),
            _ => None,
        }
    }

    pub fn step(self) -> Step {
        match self {
            Terminal::DiscountAccepted => Step::DiscountAccepted,
            Terminal::Cancelled => Step::Cancelled,
            Terminal::CancelledWithVisaSupport => Step::CancelledWithVisaSupport,
        }
    }

    /// Whether the subscription ends (as opposed to continuing at a discount).
    pub fn cancels_subscription(self) -> bool {
        !matches!(self, Terminal::DiscountAccepted)
    }
}

/// Everything the caller needs to act on a finished flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub terminal: Terminal,
    pub path: Path,
    pub job_answers: JobAnswers,
    pub search_answers: SearchAnswers,
    pub cancel_reason: Option<CancelReason>,
    /// `None` when the user left the free-text field blank.
    pub cancel_reason_detail: Option<String>,
}

impl Completion {
    /// Snapshot a state that sits on a terminal step.
    pub fn from_state(state: &FlowState) -> Option<Self> {
        let terminal = Terminal::from_step(state.step)?;
        let detail = state.cancel_reason_detail.trim();
        Some(Completion {
            terminal,
            path: state.path,
            job_answers: state.job_answers.clone(),
            search_answers: state.search_answers.clone(),
            cancel_reason: state.cancel_reason,
            cancel_reason_detail: (!detail.is_empty()).then(|| detail.to_string()),
        })
    }
}

/// The explicit result of an accepted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Keep going on the returned state.
    Next { state: FlowState },
    /// The flow reached a terminal step.
    Terminal {
        state: FlowState,
        completion: Completion,
    },
    /// The user kept their subscription; close the dialog. The state is
    /// returned unchanged and no terminal step was reached.
    Abort { state: FlowState },
}

impl Outcome {
    pub(crate) fn settle(state: FlowState) -> Self {
        match Completion::from_state(&state) {
            Some(completion) => Outcome::Terminal { state, completion },
            None => Outcome::Next { state },
        }
    }

    pub fn state(&self) -> &FlowState {
        match self {
            Outcome::Next { state }
            | Outcome::Terminal { state, .. }
            | Outcome::Abort { state } => state,
        }
    }

    pub fn into_state(self) -> FlowState {
        match self {
            Outcome::Next { state }
            | Outcome::Terminal { state, .. }
            | Outcome::Abort { state } => state,
        }
    }

    /// Populated only when the resulting step is terminal.
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            Outcome::Terminal { completion, .. } => Some(completion),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Terminal { .. })
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Outcome::Abort { .. })
    }
}
