//! Guard - Predicates that gate progression
//!
//! Guards are pure functions of the current state. They hold nothing of their
//! own, so a caller can re-derive every affordance (e.g. a disabled
//! "Continue" button) after each transition. The transition rules evaluate
//! the same predicates before advancing.

use crate::state::{FlowState, Path};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The guarded screens of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    JobQuestionnaire,
    DeclineFeedback,
    ConfirmCancellation,
}

impl Guard {
    pub fn holds(self, state: &FlowState) -> bool {
        match self {
            Guard::JobQuestionnaire => can_continue_job_questionnaire(state),
            Guard::DeclineFeedback => can_continue_decline_feedback(state),
            Guard::ConfirmCancellation => can_confirm_cancellation(state),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Guard::JobQuestionnaire => "all four job questions answered",
            Guard::DeclineFeedback => "job-search questions or a cancel reason answered",
            Guard::ConfirmCancellation => "a cancel reason selected",
        })
    }
}

/// All four questions of the found-a-job questionnaire are answered.
pub fn can_continue_job_questionnaire(state: &FlowState) -> bool {
    state.path == Path::FoundJob && state.job_answers.is_complete()
}

/// The declined-offer form has either the three job-search answers or a
/// cancel reason.
pub fn can_continue_decline_feedback(state: &FlowState) -> bool {
    state.path == Path::StillLooking
        && (state.search_answers.is_complete() || state.cancel_reason.is_some())
}

/// A cancel reason is selected; the free-text detail is optional.
pub fn can_confirm_cancellation(state: &FlowState) -> bool {
    state.cancel_reason.is_some()
}
