//! FlowState - Where the user is in the cancellation dialog
//!
//! A single record per dialog activation. The caller owns it and replaces it
//! with whatever [`transition`](crate::transition::transition) returns; fields
//! are read-only from outside the crate so the path and answer invariants can
//! only be changed by a transition rule.
//!
//! # Example
//! ```rust
//! use cancelflow_flow::{init_flow, Path, Step};
//!
//! let state = init_flow();
//! assert_eq!(state.step(), Step::Intro);
//! assert_eq!(state.path(), Path::Unset);
//! ```

use crate::answers::{CancelReason, JobAnswers, SearchAnswers};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Named steps of the dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Intro,
    /// Discount offer (still looking) or job questionnaire (found a job).
    OfferOrQuestionnaire,
    /// Feedback form after the discount was declined.
    ///
    /// Stored steps stay on `OfferOrQuestionnaire` with `offer_declined` set;
    /// this value is what [`FlowState::screen`] reports for that combination.
    DeclineFeedback,
    ReasonCapture,
    VisaOfferFoundWithService,
    VisaOfferFoundElsewhere,
    DiscountAccepted,
    Cancelled,
    CancelledWithVisaSupport,
}

impl Step {
    pub const ALL: &'static [Step] = &[
        Step::Intro,
        Step::OfferOrQuestionnaire,
        Step::DeclineFeedback,
        Step::ReasonCapture,
        Step::VisaOfferFoundWithService,
        Step::VisaOfferFoundElsewhere,
        Step::DiscountAccepted,
        Step::Cancelled,
        Step::CancelledWithVisaSupport,
    ];

    /// Terminal steps end the flow; nothing may be dispatched afterwards.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Step::DiscountAccepted | Step::Cancelled | Step::CancelledWithVisaSupport
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Intro => "intro",
            Step::OfferOrQuestionnaire => "offer_or_questionnaire",
            Step::DeclineFeedback => "decline_feedback",
            Step::ReasonCapture => "reason_capture",
            Step::VisaOfferFoundWithService => "visa_offer_found_with_service",
            Step::VisaOfferFoundElsewhere => "visa_offer_found_elsewhere",
            Step::DiscountAccepted => "discount_accepted",
            Step::Cancelled => "cancelled",
            Step::CancelledWithVisaSupport => "cancelled_with_visa_support",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which branch the user took at the first question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Path {
    #[default]
    Unset,
    FoundJob,
    StillLooking,
}

impl Path {
    pub fn as_str(self) -> &'static str {
        match self {
            Path::Unset => "unset",
            Path::FoundJob => "found_job",
            Path::StillLooking => "still_looking",
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored state that no sequence of transitions can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("`decline_feedback` is a screen, not a stored step")]
    ProjectedStep,

    #[error("step `{step}` cannot be reached on path `{path}`")]
    StepOffPath { step: Step, path: Path },

    #[error("`{field}` cannot be set on path `{path}`")]
    AnswerOffPath { field: &'static str, path: Path },

    #[error("`{field}` is only kept while the discount offer is declined")]
    AnswerWithoutDecline { field: &'static str },
}

/// The accumulated state of one dialog activation.
///
/// Deserialization runs [`FlowState::validate`], so a stored state can only
/// come back if the transition rules could have produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFlowState")]
pub struct FlowState {
    pub(crate) step: Step,
    pub(crate) path: Path,
    pub(crate) offer_declined: bool,
    pub(crate) job_answers: JobAnswers,
    pub(crate) search_answers: SearchAnswers,
    pub(crate) cancel_reason: Option<CancelReason>,
    pub(crate) cancel_reason_detail: String,
}

#[derive(Deserialize)]
struct RawFlowState {
    step: Step,
    path: Path,
    offer_declined: bool,
    job_answers: JobAnswers,
    search_answers: SearchAnswers,
    cancel_reason: Option<CancelReason>,
    cancel_reason_detail: String,
}

impl TryFrom<RawFlowState> for FlowState {
    type Error = StateError;

    fn try_from(raw: RawFlowState) -> Result<Self, Self::Error> {
        let state = FlowState {
            step: raw.step,
            path: raw.path,
            offer_declined: raw.offer_declined,
            job_answers: raw.job_answers,
            search_answers: raw.search_answers,
            cancel_reason: raw.cancel_reason,
            cancel_reason_detail: raw.cancel_reason_detail,
        };
        state.validate()?;
        Ok(state)
    }
}

/// Start a new dialog: `Intro`, no path chosen, nothing answered.
pub fn init_flow() -> FlowState {
    FlowState::default()
}

impl FlowState {
    pub fn new() -> Self {
        init_flow()
    }

    /// The stored step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// The screen the caller should render.
    ///
    /// Identical to [`step`](Self::step) except that the declined-offer form
    /// reports [`Step::DeclineFeedback`].
    pub fn screen(&self) -> Step {
        match self.step {
            Step::OfferOrQuestionnaire
                if self.path == Path::StillLooking && self.offer_declined =>
            {
                Step::DeclineFeedback
            }
            step => step,
        }
    }

    pub fn path(&self) -> Path {
        self.path
    }

    pub fn offer_declined(&self) -> bool {
        self.offer_declined
    }

    pub fn job_answers(&self) -> &JobAnswers {
        &self.job_answers
    }

    pub fn search_answers(&self) -> &SearchAnswers {
        &self.search_answers
    }

    pub fn cancel_reason(&self) -> Option<CancelReason> {
        self.cancel_reason
    }

    pub fn cancel_reason_detail(&self) -> &str {
        &self.cancel_reason_detail
    }

    pub fn is_terminal(&self) -> bool {
        self.step.is_terminal()
    }

    /// Check the step, path and answer invariants every reachable state holds.
    pub fn validate(&self) -> Result<(), StateError> {
        let path = self.path;
        let step_fits = match self.step {
            Step::DeclineFeedback => return Err(StateError::ProjectedStep),
            Step::Intro => true,
            Step::OfferOrQuestionnaire | Step::Cancelled => path != Path::Unset,
            Step::ReasonCapture => path == Path::StillLooking && self.offer_declined,
            Step::DiscountAccepted => path == Path::StillLooking,
            Step::VisaOfferFoundWithService
            | Step::VisaOfferFoundElsewhere
            | Step::CancelledWithVisaSupport => path == Path::FoundJob,
        };
        if !step_fits {
            return Err(StateError::StepOffPath {
                step: self.step,
                path,
            });
        }

        let off_path = |field| StateError::AnswerOffPath { field, path };
        if !self.job_answers.is_empty() && path != Path::FoundJob {
            return Err(off_path("job_answers"));
        }
        if self.offer_declined && path != Path::StillLooking {
            return Err(off_path("offer_declined"));
        }
        if !self.offer_declined {
            let decline_field = if !self.search_answers.is_empty() {
                Some("search_answers")
            } else if self.cancel_reason.is_some() {
                Some("cancel_reason")
            } else if !self.cancel_reason_detail.is_empty() {
                Some("cancel_reason_detail")
            } else {
                None
            };
            if let Some(field) = decline_field {
                return Err(StateError::AnswerWithoutDecline { field });
            }
        }
        Ok(())
    }
}
