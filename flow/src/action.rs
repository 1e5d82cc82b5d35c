//! Action - Discrete user choices dispatched to the flow
//!
//! Every input the dialog accepts is an `Action`, including setting a single
//! answer. Which questionnaire an answer lands in is decided by the screen it
//! was dispatched on, not by the action.

use crate::answers::{ActivityBand, CancelReason, InterviewBand, YesNo};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// "Yes, I've found a job"
    FoundJob,
    /// "Not yet - I'm still looking"
    StillLooking,
    AcceptDiscount,
    DeclineOffer,
    AnswerFoundWithService(YesNo),
    AnswerRolesApplied(ActivityBand),
    AnswerCompaniesEmailed(ActivityBand),
    AnswerCompaniesInterviewed(InterviewBand),
    /// Continue from the job questionnaire.
    SubmitAnswers,
    /// Continue from the declined-offer feedback form.
    SubmitFeedback,
    SelectCancelReason(CancelReason),
    SetCancelReasonDetail(String),
    KeepSubscription,
    ConfirmCancellation,
    /// "Yes, help me" on a visa offer.
    AcceptVisaHelp,
    /// "No thanks" on a visa offer.
    DeclineVisaHelp,
    Back,
}

/// Payload-free name of an [`Action`], used in errors, timelines and
/// affordance lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    FoundJob,
    StillLooking,
    AcceptDiscount,
    DeclineOffer,
    AnswerFoundWithService,
    AnswerRolesApplied,
    AnswerCompaniesEmailed,
    AnswerCompaniesInterviewed,
    SubmitAnswers,
    SubmitFeedback,
    SelectCancelReason,
    SetCancelReasonDetail,
    KeepSubscription,
    ConfirmCancellation,
    AcceptVisaHelp,
    DeclineVisaHelp,
    Back,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::FoundJob => ActionKind::FoundJob,
            Action::StillLooking => ActionKind::StillLooking,
            Action::AcceptDiscount => ActionKind::AcceptDiscount,
            Action::DeclineOffer => ActionKind::DeclineOffer,
            Action::AnswerFoundWithService(_) => ActionKind::AnswerFoundWithService,
            Action::AnswerRolesApplied(_) => ActionKind::AnswerRolesApplied,
            Action::AnswerCompaniesEmailed(_) => ActionKind::AnswerCompaniesEmailed,
            Action::AnswerCompaniesInterviewed(_) => ActionKind::AnswerCompaniesInterviewed,
            Action::SubmitAnswers => ActionKind::SubmitAnswers,
            Action::SubmitFeedback => ActionKind::SubmitFeedback,
            Action::SelectCancelReason(_) => ActionKind::SelectCancelReason,
            Action::SetCancelReasonDetail(_) => ActionKind::SetCancelReasonDetail,
            Action::KeepSubscription => ActionKind::KeepSubscription,
            Action::ConfirmCancellation => ActionKind::ConfirmCancellation,
            Action::AcceptVisaHelp => ActionKind::AcceptVisaHelp,
            Action::DeclineVisaHelp => ActionKind::DeclineVisaHelp,
            Action::Back => ActionKind::Back,
        }
    }

    /// Every concrete action with every option value.
    ///
    /// Free-text detail is represented by an empty and a non-empty sample.
    pub fn catalog() -> Vec<Action> {
        let mut actions = vec![
            Action::FoundJob,
            Action::StillLooking,
            Action::AcceptDiscount,
            Action::DeclineOffer,
        ];
        actions.extend(YesNo::ALL.iter().copied().map(Action::AnswerFoundWithService));
        actions.extend(ActivityBand::ALL.iter().copied().map(Action::AnswerRolesApplied));
        actions.extend(ActivityBand::ALL.iter().copied().map(Action::AnswerCompaniesEmailed));
        actions.extend(
            InterviewBand::ALL
                .iter()
                .copied()
                .map(Action::AnswerCompaniesInterviewed),
        );
        actions.push(Action::SubmitAnswers);
        actions.push(Action::SubmitFeedback);
        actions.extend(CancelReason::ALL.iter().copied().map(Action::SelectCancelReason));
        actions.push(Action::SetCancelReasonDetail(String::new()));
        actions.push(Action::SetCancelReasonDetail("details".to_string()));
        actions.extend([
            Action::KeepSubscription,
            Action::ConfirmCancellation,
            Action::AcceptVisaHelp,
            Action::DeclineVisaHelp,
            Action::Back,
        ]);
        actions
    }
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::FoundJob => "found_job",
            ActionKind::StillLooking => "still_looking",
            ActionKind::AcceptDiscount => "accept_discount",
            ActionKind::DeclineOffer => "decline_offer",
            ActionKind::AnswerFoundWithService => "answer_found_with_service",
            ActionKind::AnswerRolesApplied => "answer_roles_applied",
            ActionKind::AnswerCompaniesEmailed => "answer_companies_emailed",
            ActionKind::AnswerCompaniesInterviewed => "answer_companies_interviewed",
            ActionKind::SubmitAnswers => "submit_answers",
            ActionKind::SubmitFeedback => "submit_feedback",
            ActionKind::SelectCancelReason => "select_cancel_reason",
            ActionKind::SetCancelReasonDetail => "set_cancel_reason_detail",
            ActionKind::KeepSubscription => "keep_subscription",
            ActionKind::ConfirmCancellation => "confirm_cancellation",
            ActionKind::AcceptVisaHelp => "accept_visa_help",
            ActionKind::DeclineVisaHelp => "decline_visa_help",
            ActionKind::Back => "back",
        }
    }

    /// Whether the action only records an answer and never changes screens.
    pub fn is_answer(self) -> bool {
        matches!(
            self,
            ActionKind::AnswerFoundWithService
                | ActionKind::AnswerRolesApplied
                | ActionKind::AnswerCompaniesEmailed
                | ActionKind::AnswerCompaniesInterviewed
                | ActionKind::SelectCancelReason
                | ActionKind::SetCancelReasonDetail
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AnswerFoundWithService(v) => write!(f, "{}({})", self.kind(), v),
            Action::AnswerRolesApplied(v) | Action::AnswerCompaniesEmailed(v) => {
                write!(f, "{}({})", self.kind(), v)
            }
            Action::AnswerCompaniesInterviewed(v) => write!(f, "{}({})", self.kind(), v),
            Action::SelectCancelReason(v) => write!(f, "{}({})", self.kind(), v),
            other => fmt::Display::fmt(&other.kind(), f),
        }
    }
}
