//! Transition - The rule table of the dialog
//!
//! `transition` is the only way a [`FlowState`] changes. It is total over the
//! action set: an action defined for the current screen yields an
//! [`Outcome`], anything else is rejected with [`FlowError`] and the input
//! state is left untouched.
//!
//! Rules are keyed on the *screen* ([`FlowState::screen`]) so the declined
//! offer form and the discount offer, which share a stored step, get their
//! own rows.

use crate::action::{Action, ActionKind};
use crate::answers::{SearchAnswers, YesNo};
use crate::error::{FlowError, FlowResult};
use crate::guard::Guard;
use crate::outcome::Outcome;
use crate::state::{FlowState, Path, Step};

/// Apply `action` to `state`.
///
/// # Example
/// ```rust
/// use cancelflow_flow::{init_flow, transition, Action, Step, Terminal};
///
/// let state = transition(&init_flow(), Action::StillLooking).unwrap().into_state();
/// let outcome = transition(&state, Action::AcceptDiscount).unwrap();
/// assert_eq!(outcome.state().step(), Step::DiscountAccepted);
/// assert_eq!(outcome.completion().unwrap().terminal, Terminal::DiscountAccepted);
/// ```
pub fn transition(state: &FlowState, action: Action) -> FlowResult<Outcome> {
    let screen = state.screen();
    let kind = action.kind();
    let path = state.path;
    let mut next = state.clone();

    match (screen, action) {
        // Intro: pick a path. Returning here via Back must not flip it.
        (Step::Intro, Action::FoundJob) => choose_path(&mut next, Path::FoundJob, kind)?,
        (Step::Intro, Action::StillLooking) => choose_path(&mut next, Path::StillLooking, kind)?,

        // Discount offer
        (Step::OfferOrQuestionnaire, Action::AcceptDiscount) if path == Path::StillLooking => {
            next.step = Step::DiscountAccepted;
        }
        (Step::OfferOrQuestionnaire, Action::DeclineOffer) if path == Path::StillLooking => {
            next.offer_declined = true;
        }

        // Found-a-job questionnaire
        (Step::OfferOrQuestionnaire, Action::AnswerFoundWithService(v))
            if path == Path::FoundJob =>
        {
            next.job_answers.found_with_service = Some(v);
        }
        (Step::OfferOrQuestionnaire, Action::AnswerRolesApplied(v)) if path == Path::FoundJob => {
            next.job_answers.roles_applied = Some(v);
        }
        (Step::OfferOrQuestionnaire, Action::AnswerCompaniesEmailed(v))
            if path == Path::FoundJob =>
        {
            next.job_answers.companies_emailed = Some(v);
        }
        (Step::OfferOrQuestionnaire, Action::AnswerCompaniesInterviewed(v))
            if path == Path::FoundJob =>
        {
            next.job_answers.companies_interviewed = Some(v);
        }
        (Step::OfferOrQuestionnaire, Action::SubmitAnswers) if path == Path::FoundJob => {
            require(state, Guard::JobQuestionnaire, screen, kind)?;
            next.step = match state.job_answers.found_with_service {
                Some(YesNo::Yes) => Step::VisaOfferFoundWithService,
                _ => Step::VisaOfferFoundElsewhere,
            };
        }

        // Declined-offer feedback form
        (Step::DeclineFeedback, Action::AnswerRolesApplied(v)) => {
            next.search_answers.roles_applied = Some(v);
        }
        (Step::DeclineFeedback, Action::AnswerCompaniesEmailed(v)) => {
            next.search_answers.companies_emailed = Some(v);
        }
        (Step::DeclineFeedback, Action::AnswerCompaniesInterviewed(v)) => {
            next.search_answers.companies_interviewed = Some(v);
        }
        (Step::DeclineFeedback, Action::SubmitFeedback) => {
            require(state, Guard::DeclineFeedback, screen, kind)?;
            next.step = Step::ReasonCapture;
        }

        // Reason selection, shared by the feedback form and reason capture
        (Step::DeclineFeedback | Step::ReasonCapture, Action::SelectCancelReason(reason)) => {
            next.cancel_reason = Some(reason);
        }
        (Step::DeclineFeedback | Step::ReasonCapture, Action::SetCancelReasonDetail(detail)) => {
            next.cancel_reason_detail = detail;
        }
        (Step::DeclineFeedback | Step::ReasonCapture, Action::KeepSubscription) => {
            return Ok(Outcome::Abort { state: next });
        }
        (Step::DeclineFeedback | Step::ReasonCapture, Action::ConfirmCancellation) => {
            require(state, Guard::ConfirmCancellation, screen, kind)?;
            next.step = Step::Cancelled;
        }

        // Visa offers
        (
            Step::VisaOfferFoundWithService | Step::VisaOfferFoundElsewhere,
            Action::AcceptVisaHelp,
        ) => {
            next.step = Step::CancelledWithVisaSupport;
        }
        (
            Step::VisaOfferFoundWithService | Step::VisaOfferFoundElsewhere,
            Action::DeclineVisaHelp,
        ) => {
            next.step = Step::Cancelled;
        }

        (_, Action::Back) => go_back(&mut next, screen)?,

        _ => return Err(FlowError::InvalidAction { screen, action: kind }),
    }

    Ok(Outcome::settle(next))
}

/// Check an action without applying it.
pub fn permits(state: &FlowState, action: &Action) -> FlowResult<()> {
    transition(state, action.clone()).map(|_| ())
}

/// Kinds of every action the current state accepts, in declaration order.
pub fn available_actions(state: &FlowState) -> Vec<ActionKind> {
    let mut kinds: Vec<ActionKind> = Action::catalog()
        .into_iter()
        .filter(|action| permits(state, action).is_ok())
        .map(|action| action.kind())
        .collect();
    kinds.dedup();
    kinds
}

fn choose_path(next: &mut FlowState, chosen: Path, action: ActionKind) -> FlowResult<()> {
    if next.path != Path::Unset && next.path != chosen {
        return Err(FlowError::InvalidAction {
            screen: Step::Intro,
            action,
        });
    }
    next.path = chosen;
    next.step = Step::OfferOrQuestionnaire;
    Ok(())
}

fn require(state: &FlowState, guard: Guard, screen: Step, action: ActionKind) -> FlowResult<()> {
    if guard.holds(state) {
        Ok(())
    } else {
        Err(FlowError::IncompleteAnswers {
            screen,
            action,
            guard,
        })
    }
}

fn go_back(next: &mut FlowState, screen: Step) -> FlowResult<()> {
    match screen {
        Step::OfferOrQuestionnaire => next.step = Step::Intro,
        // Back from the feedback form returns to the discount offer and
        // withdraws everything entered on the form.
        Step::DeclineFeedback => {
            next.step = Step::OfferOrQuestionnaire;
            next.offer_declined = false;
            next.search_answers = SearchAnswers::default();
            next.cancel_reason = None;
            next.cancel_reason_detail.clear();
        }
        Step::ReasonCapture
        | Step::VisaOfferFoundWithService
        | Step::VisaOfferFoundElsewhere => next.step = Step::OfferOrQuestionnaire,
        Step::Intro | Step::DiscountAccepted | Step::Cancelled | Step::CancelledWithVisaSupport => {
            return Err(FlowError::InvalidAction {
                screen,
                action: ActionKind::Back,
            });
        }
    }
    Ok(())
}
