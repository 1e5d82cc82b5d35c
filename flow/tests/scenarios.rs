//! End-to-end walks through the dialog.

use cancelflow_flow::{
    init_flow, transition, Action, ActivityBand, CancelReason, FlowError, FlowState, Guard,
    InterviewBand, Outcome, Path, Step, Terminal, YesNo,
};

fn apply(state: &FlowState, action: Action) -> Outcome {
    transition(state, action).expect("action should be accepted")
}

fn walk(actions: impl IntoIterator<Item = Action>) -> FlowState {
    actions
        .into_iter()
        .fold(init_flow(), |state, action| apply(&state, action).into_state())
}

#[test]
fn still_looking_accepts_discount() {
    let offer = walk([Action::StillLooking]);
    assert_eq!(offer.step(), Step::OfferOrQuestionnaire);
    assert!(!offer.offer_declined());

    let outcome = apply(&offer, Action::AcceptDiscount);
    let completion = outcome.completion().expect("terminal outcome");
    assert_eq!(outcome.state().step(), Step::DiscountAccepted);
    assert_eq!(completion.terminal, Terminal::DiscountAccepted);
    assert_eq!(completion.path, Path::StillLooking);
    assert!(completion.job_answers.is_empty());
}

#[test]
fn still_looking_cancels_after_reason() {
    let form = walk([
        Action::StillLooking,
        Action::DeclineOffer,
        Action::AnswerRolesApplied(ActivityBand::SixToTwenty),
        Action::AnswerCompaniesEmailed(ActivityBand::OneToFive),
        Action::AnswerCompaniesInterviewed(InterviewBand::Zero),
    ]);
    assert_eq!(form.screen(), Step::DeclineFeedback);
    assert!(form.search_answers().is_complete());

    let err = transition(&form, Action::ConfirmCancellation).unwrap_err();
    assert_eq!(
        err,
        FlowError::IncompleteAnswers {
            screen: Step::DeclineFeedback,
            action: cancelflow_flow::ActionKind::ConfirmCancellation,
            guard: Guard::ConfirmCancellation,
        }
    );

    let with_reason =
        apply(&form, Action::SelectCancelReason(CancelReason::TooExpensive)).into_state();
    let outcome = apply(&with_reason, Action::ConfirmCancellation);
    let completion = outcome.completion().expect("terminal outcome");
    assert_eq!(completion.terminal, Terminal::Cancelled);
    assert_eq!(completion.cancel_reason, Some(CancelReason::TooExpensive));
    assert_eq!(
        completion.cancel_reason.map(CancelReason::label),
        Some("Too expensive")
    );
    assert!(completion.job_answers.is_empty());
}

#[test]
fn still_looking_cancels_through_reason_capture() {
    let capture = walk([
        Action::StillLooking,
        Action::DeclineOffer,
        Action::AnswerRolesApplied(ActivityBand::Zero),
        Action::AnswerCompaniesEmailed(ActivityBand::Zero),
        Action::AnswerCompaniesInterviewed(InterviewBand::Zero),
        Action::SubmitFeedback,
    ]);
    assert_eq!(capture.step(), Step::ReasonCapture);

    assert!(matches!(
        transition(&capture, Action::ConfirmCancellation),
        Err(FlowError::IncompleteAnswers { .. })
    ));

    let capture = walk([
        Action::StillLooking,
        Action::DeclineOffer,
        Action::AnswerRolesApplied(ActivityBand::Zero),
        Action::AnswerCompaniesEmailed(ActivityBand::Zero),
        Action::AnswerCompaniesInterviewed(InterviewBand::Zero),
        Action::SubmitFeedback,
        Action::SelectCancelReason(CancelReason::NotManyRelevantJobs),
        Action::SetCancelReasonDetail("Nothing in my field".to_string()),
    ]);
    let completion = apply(&capture, Action::ConfirmCancellation)
        .completion()
        .cloned()
        .expect("terminal outcome");
    assert_eq!(completion.terminal, Terminal::Cancelled);
    assert_eq!(
        completion.cancel_reason_detail.as_deref(),
        Some("Nothing in my field")
    );
}

#[test]
fn found_job_with_service_gets_visa_support() {
    let visa = walk([
        Action::FoundJob,
        Action::AnswerFoundWithService(YesNo::Yes),
        Action::AnswerRolesApplied(ActivityBand::OneToFive),
        Action::AnswerCompaniesEmailed(ActivityBand::SixToTwenty),
        Action::AnswerCompaniesInterviewed(InterviewBand::ThreeToFive),
        Action::SubmitAnswers,
    ]);
    assert_eq!(visa.step(), Step::VisaOfferFoundWithService);

    let outcome = apply(&visa, Action::AcceptVisaHelp);
    let completion = outcome.completion().expect("terminal outcome");
    assert_eq!(completion.terminal, Terminal::CancelledWithVisaSupport);
    assert_eq!(completion.job_answers.found_with_service, Some(YesNo::Yes));
    assert!(completion.job_answers.is_complete());
    assert_eq!(completion.cancel_reason, None);
}

#[test]
fn found_job_elsewhere_declines_visa_help() {
    let visa = walk([
        Action::FoundJob,
        Action::AnswerFoundWithService(YesNo::No),
        Action::AnswerRolesApplied(ActivityBand::Zero),
        Action::AnswerCompaniesEmailed(ActivityBand::OverTwenty),
        Action::AnswerCompaniesInterviewed(InterviewBand::OverFive),
        Action::SubmitAnswers,
    ]);
    assert_eq!(visa.step(), Step::VisaOfferFoundElsewhere);

    let outcome = apply(&visa, Action::DeclineVisaHelp);
    assert_eq!(outcome.state().step(), Step::Cancelled);
    assert_eq!(
        outcome.completion().map(|c| c.terminal),
        Some(Terminal::Cancelled)
    );
}

#[test]
fn back_from_feedback_returns_to_offer() {
    let form = walk([Action::StillLooking, Action::DeclineOffer]);
    assert!(form.offer_declined());

    let offer = apply(&form, Action::Back).into_state();
    assert!(!offer.offer_declined());
    assert_eq!(offer.step(), Step::OfferOrQuestionnaire);
    assert_eq!(offer.screen(), Step::OfferOrQuestionnaire);
    assert_eq!(offer.path(), Path::StillLooking);
}

#[test]
fn changing_an_answer_reroutes_the_visa_offer() {
    let visa = walk([
        Action::FoundJob,
        Action::AnswerFoundWithService(YesNo::Yes),
        Action::AnswerRolesApplied(ActivityBand::Zero),
        Action::AnswerCompaniesEmailed(ActivityBand::Zero),
        Action::AnswerCompaniesInterviewed(InterviewBand::Zero),
        Action::SubmitAnswers,
    ]);
    let back = apply(&visa, Action::Back).into_state();
    let changed = apply(&back, Action::AnswerFoundWithService(YesNo::No)).into_state();
    let visa = apply(&changed, Action::SubmitAnswers).into_state();
    assert_eq!(visa.step(), Step::VisaOfferFoundElsewhere);
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let state = walk([Action::FoundJob]);
    let before = state.clone();
    assert!(transition(&state, Action::AcceptDiscount).is_err());
    assert!(transition(&state, Action::SubmitAnswers).is_err());
    assert_eq!(state, before);
}

#[test]
fn state_round_trips_through_json() {
    let state = walk([
        Action::StillLooking,
        Action::DeclineOffer,
        Action::SelectCancelReason(CancelReason::Other),
        Action::SetCancelReasonDetail("Going freelance".to_string()),
    ]);
    let json = serde_json::to_string(&state).unwrap();
    let restored: FlowState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.screen(), Step::DeclineFeedback);
}
