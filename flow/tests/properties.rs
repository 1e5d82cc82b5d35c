//! Invariants checked over the whole reachable state space.

use cancelflow_flow::{
    available_actions, can_confirm_cancellation, can_continue_decline_feedback,
    can_continue_job_questionnaire, reachable_states, transition, Action, ActionKind, FlowError,
    FlowState, Path, Step,
};

fn successors(state: &FlowState) -> Vec<(Action, FlowState)> {
    Action::catalog()
        .into_iter()
        .filter_map(|action| {
            transition(state, action.clone())
                .ok()
                .map(|outcome| (action, outcome.into_state()))
        })
        .collect()
}

#[test]
fn path_never_changes_once_set() {
    for state in reachable_states() {
        if state.path() == Path::Unset {
            continue;
        }
        for (action, next) in successors(&state) {
            assert_eq!(next.path(), state.path(), "{action} changed the path");
        }
    }
}

#[test]
fn answers_stay_on_their_path() {
    for state in reachable_states() {
        match state.path() {
            Path::Unset => {
                assert!(state.job_answers().is_empty());
                assert!(state.search_answers().is_empty());
                assert_eq!(state.cancel_reason(), None);
            }
            Path::StillLooking => assert!(state.job_answers().is_empty()),
            Path::FoundJob => {
                assert!(state.search_answers().is_empty());
                assert_eq!(state.cancel_reason(), None);
                assert!(state.cancel_reason_detail().is_empty());
            }
        }
    }
}

#[test]
fn steps_are_reachable_only_on_their_path() {
    for state in reachable_states() {
        match state.screen() {
            Step::DeclineFeedback | Step::ReasonCapture | Step::DiscountAccepted => {
                assert_eq!(state.path(), Path::StillLooking)
            }
            Step::VisaOfferFoundWithService
            | Step::VisaOfferFoundElsewhere
            | Step::CancelledWithVisaSupport => assert_eq!(state.path(), Path::FoundJob),
            Step::Intro => {}
            Step::OfferOrQuestionnaire | Step::Cancelled => {
                assert_ne!(state.path(), Path::Unset)
            }
        }
    }
}

#[test]
fn every_step_is_reachable() {
    let screens: Vec<Step> = reachable_states().iter().map(FlowState::screen).collect();
    for step in Step::ALL {
        assert!(screens.contains(step), "{step} is unreachable");
    }
}

#[test]
fn terminal_states_are_final() {
    for state in reachable_states().into_iter().filter(FlowState::is_terminal) {
        assert!(successors(&state).is_empty());
    }
}

#[test]
fn guards_are_monotonic_under_answers() {
    let guards: [fn(&FlowState) -> bool; 3] = [
        can_continue_job_questionnaire,
        can_continue_decline_feedback,
        can_confirm_cancellation,
    ];
    for state in reachable_states() {
        for (action, next) in successors(&state) {
            if !action.kind().is_answer() {
                continue;
            }
            for guard in guards {
                if guard(&state) {
                    assert!(guard(&next), "{action} broke a satisfied guard");
                }
            }
        }
    }
}

#[test]
fn back_never_overshoots() {
    for state in reachable_states() {
        let Ok(outcome) = transition(&state, Action::Back) else {
            continue;
        };
        let prior = outcome.into_state();
        let expected = match state.screen() {
            Step::OfferOrQuestionnaire => Step::Intro,
            Step::DeclineFeedback => Step::OfferOrQuestionnaire,
            Step::ReasonCapture => Step::DeclineFeedback,
            Step::VisaOfferFoundWithService | Step::VisaOfferFoundElsewhere => {
                Step::OfferOrQuestionnaire
            }
            other => panic!("back accepted on {other}"),
        };
        assert_eq!(prior.screen(), expected);
    }
}

#[test]
fn back_is_rejected_at_the_edges() {
    for state in reachable_states() {
        if state.screen() == Step::Intro || state.is_terminal() {
            assert_eq!(
                transition(&state, Action::Back).unwrap_err(),
                FlowError::InvalidAction {
                    screen: state.screen(),
                    action: ActionKind::Back,
                }
            );
        }
    }
}

#[test]
fn available_actions_agree_with_transition() {
    for state in reachable_states() {
        let kinds = available_actions(&state);
        for action in Action::catalog() {
            if transition(&state, action.clone()).is_ok() {
                assert!(kinds.contains(&action.kind()));
            }
        }
    }
}

#[test]
fn reachable_states_validate_and_round_trip() {
    for state in reachable_states() {
        assert_eq!(state.validate(), Ok(()), "{state:?}");
        let json = serde_json::to_string(&state).unwrap();
        let restored: FlowState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}

#[test]
fn kept_subscriptions_carry_no_cancel_reason() {
    for state in reachable_states() {
        let Ok(outcome) = transition(&state, Action::AcceptDiscount) else {
            continue;
        };
        let completion = outcome.completion().expect("discount ends the flow");
        assert_eq!(completion.cancel_reason, None);
        assert_eq!(completion.cancel_reason_detail, None);
        assert!(completion.search_answers.is_empty());
    }
}
