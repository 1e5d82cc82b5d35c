//! Drive a session from a script

use crate::script::Script;
use anyhow::Result;
use cancelflow_flow::{ActionKind, FlowState, Step};
use cancelflow_runtime::{Session, SessionStatus, Timeline};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Rejection {
    /// Zero-based position in the script
    pub index: usize,
    pub action: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub session_id: String,
    pub screen: Step,
    pub state: FlowState,
    pub status: SessionStatus,
    pub applied: usize,
    pub rejected: Vec<Rejection>,
    pub available_actions: Vec<ActionKind>,
    pub timeline: Timeline,
}

/// Run every action of `script` through a fresh session.
///
/// Rejected actions are collected and skipped; with `strict` the first one
/// aborts the replay with an error instead.
pub fn replay(script: &Script, strict: bool) -> Result<ReplayReport> {
    let mut session = Session::new();
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, action) in script.actions.iter().enumerate() {
        let label = action.to_string();
        match session.dispatch(action.clone()) {
            Ok(_) => applied += 1,
            Err(err) if strict => {
                anyhow::bail!("Action #{index} `{label}` rejected: {err}");
            }
            Err(err) => rejected.push(Rejection {
                index,
                action: label,
                error: err.to_string(),
            }),
        }
    }

    tracing::info!(
        session = %session.id(),
        applied,
        rejected = rejected.len(),
        status = session.status().as_str(),
        "Replay finished"
    );

    Ok(ReplayReport {
        session_id: session.id().to_string(),
        screen: session.state().screen(),
        available_actions: session.available_actions(),
        state: session.state().clone(),
        status: session.status().clone(),
        applied,
        rejected,
        timeline: session.timeline().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cancelflow_flow::{Action, CancelReason, Terminal};

    fn script(actions: Vec<Action>) -> Script {
        Script { actions }
    }

    #[test]
    fn test_replay_to_completion() {
        let report = replay(
            &script(vec![
                Action::StillLooking,
                Action::DeclineOffer,
                Action::SelectCancelReason(CancelReason::DecidedNotToMove),
                Action::ConfirmCancellation,
            ]),
            false,
        )
        .unwrap();

        assert_eq!(report.applied, 4);
        assert!(report.rejected.is_empty());
        assert_eq!(report.screen, Step::Cancelled);
        assert!(matches!(
            report.status,
            SessionStatus::Completed { ref completion }
                if completion.terminal == Terminal::Cancelled
        ));
        assert!(report.available_actions.is_empty());
    }

    #[test]
    fn test_lenient_replay_skips_rejections() {
        let report = replay(
            &script(vec![
                Action::StillLooking,
                Action::ConfirmCancellation,
                Action::AcceptDiscount,
            ]),
            false,
        )
        .unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(report.rejected[0].action, "confirm_cancellation");
        assert_eq!(report.screen, Step::DiscountAccepted);
    }

    #[test]
    fn test_strict_replay_stops() {
        let err = replay(&script(vec![Action::Back]), true).unwrap_err();
        assert!(err.to_string().starts_with("Action #0 `back` rejected"));
    }

    #[test]
    fn test_actions_after_close_are_rejected() {
        let report = replay(
            &script(vec![
                Action::StillLooking,
                Action::AcceptDiscount,
                Action::Back,
            ]),
            false,
        )
        .unwrap();
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].error.contains("is closed"));
    }
}
