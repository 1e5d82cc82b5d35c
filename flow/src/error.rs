//! FlowError - Why a dispatch was refused

use crate::action::ActionKind;
use crate::guard::Guard;
use crate::state::Step;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected dispatch. Rejections never change the state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum FlowError {
    /// The action is not defined for the current screen and path.
    #[error("action `{action}` is not available on `{screen}`")]
    InvalidAction { screen: Step, action: ActionKind },

    /// The screen's guard predicate does not hold yet.
    #[error("cannot `{action}` on `{screen}`: {guard} is not satisfied")]
    IncompleteAnswers {
        screen: Step,
        action: ActionKind,
        guard: Guard,
    },
}

impl FlowError {
    pub fn action(&self) -> ActionKind {
        match self {
            FlowError::InvalidAction { action, .. }
            | FlowError::IncompleteAnswers { action, .. } => *action,
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
