//! Cancelflow Flow - The cancellation dialog state machine
//!
//! This crate defines the **structural** aspects of the dialog:
//! - `FlowState`: the step plus everything answered so far
//! - `transition`: the rule table, the only way a state changes
//! - Guards: pure predicates gating each "Continue"
//! - `Outcome`: control flow of a dispatch, as data
//! - `Schematic`: the static graph extracted from the rules
//!
//! **IMPORTANT**: This layer is Pure Rust - no IO, no Async, no logging.

pub mod action;
pub mod answers;
pub mod error;
pub mod guard;
pub mod outcome;
pub mod schematic;
pub mod state;
pub mod transition;

pub use action::{Action, ActionKind};
pub use answers::{
    ActivityBand, CancelReason, InterviewBand, JobAnswers, ParseOptionError, SearchAnswers, YesNo,
};
pub use error::{FlowError, FlowResult};
pub use guard::{
    can_confirm_cancellation, can_continue_decline_feedback, can_continue_job_questionnaire, Guard,
};
pub use outcome::{Completion, Outcome, Terminal};
pub use schematic::{reachable_states, schematic, Schematic};
pub use state::{init_flow, FlowState, Path, StateError, Step};
pub use transition::{available_actions, permits, transition};
