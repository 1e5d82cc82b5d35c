//! Cancelflow Runtime - Sessions around the pure flow engine
//!
//! A [`Session`] is one open dialog: it owns the state, logs every dispatch
//! through `tracing`, and keeps a [`Timeline`] the caller can inspect or
//! export once the dialog closes.

pub mod session;
pub mod timeline;

pub mod prelude {
    pub use crate::session::{Session, SessionError, SessionStatus};
    pub use crate::timeline::{Timeline, TimelineEvent};
    pub use cancelflow_flow::{Action, ActionKind, Completion, FlowState, Outcome, Step, Terminal};
}

pub use session::{Session, SessionError, SessionStatus};
pub use timeline::{Timeline, TimelineEvent};
