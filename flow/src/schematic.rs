//! Schematic - The static view of the dialog
//!
//! The schematic is extracted from the rule table itself: every state
//! reachable from [`init_flow`] is explored with every catalogued action, and
//! each accepted action that changes screen becomes an edge. It is used for
//! documentation and visualization; the engine never reads it.

use crate::action::{Action, ActionKind};
use crate::outcome::Outcome;
use crate::state::{init_flow, FlowState, Step};
use crate::transition::transition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Synthetic node for "the caller closed the dialog without a terminal step".
pub const CLOSED_NODE: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Where every flow starts
    Ingress,
    /// A screen awaiting input
    Screen,
    /// A final outcome
    Terminal,
    /// Dialog closed by the caller
    Egress,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub action: ActionKind,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKind {
    Forward,
    Back,
    Abort,
}

/// Every state reachable from the initial state under the action catalog.
pub fn reachable_states() -> HashSet<FlowState> {
    let start = init_flow();
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start]);
    let catalog = Action::catalog();

    while let Some(state) = queue.pop_front() {
        for action in &catalog {
            if let Ok(outcome) = transition(&state, action.clone()) {
                let next = outcome.into_state();
                if seen.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Build the schematic of the dialog.
pub fn schematic() -> Schematic {
    let states = reachable_states();
    let catalog = Action::catalog();
    let mut screens = BTreeSet::new();
    let mut edges = BTreeSet::new();

    for state in &states {
        let from = state.screen();
        screens.insert(step_order(from));
        for action in &catalog {
            let Ok(outcome) = transition(state, action.clone()) else {
                continue;
            };
            let kind = action.kind();
            let edge = match &outcome {
                Outcome::Abort { .. } => Edge {
                    from: from.to_string(),
                    to: CLOSED_NODE.to_string(),
                    action: kind,
                    kind: EdgeKind::Abort,
                },
                _ => {
                    let to = outcome.state().screen();
                    if to == from {
                        continue;
                    }
                    Edge {
                        from: from.to_string(),
                        to: to.to_string(),
                        action: kind,
                        kind: if kind == ActionKind::Back {
                            EdgeKind::Back
                        } else {
                            EdgeKind::Forward
                        },
                    }
                }
            };
            edges.insert(edge);
        }
    }

    let mut nodes: Vec<Node> = screens
        .into_iter()
        .map(|idx| {
            let step = Step::ALL[idx];
            let kind = if step == Step::Intro {
                NodeKind::Ingress
            } else if step.is_terminal() {
                NodeKind::Terminal
            } else {
                NodeKind::Screen
            };
            Node {
                id: step.to_string(),
                kind,
            }
        })
        .collect();
    if edges.iter().any(|e| e.kind == EdgeKind::Abort) {
        nodes.push(Node {
            id: CLOSED_NODE.to_string(),
            kind: NodeKind::Egress,
        });
    }

    Schematic {
        name: "cancellation".to_string(),
        nodes,
        edges: edges.into_iter().collect(),
    }
}

fn step_order(step: Step) -> usize {
    Step::ALL.iter().position(|s| *s == step).unwrap_or_default()
}
