//! Run state markers.
//!
//! The order is fixed: Start -> PlanSelected -> Deploying(..)* -> WiringOwnership? ->
//! RegisteringTokenIds? -> Done. Any failure moves straight to Failed.

use serde::{Deserialize, Serialize};

use crate::contracts::ContractKind;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum RunState {
    Start,
    PlanSelected,
    #[strum(to_string = "deploying-{0}")]
    Deploying(ContractKind),
    WiringOwnership,
    RegisteringTokenIds,
    Done,
    Failed,
}

impl RunState {
    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;

        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Start, PlanSelected) => true,
            (PlanSelected | Deploying(_), Deploying(_)) => true,
            (Deploying(_), WiringOwnership | RegisteringTokenIds | Done) => true,
            (WiringOwnership, RegisteringTokenIds | Done) => true,
            (RegisteringTokenIds, Done) => true,
            _ => false,
        }
    }
}
