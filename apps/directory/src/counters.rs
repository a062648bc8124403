//! Reducer for the counters slice.

use crate::actions::AppAction;
use crate::types::CountersState;
use slicestore_core::{Reducer, Snapshot};
use std::sync::Arc;

/// Reducer for [`CountersState`]
///
/// Counters are created at zero the first time they are named. There is no
/// floor: decrementing below zero is allowed.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountersReducer;

impl CountersReducer {
    /// Creates a new `CountersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CountersReducer {
    type State = CountersState;
    type Action = AppAction;

    fn reduce(&self, state: &Snapshot<CountersState>, action: &AppAction) -> Snapshot<CountersState> {
        match action {
            AppAction::Increment { counter_id } => Arc::new(state.with_delta(counter_id, 1)),
            AppAction::Decrement { counter_id } => Arc::new(state.with_delta(counter_id, -1)),
            AppAction::UserSelected { .. }
            | AppAction::UserRemoveSelected
            | AppAction::UsersStored { .. } => Arc::clone(state),
        }
    }
}
