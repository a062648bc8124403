//! # Slicestore Core
//!
//! Core traits and types for a reducer-style state container.
//!
//! ## Core Concepts
//!
//! - **State**: An immutable snapshot of application data, shared as [`Snapshot<S>`]
//! - **Action**: A tagged value describing a requested state change
//! - **Reducer**: Pure function `(Snapshot, Action) → Snapshot`
//! - **Selector**: Pure read-only derivation over a snapshot, optionally memoized
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow
//! - Snapshots are replaced wholesale, never edited in place
//! - A reducer that has nothing to do returns the snapshot it was given, so
//!   consumers can detect "nothing changed" with [`Arc::ptr_eq`]
//!
//! ## Example
//!
//! ```
//! use slicestore_core::{Action, Reducer, Snapshot};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Noop,
//! }
//!
//! impl Action for CounterAction {
//!     fn name(&self) -> &'static str {
//!         match self {
//!             Self::Increment => "increment",
//!             Self::Noop => "noop",
//!         }
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!
//!     fn reduce(&self, state: &Snapshot<CounterState>, action: &CounterAction) -> Snapshot<CounterState> {
//!         match action {
//!             CounterAction::Increment => Arc::new(CounterState { count: state.count + 1 }),
//!             CounterAction::Noop => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let initial = CounterReducer.initial_state();
//! let next = CounterReducer.reduce(&initial, &CounterAction::Increment);
//! assert_eq!(next.count, 1);
//! assert!(Arc::ptr_eq(&next, &CounterReducer.reduce(&next, &CounterAction::Noop)));
//! ```

use std::sync::Arc;

/// Reducer composition utilities
pub mod composition;

/// Memoized selectors
pub mod selector;

/// An immutable state value at a point in time.
///
/// Snapshots are reference counted so that unchanged slices can be shared
/// between consecutive snapshots and compared by identity.
pub type Snapshot<S> = Arc<S>;

/// Action module - tagged inputs to reducers
pub mod action {
    /// A tagged record describing a state change request.
    ///
    /// The tag is used for logging and metrics labels. Action enums usually
    /// derive this with `slicestore_macros::Action`.
    pub trait Action {
        /// The event tag of this action (e.g. `"increment"`)
        fn name(&self) -> &'static str;
    }
}

/// Reducer module - the core trait for state transitions
///
/// Reducers are pure functions: `(Snapshot, Action) → Snapshot`.
/// They are deterministic, total over their inputs, and never fail.
pub mod reducer {
    use super::Snapshot;
    use std::sync::Arc;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer owns. `Default` is its initial value.
    /// - `Action`: The action type this reducer processes
    ///
    /// # Identity
    ///
    /// An action the reducer does not handle must return the input snapshot
    /// itself (`Arc::clone(state)`), not a structurally equal copy.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State: Default;

        /// The action type this reducer processes
        type Action;

        /// Compute the next snapshot for `action`
        ///
        /// This is a pure function: it never mutates `state` and has no side
        /// effects. Parts of `state` that do not change should be shared with
        /// the returned snapshot.
        fn reduce(
            &self,
            state: &Snapshot<Self::State>,
            action: &Self::Action,
        ) -> Snapshot<Self::State>;

        /// The snapshot this reducer starts from
        fn initial_state(&self) -> Snapshot<Self::State> {
            Arc::new(Self::State::default())
        }

        /// Reduce from an optional snapshot
        ///
        /// A missing snapshot is replaced by [`Reducer::initial_state`] before
        /// the action is applied.
        fn reduce_or_init(
            &self,
            state: Option<&Snapshot<Self::State>>,
            action: &Self::Action,
        ) -> Snapshot<Self::State> {
            match state {
                Some(state) => self.reduce(state, action),
                None => self.reduce(&self.initial_state(), action),
            }
        }
    }
}

pub use action::Action;
pub use reducer::Reducer;
pub use selector::{ArcKey, Memoized};
