//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run several reducers over the same state, one after another
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! Both preserve snapshot identity: when none of the composed reducers
//! changes anything, the input snapshot is returned as-is.
//!
//! # Examples
//!
//! ```
//! use slicestore_core::composition::{combine_reducers, scope_reducer};
//! use slicestore_core::{Reducer, Snapshot};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Default)]
//! struct ClicksState {
//!     clicks: u32,
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct PageState {
//!     clicks: Snapshot<ClicksState>,
//!     title: Snapshot<String>,
//! }
//!
//! enum PageAction {
//!     Click,
//!     Rename(String),
//! }
//!
//! struct ClicksReducer;
//!
//! impl Reducer for ClicksReducer {
//!     type State = ClicksState;
//!     type Action = PageAction;
//!
//!     fn reduce(&self, state: &Snapshot<ClicksState>, action: &PageAction) -> Snapshot<ClicksState> {
//!         match action {
//!             PageAction::Click => Arc::new(ClicksState { clicks: state.clicks + 1 }),
//!             PageAction::Rename(_) => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! struct TitleReducer;
//!
//! impl Reducer for TitleReducer {
//!     type State = String;
//!     type Action = PageAction;
//!
//!     fn reduce(&self, state: &Snapshot<String>, action: &PageAction) -> Snapshot<String> {
//!         match action {
//!             PageAction::Rename(title) => Arc::new(title.clone()),
//!             PageAction::Click => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let page = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         ClicksReducer,
//!         |page: &PageState| &page.clicks,
//!         |page: &PageState, clicks| PageState { clicks, ..page.clone() },
//!     )),
//!     Box::new(scope_reducer(
//!         TitleReducer,
//!         |page: &PageState| &page.title,
//!         |page: &PageState, title| PageState { title, ..page.clone() },
//!     )),
//! ]);
//!
//! let state = page.initial_state();
//! let state = page.reduce(&state, &PageAction::Click);
//! let renamed = page.reduce(&state, &PageAction::Rename("Home".to_string()));
//! assert_eq!(renamed.clicks.clicks, 1);
//! assert_eq!(*renamed.title, "Home");
//! assert!(Arc::ptr_eq(&state.clicks, &renamed.clicks));
//! ```

use crate::reducer::Reducer;
use crate::Snapshot;
use std::marker::PhantomData;
use std::sync::Arc;

/// A boxed reducer over state `S` and action `A`
pub type BoxedReducer<S, A> = Box<dyn Reducer<State = S, Action = A> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer receives the snapshot produced by the previous one. This is
/// how independent slice reducers (each wrapped by [`scope_reducer`]) are
/// assembled into a root reducer.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
#[must_use]
pub fn combine_reducers<S, A>(reducers: Vec<BoxedReducer<S, A>>) -> CombinedReducer<S, A>
where
    S: Default + 'static,
    A: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A>
where
    S: Default + 'static,
    A: 'static,
{
    reducers: Vec<BoxedReducer<S, A>>,
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Default + 'static,
    A: 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &Snapshot<S>, action: &A) -> Snapshot<S> {
        self.reducers
            .iter()
            .fold(Arc::clone(state), |current, reducer| reducer.reduce(&current, action))
    }
}

/// Scopes a reducer to operate on one slice of a larger state.
///
/// - `get` borrows the slice out of the parent state
/// - `set` builds a new parent state that holds the given slice and shares
///   every other slice with the old parent
///
/// If the child reducer returns the same slice snapshot it was given, `set`
/// is not called and the parent snapshot is returned unchanged.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `R`: The child reducer, whose state is the slice
pub fn scope_reducer<S, R>(
    reducer: R,
    get: fn(&S) -> &Snapshot<R::State>,
    set: fn(&S, Snapshot<R::State>) -> S,
) -> ScopedReducer<S, R>
where
    S: Default + 'static,
    R: Reducer,
{
    ScopedReducer {
        reducer,
        get,
        set,
        _phantom: PhantomData,
    }
}

/// A scoped reducer that operates on one slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    S: Default + 'static,
    R: Reducer,
{
    reducer: R,
    get: fn(&S) -> &Snapshot<R::State>,
    set: fn(&S, Snapshot<R::State>) -> S,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    S: Default + 'static,
    R: Reducer,
{
    type State = S;
    type Action = R::Action;

    fn reduce(&self, state: &Snapshot<S>, action: &R::Action) -> Snapshot<S> {
        let slice = (self.get)(state);
        let next = self.reducer.reduce(slice, action);

        if Arc::ptr_eq(slice, &next) {
            Arc::clone(state)
        } else {
            Arc::new((self.set)(state, next))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct TestState {
        counter: Snapshot<i32>,
        name: Snapshot<String>,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
        Nothing,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = i32;
        type Action = TestAction;

        fn reduce(&self, state: &Snapshot<i32>, action: &TestAction) -> Snapshot<i32> {
            match action {
                TestAction::Increment => Arc::new(**state + 1),
                TestAction::Decrement => Arc::new(**state - 1),
                TestAction::SetName(_) | TestAction::Nothing => Arc::clone(state),
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = String;
        type Action = TestAction;

        fn reduce(&self, state: &Snapshot<String>, action: &TestAction) -> Snapshot<String> {
            if let TestAction::SetName(name) = action {
                Arc::new(name.clone())
            } else {
                Arc::clone(state)
            }
        }
    }

    fn test_reducer() -> CombinedReducer<TestState, TestAction> {
        combine_reducers(vec![
            Box::new(scope_reducer(
                CounterReducer,
                |s: &TestState| &s.counter,
                |s: &TestState, counter| TestState {
                    counter,
                    ..s.clone()
                },
            )),
            Box::new(scope_reducer(
                NameReducer,
                |s: &TestState| &s.name,
                |s: &TestState, name| TestState {
                    name,
                    ..s.clone()
                },
            )),
        ])
    }

    #[test]
    fn test_combine_reducers() {
        let combined = test_reducer();
        let state = combined.initial_state();

        let state = combined.reduce(&state, &TestAction::Increment);
        assert_eq!(*state.counter, 1);

        let state = combined.reduce(&state, &TestAction::SetName("Alice".to_string()));
        assert_eq!(*state.name, "Alice");

        let state = combined.reduce(&state, &TestAction::Decrement);
        assert_eq!(*state.counter, 0);
        assert_eq!(*state.name, "Alice");
    }

    #[test]
    fn test_noop_returns_same_root() {
        let combined = test_reducer();
        let state = combined.reduce(&combined.initial_state(), &TestAction::Increment);

        let next = combined.reduce(&state, &TestAction::Nothing);

        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_scope_shares_untouched_slice() {
        let combined = test_reducer();
        let state = combined.reduce(
            &combined.initial_state(),
            &TestAction::SetName("Bob".to_string()),
        );

        let next = combined.reduce(&state, &TestAction::Increment);

        assert!(!Arc::ptr_eq(&state, &next));
        assert!(Arc::ptr_eq(&state.name, &next.name));
        assert!(!Arc::ptr_eq(&state.counter, &next.counter));
    }

    #[test]
    fn test_empty_combination_is_identity() {
        let combined: CombinedReducer<TestState, TestAction> = combine_reducers(Vec::new());

        let state = combined.initial_state();
        assert!(Arc::ptr_eq(&state, &combined.reduce(&state, &TestAction::Increment)));
    }
}
