//! Reducer for the users slice.

use crate::actions::AppAction;
use crate::types::{User, UserId, UsersState};
use slicestore_core::{Reducer, Snapshot};
use std::collections::HashMap;
use std::sync::Arc;

/// Reducer for [`UsersState`]
///
/// - `UsersStored` rebuilds `entities` and `ids` from the payload; on
///   duplicate IDs the last user wins in `entities`, while `ids` keeps the
///   payload order as given. The selection is left alone.
/// - `UserSelected` sets the selection without checking that the user exists.
/// - `UserRemoveSelected` clears the selection.
/// - Counter actions return the slice unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsersReducer;

impl UsersReducer {
    /// Creates a new `UsersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn stored(state: &UsersState, users: &[User]) -> UsersState {
        let entities: HashMap<UserId, User> = users
            .iter()
            .map(|user| (user.id.clone(), user.clone()))
            .collect();
        let ids: Vec<UserId> = users.iter().map(|user| user.id.clone()).collect();

        UsersState {
            entities: Arc::new(entities),
            ids: Arc::new(ids),
            selected_user_id: state.selected_user_id.clone(),
        }
    }
}

impl Reducer for UsersReducer {
    type State = UsersState;
    type Action = AppAction;

    fn reduce(&self, state: &Snapshot<UsersState>, action: &AppAction) -> Snapshot<UsersState> {
        match action {
            AppAction::UsersStored { users } => Arc::new(Self::stored(state, users)),
            AppAction::UserSelected { user_id } => Arc::new(UsersState {
                selected_user_id: Some(user_id.clone()),
                ..UsersState::clone(state)
            }),
            AppAction::UserRemoveSelected => Arc::new(UsersState {
                selected_user_id: None,
                ..UsersState::clone(state)
            }),
            AppAction::Increment { .. } | AppAction::Decrement { .. } => Arc::clone(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicestore_testing::ReducerTest;

    fn bob_and_amy() -> Vec<User> {
        vec![
            User::new("u1", "Bob", "Builder"),
            User::new("u2", "Amy", "Architect"),
        ]
    }

    fn loaded() -> Snapshot<UsersState> {
        UsersReducer.reduce(
            &UsersReducer.initial_state(),
            &AppAction::store_users(bob_and_amy()),
        )
    }

    #[test]
    fn test_users_stored() {
        ReducerTest::new(UsersReducer::new())
            .when_action(AppAction::store_users(bob_and_amy()))
            .then_state(|state| {
                assert_eq!(*state.ids, vec![UserId::from("u1"), UserId::from("u2")]);
                assert_eq!(state.get("u2").map(|u| u.name.as_str()), Some("Amy"));
                assert_eq!(state.selected_user_id, None);
            })
            .then_changed()
            .run();
    }

    #[test]
    fn test_users_stored_last_write_wins() {
        let users = vec![
            User::new("u1", "Bob", "first"),
            User::new("u1", "Robert", "second"),
        ];

        ReducerTest::new(UsersReducer)
            .when_action(AppAction::store_users(users))
            .then_state(|state| {
                assert_eq!(state.entities.len(), 1);
                assert_eq!(state.get("u1").map(|u| u.name.as_str()), Some("Robert"));
                assert_eq!(state.ids.len(), 2);
            })
            .run();
    }

    #[test]
    fn test_users_stored_keeps_selection() {
        let selected = UsersReducer.reduce(&loaded(), &AppAction::select_user("u2"));

        let reloaded = UsersReducer.reduce(&selected, &AppAction::store_users(Vec::new()));

        assert_eq!(reloaded.selected_user_id, Some(UserId::from("u2")));
        assert!(reloaded.entities.is_empty());
        assert_eq!(reloaded.get("u2"), None);
    }

    #[test]
    fn test_selection_lifecycle() {
        let state = loaded();

        let selected = UsersReducer.reduce(&state, &AppAction::select_user("u2"));
        assert_eq!(selected.selected_user_id, Some(UserId::from("u2")));
        assert!(Arc::ptr_eq(&state.entities, &selected.entities));
        assert!(Arc::ptr_eq(&state.ids, &selected.ids));

        let cleared = UsersReducer.reduce(&selected, &AppAction::back());
        assert_eq!(cleared.selected_user_id, None);
    }

    #[test]
    fn test_select_unknown_user_is_accepted() {
        ReducerTest::new(UsersReducer)
            .given_snapshot(loaded())
            .when_action(AppAction::select_user("nobody"))
            .then_state(|state| {
                assert_eq!(state.selected_user_id, Some(UserId::from("nobody")));
                assert_eq!(state.get("nobody"), None);
            })
            .run();
    }

    #[test]
    fn test_counter_actions_are_noops() {
        ReducerTest::new(UsersReducer)
            .given_snapshot(loaded())
            .when_action(AppAction::increment("c1"))
            .when_action(AppAction::decrement("c1"))
            .then_unchanged()
            .run();
    }
}
