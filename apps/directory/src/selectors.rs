//! Selectors over [`AppState`].
//!
//! Plain lookups borrow from the snapshot. The sorted users list is the one
//! expensive derivation and is memoized on the identity of `entities` and
//! `ids`, so selecting, deselecting and counter changes all hit the cache.

use crate::types::{AppState, CounterState, SortDirection, User, UserId, UsersState};
use slicestore_core::{ArcKey, Memoized};
use std::collections::HashMap;
use std::sync::Arc;

/// Returns a counter, or `None` if it has never been incremented or decremented
#[must_use]
pub fn select_counter<'a>(state: &'a AppState, counter_id: &str) -> Option<&'a CounterState> {
    state.counters.get(counter_id)
}

/// Returns a user by ID
#[must_use]
pub fn select_user<'a>(state: &'a AppState, user_id: &str) -> Option<&'a User> {
    state.users.get(user_id)
}

/// Returns the selected user
///
/// `None` when nothing is selected, and also when the selected ID does not
/// name a loaded user.
#[must_use]
pub fn select_selected_user(state: &AppState) -> Option<&User> {
    let users: &UsersState = &state.users;
    users
        .selected_user_id
        .as_ref()
        .and_then(|id| users.get(id.as_str()))
}

/// Sorts users by name
///
/// Walks `ids` in order, skipping IDs with no entity, then stable-sorts by
/// name. Users with equal names keep their `ids` order in both directions.
#[must_use]
pub fn sort_users(
    entities: &HashMap<UserId, User>,
    ids: &[UserId],
    direction: SortDirection,
) -> Vec<User> {
    let mut users: Vec<User> = ids
        .iter()
        .filter_map(|id| entities.get(id))
        .cloned()
        .collect();

    match direction {
        SortDirection::Asc => users.sort_by(|a, b| a.name.cmp(&b.name)),
        SortDirection::Desc => users.sort_by(|a, b| b.name.cmp(&a.name)),
    }

    users
}

#[derive(Debug, PartialEq)]
struct SortedUsersKey {
    entities: ArcKey<HashMap<UserId, User>>,
    ids: ArcKey<Vec<UserId>>,
    direction: SortDirection,
}

/// Memoized users list sorted by name
///
/// Recomputes only when `entities`, `ids` or the direction differ from the
/// previous call. Only the last result is kept.
#[derive(Debug, Default)]
pub struct SortedUsersSelector {
    memo: Memoized<SortedUsersKey, Vec<User>>,
}

impl SortedUsersSelector {
    /// Creates a selector with an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the users of `state` sorted in `direction`
    pub fn select(&self, state: &AppState, direction: SortDirection) -> Arc<Vec<User>> {
        let key = SortedUsersKey {
            entities: ArcKey::new(&state.users.entities),
            ids: ArcKey::new(&state.users.ids),
            direction,
        };

        self.memo.get_or_compute(key, |key| {
            tracing::debug!(
                users = key.ids.get().len(),
                direction = %key.direction,
                "Sorting users"
            );
            sort_users(key.entities.get(), key.ids.get(), key.direction)
        })
    }

    /// Whether a sorted list is currently cached
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.memo.is_cached()
    }
}

/// Returns the users of `state` sorted in `direction` through `selector`
pub fn select_sorted_users(
    selector: &SortedUsersSelector,
    state: &AppState,
    direction: SortDirection,
) -> Arc<Vec<User>> {
    selector.select(state, direction)
}
