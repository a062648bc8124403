//! Root reducer and store construction.

use crate::actions::AppAction;
use crate::config::DirectoryConfig;
use crate::counters::CountersReducer;
use crate::types::{AppState, User};
use crate::users::UsersReducer;
use slicestore_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use slicestore_core::{Reducer, Snapshot};
use slicestore_runtime::{Store, StoreConfig};

/// Name used for the directory store in logs and metrics
pub const STORE_NAME: &str = "directory";

/// The directory store
pub type AppStore = Store<AppReducer>;

/// Root reducer: the users and counters slices under fixed keys
///
/// Each slice reducer only ever sees its own slice, so a counter action
/// never produces a new users slice and vice versa. An action neither slice
/// handles returns the root snapshot itself.
pub struct AppReducer {
    slices: CombinedReducer<AppState, AppAction>,
}

impl AppReducer {
    /// Creates the root reducer
    #[must_use]
    pub fn new() -> Self {
        let slices = combine_reducers(vec![
            Box::new(scope_reducer(
                UsersReducer::new(),
                |state: &AppState| &state.users,
                |state: &AppState, users| AppState {
                    users,
                    counters: Snapshot::clone(&state.counters),
                },
            )),
            Box::new(scope_reducer(
                CountersReducer::new(),
                |state: &AppState| &state.counters,
                |state: &AppState, counters| AppState {
                    users: Snapshot::clone(&state.users),
                    counters,
                },
            )),
        ]);

        Self { slices }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer").finish_non_exhaustive()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(&self, state: &Snapshot<AppState>, action: &AppAction) -> Snapshot<AppState> {
        self.slices.reduce(state, action)
    }
}

/// Generates `count` synthetic users numbered from `offset`
///
/// User `k` has ID `user{k}`, name `User {k}` and description
/// `Description for User {k}`. Numbering stops at `usize::MAX`.
#[must_use]
pub fn seed_users(count: usize, offset: usize) -> Vec<User> {
    (offset..offset.saturating_add(count))
        .map(|k| {
            User::new(
                format!("user{k}"),
                format!("User {k}"),
                format!("Description for User {k}"),
            )
        })
        .collect()
}

/// Creates the directory store and loads the seed users into it
///
/// `UsersStored` is dispatched exactly once, before the store is returned.
#[must_use]
pub fn create_store(config: &DirectoryConfig) -> AppStore {
    let store = Store::with_config(AppReducer::new(), StoreConfig::default().with_name(STORE_NAME));

    let users = seed_users(config.seed_users, config.seed_offset);
    tracing::info!(
        users = users.len(),
        offset = config.seed_offset,
        "Seeding directory store"
    );
    store.dispatch(AppAction::store_users(users));

    store
}
