//! # Directory
//!
//! A user directory with named counters, built on the slicestore reducer
//! architecture.
//!
//! This application showcases:
//! - Independent state slices composed into one root reducer
//! - Snapshot identity: untouched slices are shared between snapshots
//! - A memoized, sorted users list
//! - A list/detail view model driven by selection actions
//!
//! ## Example
//!
//! ```
//! use directory::{create_store, AppAction, DirectoryConfig, SortDirection, UsersListModel, UsersView};
//!
//! let config = DirectoryConfig {
//!     seed_users: 3,
//!     ..DirectoryConfig::default()
//! };
//! let store = create_store(&config);
//!
//! store.dispatch(AppAction::increment("c1"));
//! assert_eq!(store.state(|s| s.counters.get("c1").map(|c| c.counter)), Some(1));
//!
//! let model = UsersListModel::new(SortDirection::Desc);
//! match model.view(&store.get_state()) {
//!     UsersView::List { users, .. } => assert_eq!(users[0].name, "User 13"),
//!     UsersView::Detail { .. } => unreachable!(),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod counters;
pub mod selectors;
pub mod store;
pub mod types;
pub mod users;
pub mod view;

pub use actions::AppAction;
pub use config::{ConfigError, DirectoryConfig};
pub use counters::CountersReducer;
pub use selectors::{
    select_counter, select_selected_user, select_sorted_users, select_user, sort_users,
    SortedUsersSelector,
};
pub use store::{create_store, seed_users, AppReducer, AppStore};
pub use types::{
    AppState, CounterId, CounterState, CountersState, SortDirection, User, UserId, UsersState,
};
pub use users::UsersReducer;
pub use view::{UsersListModel, UsersView};
