//! List/detail view model for the users screen.
//!
//! The sort direction is local to the view and never enters the store.

use crate::actions::AppAction;
use crate::selectors::{select_selected_user, SortedUsersSelector};
use crate::types::{AppState, SortDirection, User, UserId};
use std::sync::Arc;

/// What the users screen shows for a given snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsersView {
    /// No user is selected: the sorted list
    List {
        /// Current order
        direction: SortDirection,
        /// Users in that order
        users: Arc<Vec<User>>,
    },
    /// A user is selected
    Detail {
        /// The selected ID
        user_id: UserId,
        /// The selected user, or `None` if the ID names no loaded user
        user: Option<User>,
    },
}

/// View model behind the users screen
#[derive(Debug, Default)]
pub struct UsersListModel {
    direction: SortDirection,
    sorted: SortedUsersSelector,
}

impl UsersListModel {
    /// Creates a model that starts sorted in `direction`
    #[must_use]
    pub fn new(direction: SortDirection) -> Self {
        Self {
            direction,
            sorted: SortedUsersSelector::new(),
        }
    }

    /// Current sort direction
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Changes the sort direction
    pub fn set_sort(&mut self, direction: SortDirection) {
        tracing::debug!(from = %self.direction, to = %direction, "Users sort changed");
        self.direction = direction;
    }

    /// Builds the view for `state`
    #[must_use]
    pub fn view(&self, state: &AppState) -> UsersView {
        match &state.users.selected_user_id {
            Some(user_id) => UsersView::Detail {
                user_id: user_id.clone(),
                user: select_selected_user(state).cloned(),
            },
            None => UsersView::List {
                direction: self.direction,
                users: self.sorted.select(state, self.direction),
            },
        }
    }

    /// Action to dispatch when a list row is clicked
    #[must_use]
    pub fn on_user_clicked(&self, user_id: impl Into<UserId>) -> AppAction {
        AppAction::select_user(user_id)
    }

    /// Action to dispatch when the detail view is closed
    #[must_use]
    pub const fn on_back(&self) -> AppAction {
        AppAction::back()
    }
}
