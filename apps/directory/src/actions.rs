//! Actions accepted by the directory store.
//!
//! Actions serialize in the tagged form used by browser front-ends:
//!
//! ```json
//! { "type": "increment", "payload": { "counterId": "c1" } }
//! { "type": "userRemoveSelected" }
//! ```

use crate::types::{CounterId, User, UserId};
use serde::{Deserialize, Serialize};
use slicestore_macros::Action;

/// Every event the directory store understands
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum AppAction {
    /// Add one to a counter, creating it at zero first if needed
    #[serde(rename_all = "camelCase")]
    Increment {
        /// Counter to change
        counter_id: CounterId,
    },

    /// Subtract one from a counter, creating it at zero first if needed
    #[serde(rename_all = "camelCase")]
    Decrement {
        /// Counter to change
        counter_id: CounterId,
    },

    /// Show a user in the detail view
    #[serde(rename_all = "camelCase")]
    UserSelected {
        /// User to show; not required to exist
        user_id: UserId,
    },

    /// Leave the detail view
    UserRemoveSelected,

    /// Replace the loaded users
    UsersStored {
        /// Users in load order
        users: Vec<User>,
    },
}

impl AppAction {
    /// `Increment` for the given counter
    #[must_use]
    pub fn increment(counter_id: impl Into<CounterId>) -> Self {
        Self::Increment {
            counter_id: counter_id.into(),
        }
    }

    /// `Decrement` for the given counter
    #[must_use]
    pub fn decrement(counter_id: impl Into<CounterId>) -> Self {
        Self::Decrement {
            counter_id: counter_id.into(),
        }
    }

    /// `UserSelected` for the given user
    #[must_use]
    pub fn select_user(user_id: impl Into<UserId>) -> Self {
        Self::UserSelected {
            user_id: user_id.into(),
        }
    }

    /// `UserRemoveSelected`
    #[must_use]
    pub const fn back() -> Self {
        Self::UserRemoveSelected
    }

    /// `UsersStored` with the given users
    #[must_use]
    pub const fn store_users(users: Vec<User>) -> Self {
        Self::UsersStored { users }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicestore_core::Action as _;

    #[test]
    fn test_names_match_tags() -> Result<(), serde_json::Error> {
        let actions = vec![
            AppAction::increment("c1"),
            AppAction::decrement("c1"),
            AppAction::select_user("u1"),
            AppAction::back(),
            AppAction::store_users(vec![User::new("u1", "Bob", "Builder")]),
        ];

        for action in actions {
            let json = serde_json::to_value(&action)?;
            assert_eq!(json["type"], action.name());
        }
        Ok(())
    }

    #[test]
    fn test_payload_shape() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(AppAction::increment("c1"))?;
        assert_eq!(
            json,
            serde_json::json!({ "type": "increment", "payload": { "counterId": "c1" } })
        );

        let json = serde_json::to_value(AppAction::back())?;
        assert_eq!(json, serde_json::json!({ "type": "userRemoveSelected" }));
        Ok(())
    }

    #[test]
    fn test_deserialize_from_front_end() -> Result<(), serde_json::Error> {
        let action: AppAction = serde_json::from_str(
            r#"{"type":"usersStored","payload":{"users":[{"id":"u1","name":"Bob","description":"Builder"}]}}"#,
        )?;
        assert_eq!(
            action,
            AppAction::store_users(vec![User::new("u1", "Bob", "Builder")])
        );

        let action: AppAction = serde_json::from_str(r#"{"type":"userSelected","payload":{"userId":"u9"}}"#)?;
        assert_eq!(action, AppAction::select_user("u9"));
        Ok(())
    }

    #[test]
    fn test_unknown_tag_is_rejected_at_the_boundary() {
        let result = serde_json::from_str::<AppAction>(r#"{"type":"reset","payload":{}}"#);
        assert!(result.is_err());
    }
}
