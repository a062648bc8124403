//! Domain types for the user directory.
//!
//! The root state holds two independent slices, users and counters. Each
//! slice is a [`Snapshot`] so that a transition touching one slice shares the
//! other with the previous root.

use serde::{Deserialize, Serialize};
use slicestore_core::Snapshot;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::str::FromStr;

/// Unique identifier for a user
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Identifier of a named counter
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(String);

macro_rules! string_id {
    ($id:ident) => {
        impl $id {
            /// Creates an identifier from any string
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $id {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $id {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $id {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(UserId);
string_id!(CounterId);

/// A user record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Display name, used for sorting
    pub name: String,
    /// Free-form description shown in the detail view
    pub description: String,
}

impl User {
    /// Creates a new user
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Users slice
///
/// `entities` and `ids` are shared between snapshots until a reload replaces
/// them, which lets selectors memoize on their identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersState {
    /// All users indexed by ID
    pub entities: Snapshot<HashMap<UserId, User>>,
    /// User IDs in load order
    pub ids: Snapshot<Vec<UserId>>,
    /// The user shown in the detail view, if any
    ///
    /// Not checked against `entities`; see [`crate::selectors::select_selected_user`].
    pub selected_user_id: Option<UserId>,
}

impl UsersState {
    /// Returns a user by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&User> {
        self.entities.get(id)
    }

    /// Returns the number of loaded users
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}

/// State of a single counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current value; may be negative
    pub counter: i64,
}

/// Counters slice
///
/// Counters do not exist until the first increment or decrement names them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountersState {
    counters: HashMap<CounterId, CounterState>,
}

impl CountersState {
    /// Returns a counter by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CounterState> {
        self.counters.get(id)
    }

    /// Returns the number of counters that exist
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether no counter exists yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Iterates over all counters in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&CounterId, &CounterState)> {
        self.counters.iter()
    }

    /// A copy of this state with `delta` added to one counter
    ///
    /// A missing counter starts from zero. Arithmetic wraps at the `i64` bounds.
    #[must_use]
    pub fn with_delta(&self, id: &CounterId, delta: i64) -> Self {
        let mut counters = self.counters.clone();
        let current = counters.get(id).copied().unwrap_or_default();
        counters.insert(
            id.clone(),
            CounterState {
                counter: current.counter.wrapping_add(delta),
            },
        );
        Self { counters }
    }
}

/// Root state of the directory
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Users slice
    pub users: Snapshot<UsersState>,
    /// Counters slice
    pub counters: Snapshot<CountersState>,
}

/// Sort order of the users list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// A to Z
    #[default]
    Asc,
    /// Z to A
    Desc,
}

impl SortDirection {
    /// The lowercase name (`"asc"` or `"desc"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`SortDirection`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction {0:?}, expected \"asc\" or \"desc\"")]
pub struct ParseSortDirectionError(String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_ids_borrow_as_str() {
        let mut counters = HashMap::new();
        counters.insert(CounterId::from("c1"), 3);
        assert_eq!(counters.get("c1"), Some(&3));
        assert_eq!(UserId::new("u1").as_str(), "u1");
        assert_eq!(UserId::from("u1".to_string()).to_string(), "u1");
    }

    #[test]
    fn test_with_delta_creates_counter() {
        let state = CountersState::default();
        let next = state.with_delta(&CounterId::from("c1"), -1);

        assert!(state.is_empty());
        assert_eq!(next.get("c1"), Some(&CounterState { counter: -1 }));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_iter_lists_every_counter() {
        let state = CountersState::default()
            .with_delta(&CounterId::from("a"), 2)
            .with_delta(&CounterId::from("b"), -1);

        let mut counters: Vec<(&str, i64)> = state
            .iter()
            .map(|(id, counter)| (id.as_str(), counter.counter))
            .collect();
        counters.sort_unstable();

        assert_eq!(counters, vec![("a", 2), ("b", -1)]);
    }

    #[test]
    fn test_with_delta_wraps() {
        let id = CounterId::from("big");
        let state = CountersState::default().with_delta(&id, i64::MAX);
        let next = state.with_delta(&id, 1);
        assert_eq!(next.get("big").map(|c| c.counter), Some(i64::MIN));
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("asc".parse(), Ok(SortDirection::Asc));
        assert_eq!(" DESC ".parse(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }

    #[test]
    fn test_users_state_lookup() {
        let user = User::new("u1", "Bob", "Builder");
        let state = UsersState {
            entities: Arc::new(HashMap::from([(user.id.clone(), user.clone())])),
            ids: Arc::new(vec![user.id.clone()]),
            selected_user_id: None,
        };

        assert_eq!(state.get("u1"), Some(&user));
        assert_eq!(state.get("u2"), None);
        assert_eq!(state.count(), 1);
    }
}
