//! # Slicestore Testing
//!
//! Testing utilities and helpers for slicestore.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - Snapshot identity assertions
//! - [`RecordingListener`]: counts store notifications
//! - proptest strategies for identifiers and names
//! - Test tracing setup
//!
//! ## Example
//!
//! ```ignore
//! use slicestore_testing::ReducerTest;
//!
//! ReducerTest::new(CountersReducer)
//!     .given_state(CountersState::default())
//!     .when_action(AppAction::increment("c1"))
//!     .then_state(|state| assert_eq!(state.get("c1").map(|c| c.counter), Some(1)))
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Listener helpers for Store tests
pub mod listeners {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts how many times a store notified it
    ///
    /// # Example
    ///
    /// ```
    /// use slicestore_testing::RecordingListener;
    ///
    /// let recorder = RecordingListener::new();
    /// let listener = recorder.listener();
    /// listener();
    /// listener();
    /// assert_eq!(recorder.calls(), 2);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct RecordingListener {
        calls: Arc<AtomicUsize>,
    }

    impl RecordingListener {
        /// Create a recorder with no calls
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A listener callback that records into this recorder
        #[must_use]
        pub fn listener(&self) -> impl Fn() + Send + Sync + 'static {
            let calls = Arc::clone(&self.calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        }

        /// Number of recorded calls
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Short lowercase identifiers such as `c1` or `user42`
    pub fn identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,7}"
    }

    /// Display names such as `Amy` or `Bob Smith`
    pub fn display_name() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8})?"
    }
}

/// Install a tracing subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use listeners::RecordingListener;
