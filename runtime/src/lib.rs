//! # Slicestore Runtime
//!
//! Runtime implementation for slicestore.
//!
//! This crate provides the [`Store`] that owns the current snapshot, applies
//! actions through a reducer, and tells interested parties about the result.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current snapshot and serializes dispatches
//! - **Listeners**: Synchronous callbacks run after every dispatch
//! - **Watchers**: `tokio::sync::watch` receivers that observe the latest snapshot
//!
//! ## Example
//!
//! ```ignore
//! use slicestore_runtime::Store;
//!
//! let store = Store::new(AppReducer::new());
//!
//! // Send an action
//! let snapshot = store.dispatch(AppAction::increment("c1"));
//!
//! // Read state
//! let value = store.state(|s| s.counters.get("c1").map(|c| c.counter));
//! ```

use slicestore_core::{Action, Reducer, Snapshot};

/// Prometheus metrics for observability
pub mod metrics;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use slicestore_runtime::StoreConfig;
///
/// let config = StoreConfig::new("directory").with_notify_unchanged(false);
/// assert_eq!(config.name, "directory");
/// assert!(!config.notify_unchanged);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name used to label logs and metrics for this store
    pub name: String,
    /// Whether listeners run when a dispatch leaves the snapshot unchanged
    pub notify_unchanged: bool,
}

impl StoreConfig {
    /// Create a new configuration with the given store name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether listeners run on unchanged snapshots
    #[must_use]
    pub const fn with_notify_unchanged(mut self, notify: bool) -> Self {
        self.notify_unchanged = notify;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            notify_unchanged: true,
        }
    }
}

/// Store module - the runtime coordinator for a reducer
pub mod store {
    use super::{metrics, Action, Reducer, Snapshot, StoreConfig};
    use parking_lot::{Mutex, ReentrantMutex, RwLock};
    use std::sync::{Arc, Weak};
    use std::time::Instant;
    use tokio::sync::watch;

    type Listener = Arc<dyn Fn() + Send + Sync>;

    #[derive(Default)]
    struct Listeners {
        next_id: u64,
        entries: Vec<(u64, Listener)>,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. The current snapshot (behind a `RwLock`, replaced wholesale)
    /// 2. The reducer (state transitions)
    /// 3. Listeners notified after each dispatch
    /// 4. A watch channel publishing every new snapshot
    ///
    /// Dispatches run to completion on the calling thread and are applied
    /// one at a time in the order they acquire the store. A listener may
    /// dispatch again from inside its callback; the nested dispatch completes
    /// before the outer one returns.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(AppReducer::new());
    ///
    /// let subscription = store.subscribe(|| println!("state changed"));
    /// store.dispatch(AppAction::increment("c1"));
    /// subscription.unsubscribe();
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        config: StoreConfig,
        reducer: R,
        state: RwLock<Snapshot<R::State>>,
        dispatching: ReentrantMutex<()>,
        listeners: Arc<Mutex<Listeners>>,
        snapshots: watch::Sender<Snapshot<R::State>>,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create a new store starting from the reducer's initial state
        #[must_use]
        pub fn new(reducer: R) -> Self {
            Self::with_config(reducer, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(reducer: R, config: StoreConfig) -> Self {
            let initial = reducer.initial_state();
            Self::with_state(reducer, initial, config)
        }

        /// Create a new store starting from an existing snapshot
        #[must_use]
        pub fn with_state(reducer: R, state: Snapshot<R::State>, config: StoreConfig) -> Self {
            let (snapshots, _) = watch::channel(Arc::clone(&state));

            tracing::debug!(store = %config.name, "Store created");

            Self {
                config,
                reducer,
                state: RwLock::new(state),
                dispatching: ReentrantMutex::new(()),
                listeners: Arc::new(Mutex::new(Listeners::default())),
                snapshots,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Dispatch an action to the store
        ///
        /// 1. Computes the next snapshot with the reducer
        /// 2. Installs it as the current snapshot
        /// 3. Publishes it to watchers (only if it differs from the previous one)
        /// 4. Runs every listener registered when notification starts
        ///
        /// # Returns
        ///
        /// The snapshot installed by this dispatch.
        ///
        /// # Panics
        ///
        /// If the reducer or a listener panics, the panic propagates to the
        /// caller. A reducer panic leaves the current snapshot in place; a
        /// listener panic happens after the new snapshot is installed.
        #[tracing::instrument(
            skip_all,
            name = "store_dispatch",
            fields(store = %self.config.name, action = action.name())
        )]
        pub fn dispatch(&self, action: R::Action) -> Snapshot<R::State> {
            let _dispatching = self.dispatching.lock();

            let start = Instant::now();
            let (previous, next) = {
                let mut state = self.state.write();
                let previous = Arc::clone(&state);
                let next = self.reducer.reduce(&previous, &action);
                *state = Arc::clone(&next);
                (previous, next)
            };
            metrics::record_dispatch(&self.config.name, action.name(), start.elapsed());

            let changed = !Arc::ptr_eq(&previous, &next);
            if changed {
                self.snapshots.send_replace(Arc::clone(&next));
                tracing::debug!("Installed new snapshot");
            } else {
                metrics::record_unchanged(&self.config.name);
                tracing::debug!("Action left snapshot unchanged");
            }

            if changed || self.config.notify_unchanged {
                self.notify();
            }

            next
        }

        /// The current snapshot
        ///
        /// The returned snapshot never changes; later dispatches install new
        /// snapshots instead of editing this one.
        #[must_use]
        pub fn get_state(&self) -> Snapshot<R::State> {
            Arc::clone(&self.state.read())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let user_count = store.state(|s| s.users.ids.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let state = self.get_state();
            f(&state)
        }

        /// Register a listener called after every dispatch
        ///
        /// The listener receives no arguments; read the new state with
        /// [`Store::get_state`]. Dropping the returned [`Subscription`] does
        /// not unsubscribe; call [`Subscription::unsubscribe`].
        pub fn subscribe<F>(&self, listener: F) -> Subscription
        where
            F: Fn() + Send + Sync + 'static,
        {
            let (id, count) = {
                let mut listeners = self.listeners.lock();
                let id = listeners.next_id;
                listeners.next_id += 1;
                listeners.entries.push((id, Arc::new(listener)));
                (id, listeners.entries.len())
            };

            metrics::record_listeners(&self.config.name, count);
            tracing::debug!(store = %self.config.name, listener = id, "Listener subscribed");

            Subscription {
                id,
                store: self.config.name.clone(),
                listeners: Arc::downgrade(&self.listeners),
            }
        }

        /// Observe snapshots asynchronously
        ///
        /// The receiver starts at the current snapshot and is updated each
        /// time a dispatch installs a different one.
        #[must_use]
        pub fn watch(&self) -> watch::Receiver<Snapshot<R::State>> {
            self.snapshots.subscribe()
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.lock().entries.len()
        }

        fn notify(&self) {
            // Copy out so listeners can subscribe or unsubscribe while running.
            let listeners: Vec<Listener> = self
                .listeners
                .lock()
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            tracing::trace!(listeners = listeners.len(), "Notifying listeners");
            for listener in listeners {
                listener();
            }
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("listeners", &self.listeners.lock().entries.len())
                .finish_non_exhaustive()
        }
    }

    /// Handle returned by [`Store::subscribe`]
    ///
    /// Holds only a weak reference to the store's listener list, so it can
    /// outlive the store.
    #[derive(Debug)]
    pub struct Subscription {
        id: u64,
        store: String,
        listeners: Weak<Mutex<Listeners>>,
    }

    impl Subscription {
        /// Remove the listener from the store
        ///
        /// Calling this more than once, or after the store is gone, does nothing.
        pub fn unsubscribe(&self) {
            let Some(listeners) = self.listeners.upgrade() else {
                return;
            };

            let remaining = {
                let mut listeners = listeners.lock();
                let before = listeners.entries.len();
                listeners.entries.retain(|(id, _)| *id != self.id);
                if listeners.entries.len() == before {
                    return;
                }
                listeners.entries.len()
            };

            metrics::record_listeners(&self.store, remaining);
            tracing::debug!(store = %self.store, listener = self.id, "Listener unsubscribed");
        }

        /// Whether the listener is still registered
        #[must_use]
        pub fn is_active(&self) -> bool {
            self.listeners
                .upgrade()
                .is_some_and(|listeners| listeners.lock().entries.iter().any(|(id, _)| *id == self.id))
        }
    }
}

pub use store::{Store, Subscription};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                Self::Increment => "increment",
                Self::Decrement => "decrement",
                Self::NoOp => "noOp",
            }
        }
    }

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;

        fn reduce(&self, state: &Snapshot<TestState>, action: &TestAction) -> Snapshot<TestState> {
            match action {
                TestAction::Increment => Arc::new(TestState {
                    value: state.value + 1,
                }),
                TestAction::Decrement => Arc::new(TestState {
                    value: state.value - 1,
                }),
                TestAction::NoOp => Arc::clone(state),
            }
        }
    }

    fn counting_listener(store: &Store<TestReducer>) -> (Arc<AtomicUsize>, Subscription) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let subscription = store.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (calls, subscription)
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("first")
            .with_name("second")
            .with_notify_unchanged(false);

        assert_eq!(config.name, "second");
        assert!(!config.notify_unchanged);

        let defaults = StoreConfig::default();
        assert_eq!(defaults.name, "store");
        assert!(defaults.notify_unchanged);
    }

    #[test]
    fn test_store_creation() {
        let store = Store::new(TestReducer);
        assert_eq!(store.state(|s| s.value), 0);
        assert_eq!(store.config().name, "store");
    }

    #[test]
    fn test_dispatch_returns_installed_snapshot() {
        let store = Store::new(TestReducer);

        let returned = store.dispatch(TestAction::Increment);

        assert_eq!(returned.value, 1);
        assert!(Arc::ptr_eq(&returned, &store.get_state()));
    }

    #[test]
    fn test_old_snapshot_is_untouched() {
        let store = Store::new(TestReducer);
        let before = store.get_state();

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Increment);

        assert_eq!(before.value, 0);
        assert_eq!(store.state(|s| s.value), 2);
    }

    #[test]
    fn test_noop_keeps_snapshot_identity() {
        let store = Store::new(TestReducer);
        let before = store.get_state();

        let after = store.dispatch(TestAction::NoOp);

        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_listener_called_once_per_dispatch() {
        let store = Store::new(TestReducer);
        let (calls, _subscription) = counting_listener(&store);

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Decrement);
        store.dispatch(TestAction::NoOp);

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_notify_unchanged_disabled() {
        let store = Store::with_config(
            TestReducer,
            StoreConfig::new("quiet").with_notify_unchanged(false),
        );
        let (calls, _subscription) = counting_listener(&store);

        store.dispatch(TestAction::NoOp);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.dispatch(TestAction::Increment);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::new(TestReducer);
        let (calls, subscription) = counting_listener(&store);
        assert_eq!(store.listener_count(), 1);
        assert!(subscription.is_active());

        store.dispatch(TestAction::Increment);
        subscription.unsubscribe();
        subscription.unsubscribe();
        store.dispatch(TestAction::Increment);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_dropping_subscription_keeps_listener() {
        let store = Store::new(TestReducer);
        let (calls, subscription) = counting_listener(&store);
        drop(subscription);

        store.dispatch(TestAction::Increment);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let store = Store::new(TestReducer);
        let (_calls, subscription) = counting_listener(&store);
        drop(store);

        subscription.unsubscribe();
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_listener_sees_new_state() {
        let store = Arc::new(Store::new(TestReducer));
        let observed = Arc::new(AtomicUsize::new(0));

        let reader = Arc::clone(&store);
        let sink = Arc::clone(&observed);
        let _subscription = store.subscribe(move || {
            #[allow(clippy::cast_sign_loss)]
            sink.store(reader.state(|s| s.value) as usize, Ordering::SeqCst);
        });

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Increment);

        assert_eq!(observed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_with_state() {
        let store = Store::with_state(
            TestReducer,
            Arc::new(TestState { value: 41 }),
            StoreConfig::default(),
        );

        store.dispatch(TestAction::Increment);

        assert_eq!(store.state(|s| s.value), 42);
    }

    #[test]
    fn test_watch_sees_latest_snapshot() {
        let store = Store::new(TestReducer);
        let mut rx = store.watch();
        assert_eq!(rx.borrow().value, 0);

        store.dispatch(TestAction::Increment);
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow_and_update().value, 1);

        store.dispatch(TestAction::NoOp);
        assert!(!rx.has_changed().unwrap_or(true));
    }
}
