//! Directory binary
//!
//! Loads the seed users, walks through the list/detail flow and the
//! counters, then prints the collected metrics.

use directory::{
    create_store, select_counter, AppAction, DirectoryConfig, SortDirection, UsersListModel,
    UsersView,
};
use slicestore_runtime::metrics;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn describe(view: &UsersView) -> String {
    match view {
        UsersView::List { direction, users } => {
            let first: Vec<&str> = users.iter().take(3).map(|u| u.name.as_str()).collect();
            format!("list ({direction}, {} users): {}", users.len(), first.join(", "))
        }
        UsersView::Detail { user_id, user: Some(user) } => {
            format!("detail {user_id}: {} / {}", user.name, user.description)
        }
        UsersView::Detail { user_id, user: None } => format!("detail {user_id}: not found"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "directory=debug,slicestore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DirectoryConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    let metrics = metrics::install_recorder()?;
    let store = Arc::new(create_store(&config));

    let observed = Arc::downgrade(&store);
    let subscription = store.subscribe(move || {
        if let Some(store) = observed.upgrade() {
            let state = store.get_state();
            tracing::info!(
                users = state.users.count(),
                selected = ?state.users.selected_user_id,
                counters = state.counters.len(),
                "State updated"
            );
        }
    });

    let mut snapshots = store.watch();
    let watcher = tokio::spawn(async move {
        let mut changes = 0_usize;
        while snapshots.changed().await.is_ok() {
            changes += 1;
        }
        changes
    });

    println!("=== Directory ===\n");

    let mut model = UsersListModel::new(config.sort);
    println!("{}", describe(&model.view(&store.get_state())));

    model.set_sort(match model.direction() {
        SortDirection::Asc => SortDirection::Desc,
        SortDirection::Desc => SortDirection::Asc,
    });
    println!("{}", describe(&model.view(&store.get_state())));

    let first_id = store.state(|s| s.users.ids.first().cloned());
    if let Some(user_id) = first_id {
        println!("\n>>> Selecting {user_id}");
        store.dispatch(model.on_user_clicked(user_id));
        println!("{}", describe(&model.view(&store.get_state())));

        println!("\n>>> Back");
        store.dispatch(model.on_back());
        println!("{}", describe(&model.view(&store.get_state())));
    }

    println!();
    for action in [
        AppAction::increment("c1"),
        AppAction::increment("c1"),
        AppAction::decrement("c2"),
    ] {
        let state = store.dispatch(action);
        println!(
            "c1 = {:?}, c2 = {:?}",
            select_counter(&state, "c1").map(|c| c.counter),
            select_counter(&state, "c2").map(|c| c.counter)
        );
    }

    let mut totals: Vec<(String, i64)> = store.state(|s| {
        s.counters
            .iter()
            .map(|(id, counter)| (id.to_string(), counter.counter))
            .collect()
    });
    totals.sort();
    println!("Counters: {totals:?}");

    subscription.unsubscribe();

    drop(store);
    let changes = watcher.await?;
    println!("\nSnapshots observed by the watcher: {changes}");

    println!("\n=== Metrics ===\n{}", metrics.render());

    Ok(())
}
