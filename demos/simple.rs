//! Counter store with a single update function

use cyclone::{Action, Sentinel, State, Store};
use std::sync::Arc;

#[derive(Debug)]
struct Counter {
    count: i64,
}

impl State for Counter {}

fn update(state: &Arc<Counter>, action: &Action) -> (Arc<Counter>, Action) {
    match action.kind() {
        "increment" => (
            Arc::new(Counter {
                count: state.count + 1,
            }),
            Action::none(),
        ),
        "decrement" => (
            Arc::new(Counter {
                count: state.count - 1,
            }),
            Action::none(),
        ),
        _ => (Arc::clone(state), Action::none()),
    }
}

#[tokio::main]
async fn main() -> cyclone::Result<()> {
    env_logger::init();
    println!("=== Simple Counter ===\n");

    let store = Store::new(Counter { count: 0 }, update);

    let observed = store.clone();
    store.subscribe(Arc::new(move || {
        println!("State changed: {:?}", observed.get_state());
    }));

    store.dispatch(Action::new("increment")).await?;
    store.dispatch(Action::new("increment")).await?;
    store.dispatch(Action::new("decrement")).await?;

    // no reducer handles this, so no notification
    store.dispatch(Action::new("unknown")).await?;

    println!("\nFinal count: {}", store.get_state().count);
    Ok(())
}
