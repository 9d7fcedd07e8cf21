//! Slice reducers composed with `combine`

use cyclone::{combine, reducer, reducer_with_deps, Action, Dependencies, Record, Sentinel, Store};
use std::sync::Arc;

fn step(
    n: i32,
) -> impl Fn(&Arc<i32>, &Action, &Dependencies) -> (Arc<i32>, Action) + Send + Sync {
    move |state: &Arc<i32>, action: &Action, _: &Dependencies| match action.kind() {
        "increment" => (Arc::new(**state + n), Action::none()),
        "decrement" => (Arc::new(**state - n), Action::none()),
        _ => (Arc::clone(state), Action::none()),
    }
}

fn summary(state: &Arc<String>, action: &Action, deps: &Dependencies) -> (Arc<String>, Action) {
    let (Some(a), Some(b)) = (deps.get::<i32>(0), deps.get::<i32>(1)) else {
        return (Arc::clone(state), Action::none());
    };
    match action.kind() {
        "increment" => (Arc::new(format!("{}", a + b)), Action::none()),
        "decrement" => (Arc::new(format!("{}", a - b)), Action::none()),
        _ => (Arc::clone(state), Action::none()),
    }
}

fn print_state(record: &Record) {
    println!(
        "a = {:?}, b = {:?}, c = {:?}",
        record.get::<i32>("a"),
        record.get::<i32>("b"),
        record.get::<String>("c"),
    );
}

#[tokio::main]
async fn main() -> cyclone::Result<()> {
    env_logger::init();
    println!("=== Combined Reducers ===\n");

    // "c" reads "a" and "b", so it is declared after them
    let update = cyclone::try_combine([
        reducer("a", step(1)),
        reducer("b", step(2)),
        reducer_with_deps("c", ["a", "b"], summary),
    ])?;

    let store = Store::new(
        Record::new()
            .with("a", 0i32)
            .with("b", 0i32)
            .with("c", String::new()),
        update,
    );

    let observed = store.clone();
    store.subscribe(Arc::new(move || print_state(&observed.get_state())));

    store.dispatch(Action::new("increment")).await?;
    store.dispatch(Action::new("increment")).await?;
    store.dispatch(Action::new("decrement")).await?;

    println!("\nDeclaring \"c\" first reads the previous cycle's values:");
    let stale = Store::new(
        Record::new()
            .with("a", 0i32)
            .with("b", 0i32)
            .with("c", String::new()),
        combine([
            reducer_with_deps("c", ["a", "b"], summary),
            reducer("a", step(1)),
            reducer("b", step(2)),
        ]),
    );
    stale.dispatch(Action::new("increment")).await?;
    print_state(&stale.get_state());

    Ok(())
}
