//! Thunks receiving an injected context

use cyclone::{create_store, Action, Dispatchable, Sentinel, State};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
struct Greeting {
    word: String,
    waiting: bool,
}

impl State for Greeting {}

/// Side-effecting primitives handed to thunks.
struct Services;

impl Services {
    async fn sleep(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

fn greet() -> Dispatchable<Action, Services> {
    Dispatchable::thunk(|services: Arc<Services>| {
        Dispatchable::deferred(async move {
            services.sleep(1000).await;
            Ok(Action::with_payload("greet", json!({ "msg": "hello" })))
        })
    })
}

fn update(
    state: &Arc<Greeting>,
    action: &Action,
) -> (Arc<Greeting>, Dispatchable<Action, Services>) {
    match action.kind() {
        "ready" => (
            Arc::new(Greeting {
                waiting: true,
                ..Greeting::clone(state)
            }),
            greet(),
        ),
        "greet" => {
            let msg = action
                .payload()
                .and_then(|payload| payload["msg"].as_str())
                .unwrap_or_default();
            (
                Arc::new(Greeting {
                    word: msg.to_string(),
                    waiting: false,
                }),
                Action::none().into(),
            )
        }
        _ => (Arc::clone(state), Action::none().into()),
    }
}

#[tokio::main]
async fn main() -> cyclone::Result<()> {
    env_logger::init();
    println!("=== Extra Argument ===\n");

    let store = create_store(Greeting::default(), update, Services);

    let observed = store.clone();
    store.subscribe(Arc::new(move || {
        println!("{:?}", observed.get_state());
    }));

    store.dispatch(Action::new("ready")).await?;
    store.settled().await;
    Ok(())
}
