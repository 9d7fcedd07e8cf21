//! An update that chains a deferred follow-up action

use cyclone::{Action, Dispatchable, Sentinel, State, Store};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
struct Greeting {
    word: String,
    waiting: bool,
}

impl State for Greeting {}

fn greet() -> Dispatchable<Action> {
    Dispatchable::deferred(async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(Action::with_payload("greet", json!({ "msg": "hello" })))
    })
}

fn update(state: &Arc<Greeting>, action: &Action) -> (Arc<Greeting>, Dispatchable<Action>) {
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
    println!("=== Action Chain ===\n");

    let store = Store::new(Greeting::default(), update);

    let observed = store.clone();
    store.subscribe(Arc::new(move || {
        println!("{:?}", observed.get_state());
    }));

    store.dispatch(Action::new("ready")).await?;
    println!("dispatch resolved, greeting still pending...");

    store.settled().await;
    println!("settled: word = {:?}", store.get_state().word);
    Ok(())
}
