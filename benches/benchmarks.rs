use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use cyclone::{
    combine, reducer, reducer_with_deps, Action, Dependencies, Listener, Record, Sentinel, State,
    Store,
};

#[derive(Debug)]
struct Counter {
    count: usize,
}

impl State for Counter {}

fn counter_update(state: &Arc<Counter>, action: &Action) -> (Arc<Counter>, Action) {
    if action.is("increment") {
        (
            Arc::new(Counter {
                count: state.count + 1,
            }),
            Action::none(),
        )
    } else {
        (Arc::clone(state), Action::none())
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn dispatch_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let store = Store::new(Counter { count: 0 }, counter_update);

    c.bench_function("dispatch_plain", |b| {
        b.iter(|| {
            rt.block_on(store.dispatch(black_box(Action::new("increment"))))
                .unwrap();
        });
    });
}

fn dispatch_none_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let store = Store::new(Counter { count: 0 }, counter_update);

    c.bench_function("dispatch_none", |b| {
        b.iter(|| {
            rt.block_on(store.dispatch(black_box(Action::none())))
                .unwrap();
        });
    });
}

fn combine_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for slices in [1usize, 10, 100].iter() {
        let mut configs = Vec::with_capacity(*slices + 1);
        let mut state = Record::new().with("total", 0usize);
        for i in 0..*slices {
            let name = format!("slice{}", i);
            state.insert(name.clone(), 0usize);
            configs.push(reducer(name, |s: &Arc<usize>, a: &Action, _: &Dependencies| {
                if a.is("increment") {
                    (Arc::new(**s + 1), Action::none())
                } else {
                    (Arc::clone(s), Action::none())
                }
            }));
        }
        configs.push(reducer_with_deps(
            "total",
            ["slice0"],
            |_: &Arc<usize>, _: &Action, deps: &Dependencies| {
                (
                    Arc::new(deps.get::<usize>(0).copied().unwrap_or_default()),
                    Action::none(),
                )
            },
        ));
        let update = combine::<_, (), _>(configs);
        let state = Arc::new(state);

        group.bench_with_input(BenchmarkId::from_parameter(slices), slices, |b, _| {
            let action = Action::new("increment");
            b.iter(|| black_box(update(&state, &action)));
        });
    }
    group.finish();
}

fn notify_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("notify");

    for listener_count in [1, 10, 100].iter() {
        let store = Store::new(Counter { count: 0 }, counter_update);

        for _ in 0..*listener_count {
            let listener: Listener = Arc::new(|| {
                // Empty listener
            });
            store.subscribe(listener);
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            listener_count,
            |b, _| {
                b.iter(|| {
                    rt.block_on(store.dispatch(Action::new("increment")))
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    dispatch_benchmark,
    dispatch_none_benchmark,
    combine_benchmark,
    notify_benchmark,
);
criterion_main!(benches);
