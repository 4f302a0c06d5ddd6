use bt_core::{BehaviorTree, NodeSpec, TickContext, TokenState};
use bt_interp::{TreeInterpreter, TreeRegistry};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default)]
struct Counter {
    ran: u64,
}

fn bench_interpret_batch(c: &mut Criterion) {
    let leaves = (0..32)
        .map(|i| {
            NodeSpec::selector(
                format!("try-{i}"),
                vec![
                    NodeSpec::leaf(format!("probe-{i}"), |counter: &mut Counter| {
                        counter.ran += 1;
                        TokenState::CleanFail
                    }),
                    NodeSpec::leaf(format!("act-{i}"), |counter: &mut Counter| {
                        counter.ran += 1;
                        TokenState::Success
                    }),
                ],
            )
        })
        .collect::<Vec<_>>();

    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec("bench", NodeSpec::sequence("root", leaves)).expect("valid tree"),
    );

    let mut actors = (0..16)
        .map(|_| registry.spawn_actor("bench", Counter::default()).expect("spawn"))
        .collect::<Vec<_>>();

    let mut interp = TreeInterpreter::new();
    let mut tick: u64 = 0;
    c.bench_function("bt-interp/interpret_batch(actors=16,selectors=32)", |b| {
        b.iter(|| {
            let ctx = TickContext {
                tick,
                dt_seconds: 0.1,
            };
            let queue = interp.interpret_batch(&registry, &mut actors, &ctx);
            black_box(queue.len());
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_interpret_batch);
criterion_main!(benches);
