use bt_core::{BehaviorTree, NodeSpec, TickContext, TokenState};
use bt_interp::{TreeInterpreter, TreeRegistry};

/// Entity that records which leaf actions ran, in order.
#[derive(Debug, Default)]
struct Probe {
    visits: Vec<&'static str>,
}

fn ctx(tick: u64) -> TickContext {
    TickContext {
        tick,
        dt_seconds: 0.1,
    }
}

fn succeed(name: &'static str) -> impl Fn(&mut Probe) -> TokenState + Send + Sync + 'static {
    move |probe| {
        probe.visits.push(name);
        TokenState::Success
    }
}

fn fail(name: &'static str) -> impl Fn(&mut Probe) -> TokenState + Send + Sync + 'static {
    move |probe| {
        probe.visits.push(name);
        TokenState::CleanFail
    }
}

#[test]
fn sequence_of_one_succeeding_leaf_resolves_in_one_tick() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "solo",
            NodeSpec::sequence("root", vec![NodeSpec::leaf("only", succeed("only"))]),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry
        .spawn_actor("solo", Probe::default())
        .expect("spawn")];

    let mut interp = TreeInterpreter::new();
    let queue = interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert!(queue.is_empty());
    assert_eq!(actors[0].entity.visits, ["only"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn sequence_clean_fails_after_visiting_both_leaves_in_order() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "pair",
            NodeSpec::sequence(
                "root",
                vec![
                    NodeSpec::leaf("first", succeed("first")),
                    NodeSpec::leaf("second", fail("second")),
                ],
            ),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry
        .spawn_actor("pair", Probe::default())
        .expect("spawn")];

    let mut interp = TreeInterpreter::new();
    let queue = interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert!(queue.is_empty());
    assert_eq!(actors[0].entity.visits, ["first", "second"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn sequence_stops_at_first_failing_child() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "seq",
            NodeSpec::sequence(
                "root",
                vec![
                    NodeSpec::leaf("first", fail("first")),
                    NodeSpec::leaf("never", succeed("never")),
                ],
            ),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry.spawn_actor("seq", Probe::default()).expect("spawn")];

    let mut interp = TreeInterpreter::new();
    interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert_eq!(actors[0].entity.visits, ["first"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn selector_stops_at_first_succeeding_child() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "sel",
            NodeSpec::selector(
                "root",
                vec![
                    NodeSpec::leaf("first", succeed("first")),
                    NodeSpec::leaf("never", succeed("never")),
                ],
            ),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry.spawn_actor("sel", Probe::default()).expect("spawn")];

    let mut interp = TreeInterpreter::new();
    interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert_eq!(actors[0].entity.visits, ["first"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn selector_tries_every_child_before_failing() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "sel",
            NodeSpec::selector(
                "root",
                vec![
                    NodeSpec::leaf("a", fail("a")),
                    NodeSpec::leaf("b", fail("b")),
                    NodeSpec::leaf("c", fail("c")),
                ],
            ),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry.spawn_actor("sel", Probe::default()).expect("spawn")];

    let mut interp = TreeInterpreter::new();
    interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert_eq!(actors[0].entity.visits, ["a", "b", "c"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn nested_composition_resolves_in_one_tick() {
    // selector
    // ├── sequence [find (fails) …]  → sequence fails
    // └── rest                       → selector succeeds
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "forage",
            NodeSpec::selector(
                "root",
                vec![
                    NodeSpec::sequence(
                        "gather",
                        vec![
                            NodeSpec::leaf("find", fail("find")),
                            NodeSpec::leaf("pick", succeed("pick")),
                        ],
                    ),
                    NodeSpec::leaf("rest", succeed("rest")),
                ],
            ),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![registry
        .spawn_actor("forage", Probe::default())
        .expect("spawn")];

    let mut interp = TreeInterpreter::new();
    interp.interpret_batch(&registry, &mut actors, &ctx(0));

    assert_eq!(actors[0].entity.visits, ["find", "rest"]);
    assert!(actors[0].suspended.is_empty());
}

#[test]
fn batch_processes_every_actor_against_a_shared_tree() {
    let mut registry = TreeRegistry::new();
    registry.register(
        BehaviorTree::from_spec(
            "solo",
            NodeSpec::sequence("root", vec![NodeSpec::leaf("only", succeed("only"))]),
        )
        .expect("valid tree"),
    );
    let mut actors = vec![
        registry.spawn_actor("solo", Probe::default()).expect("spawn"),
        registry.spawn_actor("solo", Probe::default()).expect("spawn"),
        registry.spawn_actor("solo", Probe::default()).expect("spawn"),
    ];

    let mut interp = TreeInterpreter::new();
    interp.interpret_batch(&registry, &mut actors, &ctx(0));

    for actor in &actors {
        assert_eq!(actor.entity.visits, ["only"]);
        assert!(actor.suspended.is_empty());
    }
}
