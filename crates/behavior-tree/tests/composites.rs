//! Ordering, short-circuit and resume behavior of the composite nodes.

use behavior_tree::{BehaviorTree, Node, NodeArena, NodeId, NodeType, ParallelPolicy, Status, builder};

/// Each scripted leaf appends its label to `log` when ticked.
#[derive(Default)]
struct Trace {
    log: Vec<&'static str>,
}

impl Trace {
    fn count(&self, label: &str) -> usize {
        self.log.iter().filter(|&&entry| entry == label).count()
    }
}

fn scripted(
    arena: &mut NodeArena<Trace>,
    label: &'static str,
    script: &'static [Status],
) -> NodeId {
    let mut step = 0;
    builder::action(arena, label, move |trace: &mut Trace| {
        trace.log.push(label);
        let status = script[step.min(script.len() - 1)];
        step += 1;
        status
    })
}

// ===== sequence =====

#[test]
fn sequence_error_skips_later_children() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Error]);
    let c = scripted(&mut arena, "c", &[Status::Success]);
    let seq = builder::sequence(&mut arena, "seq", &[a, b, c]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(seq, &mut trace), Status::Error);
    assert_eq!(trace.log, ["a", "b"]);
}

#[test]
fn sequence_running_leaves_later_children_untouched() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Running, Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Failure]);
    let seq = builder::sequence(&mut arena, "seq", &[a, b]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(seq, &mut trace), Status::Running);
    assert_eq!(trace.log, ["a"]);

    assert_eq!(arena.tick(seq, &mut trace), Status::Failure);
    assert_eq!(trace.log, ["a", "a", "b"]);
}

#[test]
fn finished_sequence_restarts_from_the_first_child() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Running, Status::Failure]);
    let seq = builder::sequence(&mut arena, "seq", &[a, b]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(seq, &mut trace), Status::Running);
    assert_eq!(arena.tick(seq, &mut trace), Status::Failure);
    // The failed run is over: the next tick is a fresh entry.
    assert_eq!(arena.tick(seq, &mut trace), Status::Failure);
    assert_eq!(trace.log, ["a", "b", "b", "a", "b"]);
}

#[test]
fn empty_sequence_succeeds_and_empty_selector_fails() {
    let mut arena: NodeArena<Trace> = NodeArena::new();
    let seq = builder::sequence(&mut arena, "seq", &[]).unwrap();
    let sel = builder::selector(&mut arena, "sel", &[]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(seq, &mut trace), Status::Success);
    assert_eq!(arena.tick(sel, &mut trace), Status::Failure);
}

// ===== selector =====

#[test]
fn selector_success_skips_later_children() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Success]);
    let sel = builder::selector(&mut arena, "sel", &[a, b]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(sel, &mut trace), Status::Success);
    assert_eq!(trace.log, ["a"]);
}

#[test]
fn selector_resumes_at_the_running_branch() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Failure]);
    let b = scripted(&mut arena, "b", &[Status::Running, Status::Running, Status::Failure]);
    let c = scripted(&mut arena, "c", &[Status::Success]);
    let sel = builder::selector(&mut arena, "sel", &[a, b, c]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(sel, &mut trace), Status::Running);
    assert_eq!(arena.node(sel).unwrap().cursor(), 1);
    assert_eq!(arena.tick(sel, &mut trace), Status::Running);
    assert_eq!(arena.tick(sel, &mut trace), Status::Success);

    assert_eq!(trace.count("a"), 1);
    assert_eq!(trace.count("b"), 3);
    assert_eq!(trace.count("c"), 1);
}

#[test]
fn error_propagates_unchanged_to_the_root() {
    let mut arena = NodeArena::new();
    let broken = scripted(&mut arena, "broken", &[Status::Error]);
    let inv = builder::inverter(&mut arena, "not", broken).unwrap();
    let seq = builder::sequence(&mut arena, "seq", &[inv]).unwrap();
    let fallback = scripted(&mut arena, "fallback", &[Status::Success]);
    let root = builder::selector(&mut arena, "root", &[seq, fallback]).unwrap();

    let mut trace = Trace::default();
    let mut tree = BehaviorTree::new(&mut arena, root, &mut trace);
    assert_eq!(tree.tick(), Status::Error);
    assert_eq!(tree.context().count("fallback"), 0);
}

// ===== parallel =====

#[test]
fn require_all_fails_on_first_failure_while_others_run() {
    let mut arena = NodeArena::new();
    let slow = scripted(&mut arena, "slow", &[Status::Running]);
    let bad = scripted(&mut arena, "bad", &[Status::Running, Status::Failure]);
    let par = builder::parallel(&mut arena, "par", ParallelPolicy::RequireAll, &[slow, bad]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(par, &mut trace), Status::Running);
    assert_eq!(arena.tick(par, &mut trace), Status::Failure);

    // The still-running child is abandoned as-is.
    assert_eq!(arena.node(slow).unwrap().status(), Status::Running);
}

#[test]
fn require_one_succeeds_without_waiting_for_the_rest() {
    let mut arena = NodeArena::new();
    let slow = scripted(&mut arena, "slow", &[Status::Running]);
    let fast = scripted(&mut arena, "fast", &[Status::Running, Status::Success]);
    let par = builder::parallel(&mut arena, "par", ParallelPolicy::RequireOne, &[slow, fast]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(par, &mut trace), Status::Running);
    assert_eq!(arena.tick(par, &mut trace), Status::Success);
    assert_eq!(trace.count("slow"), 2);
}

#[test]
fn require_one_fails_only_once_every_child_failed() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Failure]);
    let b = scripted(&mut arena, "b", &[Status::Running, Status::Running, Status::Failure]);
    let par = builder::parallel(&mut arena, "par", ParallelPolicy::RequireOne, &[a, b]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(par, &mut trace), Status::Running);
    assert_eq!(arena.tick(par, &mut trace), Status::Running);
    assert_eq!(arena.tick(par, &mut trace), Status::Failure);
    assert_eq!(trace.count("a"), 1);

    let node = arena.node(par).unwrap();
    assert_eq!(node.done_mask().len(), 2);
    assert!(node.success_mask().is_empty());
}

#[test]
fn parallel_ticks_children_in_index_order() {
    let mut arena = NodeArena::new();
    let a = scripted(&mut arena, "a", &[Status::Running, Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Success]);
    let c = scripted(&mut arena, "c", &[Status::Running, Status::Success]);
    let par = builder::parallel(&mut arena, "par", ParallelPolicy::RequireAll, &[a, b, c]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(par, &mut trace), Status::Running);
    assert_eq!(arena.tick(par, &mut trace), Status::Success);
    assert_eq!(trace.log, ["a", "b", "c", "a", "c"]);
}

#[test]
fn oversized_parallel_errors_before_ticking_children() {
    let mut arena = NodeArena::new();
    let par = arena.add(Node::new("par").with_type(NodeType::Parallel));
    for _ in 0..33 {
        let child = scripted(&mut arena, "child", &[Status::Success]);
        arena.add_child(par, child).unwrap();
    }

    let mut trace = Trace::default();
    assert_eq!(arena.tick(par, &mut trace), Status::Error);
    assert!(trace.log.is_empty());
}

// ===== inverter =====

#[test]
fn inverter_passes_running_and_error_through() {
    let mut arena = NodeArena::new();
    let running = scripted(&mut arena, "running", &[Status::Running]);
    let error = scripted(&mut arena, "error", &[Status::Error]);
    let success = scripted(&mut arena, "success", &[Status::Success]);
    let not_running = builder::inverter(&mut arena, "not_running", running).unwrap();
    let not_error = builder::inverter(&mut arena, "not_error", error).unwrap();
    let not_success = builder::inverter(&mut arena, "not_success", success).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(not_running, &mut trace), Status::Running);
    assert_eq!(arena.tick(not_error, &mut trace), Status::Error);
    assert_eq!(arena.tick(not_success, &mut trace), Status::Failure);
}

#[test]
fn inverter_with_wrong_arity_errors() {
    let mut arena = NodeArena::new();
    let empty = arena.add(Node::new("empty").with_type(NodeType::Inverter));
    let a = scripted(&mut arena, "a", &[Status::Success]);
    let b = scripted(&mut arena, "b", &[Status::Success]);
    let two = arena.add(Node::new("two").with_type(NodeType::Inverter));
    arena.set_children(two, &[a, b]).unwrap();

    let mut trace = Trace::default();
    assert_eq!(arena.tick(empty, &mut trace), Status::Error);
    assert_eq!(arena.tick(two, &mut trace), Status::Error);
    assert!(trace.log.is_empty());
}
