use graph_frontier::algs::independent_set::IndependentSetSolver;
use graph_frontier::algs::propagation::{GenerationRecorder, Propagator};
use graph_frontier::data::scratch_pool::{self, ScratchPoolConfig};
use graph_frontier::topology::AdjacencyList;
use serial_test::serial;

#[test]
#[serial]
fn global_flag_pool_is_reused_across_runs() {
    let g = AdjacencyList::from_undirected_edges(100, (0..99).map(|i| (i, i + 1))).unwrap();
    for _ in 0..2 {
        let mut p = Propagator::new(GenerationRecorder::flood());
        p.set_nodes(&g).unwrap();
        p.set_position([0]).unwrap();
        p.propagate().unwrap();
    }
    let before = scratch_pool::node_flag_pool().stats();
    let mut p = Propagator::new(GenerationRecorder::flood());
    p.set_nodes(&g).unwrap();
    let after = scratch_pool::node_flag_pool().stats();
    assert_eq!(after.rented, before.rented + 1);
    assert_eq!(after.reused, before.reused + 1);
}

#[test]
#[serial]
fn global_state_pool_is_shared_by_solvers() {
    let g = AdjacencyList::from_undirected_edges(64, (0..63).map(|i| (i, i + 1))).unwrap();
    IndependentSetSolver::new(&g).find().unwrap();
    let before = scratch_pool::state_pool().stats();
    IndependentSetSolver::new(&g).find().unwrap();
    let after = scratch_pool::state_pool().stats();
    assert_eq!(after.reused, before.reused + 1);
}

#[test]
fn config_serde_round_trip() {
    let cfg: ScratchPoolConfig = serde_json::from_str(r#"{"max_buffers_per_class":3}"#).unwrap();
    assert_eq!(cfg.max_buffers_per_class, 3);
    assert_eq!(serde_json::to_string(&cfg).unwrap(), r#"{"max_buffers_per_class":3}"#);
}
