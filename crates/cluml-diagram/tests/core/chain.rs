use cluml_core::{ChainError, Vector};
use cluml_diagram::association::{End, ManagedNode, NodeChain, NodeKind, NodeObj, Spin};

fn chain_through(points: &[(f64, f64)]) -> NodeChain {
    let mut chain = NodeChain::new(points[0].into(), points[points.len() - 1].into());
    let mut after = chain.start();
    for &p in &points[1..points.len() - 1] {
        after = chain.insert_after(after, p.into()).unwrap();
    }
    chain
}

#[test]
fn test_iteration_reaches_end() {
    let chain = chain_through(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]);
    let ids = chain.ids();
    assert_eq!(ids.len(), 4);
    assert_eq!(ids[0], chain.start());
    assert_eq!(ids[3], chain.end());
    assert_eq!(chain.edges().count(), chain.len() - 1);
}

#[test]
fn test_save_load_keeps_points() {
    let mut chain = chain_through(&[(0.0, 0.0), (30.0, 5.0), (60.0, 40.0)]);
    chain.termination_mut(End::Start).multiplicity.set_value("1");
    chain.termination_mut(End::End).tag.set_value("+owner");

    let saved = chain.save();
    let loaded = NodeChain::load(&saved).unwrap();
    let points = |c: &NodeChain| c.iter().map(|(_, n)| n.position).collect::<Vec<_>>();
    assert_eq!(points(&loaded), points(&chain));
    assert_eq!(loaded.termination(End::Start).multiplicity.value(), "1");
    assert_eq!(loaded.termination(End::End).tag.value(), "+owner");
}

#[test]
fn test_load_rejects_unknown_node_type() {
    let obj = NodeObj {
        x: 0.0,
        y: 0.0,
        next: Some(Box::new(NodeObj {
            x: 5.0,
            y: 5.0,
            ..NodeObj::default()
        })),
        next_type: Some("Bezier".to_string()),
        ..NodeObj::default()
    };
    assert_eq!(
        NodeChain::load(&obj).unwrap_err(),
        ChainError::UnknownNodeType {
            tag: "Bezier".to_string()
        }
    );
}

#[test]
fn test_load_rejects_unterminated_chain() {
    let obj = NodeObj {
        x: 0.0,
        y: 0.0,
        ..NodeObj::default()
    };
    assert_eq!(NodeChain::load(&obj).unwrap_err(), ChainError::Unterminated);
}

#[test]
fn test_straighten_then_follow_moved_end() {
    let mut chain = NodeChain::new(Vector::new(0.0, 0.0), Vector::new(100.0, 50.0));
    assert_eq!(chain.straighten().unwrap(), 1);

    let corner = chain.next_of(chain.start()).unwrap();
    assert!(chain.is_managed(corner));
    assert_eq!(chain.get(corner).unwrap().position, Vector::new(100.0, 0.0));

    chain.set_end_position(End::End, Vector::new(150.0, 80.0));
    chain.sync().unwrap();
    assert_eq!(chain.get(corner).unwrap().position, Vector::new(150.0, 0.0));
    assert_eq!(chain.straighten().unwrap(), 0);
}

#[test]
fn test_sync_heals_adjacent_managed_nodes() {
    let mut chain = NodeChain::new(Vector::new(0.0, 0.0), Vector::new(100.0, 100.0));
    let managed = ManagedNode {
        horizontal_first: true,
    };
    let first = chain
        .insert_managed_after(chain.start(), Vector::new(50.0, 0.0), managed)
        .unwrap();
    chain
        .insert_managed_after(first, Vector::new(60.0, 10.0), managed)
        .unwrap();

    assert_eq!(chain.sync().unwrap(), 1);
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.get(first).unwrap().position, Vector::new(100.0, 0.0));
}

#[test]
fn test_spin_routes_edge_through_corner() {
    let mut chain = NodeChain::new(Vector::new(0.0, 0.0), Vector::new(40.0, 30.0));
    let start = chain.start();
    chain.get_mut(start).unwrap().spin = Some(Spin::Vertical);
    assert_eq!(
        chain.polyline(),
        vec![Vector::new(0.0, 0.0), Vector::new(0.0, 30.0), Vector::new(40.0, 30.0)]
    );
}

#[test]
fn test_terminations_cannot_be_removed_and_ids_go_stale() {
    let mut chain = chain_through(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
    assert_eq!(chain.remove(chain.start()).unwrap_err(), ChainError::TerminationRemoval);

    let middle = chain.next_of(chain.start()).unwrap();
    assert_eq!(chain.get(middle).unwrap().kind(), NodeKind::Intermediate);
    chain.remove(middle).unwrap();
    assert!(matches!(chain.get(middle), Err(ChainError::StaleNode { .. })));

    let reused = chain.insert_after(chain.start(), Vector::new(1.0, 1.0)).unwrap();
    assert_ne!(reused, middle);
    assert!(!chain.contains(middle));
}
