use gf2::BitMatrix;
use legonet::{
    Connection, Leg, LegClassification, LegoError, LegoKind, NetworkNode, NodeDefinition, StabilizerCodeTensor,
    TensorNetwork,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn leg(owner_id: &str, leg_index: usize) -> Leg {
    Leg::new(owner_id, leg_index)
}

fn connection(from: (&str, usize), to: (&str, usize)) -> Connection {
    Connection::new(leg(from.0, from.1), leg(to.0, to.1)).unwrap()
}

fn node(id: &str, kind: LegoKind) -> NetworkNode {
    NetworkNode::new(id, kind.node_definition())
}

fn network(nodes: Vec<NetworkNode>, connections: Vec<Connection>) -> TensorNetwork {
    TensorNetwork::new(nodes, connections).unwrap()
}

/// The matrix of `tensor` with its column pairs rearranged to follow `legs`.
fn aligned(tensor: &StabilizerCodeTensor, legs: &[Leg]) -> BitMatrix {
    let n = tensor.leg_count();
    let positions: Vec<usize> = legs.iter().map(|leg| tensor.position_of(leg).unwrap()).collect();
    let columns: Vec<usize> = positions.iter().copied().chain(positions.iter().map(|position| n + position)).collect();
    tensor.matrix().with_columns(&columns)
}

fn six_node_connections() -> Vec<Connection> {
    vec![
        connection(("5", 0), ("6", 3)),
        connection(("4", 0), ("5", 3)),
        connection(("4", 2), ("3", 3)),
        connection(("4", 1), ("3", 0)),
        connection(("5", 2), ("2", 3)),
        connection(("6", 1), ("1", 0)),
        connection(("2", 1), ("1", 2)),
        connection(("1", 3), ("2", 0)),
    ]
}

fn six_node_network(connections: Vec<Connection>) -> TensorNetwork {
    let nodes = ["1", "2", "3", "4", "5", "6"].map(|id| node(id, LegoKind::T5)).to_vec();
    network(nodes, connections)
}

fn tree_network(connections: Vec<Connection>) -> TensorNetwork {
    let nodes = vec![
        node("a", LegoKind::ZRepCode(3)),
        node("b", LegoKind::ZRepCode(3)),
        node("c", LegoKind::ZRepCode(3)),
        node("d", LegoKind::Hadamard),
        node("e", LegoKind::Steane),
    ];
    network(nodes, connections)
}

fn tree_connections() -> Vec<Connection> {
    vec![
        connection(("a", 2), ("b", 0)),
        connection(("b", 2), ("c", 0)),
        connection(("c", 2), ("d", 0)),
        connection(("e", 7), ("b", 1)),
    ]
}

#[test]
fn stoppers_on_logical_legs_leave_the_stabilizer_code() {
    let encoder = BitMatrix::try_from_rows(&[
        [1u8, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0],
        [1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0],
        [0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
    ])
    .unwrap();
    let free = BitMatrix::try_from_rows(&[[0u8, 0]]).unwrap();
    let nodes = vec![
        NetworkNode::new("1", NodeDefinition::new("custom", encoder)),
        NetworkNode::new("2", NodeDefinition::new("stopper_i", free.clone())),
        NetworkNode::new("3", NodeDefinition::new("stopper_i", free)),
    ];
    let connections = vec![connection(("1", 4), ("2", 0)), connection(("1", 5), ("3", 0))];
    let tensor = network(nodes, connections).conjoin_nodes().unwrap();

    let expected = BitMatrix::try_from_rows(&[[1u8, 1, 1, 1, 0, 0, 0, 0], [0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
    assert_eq!(tensor.matrix(), &expected);
    assert_eq!(tensor.legs(), &[leg("1", 0), leg("1", 1), leg("1", 2), leg("1", 3)]);
}

#[test]
fn six_node_ring_with_chords() {
    let tensor = six_node_network(six_node_connections()).conjoin_nodes().unwrap();

    let expected_legs = vec![
        leg("4", 3),
        leg("4", 4),
        leg("5", 1),
        leg("5", 4),
        leg("6", 0),
        leg("6", 2),
        leg("6", 4),
        leg("3", 1),
        leg("3", 2),
        leg("3", 4),
        leg("2", 2),
        leg("2", 4),
        leg("1", 1),
        leg("1", 4),
    ];
    assert_eq!(tensor.legs(), expected_legs.as_slice());

    let golden = BitMatrix::try_from_rows(&[
        [1u8, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
    ])
    .unwrap();
    let reduced = aligned(&tensor, &expected_legs).reduced().without_zero_rows();
    assert_eq!(reduced.shape(), (10, 28));
    assert_eq!(reduced, golden);
}

#[test]
fn single_node_is_returned_as_is() {
    let definition = NodeDefinition::new("custom", "1100|1100|0011".parse().unwrap());
    let tensor = network(vec![NetworkNode::new("x", definition.clone())], vec![])
        .conjoin_nodes()
        .unwrap();
    assert_eq!(tensor.matrix(), &definition.parity_check_matrix);
    assert_eq!(tensor.legs(), &[leg("x", 0), leg("x", 1)]);
}

#[test]
fn single_node_with_a_loop() {
    let tensor = network(vec![node("a", LegoKind::XRepCode(4))], vec![connection(("a", 0), ("a", 3))])
        .conjoin_nodes()
        .unwrap();
    assert_eq!(tensor.legs(), &[leg("a", 1), leg("a", 2)]);
    assert_eq!(tensor.matrix(), &LegoKind::Identity.parity_check_matrix());
}

#[test]
fn disjoint_components_are_combined_in_node_order() {
    let nodes = vec![
        node("c", LegoKind::StopperX),
        node("a", LegoKind::Hadamard),
        node("b", LegoKind::Hadamard),
    ];
    let tensor = network(nodes, vec![connection(("b", 0), ("a", 1))]).conjoin_nodes().unwrap();
    assert_eq!(tensor.legs(), &[leg("c", 0), leg("b", 1), leg("a", 0)]);
    assert!(
        tensor
            .matrix()
            .is_gauss_equivalent(&"100000|011000|000011".parse().unwrap())
    );
}

#[test]
fn unconnected_nodes_form_a_tensor_product() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("b", LegoKind::StopperX)];
    let tensor = network(nodes, vec![]).conjoin_nodes().unwrap();
    assert_eq!(tensor.legs(), &[leg("a", 0), leg("a", 1), leg("b", 0)]);
    assert_eq!(tensor.matrix(), &"100010|010100|001000".parse::<BitMatrix>().unwrap());
}

#[test]
fn hadamard_turns_z_stopper_into_x_stopper() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("b", LegoKind::StopperZ)];
    let tensor = network(nodes, vec![connection(("a", 1), ("b", 0))]).conjoin_nodes().unwrap();
    assert_eq!(tensor.legs(), &[leg("a", 0)]);
    assert_eq!(tensor.matrix(), &LegoKind::StopperX.parity_check_matrix());
}

#[test]
fn unknown_node_is_named() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("b", LegoKind::Hadamard)];
    let connections = vec![connection(("a", 1), ("b", 0)), connection(("b", 1), ("z", 0))];
    assert_eq!(
        network(nodes, connections).conjoin_nodes(),
        Err(LegoError::UnknownNode { node_id: "z".to_owned() })
    );
}

#[test]
fn empty_network_is_rejected() {
    assert_eq!(network(vec![], vec![]).conjoin_nodes(), Err(LegoError::EmptyNetwork));
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("a", LegoKind::Identity)];
    assert_eq!(
        TensorNetwork::new(nodes, vec![]),
        Err(LegoError::DuplicateNode { node_id: "a".to_owned() })
    );
}

#[test]
fn a_leg_cannot_be_contracted_twice() {
    let nodes = vec![node("a", LegoKind::Identity), node("b", LegoKind::Identity)];
    let connections = vec![connection(("a", 1), ("b", 0)), connection(("a", 1), ("b", 1))];
    assert_eq!(
        network(nodes, connections).conjoin_nodes(),
        Err(LegoError::LegNotFound {
            leg: leg("a", 1),
            owner_id: "a".to_owned()
        })
    );
}

#[test]
fn deserialized_self_connections_are_rejected() {
    let looped: Connection =
        serde_json::from_str(r#"{"from":{"owner_id":"a","leg_index":0},"to":{"owner_id":"a","leg_index":0}}"#)
            .unwrap();
    assert_eq!(
        TensorNetwork::new(vec![node("a", LegoKind::Identity)], vec![looped]),
        Err(LegoError::SelfConnection { leg: leg("a", 0) })
    );
}

#[test]
fn leg_classification() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("b", LegoKind::XRepCode(3))];
    let inner = vec![connection(("a", 1), ("b", 0))];
    let mut all = inner.clone();
    all.push(connection(("q", 0), ("b", 2)));
    let network = network(nodes, inner);

    assert_eq!(
        network.external_and_dangling_legs(&all),
        LegClassification {
            external: vec![leg("b", 2)],
            dangling: vec![leg("a", 0), leg("b", 1)],
        }
    );
    assert_eq!(
        network.external_and_dangling_legs(&[]),
        LegClassification {
            external: vec![],
            dangling: vec![leg("a", 0), leg("a", 1), leg("b", 0), leg("b", 1), leg("b", 2)],
        }
    );
}

#[test]
fn signature_ignores_list_order() {
    let forward = six_node_network(six_node_connections());
    let mut connections: Vec<Connection> = six_node_connections()
        .into_iter()
        .map(|connection| Connection::new(connection.to().clone(), connection.from().clone()).unwrap())
        .collect();
    connections.reverse();
    let mut nodes = forward.nodes().to_vec();
    nodes.reverse();
    let backward = network(nodes, connections);
    assert_eq!(forward.signature(), backward.signature());
}

#[test]
fn signature_tracks_topology_and_leg_counts() {
    let base = tree_network(tree_connections());

    let mut rewired = tree_connections();
    rewired[3] = connection(("e", 7), ("b", 2));
    assert_ne!(base.signature(), tree_network(rewired).signature());

    let mut fewer = tree_connections();
    fewer.pop();
    assert_ne!(base.signature(), tree_network(fewer).signature());

    let mut nodes = base.nodes().to_vec();
    nodes[0] = node("a", LegoKind::ZRepCode(4));
    assert_ne!(base.signature(), network(nodes, tree_connections()).signature());
}

#[test]
fn enumerator_request_checks_open_legs() {
    let nodes = vec![node("a", LegoKind::Hadamard), node("b", LegoKind::XRepCode(3))];
    let inner = vec![connection(("a", 1), ("b", 0))];
    let mut all = inner.clone();
    all.push(connection(("q", 0), ("b", 2)));
    let network = network(nodes, inner.clone());

    let request = network
        .enumerator_request(&all, &[leg("a", 0), leg("b", 2)], Some(4))
        .unwrap();
    assert_eq!(request.connections, inner);
    assert_eq!(request.truncate_length, Some(4));
    assert_eq!(request.open_legs, vec![leg("a", 0), leg("b", 2)]);
    assert_eq!(request.legos.len(), 2);
    assert_eq!(request.legos["b"].short_name, "XREP3");
    assert_eq!(request.legos["a"].parity_check_matrix, vec![vec![1, 0, 0, 1], vec![0, 1, 1, 0]]);

    assert_eq!(
        network.enumerator_request(&all, &[leg("b", 0)], None),
        Err(LegoError::InvalidOpenLeg { leg: leg("b", 0) })
    );
    assert_eq!(
        network.enumerator_request(&all, &[leg("q", 0)], None),
        Err(LegoError::InvalidOpenLeg { leg: leg("q", 0) })
    );
}

fn permuted(connections: Vec<Connection>, seed: u64) -> Vec<Connection> {
    let mut random_number_generator = StdRng::seed_from_u64(seed);
    let mut connections: Vec<Connection> = connections
        .into_iter()
        .map(|connection| {
            if random_number_generator.r#gen() {
                Connection::new(connection.to().clone(), connection.from().clone()).unwrap()
            } else {
                connection
            }
        })
        .collect();
    connections.shuffle(&mut random_number_generator);
    connections
}

proptest! {
    #[test]
    fn contraction_order_does_not_matter_on_a_cycle(seed in any::<u64>()) {
        let reference = six_node_network(six_node_connections()).conjoin_nodes().unwrap();
        let shuffled = six_node_network(permuted(six_node_connections(), seed)).conjoin_nodes().unwrap();
        let legs = reference.legs();
        assert_eq!(shuffled.leg_count(), legs.len());
        assert!(aligned(&shuffled, legs).is_gauss_equivalent(reference.matrix()));
    }

    #[test]
    fn contraction_order_does_not_matter_on_a_tree(seed in any::<u64>()) {
        let reference = tree_network(tree_connections()).conjoin_nodes().unwrap();
        let shuffled = tree_network(permuted(tree_connections(), seed)).conjoin_nodes().unwrap();
        let legs = reference.legs();
        assert_eq!(shuffled.leg_count(), legs.len());
        assert!(aligned(&shuffled, legs).is_gauss_equivalent(reference.matrix()));
    }

    #[test]
    fn signature_is_stable_under_permutation(seed in any::<u64>()) {
        let reference = tree_network(tree_connections()).signature();
        let mut random_number_generator = StdRng::seed_from_u64(seed);
        let mut nodes = tree_network(vec![]).nodes().to_vec();
        nodes.shuffle(&mut random_number_generator);
        let shuffled = network(nodes, permuted(tree_connections(), seed)).signature();
        assert_eq!(shuffled, reference);
    }
}
