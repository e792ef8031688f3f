use std::error::Error;

use flexi_logger::Logger;
use legonet::{Connection, ContractedTensor, Leg, LegoKind, NetworkNode, TensorNetwork, recognize};
use log::{LevelFilter, info};

fn connection(from: (&str, usize), to: (&str, usize)) -> legonet::Result<Connection> {
    Connection::new(Leg::new(from.0, from.1), Leg::new(to.0, to.1))
}

// Six [[5,1,2]] legos in a ring with two chords.
fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::with(LevelFilter::Debug).start()?;

    let nodes = ["1", "2", "3", "4", "5", "6"]
        .map(|id| NetworkNode::new(id, LegoKind::T5.node_definition()))
        .to_vec();
    let connections = vec![
        connection(("5", 0), ("6", 3))?,
        connection(("4", 0), ("5", 3))?,
        connection(("4", 2), ("3", 3))?,
        connection(("4", 1), ("3", 0))?,
        connection(("5", 2), ("2", 3))?,
        connection(("6", 1), ("1", 0))?,
        connection(("2", 1), ("1", 2))?,
        connection(("1", 3), ("2", 0))?,
    ];
    let network = TensorNetwork::new(nodes, connections)?;
    info!(signature:% = network.signature(); "Network built");

    let tensor = network.conjoin_nodes()?.reduced();
    info!(legs = tensor.leg_count(), rank = tensor.matrix().rank(), lego:? = recognize(tensor.matrix()); "Contracted");
    println!("{}", serde_json::to_string_pretty(&ContractedTensor::from(&tensor))?);

    let logical_legs = network
        .nodes()
        .iter()
        .flat_map(|node| node.definition.logical_legs.iter().map(|&leg_index| Leg::new(node.id.clone(), leg_index)))
        .collect::<Vec<_>>();
    let request = network.enumerator_request(network.connections(), &logical_legs, Some(4))?;
    println!("{}", request.to_json()?);
    Ok(())
}
