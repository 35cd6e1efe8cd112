use std::collections::HashMap;

use super::types::{Edge, Node, NodeId};
use crate::error::{GraphError, Result};

/// Owned node and edge collections.
///
/// Append-only: nodes and edges are never removed or changed once added.
/// Nodes keep their insertion order, which is row order for loaded data.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	index: HashMap<NodeId, usize>,
	edges: Vec<Edge>,
	outgoing: HashMap<NodeId, Vec<usize>>,
	incoming: HashMap<NodeId, Vec<usize>>,
}

impl GraphStore {
	/// Adds a node; its id must be new.
	pub fn add_node(&mut self, node: Node) -> Result<()> {
		if self.index.contains_key(&node.id) {
			return Err(GraphError::DuplicateNode(node.id));
		}
		self.index.insert(node.id, self.nodes.len());
		self.nodes.push(node);
		Ok(())
	}

	/// Both endpoints must already be in the store.
	pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
		for id in [edge.from, edge.to] {
			if !self.contains(id) {
				return Err(GraphError::UnknownNode(id));
			}
		}
		let pos = self.edges.len();
		self.outgoing.entry(edge.from).or_default().push(pos);
		self.incoming.entry(edge.to).or_default().push(pos);
		self.edges.push(edge);
		Ok(())
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: NodeId) -> bool {
		self.index.contains_key(&id)
	}

	/// Node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.index.get(&id).map(|&i| &self.nodes[i])
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// All edges in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter()
	}

	/// Edges leaving `id`, in insertion order.
	pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
		self.adjacent(&self.outgoing, id)
	}

	/// Edges arriving at `id`, in insertion order.
	pub fn edges_to(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
		self.adjacent(&self.incoming, id)
	}

	fn adjacent<'a>(
		&'a self,
		table: &'a HashMap<NodeId, Vec<usize>>,
		id: NodeId,
	) -> impl Iterator<Item = &'a Edge> {
		table
			.get(&id)
			.into_iter()
			.flatten()
			.map(|&pos| &self.edges[pos])
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True before anything is loaded.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
