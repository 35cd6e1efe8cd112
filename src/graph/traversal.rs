//! Breadth-first reachability over the displayed relations.
//!
//! Only primary edges (`Ate`, `Kuya`) are walked. Their `Ading` mirrors would
//! make every direction reach the whole connected family.

use std::collections::{HashSet, VecDeque};

use super::store::GraphStore;
use super::types::{Edge, NodeId};

/// Which way edges are followed from the start node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Along edges, `from` to `to`: the people this person points at.
	Outgoing,
	/// Against edges: the people pointing at this person.
	Incoming,
	/// Both ways.
	Either,
}

fn walkable(edge: &&Edge) -> bool {
	!edge.relation.is_inverse()
}

fn neighbors(store: &GraphStore, id: NodeId, direction: Direction) -> Vec<NodeId> {
	let forward = store.edges_from(id).filter(walkable).map(|e| e.to);
	let backward = store.edges_to(id).filter(walkable).map(|e| e.from);
	match direction {
		Direction::Outgoing => forward.collect(),
		Direction::Incoming => backward.collect(),
		Direction::Either => forward.chain(backward).collect(),
	}
}

/// Returns every node reachable from `start`, `start` included.
///
/// Level-order BFS; each id is enqueued at most once, so parallel edges and
/// cycles need no special handling.
pub fn traverse(store: &GraphStore, start: NodeId, direction: Direction) -> HashSet<NodeId> {
	let mut visited = HashSet::from([start]);
	let mut queue = VecDeque::from([start]);

	while !queue.is_empty() {
		let level_size = queue.len();
		for _ in 0..level_size {
			let Some(current) = queue.pop_front() else {
				break;
			};
			for next in neighbors(store, current, direction) {
				if visited.insert(next) {
					queue.push_back(next);
				}
			}
		}
	}
	visited
}
