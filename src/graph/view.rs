//! Non-destructive, predicate-filtered projection of a [`GraphStore`].
//!
//! The store is never touched. A [`GraphView`] keeps the current node
//! predicate and the last snapshot computed from it; the snapshot only
//! changes when [`GraphView::refresh`] is called.

use std::collections::HashSet;

use super::store::GraphStore;
use super::types::{Edge, Node, NodeId};

/// Which nodes are eligible for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
	/// No filter active.
	#[default]
	All,
	/// Only these ids.
	Only(HashSet<NodeId>),
}

impl Visibility {
	/// Whether node `id` is visible.
	pub fn admits(&self, id: NodeId) -> bool {
		match self {
			Visibility::All => true,
			Visibility::Only(ids) => ids.contains(&id),
		}
	}

	/// Whether a filter is active.
	pub fn is_filtered(&self) -> bool {
		matches!(self, Visibility::Only(_))
	}
}

/// Static edge predicate: inverse edges are never displayed.
pub fn displays_edge(edge: &Edge) -> bool {
	!edge.relation.is_inverse()
}

/// The nodes admitted by `visibility`, in collection order.
pub fn visible_nodes<'a>(
	nodes: impl IntoIterator<Item = &'a Node>,
	visibility: &Visibility,
) -> Vec<Node> {
	nodes
		.into_iter()
		.filter(|n| visibility.admits(n.id))
		.cloned()
		.collect()
}

/// What is currently drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
	/// Visible nodes in collection order.
	pub nodes: Vec<Node>,
	/// Displayed edges whose endpoints are both visible.
	pub edges: Vec<Edge>,
}

impl ViewSnapshot {
	/// Ids of the visible nodes.
	pub fn node_ids(&self) -> HashSet<NodeId> {
		self.nodes.iter().map(|n| n.id).collect()
	}
}

/// Current predicate plus the snapshot last computed from it.
#[derive(Clone, Debug, Default)]
pub struct GraphView {
	visibility: Visibility,
	snapshot: ViewSnapshot,
}

impl GraphView {
	/// Current predicate.
	pub fn visibility(&self) -> &Visibility {
		&self.visibility
	}

	/// Replaces the predicate. The snapshot is unchanged until `refresh`.
	pub fn set_visibility(&mut self, visibility: Visibility) {
		self.visibility = visibility;
	}

	/// Recomputes the snapshot from `store`. Idempotent.
	pub fn refresh(&mut self, store: &GraphStore) {
		let nodes = visible_nodes(store.nodes(), &self.visibility);
		let shown: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
		let edges = store
			.edges()
			.filter(|e| displays_edge(e))
			.filter(|e| shown.contains(&e.from) && shown.contains(&e.to))
			.copied()
			.collect();
		self.snapshot = ViewSnapshot { nodes, edges };
	}

	/// Result of the last `refresh`.
	pub fn snapshot(&self) -> &ViewSnapshot {
		&self.snapshot
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{RowIdMapping, load_csv};

	fn store() -> GraphStore {
		let mut store = GraphStore::default();
		let text = "Name,Ate Row,Kuya Row\nA,,\nB,2,\nC,,3\nD,,\n";
		load_csv(text, RowIdMapping::default(), &mut store).unwrap();
		store
	}

	#[test]
	fn test_unfiltered_shows_all_nodes_no_inverse_edges() {
		let store = store();
		let mut view = GraphView::default();
		view.refresh(&store);

		assert_eq!(view.snapshot().node_ids(), HashSet::from([2, 3, 4, 5]));
		assert_eq!(view.snapshot().edges.len(), 2);
		assert!(view.snapshot().edges.iter().all(displays_edge));
		assert_eq!(store.edge_count(), 4);
	}

	#[test]
	fn test_refresh_is_idempotent() {
		let store = store();
		let mut view = GraphView::default();
		view.set_visibility(Visibility::Only(HashSet::from([2, 3])));
		view.refresh(&store);
		let first = view.snapshot().clone();
		view.refresh(&store);
		assert_eq!(view.snapshot(), &first);
	}

	#[test]
	fn test_predicate_change_waits_for_refresh() {
		let store = store();
		let mut view = GraphView::default();
		view.refresh(&store);
		view.set_visibility(Visibility::Only(HashSet::from([5])));
		assert_eq!(view.snapshot().nodes.len(), 4);

		view.refresh(&store);
		assert_eq!(view.snapshot().node_ids(), HashSet::from([5]));
	}

	#[test]
	fn test_edges_to_hidden_nodes_dropped() {
		let store = store();
		let mut view = GraphView::default();
		view.set_visibility(Visibility::Only(HashSet::from([3, 4])));
		view.refresh(&store);
		assert_eq!(
			view.snapshot().edges,
			vec![Edge::new(4, 3, crate::graph::Relation::Kuya)]
		);
	}

	#[test]
	fn test_filtering_leaves_store_untouched() {
		let store = store();
		let (nodes, edges) = (store.node_count(), store.edge_count());
		let mut view = GraphView::default();
		view.set_visibility(Visibility::Only(HashSet::new()));
		view.refresh(&store);
		assert!(view.snapshot().nodes.is_empty());
		assert_eq!((store.node_count(), store.edge_count()), (nodes, edges));
	}

	#[test]
	fn test_visible_nodes_keeps_order() {
		let store = store();
		let only = Visibility::Only(HashSet::from([5, 2]));
		let ids: Vec<_> = visible_nodes(store.nodes(), &only)
			.into_iter()
			.map(|n| n.id)
			.collect();
		assert_eq!(ids, vec![2, 5]);
		assert!(only.is_filtered());
		assert!(!Visibility::All.is_filtered());
	}
}
