//! Search state and the actions behind the search bar.

use log::debug;

use super::store::GraphStore;
use super::traversal::{Direction, traverse};
use super::types::NodeId;
use super::view::{GraphView, Visibility};

/// Finds a node by label, ignoring case.
///
/// With duplicate labels the earliest row wins.
pub fn resolve_label(store: &GraphStore, text: &str) -> Option<NodeId> {
	let needle = text.to_lowercase();
	store
		.nodes()
		.find(|n| n.label.to_lowercase() == needle)
		.map(|n| n.id)
}

/// Whether the view is narrowed, and from where.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterState {
	/// All nodes visible.
	#[default]
	Cleared,
	/// Only nodes reachable from `start`.
	Filtered {
		/// Resolved search target.
		start: NodeId,
		/// Direction walked from it.
		direction: Direction,
	},
}

impl FilterState {
	/// Start node of the active filter.
	pub fn start(&self) -> Option<NodeId> {
		match self {
			FilterState::Cleared => None,
			FilterState::Filtered { start, .. } => Some(*start),
		}
	}
}

/// Result of a search action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
	/// The query matched and the view was narrowed.
	Found {
		/// Matched node.
		start: NodeId,
		/// Number of visible nodes, `start` included.
		reachable: usize,
	},
	/// No label matched; the view is reset.
	NotFound,
}

/// Query text, filter state and the view they drive.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
	query: String,
	state: FilterState,
	view: GraphView,
}

impl Explorer {
	/// Current search text.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Replaces the search text without touching the view.
	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
	}

	/// Current filter state.
	pub fn state(&self) -> FilterState {
		self.state
	}

	/// The view driven by this explorer.
	pub fn view(&self) -> &GraphView {
		&self.view
	}

	/// Shows every node again.
	pub fn reset(&mut self, store: &GraphStore) {
		self.state = FilterState::Cleared;
		self.view.set_visibility(Visibility::All);
		self.view.refresh(store);
	}

	/// Resets, then narrows the view to what is reachable from the queried
	/// person. An unmatched query leaves the view reset.
	pub fn show(&mut self, store: &GraphStore, direction: Direction) -> SearchOutcome {
		self.reset(store);
		let Some(start) = resolve_label(store, &self.query) else {
			debug!("no node labelled {:?}", self.query);
			return SearchOutcome::NotFound;
		};

		let reachable = traverse(store, start, direction);
		let count = reachable.len();
		debug!("{:?} from {}: {} nodes", direction, start, count);

		self.state = FilterState::Filtered { start, direction };
		self.view.set_visibility(Visibility::Only(reachable));
		self.view.refresh(store);
		SearchOutcome::Found {
			start,
			reachable: count,
		}
	}

	/// [`Explorer::show`] along edges.
	pub fn show_successors(&mut self, store: &GraphStore) -> SearchOutcome {
		self.show(store, Direction::Outgoing)
	}

	/// [`Explorer::show`] against edges.
	pub fn show_predecessors(&mut self, store: &GraphStore) -> SearchOutcome {
		self.show(store, Direction::Incoming)
	}

	/// [`Explorer::show`] both ways.
	pub fn show_relatives(&mut self, store: &GraphStore) -> SearchOutcome {
		self.show(store, Direction::Either)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::graph::{RowIdMapping, load_csv};

	fn load(body: &str) -> GraphStore {
		let mut store = GraphStore::default();
		let text = format!("Name,Ate Row,Kuya Row\n{body}");
		load_csv(&text, RowIdMapping::default(), &mut store).unwrap();
		store
	}

	fn loaded_explorer(store: &GraphStore) -> Explorer {
		let mut explorer = Explorer::default();
		explorer.reset(store);
		explorer
	}

	fn visible(explorer: &Explorer) -> HashSet<NodeId> {
		explorer.view().snapshot().node_ids()
	}

	#[test]
	fn test_resolve_label_case_insensitive() {
		let store = load("Maria,,\nJose,2,\n");
		assert_eq!(resolve_label(&store, "jose"), Some(3));
		assert_eq!(resolve_label(&store, "MARIA"), Some(2));
		assert_eq!(resolve_label(&store, "Jos"), None);
		assert_eq!(resolve_label(&store, ""), None);
	}

	#[test]
	fn test_resolve_label_first_match_wins() {
		let store = load("Ana,,\nana,,\nANA,,\n");
		assert_eq!(resolve_label(&store, "Ana"), Some(2));
	}

	#[test]
	fn test_show_successors() {
		let store = load("A,,\nB,2,\nC,,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("b");

		let outcome = explorer.show_successors(&store);
		assert_eq!(
			outcome,
			SearchOutcome::Found {
				start: 3,
				reachable: 2
			}
		);
		assert_eq!(visible(&explorer), HashSet::from([2, 3]));
		assert_eq!(
			explorer.state(),
			FilterState::Filtered {
				start: 3,
				direction: Direction::Outgoing
			}
		);
	}

	#[test]
	fn test_show_predecessors() {
		let store = load("A,,\nB,2,\nC,,2\nD,,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("A");
		explorer.show_predecessors(&store);
		assert_eq!(visible(&explorer), HashSet::from([2, 3, 4]));
	}

	#[test]
	fn test_show_relatives() {
		let store = load("A,,\nB,2,\nC,,2\nD,,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("b");
		explorer.show_relatives(&store);
		assert_eq!(visible(&explorer), HashSet::from([2, 3, 4]));
	}

	#[test]
	fn test_not_found_clears_filter() {
		let store = load("A,,\nB,2,\nC,,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("b");
		explorer.show_successors(&store);

		explorer.set_query("zzz");
		assert_eq!(explorer.show_successors(&store), SearchOutcome::NotFound);
		assert_eq!(explorer.state(), FilterState::Cleared);
		assert_eq!(visible(&explorer), HashSet::from([2, 3, 4]));
	}

	#[test]
	fn test_reset_restores_loaded_view() {
		let store = load("A,,\nB,2,\nC,,3\nD,,\n");
		let mut explorer = loaded_explorer(&store);
		let after_load = explorer.view().snapshot().clone();

		explorer.set_query("d");
		explorer.show_predecessors(&store);
		assert_eq!(visible(&explorer), HashSet::from([5]));

		explorer.reset(&store);
		assert_eq!(explorer.view().snapshot(), &after_load);
		assert!(!explorer.view().visibility().is_filtered());
	}

	#[test]
	fn test_double_reset_is_noop() {
		let store = load("A,,\nB,2,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.reset(&store);
		let once = explorer.view().snapshot().clone();
		explorer.reset(&store);
		assert_eq!(explorer.view().snapshot(), &once);
		assert_eq!(once.nodes.len(), 2);
	}

	#[test]
	fn test_new_search_replaces_previous() {
		let store = load("A,,\nB,2,\nC,,\nD,4,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("b");
		explorer.show_successors(&store);
		explorer.set_query("d");
		explorer.show_successors(&store);
		assert_eq!(visible(&explorer), HashSet::from([4, 5]));
	}

	#[test]
	fn test_query_edit_does_not_refilter() {
		let store = load("A,,\nB,2,\nC,,\n");
		let mut explorer = loaded_explorer(&store);
		explorer.set_query("b");
		explorer.show_successors(&store);
		explorer.set_query("c");
		assert_eq!(visible(&explorer), HashSet::from([2, 3]));
	}
}
