use crate::graph::{NodeId, ViewSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: String,
	/// Start node of the active search.
	pub focused: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn from_snapshot(snapshot: &ViewSnapshot, focus: Option<NodeId>) -> Self {
		let nodes = snapshot
			.nodes
			.iter()
			.map(|n| GraphNode {
				id: n.id,
				label: n.label.clone(),
				focused: focus == Some(n.id),
			})
			.collect();
		let links = snapshot
			.edges
			.iter()
			.map(|e| GraphLink {
				source: e.from,
				target: e.to,
				color: e.color(),
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node, Relation};

	#[test]
	fn test_from_snapshot_marks_focus_and_colors_links() {
		let snapshot = ViewSnapshot {
			nodes: vec![
				Node {
					id: 2,
					label: "A".into(),
				},
				Node {
					id: 3,
					label: "B".into(),
				},
			],
			edges: vec![Edge::new(3, 2, Relation::Ate)],
		};
		let data = GraphData::from_snapshot(&snapshot, Some(3));
		assert!(!data.nodes[0].focused);
		assert!(data.nodes[1].focused);
		assert_eq!(
			data.links,
			vec![GraphLink {
				source: 3,
				target: 2,
				color: "#d63031",
			}]
		);
	}
}
