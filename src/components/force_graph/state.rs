use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::graph::NodeId;

pub const NODE_RADIUS: f64 = 7.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const NODE_BORDER: &str = "#fdcb6e";
pub const NODE_FILL: &str = "#ffeaa7";
pub const FOCUS_FILL: &str = "#fdcb6e";

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub focused: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LinkInfo {
	pub color: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hovered node and its direct neighbors; `fade` eases 0..1 towards the
/// highlight and back.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub fade: f64,
}

fn simulation() -> SimulationParameters {
	SimulationParameters {
		force_charge: 200.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			edges: Vec::new(),
		};
		state.sync(data);
		state
	}

	/// Rebuilds the simulation for `data`. Nodes that were already on screen
	/// keep their position and pin.
	pub fn sync(&mut self, data: &GraphData) {
		let mut placed: HashMap<NodeId, (f32, f32, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(
				node.data.user_data.id,
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = ForceGraph::new(simulation());
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y, is_anchor) = placed.get(&node.id).copied().unwrap_or_else(|| {
				// Seed newcomers on a ring around the origin.
				let angle = (i as f64) * 2.0 * PI / count;
				((120.0 * angle.cos()) as f32, (120.0 * angle.sin()) as f32, false)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id,
					label: node.label.clone(),
					focused: node.focused,
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData {
					user_data: LinkInfo { color: link.color },
				});
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.hover = HoverState::default();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts dragging the node under the pointer, or panning if there is none.
	pub fn press(&mut self, sx: f64, sy: f64) {
		match self.node_at_position(sx, sy) {
			Some(idx) => {
				self.drag.node_idx = Some(idx);
				self.drag.start_x = sx;
				self.drag.start_y = sy;
				let drag = &mut self.drag;
				self.graph.visit_nodes(|node| {
					if node.index() == idx {
						drag.node_start_x = node.x();
						drag.node_start_y = node.y();
					}
				});
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx {
			let (nx, ny) = (
				self.drag.node_start_x + ((sx - self.drag.start_x) / self.transform.k) as f32,
				self.drag.node_start_y + ((sy - self.drag.start_y) / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			return;
		}

		let hovered = self.node_at_position(sx, sy);
		self.set_hover(hovered);
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends any drag or pan. A dragged node stays pinned where it was dropped.
	pub fn release(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn leave(&mut self) {
		self.release();
		self.set_hover(None);
	}

	/// Zooms by `factor` keeping the graph point under (sx, sy) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	/// Hovered node or one of its neighbors.
	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.fade += (target - self.hover.fade) * 6.0 * dt as f64;
		if self.hover.fade < 0.01 && target == 0.0 {
			self.hover.fade = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
