use std::fmt;

/// Identifier of a person; the spreadsheet row number the person was read from.
pub type NodeId = u32;

/// A person drawn as a graph vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	/// Row-derived id.
	pub id: NodeId,
	/// Display name.
	pub label: String,
}

/// Semantic tag of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
	/// `from` names `to` as older sister.
	Ate,
	/// `from` names `to` as older brother.
	Kuya,
	/// Generated mirror of an `Ate` or `Kuya` edge.
	Ading,
}

impl Relation {
	/// Lowercase tag as used in the data.
	pub const fn name(self) -> &'static str {
		match self {
			Relation::Ate => "ate",
			Relation::Kuya => "kuya",
			Relation::Ading => "ading",
		}
	}

	/// Stroke color for edges of this kind.
	pub const fn color(self) -> &'static str {
		match self {
			Relation::Ate => "#d63031",
			Relation::Kuya => "#2980b9",
			Relation::Ading => "#fdcb6e",
		}
	}

	/// True for edges that exist only to mirror a primary relation.
	pub const fn is_inverse(self) -> bool {
		matches!(self, Relation::Ading)
	}
}

impl fmt::Display for Relation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A directed, relation-labeled edge between two people.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Source node.
	pub from: NodeId,
	/// Target node.
	pub to: NodeId,
	/// Kind of relationship.
	pub relation: Relation,
}

impl Edge {
	/// Edge from `from` to `to`.
	pub fn new(from: NodeId, to: NodeId, relation: Relation) -> Self {
		Self { from, to, relation }
	}

	/// Stroke color of this edge.
	pub fn color(&self) -> &'static str {
		self.relation.color()
	}
}
