//! Turns the family spreadsheet (CSV) into nodes and edges.
//!
//! Every accepted row becomes one person. Each filled `Ate Row` / `Kuya Row`
//! cell names another row and yields a forward edge plus its `Ading` mirror.
//! Problems with a single row are reported as [`LoadIssue`]s and never stop
//! the rest of the file from loading.

use csv::{ReaderBuilder, Trim};
use log::warn;
use serde::Deserialize;
use thiserror::Error;

use super::store::GraphStore;
use super::types::{Edge, Node, NodeId, Relation};
use crate::error::{GraphError, Result};

/// Header of the display-name column.
pub const NAME_COLUMN: &str = "Name";
/// Header of the older-sister reference column.
pub const ATE_COLUMN: &str = "Ate Row";
/// Header of the older-brother reference column.
pub const KUYA_COLUMN: &str = "Kuya Row";

/// Spreadsheet row number of the first data record: one header row, 1-based.
pub const DEFAULT_FIRST_ROW: u32 = 2;

/// Maps a record's 0-based position to its node id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowIdMapping {
	first_row: u32,
}

impl RowIdMapping {
	/// Ids start at `first_row` for the first data record.
	pub const fn new(first_row: u32) -> Self {
		Self { first_row }
	}

	/// Id of the first data record.
	pub const fn first_row(&self) -> u32 {
		self.first_row
	}

	/// Id of the record at 0-based position `index`.
	pub fn id_for(&self, index: usize) -> NodeId {
		NodeId::try_from(index)
			.unwrap_or(NodeId::MAX)
			.saturating_add(self.first_row)
	}
}

impl Default for RowIdMapping {
	fn default() -> Self {
		Self::new(DEFAULT_FIRST_ROW)
	}
}

#[derive(Debug, Deserialize)]
struct RawRow {
	#[serde(rename = "Name", default)]
	name: String,
	#[serde(rename = "Ate Row", default)]
	ate: String,
	#[serde(rename = "Kuya Row", default)]
	kuya: String,
}

/// A validated spreadsheet row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRecord {
	/// Row-derived id.
	pub id: NodeId,
	/// Non-empty display name.
	pub name: String,
	/// Row of the older sister, if given.
	pub ate: Option<NodeId>,
	/// Row of the older brother, if given.
	pub kuya: Option<NodeId>,
}

impl PersonRecord {
	fn references(&self) -> impl Iterator<Item = (Relation, &'static str, NodeId)> {
		[
			(Relation::Ate, ATE_COLUMN, self.ate),
			(Relation::Kuya, KUYA_COLUMN, self.kuya),
		]
		.into_iter()
		.filter_map(|(relation, column, target)| target.map(|t| (relation, column, t)))
	}
}

/// A problem confined to one row. The row or the offending field is skipped.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum LoadIssue {
	/// The CSV reader could not decode the row.
	#[error("row {row}: unreadable record: {reason}")]
	Unreadable {
		/// Offending row.
		row: NodeId,
		/// Reader error.
		reason: String,
	},

	/// The `Name` cell is empty.
	#[error("row {row}: empty name")]
	MissingName {
		/// Offending row.
		row: NodeId,
	},

	/// A reference cell holds something other than a row number.
	#[error("row {row}: `{column}` value {value:?} is not a row number")]
	InvalidReference {
		/// Offending row.
		row: NodeId,
		/// Column of the bad cell.
		column: &'static str,
		/// Cell content, trimmed.
		value: String,
	},

	/// A reference names a row that holds no person.
	#[error("row {row}: `{column}` points at row {target}, which holds no person")]
	DanglingReference {
		/// Offending row.
		row: NodeId,
		/// Column of the reference.
		column: &'static str,
		/// Referenced row.
		target: NodeId,
	},

	/// The store refused the row's node or edge.
	#[error("row {row}: {reason}")]
	Rejected {
		/// Offending row.
		row: NodeId,
		/// Store error.
		reason: String,
	},
}

impl LoadIssue {
	/// Row the issue belongs to.
	pub fn row(&self) -> NodeId {
		match self {
			LoadIssue::Unreadable { row, .. }
			| LoadIssue::MissingName { row }
			| LoadIssue::InvalidReference { row, .. }
			| LoadIssue::DanglingReference { row, .. }
			| LoadIssue::Rejected { row, .. } => *row,
		}
	}
}

/// Outcome of a load: what was added and what was skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	/// Data rows read, accepted or not.
	pub rows: usize,
	/// Nodes added.
	pub nodes: usize,
	/// Edges added, mirrors included.
	pub edges: usize,
	/// Everything skipped, by row.
	pub issues: Vec<LoadIssue>,
}

fn parse_reference(
	row: NodeId,
	column: &'static str,
	raw: &str,
	issues: &mut Vec<LoadIssue>,
) -> Option<NodeId> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	match raw.parse::<NodeId>() {
		Ok(target) => Some(target),
		Err(_) => {
			issues.push(LoadIssue::InvalidReference {
				row,
				column,
				value: raw.to_owned(),
			});
			None
		}
	}
}

/// Reads and validates every data row.
///
/// Fails only when the header cannot be read or lacks the `Name` column.
pub fn read_records(
	text: &str,
	mapping: RowIdMapping,
) -> Result<(Vec<PersonRecord>, Vec<LoadIssue>)> {
	let mut reader = ReaderBuilder::new()
		.trim(Trim::All)
		.flexible(true)
		.from_reader(text.as_bytes());

	let headers = reader.headers()?.clone();
	if !headers.iter().any(|h| h == NAME_COLUMN) {
		return Err(GraphError::MissingColumn(NAME_COLUMN));
	}
	for column in [ATE_COLUMN, KUYA_COLUMN] {
		if !headers.iter().any(|h| h == column) {
			warn!("data file has no `{}` column; no such relations will be drawn", column);
		}
	}

	let mut records = Vec::new();
	let mut issues = Vec::new();
	let width = headers.len();
	for (index, result) in reader.records().enumerate() {
		let row = mapping.id_for(index);
		// Short rows are padded so trailing empty cells read as empty.
		let parsed = result.and_then(|mut record| {
			while record.len() < width {
				record.push_field("");
			}
			record.deserialize::<RawRow>(Some(&headers))
		});
		let raw = match parsed {
			Ok(raw) => raw,
			Err(e) => {
				issues.push(LoadIssue::Unreadable {
					row,
					reason: e.to_string(),
				});
				continue;
			}
		};
		if raw.name.is_empty() {
			issues.push(LoadIssue::MissingName { row });
			continue;
		}
		let ate = parse_reference(row, ATE_COLUMN, &raw.ate, &mut issues);
		let kuya = parse_reference(row, KUYA_COLUMN, &raw.kuya, &mut issues);
		records.push(PersonRecord {
			id: row,
			name: raw.name,
			ate,
			kuya,
		});
	}
	Ok((records, issues))
}

/// Adds the records to `store`: all nodes first, then the edges between them.
///
/// Returns the number of nodes and edges added plus the issues found.
pub fn build_graph(
	records: &[PersonRecord],
	store: &mut GraphStore,
) -> (usize, usize, Vec<LoadIssue>) {
	let (mut nodes, mut edges) = (0, 0);
	let mut issues = Vec::new();
	let mut accepted = Vec::with_capacity(records.len());

	for record in records {
		let node = Node {
			id: record.id,
			label: record.name.clone(),
		};
		match store.add_node(node) {
			Ok(()) => {
				nodes += 1;
				accepted.push(record);
			}
			Err(e) => issues.push(LoadIssue::Rejected {
				row: record.id,
				reason: e.to_string(),
			}),
		}
	}

	// Only rows that produced a node contribute edges.
	for record in accepted {
		for (relation, column, target) in record.references() {
			if !store.contains(target) {
				issues.push(LoadIssue::DanglingReference {
					row: record.id,
					column,
					target,
				});
				continue;
			}
			let pair = [
				Edge::new(record.id, target, relation),
				Edge::new(target, record.id, Relation::Ading),
			];
			for edge in pair {
				match store.add_edge(edge) {
					Ok(()) => edges += 1,
					Err(e) => issues.push(LoadIssue::Rejected {
						row: record.id,
						reason: e.to_string(),
					}),
				}
			}
		}
	}
	(nodes, edges, issues)
}

/// Parses `text` and fills `store`, skipping bad rows and fields.
pub fn load_csv(text: &str, mapping: RowIdMapping, store: &mut GraphStore) -> Result<LoadReport> {
	let (records, mut issues) = read_records(text, mapping)?;
	let rows = records.len() + issues.iter().filter(|i| is_row_level(i)).count();
	let (nodes, edges, build_issues) = build_graph(&records, store);
	issues.extend(build_issues);
	issues.sort_by_key(LoadIssue::row);

	for issue in &issues {
		warn!("skipped: {}", issue);
	}
	Ok(LoadReport {
		rows,
		nodes,
		edges,
		issues,
	})
}

fn is_row_level(issue: &LoadIssue) -> bool {
	matches!(
		issue,
		LoadIssue::Unreadable { .. } | LoadIssue::MissingName { .. }
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	const HEADER: &str = "Name,Ate Row,Kuya Row\n";

	fn load(body: &str) -> (GraphStore, LoadReport) {
		let mut store = GraphStore::default();
		let text = format!("{HEADER}{body}");
		let report = load_csv(&text, RowIdMapping::default(), &mut store).unwrap();
		(store, report)
	}

	fn has_edge(store: &GraphStore, from: NodeId, to: NodeId, relation: Relation) -> bool {
		store.edges().any(|e| *e == Edge::new(from, to, relation))
	}

	#[test]
	fn test_row_id_mapping() {
		let mapping = RowIdMapping::default();
		assert_eq!(mapping.id_for(0), 2);
		assert_eq!(mapping.id_for(5), 7);
		assert_eq!(RowIdMapping::new(1).id_for(0), 1);
	}

	#[test]
	fn test_forward_and_inverse_edges() {
		let (store, report) = load("A,,\nB,2,\n");
		assert_eq!(store.node(2).unwrap().label, "A");
		assert_eq!(store.node(3).unwrap().label, "B");
		assert!(has_edge(&store, 3, 2, Relation::Ate));
		assert!(has_edge(&store, 2, 3, Relation::Ading));
		assert_eq!(store.edge_count(), 2);
		assert!(report.issues.is_empty());
		assert_eq!((report.rows, report.nodes, report.edges), (2, 2, 2));
	}

	#[test]
	fn test_empty_reference_produces_no_edge() {
		let (store, report) = load("A,,\nB,,\n");
		assert_eq!(store.node_count(), 2);
		assert_eq!(store.edge_count(), 0);
		assert!(report.issues.is_empty());
	}

	#[test]
	fn test_both_relations_on_one_row() {
		let (store, _) = load("A,,\nB,,\nC,2,3\n");
		assert!(has_edge(&store, 4, 2, Relation::Ate));
		assert!(has_edge(&store, 4, 3, Relation::Kuya));
		assert!(has_edge(&store, 2, 4, Relation::Ading));
		assert!(has_edge(&store, 3, 4, Relation::Ading));
		assert_eq!(store.edge_count(), 4);
	}

	#[test]
	fn test_forward_reference_to_later_row() {
		let (store, report) = load("A,3,\nB,,\n");
		assert!(has_edge(&store, 2, 3, Relation::Ate));
		assert!(report.issues.is_empty());
	}

	#[test]
	fn test_malformed_reference_skips_edge_keeps_node() {
		let (store, report) = load("A,,\nB,two,\nC,,2\n");
		assert_eq!(store.node_count(), 3);
		assert!(store.edges_from(3).next().is_none());
		assert!(has_edge(&store, 4, 2, Relation::Kuya));
		assert_eq!(
			report.issues,
			vec![LoadIssue::InvalidReference {
				row: 3,
				column: ATE_COLUMN,
				value: "two".into(),
			}]
		);
	}

	#[test]
	fn test_dangling_reference_rejected() {
		let (store, report) = load("A,,\nB,,40\n");
		assert_eq!(store.edge_count(), 0);
		assert_eq!(
			report.issues,
			vec![LoadIssue::DanglingReference {
				row: 3,
				column: KUYA_COLUMN,
				target: 40,
			}]
		);
	}

	#[test]
	fn test_no_dangling_edges_after_build() {
		let (store, _) = load("A,3,9\nB,,2\n,2,\nD,x,3\nE,5,1\n");
		for edge in store.edges() {
			assert!(store.contains(edge.from), "dangling from {}", edge.from);
			assert!(store.contains(edge.to), "dangling to {}", edge.to);
		}
	}

	#[test]
	fn test_missing_name_skips_row_but_keeps_numbering() {
		let (store, report) = load("A,,\n,2,\nC,2,\n");
		assert!(store.node(3).is_none());
		assert_eq!(store.node(4).unwrap().label, "C");
		assert!(has_edge(&store, 4, 2, Relation::Ate));
		assert_eq!(report.issues, vec![LoadIssue::MissingName { row: 3 }]);
		assert_eq!(report.rows, 3);
	}

	#[test]
	fn test_reference_to_skipped_row_is_dangling() {
		let (_, report) = load("A,,\n,,\nC,3,\n");
		assert!(report.issues.contains(&LoadIssue::DanglingReference {
			row: 4,
			column: ATE_COLUMN,
			target: 3,
		}));
	}

	#[test]
	fn test_whitespace_and_ragged_rows() {
		let (store, report) = load("  A  \nB , 2 \n");
		assert_eq!(store.node(2).unwrap().label, "A");
		assert!(has_edge(&store, 3, 2, Relation::Ate));
		assert!(report.issues.is_empty());
	}

	#[test]
	fn test_missing_relation_columns_are_empty() {
		let mut store = GraphStore::default();
		let report = load_csv("Name\nA\nB\n", RowIdMapping::default(), &mut store).unwrap();
		assert_eq!(report.nodes, 2);
		assert_eq!(store.edge_count(), 0);
	}

	#[test]
	fn test_missing_name_column_is_fatal() {
		let mut store = GraphStore::default();
		let err = load_csv("Label,Ate Row\nA,\n", RowIdMapping::default(), &mut store).unwrap_err();
		assert!(matches!(err, GraphError::MissingColumn(NAME_COLUMN)));
		assert!(store.is_empty());
	}

	#[test]
	fn test_custom_first_row() {
		let mut store = GraphStore::default();
		let text = format!("{HEADER}A,,\nB,1,\n");
		load_csv(&text, RowIdMapping::new(1), &mut store).unwrap();
		assert_eq!(store.node(1).unwrap().label, "A");
		assert!(has_edge(&store, 2, 1, Relation::Ate));
	}

	#[test]
	fn test_rejected_row_contributes_no_edges() {
		let records = vec![
			PersonRecord {
				id: 2,
				name: "A".into(),
				ate: None,
				kuya: None,
			},
			PersonRecord {
				id: 3,
				name: "B".into(),
				ate: Some(2),
				kuya: None,
			},
			PersonRecord {
				id: 3,
				name: "B again".into(),
				ate: None,
				kuya: Some(2),
			},
		];
		let mut store = GraphStore::default();
		let (nodes, edges, issues) = build_graph(&records, &mut store);

		assert_eq!((nodes, edges), (2, 2));
		assert_eq!(store.node(3).unwrap().label, "B");
		assert!(has_edge(&store, 3, 2, Relation::Ate));
		assert!(!has_edge(&store, 3, 2, Relation::Kuya));
		assert!(matches!(issues.as_slice(), [LoadIssue::Rejected { row: 3, .. }]));
	}

	#[test]
	fn test_issue_display_names_row_and_field() {
		let issue = LoadIssue::InvalidReference {
			row: 7,
			column: KUYA_COLUMN,
			value: "n/a".into(),
		};
		assert_eq!(
			issue.to_string(),
			"row 7: `Kuya Row` value \"n/a\" is not a row number"
		);
	}
}
