//! Error types for loading and building the graph.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors that abort a load or reject a graph mutation.
///
/// Row-level problems are not errors: they are collected as
/// [`LoadIssue`](crate::graph::LoadIssue)s and the rest of the file still loads.
#[derive(Error, Debug)]
pub enum GraphError {
	/// A node with this id is already in the store.
	#[error("node {0} already exists")]
	DuplicateNode(NodeId),

	/// An edge endpoint is not in the store.
	#[error("edge references unknown node {0}")]
	UnknownNode(NodeId),

	/// The CSV header could not be read.
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// A required column is absent from the header row.
	#[error("data file has no `{0}` column")]
	MissingColumn(&'static str),

	/// The browser could not fetch the data file.
	#[error("failed to fetch {url}: {reason}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Browser error.
		reason: String,
	},

	/// The server answered with a non-success status.
	#[error("fetching {url} returned HTTP {status}")]
	Http {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// A configuration value was rejected.
	#[error("configuration error: {0}")]
	Config(String),
}

/// Convenient Result type using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = GraphError::Http {
			url: "data.csv".into(),
			status: 404,
		};
		assert_eq!(err.to_string(), "fetching data.csv returned HTTP 404");

		let err = GraphError::MissingColumn("Name");
		assert!(err.to_string().contains("`Name`"));
	}

	#[test]
	fn test_error_from_csv() {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(false)
			.from_reader(&b"\xff\xfe"[..]);
		let csv_err = reader
			.records()
			.next()
			.and_then(|r| r.err())
			.expect("invalid utf-8 should fail");
		let err: GraphError = csv_err.into();
		assert!(matches!(err, GraphError::Csv(_)));
	}
}
