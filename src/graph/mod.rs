//! Family graph core: building, traversal and filtered views.
//!
//! Everything here is plain Rust with no browser dependency, so it runs and
//! is tested on the host as well as in the WASM bundle.

mod builder;
mod search;
mod store;
mod traversal;
mod types;
mod view;

pub use builder::{
	ATE_COLUMN, DEFAULT_FIRST_ROW, KUYA_COLUMN, LoadIssue, LoadReport, NAME_COLUMN, PersonRecord,
	RowIdMapping, build_graph, load_csv, read_records,
};
pub use search::{Explorer, FilterState, SearchOutcome, resolve_label};
pub use store::GraphStore;
pub use traversal::{Direction, traverse};
pub use types::{Edge, Node, NodeId, Relation};
pub use view::{GraphView, ViewSnapshot, Visibility, displays_edge, visible_nodes};
