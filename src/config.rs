//! Runtime configuration, with overrides from the page's query string.
//!
//! `?data=family.csv&first_row=2` points the app at another file or shifts
//! the row numbering used for ids.

use log::warn;

use crate::error::{GraphError, Result};
use crate::graph::RowIdMapping;

/// CSV location when no `data` override is given.
pub const DEFAULT_DATA_URL: &str = "data.csv";

/// Query parameters understood by [`AppConfig::from_location`].
pub const QUERY_KEYS: [&str; 2] = ["data", "first_row"];

/// Where to load data from and how rows map to ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Where the CSV is fetched from, relative to the page.
	pub data_url: String,
	/// Row numbering used for node ids.
	pub rows: RowIdMapping,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.to_owned(),
			rows: RowIdMapping::default(),
		}
	}
}

impl AppConfig {
	/// Applies one override. Unknown keys are ignored.
	pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
		let value = value.trim();
		match key {
			"data" => {
				if value.is_empty() {
					return Err(GraphError::Config("`data` must not be empty".into()));
				}
				self.data_url = value.to_owned();
			}
			"first_row" => {
				let first_row = value.parse::<u32>().map_err(|e| {
					GraphError::Config(format!("`first_row` must be a row number: {e}"))
				})?;
				self.rows = RowIdMapping::new(first_row);
			}
			_ => {}
		}
		Ok(())
	}

	/// Defaults overridden by the current page URL. Bad values are logged and
	/// skipped.
	pub fn from_location() -> Self {
		let mut config = Self::default();
		let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) else {
			return config;
		};
		let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
			return config;
		};
		for key in QUERY_KEYS {
			if let Some(value) = params.get(key) {
				if let Err(e) = config.apply(key, &value) {
					warn!("ignoring query parameter: {}", e);
				}
			}
		}
		config
	}
}
