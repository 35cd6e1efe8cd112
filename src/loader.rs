//! Fetches the CSV over HTTP and builds the graph store from it.

use log::info;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::config::AppConfig;
use crate::error::{GraphError, Result};
use crate::graph::{GraphStore, LoadReport, load_csv};

fn describe(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn fetch_text(url: &str) -> Result<String> {
	let fetch_err = |reason: String| GraphError::Fetch {
		url: url.to_owned(),
		reason,
	};

	let window = web_sys::window().ok_or_else(|| fetch_err("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(describe)
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(describe)
		.map_err(fetch_err)?;

	if !response.ok() {
		return Err(GraphError::Http {
			url: url.to_owned(),
			status: response.status(),
		});
	}

	let body = response.text().map_err(describe).map_err(fetch_err)?;
	JsFuture::from(body)
		.await
		.map_err(describe)
		.map_err(fetch_err)?
		.as_string()
		.ok_or_else(|| fetch_err("response body is not text".into()))
}

/// Fetches `config.data_url` and loads it into a fresh store.
pub async fn load_graph(config: &AppConfig) -> Result<(GraphStore, LoadReport)> {
	let text = fetch_text(&config.data_url).await?;
	let mut store = GraphStore::default();
	let report = load_csv(&text, config.rows, &mut store)?;
	info!(
		"loaded {} people, {} relations from {} ({} skipped)",
		report.nodes,
		report.edges,
		config.data_url,
		report.issues.len()
	);
	Ok((store, report))
}
