use kinship_graph::{App, init_logging};
// Used by the library half of the package.
use {
	console_error_panic_hook as _, console_log as _, csv as _, force_graph as _, leptos_meta as _,
	leptos_router as _, log as _, serde as _, thiserror as _, wasm_bindgen as _,
	wasm_bindgen_futures as _, web_sys as _,
};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
