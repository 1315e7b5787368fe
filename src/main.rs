use leptos::prelude::*;
use matchup_graph_explorer::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| {
		view! { <App /> }
	})
}
