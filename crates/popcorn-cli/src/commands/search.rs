use super::loading_ui;
use super::open_session;
use super::render;
use crate::output::Output;
use color_eyre::Result;
use popcorn_core::SearchStatus;
use serde_json::json;

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    let (_config, mut session) = open_session()?;

    if !session.set_query(query.as_str()) {
        let min = session.state().search.min_query_length();
        output.warn(format!("Type at least {} characters to search", min));
        return Ok(());
    }

    loading_ui::settle(&mut session, &format!("Searching for \"{}\"...", query)).await;

    let search = &session.state().search;
    match search.status() {
        SearchStatus::Success => {
            if output.is_human() {
                output.println(render::result_count_line(search.result_count()));
                output.println(render::results_table(search.results()).to_string());
            } else {
                output.json(&json!({
                    "type": "search",
                    "query": search.query(),
                    "count": search.result_count(),
                    "results": search.results(),
                }));
            }
            Ok(())
        }
        _ => {
            let message = search
                .error_message()
                .unwrap_or("Something went wrong while fetching movies");
            Err(color_eyre::eyre::eyre!("{}", message))
        }
    }
}
