use super::loading_ui;
use super::open_session;
use super::render;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;

pub async fn run_details(imdb_id: String, output: &Output) -> Result<()> {
    let (_config, mut session) = open_session()?;

    session.select_movie(&imdb_id);
    loading_ui::settle(&mut session, &format!("Loading {}...", imdb_id)).await;

    let selection = &session.state().selection;
    if let Some(details) = selection.details() {
        if output.is_human() {
            output.println(render::details_table(details).to_string());
        } else {
            output.json(&json!({ "type": "details", "details": details }));
        }
        return Ok(());
    }

    let message = selection
        .error_message()
        .unwrap_or("Something went wrong while fetching movies");
    Err(color_eyre::eyre::eyre!("{}: {}", imdb_id, message))
}
