use super::loading_ui;
use super::open_session;
use super::prompts::{prompt_rating, prompt_select, prompt_string};
use super::render;
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use popcorn_core::{SearchStatus, Session};

const MENU: [&str; 5] = [
    "Search movies",
    "Open a result",
    "Movies you watched",
    "Remove a watched movie",
    "Quit",
];

/// Interactive session: search, open details, rate, manage the watched list.
/// Nothing is kept once the session ends.
pub async fn run_browse(initial_query: Option<String>, output: &Output) -> Result<()> {
    if !loading_ui::is_interactive() {
        return Err(color_eyre::eyre::eyre!("browse needs an interactive terminal"));
    }

    let (config, mut session) = open_session()?;
    let query = initial_query.unwrap_or_else(|| config.search.initial_query.clone());
    run_query(&mut session, query, output).await;

    loop {
        output.println(format!("\n{}", session.state().page_title().current().bold()));
        match prompt_select("What next?", &MENU)? {
            Some(0) => {
                let current = session.state().search.query().to_string();
                let query = prompt_string("Search movies...", Some(&current))?;
                run_query(&mut session, query, output).await;
            }
            Some(1) => open_result(&mut session, output).await?,
            Some(2) => show_watched(&session, output),
            Some(3) => remove_watched(&mut session, output)?,
            _ => break,
        }
    }

    tracing::debug!(watched = session.state().watched.len(), "Browse session finished");
    Ok(())
}

async fn run_query(session: &mut Session, query: String, output: &Output) {
    if session.set_query(query.as_str()) {
        loading_ui::settle(session, "Loading...").await;
    }
    show_results(session, output);
}

fn show_results(session: &Session, output: &Output) {
    let search = &session.state().search;
    match search.status() {
        SearchStatus::Idle => output.info(format!(
            "Type at least {} characters to search",
            search.min_query_length()
        )),
        SearchStatus::Loading => output.info("Loading..."),
        SearchStatus::Error => {
            output.error(search.error_message().unwrap_or("Something went wrong while fetching movies"))
        }
        SearchStatus::Success => {
            output.println(render::result_count_line(search.result_count()));
            output.println(render::results_table(search.results()).to_string());
        }
    }
}

async fn open_result(session: &mut Session, output: &Output) -> Result<()> {
    let labels: Vec<String> = session
        .state()
        .search
        .results()
        .iter()
        .map(|item| format!("{} ({})", item.title, item.year))
        .collect();
    if labels.is_empty() {
        output.warn("No results to open, search first");
        return Ok(());
    }

    let Some(index) = prompt_select("Open which movie?", &labels)? else {
        return Ok(());
    };
    let imdb_id = session.state().search.results()[index].imdb_id.clone();

    session.select_movie(&imdb_id);
    loading_ui::settle(session, "Loading...").await;
    let result = details_panel(session, output);
    session.close_details();
    result
}

fn details_panel(session: &mut Session, output: &Output) -> Result<()> {
    let selection = &session.state().selection;
    if let Some(message) = selection.error_message() {
        output.error(message);
        return Ok(());
    }
    let Some(details) = selection.details() else {
        return Ok(());
    };

    output.println(format!("\n{}", session.state().page_title().current().bold()));
    output.println(render::details_table(details).to_string());

    let title = details.title.clone();
    if selection.can_rate(&session.state().watched) {
        if let Some(rating) = prompt_rating("Your rating")? {
            match session.confirm_rating(rating) {
                Ok(entry) => output.success(format!("Added {} with {} ⭐", title, entry.user_rating)),
                Err(e) => output.error(e.to_string()),
            }
        }
    } else if let Some(rating) = selection.rated_value(&session.state().watched) {
        output.info(format!("You rated this movie {} ⭐", rating));
        prompt_select("", &["← Back"])?;
    }
    Ok(())
}

fn show_watched(session: &Session, output: &Output) {
    let watched = &session.state().watched;
    if !output.is_human() {
        output.json(&render::summary_json(&watched.summary(), watched.entries()));
        return;
    }
    output.println(render::summary_line(&watched.summary()));
    if !watched.is_empty() {
        output.println(render::watched_table(watched.entries()).to_string());
    }
}

fn remove_watched(session: &mut Session, output: &Output) -> Result<()> {
    let entries: Vec<(String, String)> = session
        .state()
        .watched
        .entries()
        .iter()
        .map(|e| (e.imdb_id.clone(), format!("{} ({}) 🌟 {}", e.title, e.year, e.user_rating)))
        .collect();
    if entries.is_empty() {
        output.info("Your watched list is empty");
        return Ok(());
    }

    let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();
    if let Some(index) = prompt_select("Remove which movie?", &labels)? {
        let (imdb_id, label) = &entries[index];
        if session.remove_watched(imdb_id) > 0 {
            output.success(format!("Removed {}", label));
        }
    }
    Ok(())
}
