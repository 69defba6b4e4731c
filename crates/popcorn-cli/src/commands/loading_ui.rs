use indicatif::{ProgressBar, ProgressStyle};
use popcorn_core::Session;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while catalog calls are pending. Falls back to structured
/// logging when not attached to a terminal.
pub struct LoadingUI {
    spinner: Option<ProgressBar>,
}

impl LoadingUI {
    pub fn start(message: &str) -> Self {
        if !is_interactive() {
            tracing::info!(operation = "loading", message = %message, "Waiting for catalog");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Apply every pending catalog call behind a spinner
pub async fn settle(session: &mut Session, message: &str) {
    if session.pending() == 0 {
        return;
    }
    let ui = LoadingUI::start(message);
    session.settle().await;
    ui.finish();
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
