use crate::search::SearchCoordinator;
use crate::selection::SelectionCoordinator;
use crate::title::PageTitle;
use crate::watched::WatchedStore;
use popcorn_config::Config;

/// Everything a browsing session holds, owned by the top-level application
/// and passed down by reference.
#[derive(Debug)]
pub struct AppState {
    pub search: SearchCoordinator,
    pub selection: SelectionCoordinator,
    pub watched: WatchedStore,
}

impl AppState {
    pub fn new(min_query_length: usize, page_title: PageTitle) -> Self {
        Self {
            search: SearchCoordinator::new(min_query_length),
            selection: SelectionCoordinator::new(page_title),
            watched: WatchedStore::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.search.min_query_length,
            PageTitle::new(config.ui.default_page_title.clone()),
        )
    }

    pub fn page_title(&self) -> &PageTitle {
        self.selection.page_title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.search.min_query_length = 4;
        config.ui.default_page_title = "Popcorn".to_string();

        let mut state = AppState::from_config(&config);
        assert!(state.search.set_query("abc").is_none());
        assert!(state.search.set_query("abcd").is_some());
        assert_eq!(state.page_title().current(), "Popcorn");
        assert!(state.watched.is_empty());
    }
}
