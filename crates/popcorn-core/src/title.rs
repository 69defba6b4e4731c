use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Shared handle to the window/page title.
///
/// Front-ends read `current()`; coordinators change it only through a
/// `TitleScope`, which puts the default back when dropped.
#[derive(Debug, Clone)]
pub struct PageTitle {
    current: Arc<Mutex<String>>,
    default: Arc<str>,
}

impl PageTitle {
    pub fn new(default: impl Into<String>) -> Self {
        let default: String = default.into();
        Self {
            current: Arc::new(Mutex::new(default.clone())),
            default: Arc::from(default),
        }
    }

    pub fn current(&self) -> String {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn default_title(&self) -> &str {
        &self.default
    }

    /// Apply `title` until the returned scope is dropped
    pub fn enter(&self, title: impl Into<String>) -> TitleScope {
        self.set(title.into());
        TitleScope { page: self.clone() }
    }

    fn set(&self, title: String) {
        trace!(title = %title, "Setting page title");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = title;
    }

    fn reset(&self) {
        self.set(self.default.to_string());
    }
}

impl Default for PageTitle {
    fn default() -> Self {
        Self::new("usePopcorn")
    }
}

/// Active page-title override; reverts to the default on drop.
#[must_use = "the title reverts as soon as the scope is dropped"]
#[derive(Debug)]
pub struct TitleScope {
    page: PageTitle,
}

impl Drop for TitleScope {
    fn drop(&mut self) {
        self.page.reset();
    }
}
