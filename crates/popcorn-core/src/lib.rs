pub mod search;
pub mod selection;
pub mod session;
pub mod state;
pub mod title;
pub mod watched;

#[cfg(test)]
pub(crate) mod test_support;

pub use search::{SearchCoordinator, SearchStatus, SearchTicket};
pub use selection::{DetailsTicket, SelectionCoordinator, SelectionError};
pub use session::{CatalogEvent, Session, SessionUpdate};
pub use state::AppState;
pub use title::{PageTitle, TitleScope};
pub use watched::{summarize, WatchedStore};
