//! Screen-scoped state holders.
//!
//! Each holder is built from a shared [`Context`](crate::Context) and owns
//! the [`StateField`](crate::StateField)s for one screen. Fields are public
//! so a view can `subscribe()` to exactly what it renders.

pub mod article;
pub mod bookmarks;
pub mod debrief;
pub mod flyers;
pub mod home;
pub mod magazines;
pub mod publication;
pub mod publications;
pub mod search;
pub mod session;

pub use article::ArticleState;
pub use bookmarks::BookmarksState;
pub use debrief::DebriefState;
pub use flyers::FlyersState;
pub use home::HomeState;
pub use magazines::MagazinesState;
pub use publication::PublicationState;
pub use publications::PublicationsState;
pub use search::SearchState;
pub use session::Session;
