pub mod client;
pub mod error;
pub mod models;
pub mod session;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use hyper::StatusCode;
pub use models::{Discipline, Preference, Timetable, User, UserUpdate};
pub use session::Session;

/// The discipline and preference endpoints of the backend.
///
/// Write operations answer with a human readable message that is meant to be shown to the user.
#[allow(async_fn_in_trait)]
pub trait PreferenceApi {
    async fn discipline(&self, id: &str) -> Result<Discipline>;

    async fn disciplines(&self) -> Result<Vec<Discipline>>;

    /// `Ok(None)` if `user` never submitted a preference for `discipline`.
    async fn user_preference(&self, discipline: &str, user: &str) -> Result<Option<Preference>>;

    async fn create_preference(
        &self,
        discipline: &str,
        user: &str,
        options: &[String],
    ) -> Result<String>;

    async fn update_preference(
        &self,
        discipline: &str,
        user: &str,
        options: &[String],
    ) -> Result<String>;

    /// Asks the backend to place the user into a slot according to the stored preference.
    async fn finalize_preference(&self, discipline: &str, user: &str) -> Result<String>;

    /// Takes the user out of whatever slot they were placed into.
    async fn reset_discipline_preferences(&self, discipline: &str, user: &str) -> Result<String>;

    async fn delete_preference(&self, discipline: &str, user: &str) -> Result<String>;
}
