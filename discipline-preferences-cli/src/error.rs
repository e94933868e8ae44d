use core::fmt::{Debug, Display};

use discipline_preferences_api::ApiError;
use discipline_preferences_config::ConfigError;
use discipline_preferences_manager::ManagerError;

#[derive(thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Manager(#[from] ManagerError),
    #[error("failed to render output")]
    Render(#[from] core::fmt::Error),
    #[error("not logged in, run `discipline-preferences login` first")]
    NotLoggedIn,
    #[error("nothing to update, pass at least one profile field")]
    NothingToUpdate,
    #[error("submit your options before sending them")]
    NothingSubmitted,
    #[error("you have not been placed into any timetable slot of this discipline")]
    NotEnrolled,
}

// main prints errors with Debug
impl Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
