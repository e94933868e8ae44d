use discipline_preferences_api::ApiError;

use crate::options::OptionError;

#[derive(thiserror::Error, Debug)]
pub enum ManagerError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("invalid options: {0}")]
    Option(#[from] OptionError),
    #[error("no discipline loaded")]
    NoDiscipline,
    #[error("discipline has no timetable option {0:?}")]
    UnknownOption(String),
}

pub type Result<T> = core::result::Result<T, ManagerError>;
