use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use discipline_preferences_api::UserUpdate;
use discipline_preferences_config::CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Configuration file, missing files are ignored.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Overrides `api_url` from the configuration.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DISCIPLINE_PREFERENCES_PASSWORD")]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, env = "DISCIPLINE_PREFERENCES_PASSWORD")]
        password: String,
    },
    /// Forget the session.
    Logout,
    /// Show the logged in user's profile.
    Whoami,
    /// Change profile fields, fields that are not passed stay as they are.
    Profile(ProfileArgs),
    Institutions,
    Disciplines,
    /// Show a discipline's timetable, its occupancy and your options.
    Show { discipline: String },
    /// Submit ranked options for a discipline, most wanted first.
    Submit {
        discipline: String,
        #[arg(required = true)]
        options: Vec<String>,
        /// Send the preference right after submitting it.
        #[arg(long)]
        send: bool,
    },
    /// Ask to be placed according to the submitted options.
    Send { discipline: String },
    /// Leave your timetable slot and delete your preference.
    Reset { discipline: String },
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub registration_number: Option<String>,
    #[arg(long)]
    pub study_institution: Option<String>,
    #[arg(long)]
    pub faculty: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub study_year: Option<String>,
}

impl From<ProfileArgs> for UserUpdate {
    fn from(value: ProfileArgs) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            registration_number: value.registration_number,
            study_institution: value.study_institution,
            faculty: value.faculty,
            department: value.department,
            study_year: value.study_year,
        }
    }
}
