use core::fmt::{self, Write as _};
use std::path::Path;

use discipline_preferences_api::{ApiClient, Discipline, PreferenceApi as _, Session, UserUpdate};
use discipline_preferences_manager::{ManagerError, PreferenceManager, SlotOverview, Submitted};
use tracing::info;

use crate::cli::Command;
use crate::error::CliError;

/// Stands in for the browser's snack-bar.
fn print_message(message: &str) {
    println!("{message}");
}

async fn require_session(session_file: &Path) -> Result<Session, CliError> {
    Session::load(session_file)
        .await?
        .ok_or(CliError::NotLoggedIn)
}

async fn manager(
    client: ApiClient,
    session_file: &Path,
    discipline: &str,
) -> Result<PreferenceManager<ApiClient, fn(&str)>, CliError> {
    let session = require_session(session_file).await?;
    let user_id = session.user_id.clone();
    let mut manager = PreferenceManager::new(
        client.with_session(Some(session)),
        print_message as fn(&str),
        user_id,
    );
    manager.fetch(discipline).await?;
    Ok(manager)
}

pub async fn run(command: Command, client: ApiClient, session_file: &Path) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let session = Session::from(client.login(&email, &password).await?);
            session.store(session_file).await?;
            info!(user = %session.user_id, "logged in");
            println!("logged in as {}", session.user_id);
        }
        Command::Register {
            email,
            first_name,
            last_name,
            password,
        } => {
            print_message(
                &client
                    .register(&email, &first_name, &last_name, &password)
                    .await?,
            );
        }
        Command::Logout => {
            Session::clear(session_file).await?;
            println!("logged out");
        }
        Command::Whoami => {
            let session = require_session(session_file).await?;
            let client = client.with_session(Some(session.clone()));
            let user = client.user(&session.user_id).await?;
            println!("{} <{}>", user.id, user.email);
            for (label, value) in [
                ("first name", &user.first_name),
                ("last name", &user.last_name),
                ("registration number", &user.registration_number),
                ("institution", &user.study_institution),
                ("faculty", &user.faculty),
                ("department", &user.department),
                ("study year", &user.study_year),
            ] {
                if let Some(value) = value {
                    println!("  {label}: {value}");
                }
            }
        }
        Command::Profile(profile) => {
            let update = UserUpdate::from(profile);
            if update.is_empty() {
                return Err(CliError::NothingToUpdate);
            }
            let session = require_session(session_file).await?;
            let client = client.with_session(Some(session.clone()));
            print_message(&client.update_user(&session.user_id, &update).await?);
        }
        Command::Institutions => {
            for institution in client.institutions().await? {
                println!("{institution}");
            }
        }
        Command::Disciplines => {
            let session = Session::load(session_file).await?;
            for discipline in client.with_session(session).disciplines().await? {
                println!("{}\t{}", discipline.id, discipline.name);
            }
        }
        Command::Show { discipline } => {
            let manager = manager(client, session_file, &discipline).await?;
            print!("{}", render(&manager)?);
        }
        Command::Submit {
            discipline,
            options,
            send,
        } => {
            let mut manager = manager(client, session_file, &discipline).await?;
            match manager.submit_options(options).await? {
                Submitted::Created => info!(discipline = %discipline, "created preference"),
                Submitted::Updated => info!(discipline = %discipline, "updated preference"),
            }
            if send {
                manager.send_preference().await?;
            }
        }
        Command::Send { discipline } => {
            let mut manager = manager(client, session_file, &discipline).await?;
            if !manager.has_selected_preferences() {
                return Err(CliError::NothingSubmitted);
            }
            manager.send_preference().await?;
            if let Some(slot) = manager.student_option() {
                println!("placed into {}", slot.option);
            }
        }
        Command::Reset { discipline } => {
            let mut manager = manager(client, session_file, &discipline).await?;
            if !manager.can_reset() {
                return Err(CliError::NotEnrolled);
            }
            manager.reset_preferences().await?;
        }
    }
    Ok(())
}

fn render(manager: &PreferenceManager<ApiClient, fn(&str)>) -> Result<String, CliError> {
    let discipline = manager
        .discipline()
        .ok_or(ManagerError::NoDiscipline)?;
    Ok(render_discipline(
        discipline,
        &manager.timetable_overview()?,
        manager.options().as_slice(),
        manager.has_selected_preferences(),
    )?)
}

fn render_discipline(
    discipline: &Discipline,
    overview: &[SlotOverview<'_>],
    options: &[String],
    has_selected_preferences: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} ({})", discipline.name, discipline.id)?;
    let width = overview
        .iter()
        .map(|row| row.option.chars().count())
        .max()
        .unwrap_or(0);
    for row in overview {
        writeln!(
            out,
            "  {:width$}  {:>3}/{:<3} {:>5}  {}{}",
            row.option,
            row.enrolled,
            discipline.max_no_of_students_per_timetable,
            row.occupancy.to_string(),
            row.color,
            if row.mine { "  <- you" } else { "" },
        )?;
    }
    if has_selected_preferences {
        writeln!(out, "your options:")?;
        for (rank, option) in options.iter().enumerate() {
            writeln!(out, "  {}. {option}", rank + 1)?;
        }
    } else {
        writeln!(out, "no options submitted yet ({} to rank)", options.len())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use discipline_preferences_api::{Discipline, Timetable};
    use discipline_preferences_manager::{Occupancy, SlotOverview};

    use super::render_discipline;

    fn discipline() -> Discipline {
        Discipline {
            id: "d1".to_owned(),
            name: "Compilers".to_owned(),
            created: String::new(),
            timetable: vec![
                Timetable {
                    option: "Mon".to_owned(),
                    students: vec!["a".to_owned(); 3],
                },
                Timetable {
                    option: "Tuesday".to_owned(),
                    students: vec!["a".to_owned(); 8],
                },
            ],
            max_no_of_students_per_timetable: 10,
        }
    }

    fn row(option: &str, enrolled: usize, mine: bool) -> SlotOverview<'_> {
        let occupancy = Occupancy::new(enrolled, 10);
        SlotOverview {
            option,
            enrolled,
            occupancy,
            color: occupancy.color(),
            mine,
        }
    }

    #[test]
    fn renders_rows_and_ranked_options() {
        let rendered = render_discipline(
            &discipline(),
            &[row("Mon", 3, false), row("Tuesday", 8, true)],
            &["Tuesday".to_owned(), "Mon".to_owned()],
            true,
        )
        .unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Compilers (d1)");
        assert!(lines[1].starts_with("  Mon    "));
        assert!(lines[1].ends_with("30%  green"));
        assert!(lines[2].ends_with("80%  red  <- you"));
        assert_eq!(lines[3], "your options:");
        assert_eq!(lines[4], "  1. Tuesday");
        assert_eq!(lines[5], "  2. Mon");
    }

    #[test]
    fn renders_missing_preference() {
        let rendered = render_discipline(
            &discipline(),
            &[row("Mon", 3, false), row("Tuesday", 8, false)],
            &[String::new(), String::new()],
            false,
        )
        .unwrap();
        assert!(rendered.ends_with("no options submitted yet (2 to rank)\n"));
    }
}
