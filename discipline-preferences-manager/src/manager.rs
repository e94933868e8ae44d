use discipline_preferences_api::{Discipline, PreferenceApi, Timetable};
use tracing::{debug, error, info};

use crate::error::{ManagerError, Result};
use crate::notifier::Notifier;
use crate::occupancy::{Occupancy, SeatColor};
use crate::options::OptionList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created,
    Updated,
}

/// One row of a discipline's timetable as it is shown to a student.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotOverview<'a> {
    pub option: &'a str,
    pub enrolled: usize,
    pub occupancy: Occupancy,
    pub color: SeatColor,
    /// The current user has been placed into this slot.
    pub mine: bool,
}

/// The current user's timetable preferences for one discipline.
///
/// Every remote failure is logged where it happens and leaves the in-memory state as it was.
pub struct PreferenceManager<A, N> {
    api: A,
    notifier: N,
    user_id: String,
    discipline: Option<Discipline>,
    options: OptionList,
    has_selected_preferences: bool,
    was_pressed: bool,
}

impl<A: PreferenceApi, N: Notifier> PreferenceManager<A, N> {
    pub fn new(api: A, notifier: N, user_id: impl Into<String>) -> Self {
        Self {
            api,
            notifier,
            user_id: user_id.into(),
            discipline: None,
            options: OptionList::default(),
            has_selected_preferences: false,
            was_pressed: false,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub const fn discipline(&self) -> Option<&Discipline> {
        self.discipline.as_ref()
    }

    pub const fn options(&self) -> &OptionList {
        &self.options
    }

    pub const fn has_selected_preferences(&self) -> bool {
        self.has_selected_preferences
    }

    fn loaded(&self) -> Result<&Discipline> {
        self.discipline.as_ref().ok_or(ManagerError::NoDiscipline)
    }

    pub async fn load_discipline(&mut self, id: &str) -> Result<&Discipline> {
        match self.api.discipline(id).await {
            Ok(discipline) => Ok(&*self.discipline.insert(discipline)),
            Err(err) => {
                error!(discipline = %id, "failed to load discipline: {err}");
                Err(err.into())
            }
        }
    }

    /// Either the user's stored options, or one blank slot per timetable slot if there are none.
    pub async fn load_user_preference(&mut self) -> Result<()> {
        let discipline = self.loaded()?;
        let discipline_id = discipline.id.clone();
        let slot_count = discipline.timetable.len();

        match self
            .api
            .user_preference(&discipline_id, &self.user_id)
            .await
        {
            Ok(Some(preference)) => {
                debug!(discipline = %discipline_id, "found stored preference");
                self.has_selected_preferences = true;
                self.options = OptionList::from(preference.options);
            }
            Ok(None) => {
                self.has_selected_preferences = false;
                self.options = OptionList::blank(slot_count);
            }
            Err(err) => {
                error!(
                    discipline = %discipline_id,
                    "failed to load user preference: {err}"
                );
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Loads the discipline and then the user's preference for it.
    pub async fn fetch(&mut self, id: &str) -> Result<()> {
        self.load_discipline(id).await?;
        self.load_user_preference().await
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        Ok(self.options.set(index, value)?)
    }

    pub fn push_option(&mut self, value: impl Into<String>) -> Result<()> {
        Ok(self.options.push(value)?)
    }

    /// Replaces the edited options and submits them. Invalid options leave the edited list as it was.
    pub async fn submit_options(&mut self, options: Vec<String>) -> Result<Submitted> {
        self.loaded()?;
        let options = OptionList::from(options);
        options.validate()?;
        self.options = options;
        self.submit().await
    }

    /// Creates the preference the first time, updates it afterwards.
    pub async fn submit(&mut self) -> Result<Submitted> {
        let discipline_id = self.loaded()?.id.clone();
        let options = self.options.validate()?;
        self.was_pressed = true;

        let (result, submitted) = if self.has_selected_preferences {
            (
                self.api
                    .update_preference(&discipline_id, &self.user_id, &options)
                    .await,
                Submitted::Updated,
            )
        } else {
            (
                self.api
                    .create_preference(&discipline_id, &self.user_id, &options)
                    .await,
                Submitted::Created,
            )
        };

        match result {
            Ok(message) => {
                self.has_selected_preferences = true;
                self.notifier.notify(&message);
                Ok(submitted)
            }
            Err(err) => {
                error!(
                    discipline = %discipline_id,
                    "failed to submit preference: {err}"
                );
                Err(err.into())
            }
        }
    }

    /// Lets the backend place the user according to the stored preference, then reloads.
    pub async fn send_preference(&mut self) -> Result<()> {
        let discipline_id = self.loaded()?.id.clone();
        match self
            .api
            .finalize_preference(&discipline_id, &self.user_id)
            .await
        {
            Ok(message) => self.notifier.notify(&message),
            Err(err) => {
                error!(
                    discipline = %discipline_id,
                    "failed to send preference: {err}"
                );
                return Err(err.into());
            }
        }
        self.fetch(&discipline_id).await
    }

    /// Undoes the placement and deletes the stored preference, then reloads.
    pub async fn reset_preferences(&mut self) -> Result<()> {
        let discipline_id = self.loaded()?.id.clone();
        let reset = self
            .api
            .reset_discipline_preferences(&discipline_id, &self.user_id)
            .await;
        let delete = self
            .api
            .delete_preference(&discipline_id, &self.user_id)
            .await;

        match &reset {
            Ok(message) => self.notifier.notify(message),
            Err(err) => error!(
                discipline = %discipline_id,
                "failed to reset preferences: {err}"
            ),
        }
        match &delete {
            Ok(message) => info!(discipline = %discipline_id, "{message}"),
            Err(err) => error!(
                discipline = %discipline_id,
                "failed to delete preference: {err}"
            ),
        }

        reset?;
        self.fetch(&discipline_id).await?;
        delete?;
        Ok(())
    }

    fn slot(&self, option: &str) -> Result<&Timetable> {
        self.loaded()?
            .slot(option)
            .ok_or_else(|| ManagerError::UnknownOption(option.to_owned()))
    }

    pub fn occupancy(&self, option: &str) -> Result<Occupancy> {
        let capacity = self.loaded()?.max_no_of_students_per_timetable;
        Ok(Occupancy::new(self.slot(option)?.students.len(), capacity))
    }

    pub fn color_for(&self, option: &str) -> Result<SeatColor> {
        Ok(self.occupancy(option)?.color())
    }

    /// The slot the current user has been placed into.
    pub fn student_option(&self) -> Option<&Timetable> {
        self.discipline
            .as_ref()
            .and_then(|discipline| discipline.slot_of_student(&self.user_id))
    }

    /// Sending only makes sense after something was submitted.
    pub const fn can_send(&self) -> bool {
        self.was_pressed
    }

    pub fn can_reset(&self) -> bool {
        self.student_option().is_some()
    }

    pub fn timetable_overview(&self) -> Result<Vec<SlotOverview<'_>>> {
        let discipline = self.loaded()?;
        Ok(discipline
            .timetable
            .iter()
            .map(|slot| {
                let occupancy = Occupancy::new(
                    slot.students.len(),
                    discipline.max_no_of_students_per_timetable,
                );
                SlotOverview {
                    option: &slot.option,
                    enrolled: slot.students.len(),
                    occupancy,
                    color: occupancy.color(),
                    mine: slot.students.iter().any(|student| *student == self.user_id),
                }
            })
            .collect())
    }
}
