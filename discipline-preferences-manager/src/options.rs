use itertools::Itertools as _;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("option {0} is required")]
    Required(usize),
    #[error("You must enter a unique option ({0} is listed twice)")]
    Duplicate(String),
    #[error("there is no option number {0}")]
    OutOfRange(usize),
}

/// The editable, ranked list of timetable options a user is about to submit.
///
/// Slots may be empty while editing; [`OptionList::validate`] is what guards a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    slots: Vec<String>,
}

impl OptionList {
    /// `count` empty slots, one per timetable slot of a discipline.
    #[must_use]
    pub fn blank(count: usize) -> Self {
        Self {
            slots: vec![String::new(); count],
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn taken_elsewhere(&self, index: Option<usize>, value: &str) -> bool {
        self.slots
            .iter()
            .enumerate()
            .any(|(other, slot)| {
                Some(other) != index && !value.is_empty() && slot.trim() == value
            })
    }

    /// Stores the trimmed value, rejecting one another slot already holds.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), OptionError> {
        let value = value.into().trim().to_owned();
        if index >= self.slots.len() {
            return Err(OptionError::OutOfRange(index));
        }
        if self.taken_elsewhere(Some(index), &value) {
            return Err(OptionError::Duplicate(value));
        }
        self.slots[index] = value;
        Ok(())
    }

    pub fn push(&mut self, value: impl Into<String>) -> Result<(), OptionError> {
        let value = value.into().trim().to_owned();
        if self.taken_elsewhere(None, &value) {
            return Err(OptionError::Duplicate(value));
        }
        self.slots.push(value);
        Ok(())
    }

    /// The trimmed options in rank order, provided none is blank and none repeats.
    pub fn validate(&self) -> Result<Vec<String>, OptionError> {
        let trimmed: Vec<&str> = self.slots.iter().map(|slot| slot.trim()).collect();
        if let Some(index) = trimmed.iter().position(|slot| slot.is_empty()) {
            return Err(OptionError::Required(index));
        }
        if let Some(duplicate) = trimmed.iter().duplicates().next() {
            return Err(OptionError::Duplicate((*duplicate).to_owned()));
        }
        Ok(trimmed.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for OptionList {
    fn from(slots: Vec<String>) -> Self {
        Self { slots }
    }
}
