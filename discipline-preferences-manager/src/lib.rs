//! Keeps track of the timetable options a student ranks for one discipline and of how full
//! each timetable slot already is.

pub mod error;
pub mod manager;
pub mod notifier;
pub mod occupancy;
pub mod options;

pub use error::{ManagerError, Result};
pub use manager::{PreferenceManager, SlotOverview, Submitted};
pub use notifier::Notifier;
pub use occupancy::{Occupancy, SeatColor};
pub use options::{OptionError, OptionList};
