use serde::{Deserialize, Serialize};

/// A course that students can be placed into one of several timetable slots of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discipline {
    #[serde(rename = "_id", alias = "disciplineId")]
    pub id: String,
    pub name: String,
    /// Kept exactly as the backend sent it.
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub timetable: Vec<Timetable>,
    #[serde(default)]
    pub max_no_of_students_per_timetable: u32,
}

impl Discipline {
    #[must_use]
    pub fn slot(&self, option: &str) -> Option<&Timetable> {
        self.timetable.iter().find(|slot| slot.option == option)
    }

    /// The slot `user_id` has been placed into, if any.
    #[must_use]
    pub fn slot_of_student(&self, user_id: &str) -> Option<&Timetable> {
        self.timetable
            .iter()
            .find(|slot| slot.students.iter().any(|student| student == user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub option: String,
    #[serde(default)]
    pub students: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub discipline: String,
    pub user: String,
    /// Ranked, most wanted first.
    pub options: Vec<String>,
}

/// Body of `POST /preference` and `PUT /preference`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceRequest<'a> {
    pub discipline: &'a str,
    pub user: &'a str,
    pub options: &'a [String],
}

/// Body of the requests that only name a user's preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceKey<'a> {
    pub discipline: &'a str,
    pub user: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userID", alias = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub study_institution: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub study_year: Option<String>,
}

/// Only the fields that are `Some` get sent, so untouched profile fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_year: Option<String>,
}

impl UserUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.registration_number.is_none()
            && self.study_institution.is_none()
            && self.faculty.is_none()
            && self.department.is_none()
            && self.study_year.is_none()
    }
}
