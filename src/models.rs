use serde::{Deserialize, Serialize};

/// An extracurricular activity. Keyed by name in the store, so the name
/// itself lives outside the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Student emails in signup order, unique per activity.
    pub participants: Vec<String>,
}

/// One teacher login as it appears in the credential file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeacherCredential {
    pub username: String,
    pub password: String,
}

/// Top-level shape of the credential file: `{"teachers": [...]}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TeacherRoster {
    #[serde(default)]
    pub teachers: Vec<TeacherCredential>,
}

/// An active teacher session, handed to protected handlers via request
/// extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}
