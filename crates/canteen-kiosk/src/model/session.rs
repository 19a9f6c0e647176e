//! The signed-in identity. The role is decided once, when the session is created, and
//! travels with it from then on.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    /// Accounts whose email contains `marker` are administrators.
    pub fn from_email(email: Option<&str>, marker: &str) -> Role {
        match email {
            Some(email) if !marker.is_empty() && email.contains(marker) => Role::Admin,
            _ => Role::Student,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Provider-assigned account id. Orders are owned by this id.
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The roll number embedded as `(ID: ...)` in the display name, or `""`.
    pub fn roll_number(&self) -> &str {
        roll_number_of(&self.display_name)
    }
}

/// `"{name} (ID: {roll})"`.
pub fn student_display_name(name: &str, roll: &str) -> String {
    format!("{} (ID: {})", name.trim(), roll.trim())
}

pub fn roll_number_of(display_name: &str) -> &str {
    const OPEN: &str = "(ID: ";
    let Some(start) = display_name.find(OPEN).map(|i| i + OPEN.len()) else {
        return "";
    };
    match display_name.rfind(')') {
        Some(end) if end >= start => &display_name[start..end],
        _ => "",
    }
}
