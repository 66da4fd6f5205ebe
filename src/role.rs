use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role flag supplied by the client. Not an authentication mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Officer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Officer, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "officer" => Ok(Role::Officer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Guard the view layer calls before add/update/delete on events
pub fn can_edit_events(role: Role) -> bool {
    matches!(role, Role::Officer | Role::Admin)
}

/// Demerit contributors are only shown to officers and admins
pub fn can_view_sensitive(role: Role) -> bool {
    matches!(role, Role::Officer | Role::Admin)
}

pub fn can_access_admin(role: Role) -> bool {
    role == Role::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_officer_and_admin_edit_events() {
        assert!(!can_edit_events(Role::User));
        assert!(can_edit_events(Role::Officer));
        assert!(can_edit_events(Role::Admin));
    }

    #[test]
    fn test_admin_panel_is_admin_only() {
        assert!(!can_access_admin(Role::User));
        assert!(!can_access_admin(Role::Officer));
        assert!(can_access_admin(Role::Admin));
        assert!(can_view_sensitive(Role::Officer));
        assert!(!can_view_sensitive(Role::User));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("Officer".parse::<Role>(), Ok(Role::Officer));
        assert_eq!(" admin ".parse::<Role>(), Ok(Role::Admin));
        assert!("judge".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::User);
    }
}
