use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::server::error::validation::ValidationError;

/// Access level of a user account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Captain,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Moderator, Role::Captain, Role::User];
    /// Roles allowed on the admin dashboard and lineup pages
    pub const STAFF: [Role; 3] = [Role::Admin, Role::Moderator, Role::Captain];
    /// Roles allowed to browse and export reports
    pub const MANAGERS: [Role; 2] = [Role::Admin, Role::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Captain => "captain",
            Self::User => "user",
        }
    }

    /// Landing page after login
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Admin | Self::Moderator => "/admin/dashboard",
            Self::Captain => "/captain/dashboard",
            Self::User => "/rider/availability",
        }
    }

    /// Admins and moderators see every team; captains only their own
    pub fn sees_all_teams(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "captain" => Ok(Self::Captain),
            "user" => Ok(Self::User),
            _ => Err(ValidationError::InvalidRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    /// Expected: every role lands on its dashboard
    #[test]
    fn maps_roles_to_home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin/dashboard");
        assert_eq!(Role::Moderator.home_path(), "/admin/dashboard");
        assert_eq!(Role::Captain.home_path(), "/captain/dashboard");
        assert_eq!(Role::User.home_path(), "/rider/availability");
    }

    /// Expected: parsing is case-insensitive and rejects unknown roles
    #[test]
    fn parses_roles() {
        assert_eq!("Captain".parse::<Role>().ok(), Some(Role::Captain));
        assert!("superuser".parse::<Role>().is_err());
    }
}
