use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

pub const PARTNER_LOGIN_PATH: &str = "/login/partner";
pub const STUDENT_LOGIN_PATH: &str = "/login/student";
pub const ADMIN_LOGIN_PATH: &str = "/login/admin";

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard/admin";
pub const STUDENT_DASHBOARD_PATH: &str = "/dashboard/student";
pub const PARTNER_DASHBOARD_PATH: &str = "/dashboard/partner";

/// Application role carried by an [`AppUser`](crate::domain::AppUser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
    Partner,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::SuperAdmin, Role::Partner, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Partner => "partner",
            Role::Student => "student",
        }
    }

    /// Whether a user holding `self` may enter a route that requires `required`.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::SuperAdmin => matches!(self, Role::SuperAdmin),
            Role::Admin => matches!(self, Role::Admin | Role::SuperAdmin),
            Role::Partner => matches!(self, Role::Partner | Role::Admin | Role::SuperAdmin),
            Role::Student => matches!(self, Role::Student),
        }
    }

    /// Login surface used when a route requiring `self` has no signed-in user.
    pub fn login_path(self) -> &'static str {
        match self {
            Role::Admin | Role::SuperAdmin | Role::Partner => PARTNER_LOGIN_PATH,
            Role::Student => STUDENT_LOGIN_PATH,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            "partner" => Ok(Role::Partner),
            "student" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_matches_table() {
        let accepted = |required: Role| -> Vec<Role> {
            Role::ALL
                .into_iter()
                .filter(|actual| actual.satisfies(required))
                .collect()
        };

        assert_eq!(accepted(Role::SuperAdmin), vec![Role::SuperAdmin]);
        assert_eq!(accepted(Role::Admin), vec![Role::Admin, Role::SuperAdmin]);
        assert_eq!(
            accepted(Role::Partner),
            vec![Role::Admin, Role::SuperAdmin, Role::Partner]
        );
        assert_eq!(accepted(Role::Student), vec![Role::Student]);
    }

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!("SUPER_ADMIN".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!(" partner ".parse::<Role>(), Ok(Role::Partner));
        assert!("lender".parse::<Role>().is_err());
    }

    #[test]
    fn login_path_splits_students_from_staff() {
        assert_eq!(Role::Admin.login_path(), PARTNER_LOGIN_PATH);
        assert_eq!(Role::SuperAdmin.login_path(), PARTNER_LOGIN_PATH);
        assert_eq!(Role::Partner.login_path(), PARTNER_LOGIN_PATH);
        assert_eq!(Role::Student.login_path(), STUDENT_LOGIN_PATH);
    }
}
