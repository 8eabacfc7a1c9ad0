//! Authentication and authorization primitives.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification and strength checks
//! - User role definitions and role-derived permissions
//! - Login lockout policy

mod password;

pub use password::{PasswordError, hash_password, validate_password_strength, verify_password};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Failed login attempts before an account is locked.
pub const MAX_LOGIN_ATTEMPTS: i32 = 5;

/// How long a locked account stays locked.
pub const LOCKOUT_HOURS: i64 = 2;

/// User roles across the SIS and CRM sides of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to every module; bypasses record-ownership scoping.
    Admin,
    /// Course and academic-history management.
    Registrar,
    /// Finance and accounting management.
    Finance,
    /// Course management and grading.
    Instructor,
    /// CRM pipeline work; sees only records assigned to or created by them.
    SalesRep,
    /// Marketing campaigns and read-mostly access.
    Marketing,
    /// Self-service student account.
    Student,
}

impl UserRole {
    /// Parses a role from its wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "registrar" => Some(Self::Registrar),
            "finance" => Some(Self::Finance),
            "instructor" => Some(Self::Instructor),
            "sales_rep" => Some(Self::SalesRep),
            "marketing" => Some(Self::Marketing),
            "student" => Some(Self::Student),
            _ => None,
        }
    }

    /// Returns true if this role bypasses record-ownership scoping.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the permission set derived from this role.
    #[must_use]
    pub const fn permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &[
                "view_students",
                "edit_students",
                "delete_students",
                "view_finance",
                "edit_finance",
                "view_reports",
                "edit_reports",
                "view_placement",
                "edit_placement",
                "view_courses",
                "edit_courses",
                "view_users",
                "edit_users",
                "system_admin",
            ],
            Self::Registrar => &[
                "view_students",
                "edit_students",
                "view_courses",
                "edit_courses",
                "view_reports",
            ],
            Self::Finance => &[
                "view_students",
                "view_finance",
                "edit_finance",
                "view_reports",
            ],
            Self::Instructor => &["view_students", "view_courses", "edit_courses", "view_reports"],
            Self::SalesRep => &["view_students", "edit_students", "view_reports"],
            Self::Marketing => &["view_students", "view_reports"],
            Self::Student => &[],
        }
    }

    /// Returns true if the role grants the given permission.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        let perms = self.permissions();
        perms.contains(&"system_admin") || perms.contains(&permission)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Registrar => write!(f, "registrar"),
            Self::Finance => write!(f, "finance"),
            Self::Instructor => write!(f, "instructor"),
            Self::SalesRep => write!(f, "sales_rep"),
            Self::Marketing => write!(f, "marketing"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// Outcome of a failed login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutUpdate {
    /// New value of the attempt counter.
    pub attempts: i32,
    /// Lockout expiry to persist, when the threshold was reached.
    pub locked_until: Option<DateTime<Utc>>,
}

/// Returns true if a lockout timestamp is still in the future.
#[must_use]
pub fn is_locked(locked_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    locked_until.is_some_and(|until| until > now)
}

/// Computes the counter/lockout mutation for one failed password match.
///
/// The counter restarts at 1 when a previous lockout has expired; on the
/// fifth consecutive failure the account locks for two hours.
#[must_use]
pub fn register_failed_attempt(
    attempts: i32,
    locked_until: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> LockoutUpdate {
    if locked_until.is_some_and(|until| until <= now) {
        return LockoutUpdate {
            attempts: 1,
            locked_until: None,
        };
    }

    let attempts = attempts + 1;
    let locked_until = if attempts >= MAX_LOGIN_ATTEMPTS {
        Some(now + Duration::hours(LOCKOUT_HOURS))
    } else {
        None
    };

    LockoutUpdate {
        attempts,
        locked_until,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Registrar,
            UserRole::Finance,
            UserRole::Instructor,
            UserRole::SalesRep,
            UserRole::Marketing,
            UserRole::Student,
        ] {
            assert_eq!(UserRole::parse(&role.to_string()), Some(role));
        }
        assert_eq!(UserRole::parse("owner"), None);
    }

    #[test]
    fn test_only_admin_is_privileged() {
        assert!(UserRole::Admin.is_privileged());
        assert!(!UserRole::SalesRep.is_privileged());
        assert!(!UserRole::Registrar.is_privileged());
    }

    #[test]
    fn test_system_admin_implies_everything() {
        assert!(UserRole::Admin.has_permission("edit_placement"));
        assert!(UserRole::Admin.has_permission("anything_at_all"));
        assert!(!UserRole::Marketing.has_permission("edit_finance"));
    }

    #[test]
    fn test_fifth_failure_locks_for_two_hours() {
        let now = Utc::now();
        let mut attempts = 0;
        let mut locked = None;

        for i in 1..=5 {
            let update = register_failed_attempt(attempts, locked, now);
            attempts = update.attempts;
            locked = update.locked_until;
            assert_eq!(attempts, i);
            if i < 5 {
                assert!(locked.is_none());
            }
        }

        let until = locked.expect("fifth failure must lock");
        assert_eq!(until, now + Duration::hours(2));
        assert!(is_locked(locked, now));
        assert!(is_locked(locked, now + Duration::minutes(119)));
        assert!(!is_locked(locked, now + Duration::hours(2)));
    }

    #[test]
    fn test_expired_lockout_restarts_counter() {
        let now = Utc::now();
        let expired = Some(now - Duration::minutes(1));

        let update = register_failed_attempt(7, expired, now);
        assert_eq!(update.attempts, 1);
        assert!(update.locked_until.is_none());
    }
}
