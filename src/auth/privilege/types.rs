//! Privilege type definitions

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::PrivilegeError;

/// One of the three capabilities a page privilege carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeFlag {
    Read,
    Write,
    Maintain,
}

impl PrivilegeFlag {
    /// Every flag, in display order
    pub const ALL: [PrivilegeFlag; 3] = [Self::Read, Self::Write, Self::Maintain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Maintain => "maintain",
        }
    }
}

impl fmt::Display for PrivilegeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivilegeFlag {
    type Err = PrivilegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "maintain" => Ok(Self::Maintain),
            other => Err(PrivilegeError::validation(format!(
                "Unknown privilege flag: {}",
                other
            ))),
        }
    }
}

/// Read/write/maintain triple for one page.
///
/// The flags are independent; `write` without `read` is stored as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PagePrivilege {
    pub read: bool,
    pub write: bool,
    pub maintain: bool,
}

impl PagePrivilege {
    /// No permission at all
    pub const NONE: PagePrivilege = PagePrivilege {
        read: false,
        write: false,
        maintain: false,
    };

    /// Every permission
    pub const ALL: PagePrivilege = PagePrivilege {
        read: true,
        write: true,
        maintain: true,
    };

    pub fn new(read: bool, write: bool, maintain: bool) -> Self {
        Self {
            read,
            write,
            maintain,
        }
    }

    /// Read a single flag
    pub fn get(&self, flag: PrivilegeFlag) -> bool {
        match flag {
            PrivilegeFlag::Read => self.read,
            PrivilegeFlag::Write => self.write,
            PrivilegeFlag::Maintain => self.maintain,
        }
    }

    /// Set a single flag
    pub fn set(&mut self, flag: PrivilegeFlag, value: bool) {
        match flag {
            PrivilegeFlag::Read => self.read = value,
            PrivilegeFlag::Write => self.write = value,
            PrivilegeFlag::Maintain => self.maintain = value,
        }
    }

    /// Flip a single flag, leaving the other two untouched
    pub fn toggle(&mut self, flag: PrivilegeFlag) {
        let current = self.get(flag);
        self.set(flag, !current);
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Flags that are set
    pub fn flags(self) -> impl Iterator<Item = PrivilegeFlag> {
        PrivilegeFlag::ALL
            .into_iter()
            .filter(move |flag| self.get(*flag))
    }
}

impl BitOr for PagePrivilege {
    type Output = PagePrivilege;

    fn bitor(self, rhs: Self) -> Self::Output {
        PagePrivilege {
            read: self.read || rhs.read,
            write: self.write || rhs.write,
            maintain: self.maintain || rhs.maintain,
        }
    }
}

impl BitOrAssign for PagePrivilege {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl fmt::Display for PagePrivilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |on: bool, c: char| if on { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            mark(self.read, 'r'),
            mark(self.write, 'w'),
            mark(self.maintain, 'm')
        )
    }
}

/// Composite key of a role grant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrantKey {
    pub hotel_id: String,
    pub role_name: String,
    pub page_id: String,
}

impl GrantKey {
    pub fn new(hotel_id: &str, role_name: &str, page_id: &str) -> Self {
        Self {
            hotel_id: hotel_id.to_string(),
            role_name: role_name.to_string(),
            page_id: page_id.to_string(),
        }
    }
}

/// Composite key of a user override
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverrideKey {
    pub hotel_id: String,
    pub role_name: String,
    pub user_id: String,
    pub page_id: String,
}

impl OverrideKey {
    pub fn new(hotel_id: &str, role_name: &str, user_id: &str, page_id: &str) -> Self {
        Self {
            hotel_id: hotel_id.to_string(),
            role_name: role_name.to_string(),
            user_id: user_id.to_string(),
            page_id: page_id.to_string(),
        }
    }
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Roles whose grant or override supplied the flag
    pub granted_by_roles: Vec<String>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}
