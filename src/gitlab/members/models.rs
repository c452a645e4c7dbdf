//! User and membership data models

use serde::{Deserialize, Serialize};

use crate::cli::AccessArg;

/// User data from GitLab API
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
}

/// Direct member of a project
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProjectMember {
    pub id: u64,
    pub username: String,
    pub access_level: u32,
}

/// Permission tier of a project or group member
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl AccessLevel {
    /// Numeric value used by the API
    pub fn value(self) -> u32 {
        match self {
            AccessLevel::Guest => 10,
            AccessLevel::Reporter => 20,
            AccessLevel::Developer => 30,
            AccessLevel::Maintainer => 40,
            AccessLevel::Owner => 50,
        }
    }
}

impl From<AccessArg> for AccessLevel {
    fn from(arg: AccessArg) -> Self {
        match arg {
            AccessArg::Reporter => AccessLevel::Reporter,
            AccessArg::Maintainer => AccessLevel::Maintainer,
            AccessArg::Owner => AccessLevel::Owner,
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AccessLevel::Guest => "guest",
            AccessLevel::Reporter => "reporter",
            AccessLevel::Developer => "developer",
            AccessLevel::Maintainer => "maintainer",
            AccessLevel::Owner => "owner",
        };
        write!(f, "{} ({})", name, self.value())
    }
}

/// Body of `POST /projects/:id/members`
#[derive(Serialize, Debug)]
pub(crate) struct AddMember {
    pub user_id: u64,
    pub access_level: u32,
}
