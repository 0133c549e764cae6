//! User record and its status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the registry at creation time
pub type UserId = u64;

/// Activation status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub is_admin: bool,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            is_admin: false,
        }
    }

    /// Mark the new user as an administrator
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// A registered user.
///
/// Fields are private so only the registry can change `status`; everything
/// else is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    age: u32,
    status: UserStatus,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(id: UserId, input: NewUser) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
            status: UserStatus::Active,
            is_admin: input.is_admin,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flip an active non-admin user to inactive.
    /// Returns false and leaves the user untouched otherwise.
    pub(crate) fn deactivate(&mut self) -> bool {
        if self.is_admin || !self.is_active() {
            return false;
        }
        self.status = UserStatus::Inactive;
        true
    }
}
