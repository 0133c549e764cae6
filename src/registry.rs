//! In-memory user registry.
//!
//! Users are kept in a map ordered by id so reports list them in creation
//! order. Ids come from a counter that is never rewound, so an id is never
//! handed out twice for the lifetime of a registry.

use crate::error::ValidationError;
use crate::report;
use crate::user::{NewUser, User, UserId};
use std::collections::BTreeMap;

/// Users younger than this are rejected at creation
pub const LEGAL_AGE: u32 = 18;

#[derive(Debug)]
pub struct UserRegistry {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a regular (non-admin) user
    pub fn create_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
    ) -> Result<User, ValidationError> {
        self.create_user_with(NewUser::new(name, email, age))
    }

    /// Create an administrator
    pub fn create_admin(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
    ) -> Result<User, ValidationError> {
        self.create_user_with(NewUser::new(name, email, age).admin())
    }

    /// Create a user from a full `NewUser`.
    ///
    /// Fails when `age` is below `LEGAL_AGE`; nothing is
    /// stored and no id is consumed in that case.
    pub fn create_user_with(&mut self, input: NewUser) -> Result<User, ValidationError> {
        if input.age < LEGAL_AGE {
            return Err(ValidationError::underage());
        }

        let id = self.next_id;
        self.next_id += 1;

        let user = User::new(id, input);
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn get_user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Deactivate a user.
    ///
    /// Returns true only when the user exists, is not an administrator and
    /// was active. Any other case leaves the registry unchanged.
    pub fn deactivate_user(&mut self, id: UserId) -> bool {
        self.users
            .get_mut(&id)
            .map(|user| user.deactivate())
            .unwrap_or(false)
    }

    pub fn generate_user_report(&self) -> String {
        report::render(self.users.values())
    }

    /// Remove every user. Returns the number removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.users.len();
        self.users.clear();
        removed
    }

    /// Iterate over users in id order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserStatus;

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = UserRegistry::new();
        let a = registry.create_user("A", "a@x.com", 20).unwrap();
        let b = registry.create_user("B", "b@x.com", 20).unwrap();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
    }

    #[test]
    fn test_failed_creation_consumes_no_id() {
        let mut registry = UserRegistry::new();
        assert!(registry.create_user("Kid", "kid@x.com", 17).is_err());
        let user = registry.create_user("Adult", "adult@x.com", 18).unwrap();
        assert_eq!(user.id(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut registry = UserRegistry::new();
        registry.create_user("A", "a@x.com", 20).unwrap();
        registry.create_user("B", "b@x.com", 20).unwrap();
        assert_eq!(registry.clear_all(), 2);
        assert!(registry.is_empty());

        let c = registry.create_user("C", "c@x.com", 20).unwrap();
        assert_eq!(c.id(), 3);
        assert!(registry.get_user_by_id(1).is_none());
    }

    #[test]
    fn test_deactivate_unknown_id() {
        let mut registry = UserRegistry::new();
        assert!(!registry.deactivate_user(42));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deactivate_twice() {
        let mut registry = UserRegistry::new();
        let user = registry.create_user("A", "a@x.com", 20).unwrap();
        assert!(registry.deactivate_user(user.id()));
        assert!(!registry.deactivate_user(user.id()));
        assert_eq!(
            registry.get_user_by_id(user.id()).unwrap().status(),
            UserStatus::Inactive
        );
    }

    #[test]
    fn test_legal_age_boundary() {
        let mut registry = UserRegistry::new();
        let err = registry.create_user("A", "a@x.com", 17).unwrap_err();
        assert_eq!(err.to_string(), "the user must be of legal age");
        assert!(registry.create_user("B", "b@x.com", 18).is_ok());
        assert!(registry.create_admin("C", "c@x.com", 20).is_ok());
    }

    #[test]
    fn test_users_in_id_order() {
        let mut registry = UserRegistry::new();
        for name in ["Zed", "Amy", "Kim"] {
            registry.create_user(name, "x@x.com", 30).unwrap();
        }
        let names: Vec<&str> = registry.users().map(|u| u.name()).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Kim"]);
    }
}
