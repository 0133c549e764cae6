//! In-memory user registry with a small command-line front end.
//!
//! ```
//! use userreg::UserRegistry;
//!
//! let mut registry = UserRegistry::new();
//! let alice = registry.create_user("Alice", "alice@email.com", 28).unwrap();
//! assert!(registry.deactivate_user(alice.id()));
//! assert!(registry.create_user("Kid", "kid@email.com", 17).is_err());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod registry;
pub mod report;
pub mod user;

pub use error::ValidationError;
pub use registry::UserRegistry;
pub use user::{NewUser, User, UserId, UserStatus};
