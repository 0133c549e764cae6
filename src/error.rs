/// Message carried by the error returned when a user is below the minimum age.
pub const UNDERAGE_MESSAGE: &str = "the user must be of legal age";

/// A validation error, either on user input or in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The error returned by user creation when the age check fails
    pub fn underage() -> Self {
        Self::new("age", UNDERAGE_MESSAGE)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
