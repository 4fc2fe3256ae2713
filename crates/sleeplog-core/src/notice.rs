//! Transient user-facing messages.

use std::fmt;

/// A short message shown to the user after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    MissingFields,
    InvalidFormat,
    EntrySaved,
    SignInFailed,
}

impl Notice {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFields => "Please fill in all fields",
            Self::InvalidFormat => "Invalid date or time format",
            Self::EntrySaved => "Sleep entry saved",
            Self::SignInFailed => "Sign-in failed. Please try again.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
