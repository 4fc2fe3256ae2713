//! Sign-in pass-through.
//!
//! Authentication is delegated to an external identity provider. The token it
//! returns is opaque: it is not validated, refreshed or stored here.

use std::fmt;

use thiserror::Error;

use crate::notice::Notice;
use crate::route::Route;
use crate::types::ValidationError;

/// Identity provider errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The user backed out of the sign-in flow.
    #[error("sign-in was cancelled")]
    Cancelled,
    /// No token was available from the provider.
    #[error("no identity token available")]
    MissingToken,
    /// The provider rejected the sign-in.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// An opaque identity token.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::Empty { field: "identity token" });
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdToken([REDACTED])")
    }
}

/// An external sign-in flow.
pub trait IdentityProvider {
    fn sign_in(&self) -> Result<IdToken, IdentityError>;
}

/// Result of running the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Signed in; the app continues to `next`.
    SignedIn { token: IdToken, next: Route },
    /// Sign-in failed; show the notice and stay put.
    Failed(Notice),
}

/// Runs the provider's sign-in flow and decides where the app goes next.
pub fn complete_sign_in(provider: &dyn IdentityProvider) -> SignInOutcome {
    match provider.sign_in() {
        Ok(token) => {
            tracing::debug!("sign-in succeeded");
            SignInOutcome::SignedIn {
                token,
                next: Route::Home,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "sign-in failed");
            SignInOutcome::Failed(Notice::SignInFailed)
        }
    }
}
