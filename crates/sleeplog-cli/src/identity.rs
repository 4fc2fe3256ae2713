//! Identity provider backed by a pre-issued token.
//!
//! The actual sign-in flow runs outside this tool; the token it produced is
//! handed in on the command line, through `SLEEPLOG_ID_TOKEN`, or via the
//! `id_token` config key.

use sleeplog_core::{IdToken, IdentityError, IdentityProvider};

/// Passes a configured token through as the sign-in result.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredTokenProvider {
    token: Option<String>,
}

impl ConfiguredTokenProvider {
    /// Uses the first token that is present.
    pub fn new(cli_token: Option<&str>, config_token: Option<&str>) -> Self {
        Self {
            token: cli_token.or(config_token).map(str::to_string),
        }
    }
}

impl IdentityProvider for ConfiguredTokenProvider {
    fn sign_in(&self) -> Result<IdToken, IdentityError> {
        let token = self.token.as_deref().ok_or(IdentityError::MissingToken)?;
        IdToken::new(token).map_err(|err| IdentityError::Provider(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_token_wins_over_config() {
        let provider = ConfiguredTokenProvider::new(Some("cli"), Some("config"));
        assert_eq!(provider.sign_in().unwrap().as_str(), "cli");
    }

    #[test]
    fn falls_back_to_config_token() {
        let provider = ConfiguredTokenProvider::new(None, Some("config"));
        assert_eq!(provider.sign_in().unwrap().as_str(), "config");
    }

    #[test]
    fn missing_token_fails() {
        let provider = ConfiguredTokenProvider::new(None, None);
        assert_eq!(provider.sign_in(), Err(IdentityError::MissingToken));
    }

    #[test]
    fn blank_token_fails() {
        let provider = ConfiguredTokenProvider::new(Some("  "), None);
        assert_eq!(
            provider.sign_in(),
            Err(IdentityError::Provider(
                "identity token cannot be empty".to_string()
            ))
        );
    }
}
