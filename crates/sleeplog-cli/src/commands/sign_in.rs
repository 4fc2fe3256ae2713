//! Sign-in command.
//!
//! Hands the identity provider's token through and, on success, continues to
//! the home screen.

use std::io::Write;

use anyhow::{Result, bail};
use sleeplog_core::{IdentityProvider, SignInOutcome, complete_sign_in};

use super::home;

pub fn run<W: Write>(writer: &mut W, provider: &dyn IdentityProvider) -> Result<()> {
    match complete_sign_in(provider) {
        SignInOutcome::SignedIn { next, .. } => {
            tracing::debug!(%next, "continuing after sign-in");
            writeln!(writer, "Signed in.")?;
            writeln!(writer)?;
            home::run(writer)
        }
        SignInOutcome::Failed(notice) => bail!("{notice}"),
    }
}
