//! Home screen.

use std::io::Write;

use anyhow::Result;

/// Renders the home screen with its navigation options.
pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Welcome to Better Sleep")?;
    writeln!(writer, "Are you ready to better your sleep?")?;
    writeln!(writer)?;
    writeln!(writer, "  sleeplog benefits   Learn About Sleep Benefits")?;
    writeln!(writer, "  sleeplog add        Add New Sleep Entry")?;
    writeln!(writer, "  sleeplog list       View Sleep Data")?;
    writeln!(writer, "  sleeplog sign-in    Sign Up")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn home_screen_lists_navigation() {
        let mut output = Vec::new();
        run(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Welcome to Better Sleep
        Are you ready to better your sleep?

          sleeplog benefits   Learn About Sleep Benefits
          sleeplog add        Add New Sleep Entry
          sleeplog list       View Sleep Data
          sleeplog sign-in    Sign Up
        ");
    }
}
