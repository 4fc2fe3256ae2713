//! Static "benefits of good sleep" screen.

use std::io::Write;

use anyhow::Result;

const BENEFITS: [&str; 5] = [
    "Sharper focus, memory and decision making",
    "Steadier mood and lower stress",
    "A stronger immune system",
    "Better regulation of appetite and weight",
    "Lower risk of heart disease and diabetes",
];

pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Benefits of Good Sleep")?;
    writeln!(writer)?;
    for benefit in BENEFITS {
        writeln!(writer, "  - {benefit}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benefits_screen_has_title_and_items() {
        let mut output = Vec::new();
        run(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Benefits of Good Sleep\n\n"));
        assert_eq!(output.lines().filter(|l| l.starts_with("  - ")).count(), BENEFITS.len());
    }
}
