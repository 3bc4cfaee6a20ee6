//! Steps command for listing navigation entries of a calendar.

use std::fmt::Write;

use anyhow::Result;
use tl_core::TimeType;

/// Formats the navigation entries and duplicate units of `time_type`.
pub fn format_steps(time_type: TimeType) -> String {
    let mut output = String::new();
    for entry in time_type.navigation_functions() {
        writeln!(output, "{:<18} {}", entry.step.name(), entry.label).unwrap();
    }
    let units = time_type.duplicate_functions();
    if !units.is_empty() {
        let names: Vec<&str> = units.iter().map(|unit| unit.label()).collect();
        writeln!(output).unwrap();
        writeln!(output, "Duplicate by: {}", names.join(", ")).unwrap();
    }
    output
}

pub fn run(time_type: TimeType) -> Result<()> {
    print!("{}", format_steps(time_type));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_steps() {
        insta::assert_snapshot!(format_steps(TimeType::Numeric), @r"
        go-to-time         Go to Time
        backward           Backward
        forward            Forward
        ");
    }

    #[test]
    fn test_date_steps_include_fits_and_duplicates() {
        let output = format_steps(TimeType::Coptic);
        assert_eq!(output.lines().filter(|line| !line.is_empty()).count(), 18);
        assert!(output.contains("fit-millennium     Fit Millennium"));
        assert!(output.ends_with("Duplicate by: Day, Week, Month, Year\n"));
    }
}
