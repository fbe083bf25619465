//! Terminal output
//!
//! Records go to stdout as a table or pretty JSON; notices go through the
//! colored helpers and respect `--quiet` except for errors.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use llantera_core::FieldError;

/// How records are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Print a list of rows; an empty table prints a notice instead
pub fn print_output<T>(rows: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    if format == OutputFormat::Table && rows.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    println!("{}", render(rows, rows, format)?);
    Ok(())
}

/// Print one record as a single-row table or a JSON object
pub fn print_single<T>(row: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    println!("{}", render(row, [row], format)?);
    Ok(())
}

fn render<J, I, R>(json: &J, table: I, format: OutputFormat) -> anyhow::Result<String>
where
    J: Serialize + ?Sized,
    I: IntoIterator<Item = R>,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => Table::new(table).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(json)?,
    })
}

pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message.green());
    }
}

/// Errors are printed even in quiet mode
pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn print_warning(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message.yellow());
    }
}

pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// One indented line per rejected form field
pub fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        print_error(&format!("  {}: {}", error.field, error.message));
    }
}

/// Table cell for an optional value
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        #[tabled(rename = "RUC")]
        ruc: String,
    }

    #[test]
    fn test_output_format_values() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Table", true).unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn test_render_single_row() {
        let row = Row {
            ruc: "20123456789".to_string(),
        };

        let table = render(&row, [&row], OutputFormat::Table).unwrap();
        assert!(table.contains("RUC"));
        assert!(table.contains("20123456789"));

        let json = render(&row, [&row], OutputFormat::Json).unwrap();
        assert_eq!(json, "{\n  \"ruc\": \"20123456789\"\n}");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("987654321")), "987654321");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
