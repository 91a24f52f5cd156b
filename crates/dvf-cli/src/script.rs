//! Line commands of the interactive session.

use std::collections::BTreeSet;

use anyhow::{Context, Result, anyhow, bail};
use dvf_model::{ChartId, Department, SelectionChange, Year};

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Change(SelectionChange),
    Show,
    /// Forget cached datasets and reload the current one.
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  department <code>        select a department (06, 2A, 971)
  year <year>              select a year (2023 or \"Vendus en 2023\")
  type <property type>     select a property type
  postcode <code>|none     select or clear a postcode
  area on|off              price per m² or absolute price
  charts all|none|<list>   comma-separated charts (Carte, Fig. 1 .. Fig. 4)
  show                     print the current view
  reset                    clear the dataset cache and reload
  help                     print this help
  quit                     leave the session";

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "department" | "dep" => {
            let department = Department::new(required(verb, rest)?)?;
            SessionCommand::Change(SelectionChange::Department(department))
        }
        "year" => {
            let year = Year::parse_label(required(verb, rest)?)?;
            SessionCommand::Change(SelectionChange::Year(year))
        }
        "type" => SessionCommand::Change(SelectionChange::PropertyType(
            required(verb, rest)?.to_string(),
        )),
        "postcode" => {
            let value = required(verb, rest)?;
            let postcode = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(value.to_string())
            };
            SessionCommand::Change(SelectionChange::Postcode(postcode))
        }
        "area" => {
            let enabled = match required(verb, rest)?.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => bail!("expected on or off, got '{other}'"),
            };
            SessionCommand::Change(SelectionChange::NormalizeByArea(enabled))
        }
        "charts" => SessionCommand::Change(SelectionChange::Charts(parse_charts(required(
            verb, rest,
        )?)?)),
        "show" => SessionCommand::Show,
        "reset" => SessionCommand::Reset,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(anyhow!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// `all`, `none`, or a comma-separated list of chart labels.
pub fn parse_charts(value: &str) -> Result<BTreeSet<ChartId>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "all" => return Ok(ChartId::all().iter().copied().collect()),
        "none" => return Ok(BTreeSet::new()),
        _ => {}
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<ChartId>().context("invalid chart"))
        .collect()
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("'{verb}' needs a value");
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_commands() {
        assert_eq!(
            parse_line("department 2a").unwrap(),
            Some(SessionCommand::Change(SelectionChange::Department(
                Department::new("2A").unwrap()
            )))
        );
        assert_eq!(
            parse_line("year Vendus en 2021").unwrap(),
            Some(SessionCommand::Change(SelectionChange::Year(
                Year::new(2021).unwrap()
            )))
        );
        assert_eq!(
            parse_line("type Local industriel. commercial ou assimilé").unwrap(),
            Some(SessionCommand::Change(SelectionChange::PropertyType(
                "Local industriel. commercial ou assimilé".to_string()
            )))
        );
        assert_eq!(
            parse_line("postcode none").unwrap(),
            Some(SessionCommand::Change(SelectionChange::Postcode(None)))
        );
        assert_eq!(
            parse_line("area off").unwrap(),
            Some(SessionCommand::Change(SelectionChange::NormalizeByArea(false)))
        );
    }

    #[test]
    fn ignores_blank_and_comment_lines() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# switch to Paris").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("department 99").is_err());
        assert!(parse_line("year").is_err());
        assert!(parse_line("area maybe").is_err());
        assert!(parse_line("zoom 3").is_err());
    }

    #[test]
    fn parses_chart_lists() {
        assert_eq!(parse_charts("all").unwrap().len(), 5);
        assert!(parse_charts("none").unwrap().is_empty());
        let charts = parse_charts("Carte, Fig. 2").unwrap();
        assert_eq!(
            charts.into_iter().collect::<Vec<_>>(),
            vec![ChartId::Map, ChartId::Fig2]
        );
        assert!(parse_charts("Fig. 9").is_err());
    }
}
