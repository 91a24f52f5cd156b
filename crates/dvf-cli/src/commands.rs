use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use anyhow::{Context, Result};
use dvf_core::DashboardSession;
use dvf_ingest::{DatasetProvider, SummaryLoader};
use dvf_model::{Department, SelectionChange, SelectionState, Year};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use dvf_cli::report::{print_departments, print_json, print_summary, print_view};
use dvf_cli::script::{HELP, SessionCommand, parse_line};
use dvf_cli::settings::Settings;

use crate::cli::{ExploreArgs, SessionArgs, SummaryArgs};

type Session = DashboardSession<Box<dyn DatasetProvider>>;

pub fn run_departments() {
    print_departments();
}

pub fn run_explore(settings: &Settings, args: &ExploreArgs) -> Result<()> {
    // Department and year pick the dataset the session opens on, so only
    // that key is fetched.
    let mut session = open_session(settings, args.department.as_ref(), args.year)?;

    let mut changes = Vec::new();
    if let Some(property_type) = &args.property_type {
        changes.push(SelectionChange::PropertyType(property_type.clone()));
    }
    if let Some(postcode) = &args.postcode {
        changes.push(SelectionChange::Postcode(Some(postcode.clone())));
    }
    if args.absolute_price {
        changes.push(SelectionChange::NormalizeByArea(false));
    }
    if !args.charts.is_empty() {
        changes.push(SelectionChange::Charts(args.charts.iter().copied().collect()));
    }

    with_spinner("Loading transactions", || {
        session.apply_all(changes).map(|_| ())
    })?;
    if let Some(wanted) = &args.postcode
        && session.state().postcode.as_ref() != Some(wanted)
    {
        warn!(postcode = %wanted, "postcode not found in the selected dataset");
    }

    if args.json {
        print_json(session.view())
    } else {
        print_view(session.view())
    }
}

pub fn run_session(settings: &Settings, args: &SessionArgs) -> Result<()> {
    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut session = open_session(settings, None, None)?;
    show(&session, args.json)?;

    for (number, line) in reader.lines().enumerate() {
        let line = line.context("read session input")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                eprintln!("line {}: {error:#}", number + 1);
                continue;
            }
        };
        match command {
            SessionCommand::Change(change) => {
                let result = with_spinner("Loading transactions", || {
                    session.apply(change).map(|_| ())
                });
                match result {
                    Ok(()) => show(&session, args.json)?,
                    Err(error) => eprintln!("line {}: {error}", number + 1),
                }
            }
            SessionCommand::Show => show(&session, args.json)?,
            SessionCommand::Reset => {
                with_spinner("Reloading transactions", || {
                    session.reset_cache().map(|_| ())
                })?;
                show(&session, args.json)?;
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }
    info!(cached = session.cache().len(), "session closed");
    Ok(())
}

pub fn run_summary(settings: &Settings, args: &SummaryArgs) -> Result<()> {
    let mut loader = SummaryLoader::new(settings.summary_source()?, settings.http_config()?);
    let summary = with_spinner("Loading summary", || loader.load()).context("load summary")?;
    print_summary(&summary, args.department.as_ref())
}

fn open_session(
    settings: &Settings,
    department: Option<&Department>,
    year: Option<Year>,
) -> Result<Session> {
    let config = settings.dashboard_config()?;
    let provider = settings.provider()?;
    let loader = SummaryLoader::new(settings.summary_source()?, settings.http_config()?);
    let initial = SelectionState::new(
        department.cloned().unwrap_or_else(|| config.default_department.clone()),
        year.unwrap_or(config.default_year),
    );
    with_spinner("Opening session", || {
        DashboardSession::open_with(config, provider, loader, initial)
    })
    .context("open session")
}

fn show(session: &Session, json: bool) -> Result<()> {
    if json {
        print_json(session.view())
    } else {
        print_view(session.view())
    }
}

fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}
