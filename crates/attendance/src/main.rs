//! `attend` - CLI for the attendance tracker
//!
//! Provides the interactive attendance terminal plus one-shot commands for
//! marking attendance and browsing or exporting records as admin.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::warn;

use attendance::app::Event;
use attendance::auth::RestAuth;
use attendance::cli::{
    Cli, Command, ConfigCommand, ExportCommand, ListCommand, MarkCommand, StatsCommand,
};
use attendance::export;
use attendance::filter::Scope;
use attendance::location::{FixedLocator, LocationProvider, PermissionState, UnavailableLocator};
use attendance::store::RestStore;
use attendance::{init_logging, App, Config, MarkInput, RecordFilter, Screen, WorkOption};

/// The app wired to its live collaborators.
type LiveApp = App<RestStore, RestAuth, Box<dyn LocationProvider>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Run => run_interactive(&config).await,
        Command::Mark(cmd) => handle_mark(&config, &cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Export(cmd) => handle_export(&config, &cmd).await,
        Command::Stats(cmd) => handle_stats(&config, &cmd).await,
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn build_app(config: &Config) -> anyhow::Result<LiveApp> {
    let store = RestStore::new(
        config.require_base_url()?,
        &config.remote.collection,
        config.remote.api_key.clone(),
    )?;
    let auth = RestAuth::new(config.require_auth_url()?, config.remote.api_key.clone())?;
    let locator: Box<dyn LocationProvider> = match config.coordinates() {
        Some(fix) => Box::new(FixedLocator::new(fix)),
        None => Box::new(UnavailableLocator),
    };
    Ok(App::new(store, auth, locator, config.location_wait()))
}

/// Read one trimmed line from stdin after printing a prompt.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

fn admin_password() -> anyhow::Result<String> {
    match std::env::var("ATTEND_ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => Ok(prompt("Password")?),
    }
}

async fn sign_in_admin(
    app: &mut LiveApp,
    config: &Config,
    email_flag: Option<&str>,
) -> anyhow::Result<()> {
    let email = email_flag
        .map(str::to_string)
        .or_else(|| config.admin.email.clone())
        .context("no admin email configured; pass --email or set [admin] email")?;
    let password = admin_password()?;
    app.sign_in(&email, &password).await?;
    Ok(())
}

async fn handle_mark(config: &Config, cmd: &MarkCommand) -> anyhow::Result<()> {
    let mut app = build_app(config)?;
    if let Err(error) = app.refresh().await {
        warn!(%error, "could not load existing records; duplicate check may be incomplete");
    }

    let input = MarkInput::new(cmd.name.clone(), cmd.option.map(WorkOption::from));
    let record = app.mark(&input).await?;

    println!(
        "Attendance marked for {} ({})",
        record.employee_name, record.work_option
    );
    println!("  Date:     {}  {}", record.date, record.time);
    println!("  Location: {}", record.location);
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut app = build_app(config)?;
    sign_in_admin(&mut app, config, cmd.email.as_deref()).await?;

    let filter = cmd.filter.to_filter();
    let records = app.filtered(&filter)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No attendance records found");
    } else {
        render_table(&records);
    }
    Ok(())
}

async fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let mut app = build_app(config)?;
    sign_in_admin(&mut app, config, cmd.email.as_deref()).await?;

    let filter = cmd.filter.to_filter();
    let records = app.filtered(&filter)?;
    let dir = cmd.output.clone().unwrap_or_else(|| config.export_dir());
    let path = export::write_csv(&dir, &records)?;

    println!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(())
}

async fn handle_stats(config: &Config, cmd: &StatsCommand) -> anyhow::Result<()> {
    let mut app = build_app(config)?;
    sign_in_admin(&mut app, config, cmd.email.as_deref()).await?;

    let summary = app.summary()?;
    if cmd.json {
        let status = serde_json::json!({
            "today_count": summary.today_count,
            "total_count": summary.total_count,
            "last_update": summary.last_update,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Today's Attendance: {}", summary.today_count);
        println!("Total Records:      {}", summary.total_count);
        println!("Last Update:        {}", last_update_text(&summary));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let set_or_not = |present: bool| if present { "set" } else { "not set" };
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Remote]");
                println!(
                    "  Base URL:    {}",
                    config
                        .remote
                        .base_url
                        .as_ref()
                        .map_or_else(|| "not set".to_string(), ToString::to_string)
                );
                println!("  Collection:  {}", config.remote.collection);
                println!(
                    "  API key:     {}",
                    set_or_not(config.remote.api_key.is_some())
                );
                println!();
                println!("[Admin]");
                println!(
                    "  Email:       {}",
                    config.admin.email.as_deref().unwrap_or("not set")
                );
                println!();
                println!("[Location]");
                println!("  Enabled:     {}", config.location.enabled);
                println!(
                    "  Coordinates: {}",
                    set_or_not(config.coordinates().is_some())
                );
                println!("  Timeout:     {}s", config.location.timeout_secs);
                println!();
                println!("[Export]");
                println!("  Output dir:  {}", config.export_dir().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

async fn run_interactive(config: &Config) -> anyhow::Result<()> {
    let mut app = build_app(config)?;
    if let Err(error) = app.refresh().await {
        warn!(%error, "could not load attendance records");
    }

    println!("Attendance Tracker");
    loop {
        match app.screen() {
            Screen::RoleSelect => {
                println!();
                println!("  1) Employee - mark your attendance");
                println!("  2) Admin    - view attendance records");
                println!("  q) Quit");
                match prompt("Select")?.as_str() {
                    "1" => app.apply(Event::ChooseEmployee),
                    "2" => app.apply(Event::ChooseAdmin),
                    "q" => break,
                    _ => {}
                }
            }
            Screen::MarkAttendance => mark_screen(&mut app).await?,
            Screen::Success => {
                println!();
                println!("Attendance marked successfully. Have a great day!");
                let _ = prompt("Press Enter to continue")?;
                app.apply(Event::Back);
            }
            Screen::AlreadyMarked => {
                println!();
                println!("You have already marked your attendance today.");
                let _ = prompt("Press Enter to continue")?;
                app.apply(Event::Back);
            }
            Screen::AdminLogin => {
                println!();
                println!("Admin Login");
                let email = prompt("Email (blank to go back)")?;
                if email.is_empty() {
                    app.apply(Event::Back);
                    continue;
                }
                let password = prompt("Password")?;
                if let Err(error) = app.sign_in(&email, &password).await {
                    println!("{error}");
                }
            }
            Screen::Dashboard => dashboard_screen(&mut app, config).await?,
        }
    }
    Ok(())
}

async fn mark_screen(app: &mut LiveApp) -> anyhow::Result<()> {
    println!();
    println!(
        "Mark Your Attendance - {}",
        Local::now().format("%A, %B %-d, %Y")
    );
    match app.locator().permission_state() {
        PermissionState::Granted => {
            println!("Location tracking enabled - your coordinates will be recorded");
        }
        PermissionState::Prompt => println!("Location access will be requested on submit"),
        PermissionState::Denied => {
            println!("Location not available - attendance will be marked without location");
        }
    }

    let name = prompt("Full name (blank to go back)")?;
    if name.is_empty() {
        app.apply(Event::Back);
        return Ok(());
    }

    println!("  1) Work From Home");
    println!("  2) Work From Office");
    println!("  3) On Leave");
    let option = match prompt("Attendance type [1-3]")?.as_str() {
        "1" => Some(WorkOption::WorkFromHome),
        "2" => Some(WorkOption::WorkFromOffice),
        "3" => Some(WorkOption::OnLeave),
        _ => None,
    };

    println!("Submitting...");
    match app.mark(&MarkInput::new(name, option)).await {
        // Success and duplicate already moved the screen.
        Ok(record) => println!("Recorded at {}", record.time),
        Err(attendance::Error::AlreadyMarked { .. }) => {}
        Err(error) if error.is_validation() => println!("{error}"),
        Err(error) => {
            warn!(%error, "attendance submission failed");
            println!("Error saving attendance. Please try again.");
        }
    }
    Ok(())
}

async fn dashboard_screen(app: &mut LiveApp, config: &Config) -> anyhow::Result<()> {
    let mut filter = RecordFilter::new();

    while app.screen() == Screen::Dashboard {
        render_dashboard(app, &filter)?;

        println!();
        println!(
            "  s <text> search | d <date> filter date | t today only | a all records | c clear"
        );
        println!("  e export CSV | r refresh | o logout");
        let line = prompt("Command")?;
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line.as_str(), ""),
        };

        match cmd {
            "s" => filter.search = rest.to_string(),
            "d" => {
                filter.date = if rest.is_empty() {
                    None
                } else {
                    Some(rest.to_string())
                };
            }
            "t" => filter = filter.today_only(),
            "a" => filter.scope = Scope::All,
            "c" => filter = RecordFilter::new(),
            "e" => {
                let records = app.filtered(&filter)?;
                let path = export::write_csv(&config.export_dir(), &records)?;
                println!("Exported {} record(s) to {}", records.len(), path.display());
            }
            "r" => {
                if let Err(error) = app.refresh().await {
                    println!("Could not refresh records. Please try again. ({error})");
                }
            }
            "o" => app.sign_out().await,
            _ => {}
        }
    }
    Ok(())
}

fn last_update_text(summary: &attendance::Summary) -> String {
    summary.last_update.map_or_else(
        || "No data".to_string(),
        |t| t.with_timezone(&Local).format("%H:%M").to_string(),
    )
}

fn render_dashboard(app: &LiveApp, filter: &RecordFilter) -> anyhow::Result<()> {
    let summary = app.summary()?;
    println!();
    println!(
        "Today's Attendance: {}   Total Records: {}   Last Update: {}",
        summary.today_count,
        summary.total_count,
        last_update_text(&summary)
    );

    let records = app.filtered(filter)?;
    if records.is_empty() {
        println!();
        println!("No attendance records found");
    } else {
        render_table(&records);
    }
    Ok(())
}

fn render_table(records: &[&attendance::AttendanceRecord]) {
    println!();
    println!(
        "{:<22} {:<18} {:<18} {:<12} {:<10} {}",
        "Employee Name", "Username", "Work Option", "Date", "Time", "Location"
    );
    for record in records {
        println!(
            "{:<22} {:<18} {:<18} {:<12} {:<10} {}",
            record.employee_name,
            record.username,
            record.work_option.to_string(),
            record.date,
            record.time,
            record.location
        );
    }
}
