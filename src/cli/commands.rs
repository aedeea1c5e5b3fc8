//! Command dispatch

use std::io::{self, IsTerminal};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::read_inputs;
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands, EstimateArgs, Format};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings};
use crate::domain::{compute, FieldId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::session::{self, SessionNotice};
use crate::infrastructure::traits::{FieldStore, TerminalSurface};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Estimate(args) => estimate(&container(cli)?, args),
        Commands::Watch { format } => watch(&container(cli)?, *format),
        Commands::Prices => prices(&container(cli)?),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_show(&container(cli)?),
            ConfigCommands::Init { force } => config_init(*force),
            ConfigCommands::Path => config_path(cli),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(ServiceContainer::new(settings)?)
}

/// Form values from the command line.
pub fn fields_from_args(args: &EstimateArgs) -> FieldStore {
    let mut fields = FieldStore::new();
    let text = [
        (FieldId::Area, &args.area),
        (FieldId::Baseboard, &args.baseboard),
        (FieldId::Transitions, &args.transitions),
    ];
    for (field, value) in text {
        if let Some(value) = value {
            fields.set(field, value.as_str());
        }
    }
    fields.set_checked(FieldId::OldFloor, args.old_floor);
    fields.set_checked(FieldId::Prep, args.prep);
    fields
}

#[instrument(skip(services))]
fn estimate(services: &ServiceContainer, args: &EstimateArgs) -> CliResult<()> {
    let fields = fields_from_args(args);
    debug!("estimate: {:?}", fields);

    match args.format.style() {
        Some(style) => {
            let decorated = args.format == Format::Text;
            let surface = TerminalSurface::stdout(decorated);
            services.binding(fields, surface, style).init()?;
        }
        None => {
            let result = compute(&read_inputs(&fields), services.prices());
            let renderer = services.renderer(Default::default());
            output::info(&renderer.json(&result)?);
        }
    }
    Ok(())
}

#[instrument(skip(services))]
fn watch(services: &ServiceContainer, format: Format) -> CliResult<()> {
    let style = format
        .style()
        .ok_or_else(|| CliError::Usage("watch supports text and html output".into()))?;
    let interactive = io::stdin().is_terminal();
    if interactive {
        output::hint(&session::HELP);
    }

    let surface = TerminalSurface::stdout(format == Format::Text);
    let mut binding = services.binding(FieldStore::new(), surface, style);
    let stdin = io::stdin();
    let events = session::run_session(stdin.lock(), &mut binding, |notice| match notice {
        SessionNotice::Prompt if interactive => output::prompt(">"),
        SessionNotice::Prompt => {}
        SessionNotice::Help => output::hint(&session::HELP),
        SessionNotice::Warning(msg) => output::warning(&msg),
    })?;
    debug!("watch: {} events dispatched", events);
    Ok(())
}

fn prices(services: &ServiceContainer) -> CliResult<()> {
    let fmt = services.formatter();
    let rows: Vec<(&str, String)> = services
        .prices()
        .entries()
        .map(|(category, rate)| (category.label(), fmt.format_rate(rate, category.unit())))
        .collect();
    let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    output::header(&"Price table");
    for (label, rate) in rows {
        output::detail(&format!("{label:<width$}  {rate}"));
    }
    Ok(())
}

fn config_show(services: &ServiceContainer) -> CliResult<()> {
    output::info(&services.settings.to_toml()?);
    Ok(())
}

fn config_init(force: bool) -> CliResult<()> {
    let path = config::global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "config already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_path_context("create config dir", dir)?;
    }
    std::fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
    output::success(&format!("Created {}", path.display()));
    Ok(())
}

fn config_path(cli: &Cli) -> CliResult<()> {
    output::header(&"Config files");
    match config::global_config_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not found)" };
            output::detail(&format!("global:   {}{}", path.display(), state));
        }
        None => output::detail(&"global:   (unavailable)"),
    }
    if let Some(explicit) = &cli.config {
        let path = config::expand_path(explicit);
        let state = if path.exists() { "" } else { " (not found)" };
        output::detail(&format!("explicit: {}{}", path.display(), state));
    }
    Ok(())
}
