//! Command dispatch: wires parsed arguments into the service layer

use std::io::Read;
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::services::{RenderPlan, SearchRecord, SequenceService};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{level_widths, Step, Viewport};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree {
            file,
            json,
            nth,
            all,
        }) => _tree(file, *json, *nth, *all),
        Some(Commands::Stats { file, json, nth }) => _stats(file, *json, *nth),
        Some(Commands::Scale {
            file,
            width,
            height,
            json,
            nth,
        }) => _scale(file, *width, *height, *json, *nth),
        Some(Commands::Leaves {
            file,
            json,
            nth,
            unique,
        }) => _leaves(file, *json, *nth, *unique),
        Some(Commands::Check { file, json }) => _check(file, *json),
        Some(Commands::Icons { file, json, nth }) => _icons(file, *json, *nth),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Init { global } => _config_init(*global),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Info) => _info(),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

#[instrument]
fn _tree(file: &Path, json: bool, nth: usize, all: bool) -> CliResult<()> {
    debug!("file: {:?}, json: {}, nth: {}, all: {}", file, json, nth, all);
    let container = build_container()?;

    if all {
        let records = load_payload(&container, file)?;
        if records.is_empty() {
            output::warning("no results found in payload");
            return Ok(());
        }
        let total = records.len();
        for (i, record) in records.iter().enumerate() {
            let input = SequenceInput::from_record(record)?;
            let plan = container.derivation.plan(&input.steps)?;
            output::header(&format!("Path {} of {}", i + 1, total));
            print_metadata(&input);
            print_plan_tree(&plan);
            if i + 1 < total {
                output::info("");
            }
        }
        return Ok(());
    }

    let input = load_input(&container, file, json, nth)?;
    let plan = container.derivation.plan(&input.steps)?;
    print_plan_tree(&plan);
    Ok(())
}

#[instrument]
fn _stats(file: &Path, json: bool, nth: usize) -> CliResult<()> {
    debug!("file: {:?}, json: {}, nth: {}", file, json, nth);
    let container = build_container()?;
    let input = load_input(&container, file, json, nth)?;
    let plan = container.derivation.plan(&input.steps)?;
    let widths = level_widths(&plan.tree);

    output::info(&format!("steps:     {}", input.steps.len()));
    output::info(&format!("nodes:     {}", plan.tree.node_count()));
    output::info(&format!("depth:     {}", plan.stats.depth));
    output::info(&format!("max width: {}", plan.stats.max_width));
    output::info(&format!("widths:    {}", widths.iter().join(" ")));
    if let Some(runtime) = &input.runtime {
        output::info(&format!("runtime:   {}", runtime));
    }
    if let Some(nodes) = input.nodes_visited {
        output::info(&format!("visited:   {}", nodes));
    }
    Ok(())
}

#[instrument]
fn _scale(file: &Path, width: f64, height: f64, json: bool, nth: usize) -> CliResult<()> {
    debug!("file: {:?}, viewport: {}x{}", file, width, height);
    if width <= 0.0 || height <= 0.0 {
        return Err(CliError::InvalidArgs(
            "--width and --height must be positive".to_string(),
        ));
    }
    let container = build_container()?;
    let input = load_input(&container, file, json, nth)?;
    let plan = container
        .derivation
        .plan_for_viewport(&input.steps, Viewport::new(width, height))?;
    if let Some(scale) = plan.scale {
        output::info(&format!("{:.4}", scale));
    }
    Ok(())
}

#[instrument]
fn _leaves(file: &Path, json: bool, nth: usize, unique: bool) -> CliResult<()> {
    debug!("file: {:?}, json: {}, nth: {}, unique: {}", file, json, nth, unique);
    let container = build_container()?;
    let input = load_input(&container, file, json, nth)?;
    let plan = container.derivation.plan(&input.steps)?;
    let names = plan.tree.leaf_names();

    if unique {
        for name in names.iter().unique() {
            output::info(name);
        }
    } else {
        for name in &names {
            output::info(name);
        }
    }
    Ok(())
}

#[instrument]
fn _check(file: &Path, json: bool) -> CliResult<()> {
    debug!("file: {:?}, json: {}", file, json);
    let container = build_container()?;

    if !json {
        let steps = if is_stdin(file) {
            SequenceService::parse_lines(&read_stdin()?)?
        } else {
            container.sequences.load_plain(file)?
        };
        output::success(&format!("{} steps", steps.len()));
        return Ok(());
    }

    let records = load_payload(&container, file)?;
    output::info(&format!("{} record(s)", records.len()));
    let mut invalid = 0usize;
    for (i, record) in records.iter().enumerate() {
        match record.parse_steps() {
            Ok(steps) => {
                let mut line = format!("record {}: {} steps", i + 1, steps.len());
                if let Some(runtime) = &record.runtime {
                    line.push_str(&format!(", runtime {}", runtime));
                }
                if let Some(nodes) = record.nodes_visited {
                    line.push_str(&format!(", {} nodes visited", nodes));
                }
                output::success_detail(&line);
            }
            Err(e) => {
                invalid += 1;
                output::failure(&format!("record {}: {}", i + 1, e));
            }
        }
    }
    if invalid > 0 {
        return Err(ApplicationError::Payload {
            message: format!("{} of {} records invalid", invalid, records.len()),
        }
        .into());
    }
    Ok(())
}

#[instrument]
fn _icons(file: &Path, json: bool, nth: usize) -> CliResult<()> {
    debug!("file: {:?}, json: {}, nth: {}", file, json, nth);
    let container = build_container()?;
    let input = load_input(&container, file, json, nth)?;
    let plan = container.derivation.plan(&input.steps)?;
    let table = container.derivation.icon_table(&plan.tree);

    for (element, icon) in &table {
        output::info(&format!("{}: {}", element, icon));
    }
    let missing = container.icons.missing();
    if !missing.is_empty() {
        output::warning(&format!("no icon for: {}", missing.iter().join(", ")));
    }
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load(Some(Path::new(".")))?;
    output::info(&settings.to_toml()?);
    Ok(())
}

#[instrument]
fn _config_init(global: bool) -> CliResult<()> {
    debug!("global: {}", global);
    let container = build_container()?;
    let target = if global {
        global_config_path().ok_or_else(|| {
            CliError::Usage("cannot resolve the global config directory".to_string())
        })?
    } else {
        local_config_path(Path::new("."))
    };

    if container.fs.exists(&target) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            target.display()
        )));
    }
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !container.fs.exists(parent) {
            container
                .fs
                .create_dir_all(parent)
                .with_path_context("create config directory", parent)?;
        }
    }
    container
        .fs
        .write(&target, &Settings::template())
        .with_path_context("write config template", &target)?;
    output::action("Created", &target.display());
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&format!("global: {}{}", path.display(), marker(&path))),
        None => output::info("global: (no home directory)"),
    }
    let local = local_config_path(Path::new("."));
    output::info(&format!("local:  {}{}", local.display(), marker(&local)));
    Ok(())
}

#[instrument]
fn _info() -> CliResult<()> {
    let settings = Settings::load(Some(Path::new(".")))?;

    output::header(&format!("alchetree {}", env!("CARGO_PKG_VERSION")));

    output::info("config:");
    match global_config_path() {
        Some(path) => output::detail(&format!("global: {}{}", path.display(), marker(&path))),
        None => output::detail("global: (no home directory)"),
    }
    let local = local_config_path(Path::new("."));
    output::detail(&format!("local:  {}{}", local.display(), marker(&local)));

    output::info("layout:");
    let footprint = settings.footprint();
    output::detail(&format!("node: {}x{}", footprint.width, footprint.height));

    output::info("icons:");
    match settings.icon_dir() {
        Some(dir) => output::detail(&format!("dir:      {}", dir.display())),
        None => output::detail("dir:      (unset)"),
    }
    output::detail(&format!("fallback: {}", settings.icons.fallback));
    Ok(())
}

#[instrument]
fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    debug!("shell: {:?}", shell);
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

fn build_container() -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(Path::new(".")))?;
    Ok(ServiceContainer::new(settings))
}

fn marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not found)"
    }
}

fn is_stdin(file: &Path) -> bool {
    file == Path::new("-")
}

fn read_stdin() -> CliResult<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| InfraError::io("read stdin", e))?;
    Ok(content)
}

/// Load a JSON payload as search records, from file or stdin.
fn load_payload(container: &ServiceContainer, file: &Path) -> CliResult<Vec<SearchRecord>> {
    if is_stdin(file) {
        Ok(SequenceService::parse_payload(&read_stdin()?)?)
    } else {
        Ok(container.sequences.load_records(file)?)
    }
}

/// Input for one derivation: parsed steps plus any search metadata.
struct SequenceInput {
    steps: Vec<Step>,
    runtime: Option<String>,
    nodes_visited: Option<u64>,
}

impl SequenceInput {
    fn from_record(record: &SearchRecord) -> CliResult<Self> {
        Ok(Self {
            steps: record.parse_steps()?,
            runtime: record.runtime.clone(),
            nodes_visited: record.nodes_visited,
        })
    }
}

fn load_input(
    container: &ServiceContainer,
    file: &Path,
    json: bool,
    nth: usize,
) -> CliResult<SequenceInput> {
    if json {
        let records = load_payload(container, file)?;
        let record = select_record(&records, nth)?;
        return SequenceInput::from_record(record);
    }
    let steps = if is_stdin(file) {
        SequenceService::parse_lines(&read_stdin()?)?
    } else {
        container.sequences.load_plain(file)?
    };
    Ok(SequenceInput {
        steps,
        runtime: None,
        nodes_visited: None,
    })
}

fn select_record(records: &[SearchRecord], nth: usize) -> CliResult<&SearchRecord> {
    if nth == 0 {
        return Err(CliError::InvalidArgs("--nth is 1-based".to_string()));
    }
    records.get(nth - 1).ok_or_else(|| {
        CliError::InvalidArgs(format!(
            "--nth {} out of range, payload has {} record(s)",
            nth,
            records.len()
        ))
    })
}

fn print_plan_tree(plan: &RenderPlan) {
    if let Some(rendered) = plan.tree.display_tree() {
        // termtree's Display already ends with a newline
        print!("{}", rendered);
    }
}

fn print_metadata(input: &SequenceInput) {
    if let Some(runtime) = &input.runtime {
        output::detail(&format!("runtime: {}", runtime));
    }
    if let Some(nodes) = input.nodes_visited {
        output::detail(&format!("nodes visited: {}", nodes));
    }
}
