use anyhow::{Context, Result, bail};
use bulkedit_core::storage::read_cells_json;
use bulkedit_core::{BulkEditSession, CellValue, Selection, Settings, Sheet, load_settings};
use tracing::{info, warn};

use crate::cli::{ApplyArgs, Cli, Command, DetectArgs, EditArgs, SelectArgs};

/// Run the parsed command. Returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    let (settings, warnings) = load_settings(cli.config.as_deref());
    for warning in warnings {
        warn!("{}", warning);
    }

    match &cli.command {
        Command::Detect(args) => detect(args, &settings),
        Command::Validate(args) => validate(args, &settings),
        Command::Apply(args) => apply(args, &settings),
    }
}

fn open_session(select: &SelectArgs, settings: &Settings) -> Result<(Sheet, BulkEditSession)> {
    let sheet = Sheet::load_file(&select.file)
        .with_context(|| format!("failed to load {}", select.file.display()))?;
    let selection = Selection::parse(&sheet, &select.column, select.rows.as_deref())?;
    let session = BulkEditSession::new(&sheet, selection, settings)?;
    Ok((sheet, session))
}

fn detect(args: &DetectArgs, settings: &Settings) -> Result<i32> {
    let config = if let Some(cells_path) = &args.cells {
        let cells = read_cells_json(cells_path)
            .with_context(|| format!("failed to read {}", cells_path.display()))?;
        settings.detect(&cells)
    } else {
        let (Some(file), Some(column)) = (&args.file, &args.column) else {
            bail!("detect needs either --cells or a FILE with --column");
        };
        let select = SelectArgs {
            file: file.clone(),
            column: column.clone(),
            rows: args.rows.clone(),
        };
        let (_, session) = open_session(&select, settings)?;
        session.config().clone()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(0)
}

fn validate(args: &EditArgs, settings: &Settings) -> Result<i32> {
    let (_, session) = open_session(&args.select, settings)?;
    let result = session.validate(&CellValue::text(args.value.as_str()));
    println!("{}", serde_json::to_string(&result)?);
    Ok(if result.is_valid() { 0 } else { 1 })
}

fn apply(args: &ApplyArgs, settings: &Settings) -> Result<i32> {
    let (mut sheet, session) = open_session(&args.edit.select, settings)?;
    let updates = session.submit(&CellValue::text(args.edit.value.as_str()))?;
    let count = sheet.apply_updates(updates)?;

    let path = match &args.output {
        Some(output) => {
            sheet
                .save_as(output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            output.clone()
        }
        None => sheet.save().context("failed to write sheet")?,
    };
    info!(cells = count, path = %path.display(), "bulk edit applied");
    println!("Updated {} cells in {}", count, path.display());
    Ok(0)
}
